//! Template strings: literals with `%expression%` placeholders.
//!
//! A raw string is parsed once, at load time, into an ordered sequence of
//! segments; every placeholder is resolved to an expression handle right
//! there, so a successfully built [`Template`] can always be evaluated
//! without failure. Evaluation renders the segments against an evaluation
//! context and memoizes the result for the most recently seen context
//! identity, since a rule body commonly reads the same template several
//! times while handling one event.
//!
//! Syntax: `%` delimits placeholders, `%%` renders as one literal `%`,
//! markers pair strictly left to right, and the text between a pair is
//! forwarded verbatim to the expression parser (no nesting).

use core::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::context::{ContextId, EvalContext};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ParseError, ParseResult};
use crate::expr::{Expression, ExpressionParser};
use crate::formatter;

/// The placeholder delimiter.
pub const MARKER: char = '%';

/// One piece of a parsed template.
pub enum Segment {
    Literal(String),
    Expr(Arc<dyn Expression>),
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Segment::Expr(expr) => f.debug_tuple("Expr").field(&expr.debug_text()).finish(),
        }
    }
}

enum Repr {
    /// No placeholders; evaluation is a constant-time return of the literal.
    Simple(String),
    /// Non-empty, conceptually alternating segments. Consecutive literals
    /// are merged at parse time; an escaped marker contributes a `%` to the
    /// surrounding literal, never its own segment.
    Compound(Vec<Segment>),
}

/// The memo pair. Held behind one lock so the context identity and the
/// rendered string are always observed together.
struct CachedEval {
    context: ContextId,
    rendered: String,
}

/// A parsed template string.
///
/// Immutable after construction apart from the single-slot evaluation cache.
/// Lives as long as the rule or script artifact that owns it.
pub struct Template {
    repr: Repr,
    cache: Mutex<Option<CachedEval>>,
}

/// Outcome of scanning a raw template, before it is wrapped in a [`Template`].
///
/// `Degraded` is the non-fatal unterminated-placeholder outcome: the scan
/// has already reported it to the diagnostic sink, and the payload is the
/// literal text collected up to the unterminated marker. The single-template
/// constructor keeps it as a simple template; the batch constructors drop
/// the slot.
pub(crate) enum Scanned {
    Simple(String),
    Compound(Vec<Segment>),
    Degraded(String),
}

pub(crate) fn scan(
    raw: &str,
    expressions: &dyn ExpressionParser,
    diagnostics: &dyn DiagnosticSink,
) -> ParseResult<Scanned> {
    if !raw.contains(MARKER) {
        return Ok(Scanned::Simple(raw.to_string()));
    }
    debug!(template = raw, "scanning template for placeholders");

    let mut segments: Vec<Segment> = Vec::new();
    let mut literal = String::new();
    let mut cursor = 0;
    loop {
        let Some(open) = raw[cursor..].find(MARKER).map(|i| cursor + i) else {
            literal.push_str(&raw[cursor..]);
            break;
        };
        literal.push_str(&raw[cursor..open]);
        let Some(close) = raw[open + 1..].find(MARKER).map(|i| open + 1 + i) else {
            let err = ParseError::UnterminatedPlaceholder {
                raw: raw.to_string(),
            };
            diagnostics.report(&err.to_string());
            // Keep the literal text collected so far, drop the marker and
            // everything after it.
            let mut kept: String = segments
                .iter()
                .filter_map(|segment| match segment {
                    Segment::Literal(text) => Some(text.as_str()),
                    Segment::Expr(_) => None,
                })
                .collect();
            kept.push_str(&literal);
            return Ok(Scanned::Degraded(kept));
        };
        if close == open + 1 {
            // Escape form: %% renders as one literal marker.
            literal.push(MARKER);
        } else {
            let text = &raw[open + 1..close];
            let expr = match expressions.parse(text) {
                Ok(Some(expr)) => expr,
                Ok(None) => {
                    return Err(ParseError::MalformedExpression {
                        text: text.to_string(),
                        source: None,
                    });
                }
                Err(source) => {
                    return Err(ParseError::MalformedExpression {
                        text: text.to_string(),
                        source: Some(source),
                    });
                }
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Expr(expr));
        }
        cursor = close + 1;
    }
    if segments.is_empty() {
        // Only escapes, e.g. "100%%": the template is effectively a literal.
        return Ok(Scanned::Simple(literal));
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(Scanned::Compound(segments))
}

impl Template {
    /// Parses a raw template string.
    ///
    /// Placeholder text is resolved through `expressions` here and never
    /// again; a placeholder the expression parser rejects is a fatal
    /// [`ParseError`]. An unterminated placeholder is non-fatal: it is
    /// reported through `diagnostics` and the template degrades to a simple
    /// literal holding the text collected before the unterminated marker.
    pub fn parse(
        raw: &str,
        expressions: &dyn ExpressionParser,
        diagnostics: &dyn DiagnosticSink,
    ) -> ParseResult<Self> {
        Ok(match scan(raw, expressions, diagnostics)? {
            Scanned::Simple(literal) | Scanned::Degraded(literal) => Self::simple(literal),
            Scanned::Compound(segments) => Self::compound(segments),
        })
    }

    pub(crate) fn simple(literal: String) -> Self {
        Self {
            repr: Repr::Simple(literal),
            cache: Mutex::new(None),
        }
    }

    pub(crate) fn compound(segments: Vec<Segment>) -> Self {
        Self {
            repr: Repr::Compound(segments),
            cache: Mutex::new(None),
        }
    }

    /// True iff the template contains no expression placeholders.
    pub fn is_simple(&self) -> bool {
        matches!(self.repr, Repr::Simple(_))
    }

    /// Renders the template against `ctx`.
    ///
    /// The result is cached as long as this is called with the same context
    /// identity; the memo is keyed on identity alone, so a context identity
    /// is expected to be evaluated at most once per round.
    pub fn evaluate(&self, ctx: &dyn EvalContext) -> String {
        let segments = match &self.repr {
            Repr::Simple(literal) => return literal.clone(),
            Repr::Compound(segments) => segments,
        };
        let id = ctx.context_id();
        {
            let slot = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = slot.as_ref()
                && cached.context == id
            {
                debug!(context = ?id, "returning cached evaluation");
                return cached.rendered.clone();
            }
        }
        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expr(expr) => {
                    if expr.is_single() {
                        out.push_str(&formatter::format_value(&expr.get_single(ctx)));
                    } else {
                        out.push_str(&formatter::join_values(
                            &expr.get_array(ctx),
                            expr.join_word(),
                        ));
                    }
                }
            }
        }
        let mut slot = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CachedEval {
            context: id,
            rendered: out.clone(),
        });
        out
    }

    /// Quoted rendering for diagnostics and tooling.
    ///
    /// With a context this is the quoted [`evaluate`](Self::evaluate) result.
    /// Without one, placeholders render as `%` + the expression's debug text
    /// + `%`; nothing is evaluated and the cache is left untouched.
    pub fn debug_text(&self, ctx: Option<&dyn EvalContext>) -> String {
        let segments = match &self.repr {
            Repr::Simple(literal) => return format!("\"{literal}\""),
            Repr::Compound(segments) => segments,
        };
        if let Some(ctx) = ctx {
            return format!("\"{}\"", self.evaluate(ctx));
        }
        let mut out = String::from("\"");
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expr(expr) => {
                    out.push(MARKER);
                    out.push_str(&expr.debug_text());
                    out.push(MARKER);
                }
            }
        }
        out.push('"');
        out
    }

    #[cfg(test)]
    pub(crate) fn segments(&self) -> &[Segment] {
        match &self.repr {
            Repr::Simple(_) => &[],
            Repr::Compound(segments) => segments,
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.debug_text(None))
    }
}
