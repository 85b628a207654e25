//! Batch construction of templates with per-item failure isolation.
//!
//! Script loaders hand over every template of an artifact at once; one
//! malformed item must not block the rest. A fatal parse error on item `i`
//! is reported to the diagnostic sink and leaves slot `i` empty, as does a
//! template degraded by an unterminated placeholder (which the scan has
//! already reported on its own).

use tracing::debug;

use crate::diagnostics::DiagnosticSink;
use crate::expr::ExpressionParser;
use crate::template::{Scanned, Template, scan};

/// Parses each raw string into a template. The result has the same length
/// as the input; failed slots are `None`.
pub fn build_many<S: AsRef<str>>(
    raws: &[S],
    expressions: &dyn ExpressionParser,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<Option<Template>> {
    debug!(count = raws.len(), "building templates");
    raws.iter()
        .map(|raw| build_one(raw.as_ref(), expressions, diagnostics))
        .collect()
}

/// Like [`build_many`], but strips exactly the first and last character of
/// each input first. The caller guarantees these are quote delimiters.
pub fn build_many_from_quoted<S: AsRef<str>>(
    raws: &[S],
    expressions: &dyn ExpressionParser,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<Option<Template>> {
    debug!(count = raws.len(), "building templates from quoted strings");
    raws.iter()
        .map(|raw| build_one(strip_quotes(raw.as_ref()), expressions, diagnostics))
        .collect()
}

fn build_one(
    raw: &str,
    expressions: &dyn ExpressionParser,
    diagnostics: &dyn DiagnosticSink,
) -> Option<Template> {
    match scan(raw, expressions, diagnostics) {
        Ok(Scanned::Simple(literal)) => Some(Template::simple(literal)),
        Ok(Scanned::Compound(segments)) => Some(Template::compound(segments)),
        Ok(Scanned::Degraded(_)) => None,
        Err(err) => {
            diagnostics.report(&err.to_string());
            None
        }
    }
}

fn strip_quotes(raw: &str) -> &str {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
