//! Template strings for scripting runtimes.
//!
//! A template string is a literal that may embed `%expression%` placeholders,
//! parsed once at load time and rendered against a per-evaluation context at
//! runtime. The expression sub-language itself is external: the runtime
//! supplies an [`ExpressionParser`] collaborator at parse time and this crate
//! stores the handles it returns.
//!
//! # Pipeline
//!
//! ```text
//! raw string → Template::parse / build_many → segments → evaluate(ctx) → String
//! ```
//!
//! Parsing resolves every placeholder eagerly, so a successfully built
//! template evaluates without error paths. Evaluation memoizes the rendered
//! string for the most recently seen context identity.
//!
//! # Example
//!
//! ```
//! use varstring::{ContextId, EvalContext, ExprError, Expression, ExpressionParser,
//!                 Template, TracingSink};
//! use std::sync::Arc;
//!
//! struct NoExpressions;
//!
//! impl ExpressionParser for NoExpressions {
//!     fn parse(&self, _text: &str) -> Result<Option<Arc<dyn Expression>>, ExprError> {
//!         Ok(None)
//!     }
//! }
//!
//! struct Event {
//!     id: ContextId,
//! }
//!
//! impl EvalContext for Event {
//!     fn context_id(&self) -> ContextId {
//!         self.id
//!     }
//! }
//!
//! let template = Template::parse("100%% done", &NoExpressions, &TracingSink).unwrap();
//! assert!(template.is_simple());
//!
//! let event = Event { id: ContextId::new() };
//! assert_eq!(template.evaluate(&event), "100% done");
//! ```

pub mod batch;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod expr;
pub mod formatter;
pub mod template;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{build_many, build_many_from_quoted};
pub use context::{ContextId, EvalContext};
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use error::{ParseError, ParseResult};
pub use expr::{ExprError, Expression, ExpressionParser};
pub use template::{MARKER, Segment, Template};
pub use value::Value;
