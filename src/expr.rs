//! Contracts for the expression sub-language collaborators.
//!
//! The grammar and semantics of placeholder expressions live outside this
//! crate; the runtime supplies an [`ExpressionParser`] at template-parse time
//! and the parsed [`Expression`] handles are stored inside the template's
//! segments, immutable and shared from then on.

use std::sync::Arc;

use thiserror::Error;

use crate::context::EvalContext;
use crate::value::Value;

/// Failure reported by the expression parser for a placeholder it could not
/// make sense of.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ExprError {
    pub message: String,
}

impl ExprError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A parsed placeholder expression.
///
/// `is_single` discriminates between the two evaluation shapes: single-valued
/// expressions resolve through `get_single`, multi-valued ones through
/// `get_array` together with their declared join word.
pub trait Expression: Send + Sync {
    fn is_single(&self) -> bool;
    fn get_single(&self, ctx: &dyn EvalContext) -> Value;
    fn get_array(&self, ctx: &dyn EvalContext) -> Vec<Value>;
    /// Word used when formatting a multi-valued result, e.g. "and" or "or".
    fn join_word(&self) -> &str;
    /// Rendering for diagnostics and debug output; never evaluates.
    fn debug_text(&self) -> String;
}

/// Parses the text between two markers into an expression.
///
/// `Ok(None)` means the text is not a known expression; both that and `Err`
/// abort construction of the owning template.
pub trait ExpressionParser {
    fn parse(&self, text: &str) -> Result<Option<Arc<dyn Expression>>, ExprError>;
}
