use thiserror::Error;

use crate::expr::ExprError;

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while turning a raw template string into a [`Template`].
///
/// `MalformedExpression` is fatal for the single-template constructor and
/// isolated per item by the batch constructors. `UnterminatedPlaceholder`
/// never propagates; it exists so the message handed to the diagnostic sink
/// is typed and uniform.
///
/// [`Template`]: crate::template::Template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("can't understand the expression %{text}%")]
    MalformedExpression {
        text: String,
        #[source]
        source: Option<ExprError>,
    },
    #[error(
        "the percent sign delimits expressions (e.g. %player%); to insert a %, type it twice: %% (found in \"{raw}\")"
    )]
    UnterminatedPlaceholder { raw: String },
}
