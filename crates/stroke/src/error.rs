use std::fmt;

/// The result type of the stroking entry points.
pub type StrokeResult = Result<crate::path::Path, StrokeError>;

/// An input that cannot produce stroke geometry at all.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidInput {
    /// The point stream was empty.
    EmptyPointStream,
    /// The stroke width does not define a positive half-width.
    NonPositiveWidth,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidInput::EmptyPointStream => {
                write!(f, "empty point stream")
            }
            InvalidInput::NonPositiveWidth => {
                write!(f, "stroke width must be positive")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}

/// The errors that can occur while generating a stroke outline.
///
/// Degenerate segments and runaway join subdivision are recovered from
/// internally (fallback geometry, bounded recursion) and never surface here.
/// Non-finite coordinates cannot be recovered: rather than exposing a
/// partially built path, the whole operation fails.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StrokeError {
    Input(InvalidInput),
    /// The input or the produced geometry contains a non-finite coordinate.
    NonFiniteResult,
}

impl std::error::Error for StrokeError {}

impl fmt::Display for StrokeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StrokeError::Input(e) => write!(f, "invalid input: {}", e),
            StrokeError::NonFiniteResult => {
                write!(f, "the stroke produced non-finite geometry")
            }
        }
    }
}

impl From<InvalidInput> for StrokeError {
    fn from(e: InvalidInput) -> Self {
        StrokeError::Input(e)
    }
}
