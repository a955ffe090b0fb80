//! Error types for the document layer.

use std::fmt;

use thiserror::Error;

/// Which of the two inputs of a match an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Actual,
    Expected,
}

impl Side {
    /// Lowercase noun, as used in "Got actual:".
    pub fn noun(self) -> &'static str {
        match self {
            Side::Actual => "actual",
            Side::Expected => "expected",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Actual => f.write_str("Actual"),
            Side::Expected => f.write_str("Expected"),
        }
    }
}

/// Errors that abort a match before any comparison happens.
///
/// Structural differences between two valid documents are never reported
/// through this type.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The input was not text, bytes, or a `Display` value.
    #[error("{matcher} matcher requires a string, stringer, or byte sequence. Got {}:\n{formatted}", .side.noun())]
    Extraction {
        matcher: String,
        side: Side,
        formatted: String,
    },

    /// The extracted text is not valid YAML.
    #[error("{side} '{text}' should be valid YAML, but it is not.\nUnderlying error:{source}")]
    Parse {
        side: Side,
        text: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl MatchError {
    /// The side the error is attributed to.
    pub fn side(&self) -> Side {
        match self {
            MatchError::Extraction { side, .. } | MatchError::Parse { side, .. } => *side,
        }
    }
}

/// Convenience alias for match results.
pub type MatchResult<T> = Result<T, MatchError>;
