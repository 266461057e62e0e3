//! Lexical error taxonomy.
//!
//! Every error carries the kind of rule that was broken and the byte offset,
//! prefix included, at which it was detected. Lexing stops at the first error.

use serde::Serialize;
use thiserror::Error;

/// A positioned lexical error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[error("{kind} at position: {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The rule a filter string violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LexErrorKind {
    /// Empty input, or input not starting with `filter=`
    #[error("Invalid SCIM filter string, expecting 'filter='")]
    MalformedInput,

    #[error("No spaces allowed before complex group opening")]
    NoSpaceBeforeComplexGroupOpen,

    #[error("No spaces allowed after complex group opening")]
    NoSpaceAfterComplexGroupOpen,

    #[error("No spaces allowed before complex group closing")]
    NoSpaceBeforeComplexGroupClose,

    #[error("Missing space after complex group closing")]
    MissingSpaceAfterComplexGroupClose,

    #[error("Missing space before precedence group opening")]
    MissingSpaceBeforePrecedenceGroupOpen,

    #[error("No spaces allowed after precedence group opening")]
    NoSpaceAfterPrecedenceGroupOpen,

    #[error("No spaces allowed before precedence group closing")]
    NoSpaceBeforePrecedenceGroupClose,

    #[error("Missing space after precedence group closing")]
    MissingSpaceAfterPrecedenceGroupClose,

    /// A character that cannot start or continue a token in the current mode
    #[error("Unexpected character")]
    UnexpectedCharacter,

    #[error("Invalid numeric literal")]
    InvalidNumericLiteral,

    /// The input ended in the middle of `true`, `false` or `null`
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("Unterminated string literal")]
    UnterminatedString,
}

pub type Result<T> = std::result::Result<T, LexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = LexError::new(LexErrorKind::InvalidNumericLiteral, 19);
        assert_eq!(err.to_string(), "Invalid numeric literal at position: 19");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            LexErrorKind::NoSpaceBeforeComplexGroupOpen.to_string(),
            "No spaces allowed before complex group opening"
        );
        assert_eq!(
            LexErrorKind::UnterminatedString.to_string(),
            "Unterminated string literal"
        );
    }

    #[test]
    fn test_error_serializes_to_json() {
        let err = LexError::new(LexErrorKind::UnexpectedCharacter, 20);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"kind":"UnexpectedCharacter","position":20}"#);
    }
}
