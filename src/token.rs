//! The token definition for SCIM filter expressions.

use serde::Serialize;

/// A token is a single lexical unit of a filter, with its kind, the exact text it
/// was lexed from and the offset of its first character in the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The matched slice of the input. String literals keep their quotes.
    pub value: &'a str,
    /// Byte offset of the first character, counted from the start of `filter=`.
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, value: &'a str, position: usize) -> Self {
        Token { kind, value, position }
    }

    pub fn span(&self) -> Span {
        Span::new(self.position, self.position + self.value.len())
    }

    /// The content of a string literal without its enclosing quotes.
    pub fn string_payload(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::StringLiteral => self
                .value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"')),
            _ => None,
        }
    }

    pub fn is_comparison_value(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::StringLiteral
                | TokenKind::NumericLiteral
                | TokenKind::TrueLiteral
                | TokenKind::FalseLiteral
                | TokenKind::NullLiteral
        )
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Any bare word that is not an operator, e.g. `name.familyName`
    AttributePath,

    // Operators
    ComparisonOperator, // eq ne co sw ew gt lt ge le
    LogicOperator,      // and or not
    PresenceOperator,   // pr

    // Punctuation
    PrecedenceGroupStart,    // (
    PrecedenceGroupEnd,      // )
    ComplexFilterGroupStart, // [
    ComplexFilterGroupEnd,   // ]

    // Comparison values
    StringLiteral, // The raw string, including quotes
    NumericLiteral,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::AttributePath => "AttributePath",
            TokenKind::ComparisonOperator => "ComparisonOperator",
            TokenKind::LogicOperator => "LogicOperator",
            TokenKind::PresenceOperator => "PresenceOperator",
            TokenKind::PrecedenceGroupStart => "PrecedenceGroupStart",
            TokenKind::PrecedenceGroupEnd => "PrecedenceGroupEnd",
            TokenKind::ComplexFilterGroupStart => "ComplexFilterGroupStart",
            TokenKind::ComplexFilterGroupEnd => "ComplexFilterGroupEnd",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::NumericLiteral => "NumericLiteral",
            TokenKind::TrueLiteral => "TrueLiteral",
            TokenKind::FalseLiteral => "FalseLiteral",
            TokenKind::NullLiteral => "NullLiteral",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// The starting byte offset.
    pub start: usize,
    /// The ending byte offset (exclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
