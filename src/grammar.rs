//! Literal tables of the RFC 7644 filter grammar.

use crate::token::TokenKind;

/// Every filter handed to the lexer starts with this marker.
pub const FILTER_PREFIX: &str = "filter=";

pub const PRECEDENCE_OPEN: u8 = b'(';
pub const PRECEDENCE_CLOSE: u8 = b')';
pub const COMPLEX_GROUP_OPEN: u8 = b'[';
pub const COMPLEX_GROUP_CLOSE: u8 = b']';
pub const QUOTE: u8 = b'"';
pub const ESCAPE: u8 = b'\\';

/// Presence operator, the simplest attribute expression.
pub const PRESENCE_OP: &str = "pr";

pub const EQUAL_OP: &str = "eq";
pub const NOT_EQUAL_OP: &str = "ne";
pub const CONTAINS_OP: &str = "co";
pub const STARTS_WITH_OP: &str = "sw";
pub const ENDS_WITH_OP: &str = "ew";
pub const GREATER_THAN_OP: &str = "gt";
pub const LESS_THAN_OP: &str = "lt";
pub const GREATER_THAN_OR_EQUAL_OP: &str = "ge";
pub const LESS_THAN_OR_EQUAL_OP: &str = "le";

pub const COMPARISON_OPS: [&str; 9] = [
    EQUAL_OP,
    NOT_EQUAL_OP,
    CONTAINS_OP,
    STARTS_WITH_OP,
    ENDS_WITH_OP,
    GREATER_THAN_OP,
    LESS_THAN_OP,
    GREATER_THAN_OR_EQUAL_OP,
    LESS_THAN_OR_EQUAL_OP,
];

pub const AND_OP: &str = "and";
pub const OR_OP: &str = "or";
/// `not` is a unary prefix in the RFC grammar but lexes as a logic operator.
pub const NOT_OP: &str = "not";

pub const LOGIC_OPS: [&str; 3] = [AND_OP, OR_OP, NOT_OP];

pub const TRUE_LIT: &str = "true";
pub const FALSE_LIT: &str = "false";
pub const NULL_LIT: &str = "null";

/// Classifies a fully accumulated bare word.
///
/// Comparison operators are checked first, then logic operators, then `pr`.
/// Anything else is an attribute path. Matching is exact and case-sensitive.
pub fn classify_word(word: &str) -> TokenKind {
    if COMPARISON_OPS.contains(&word) {
        TokenKind::ComparisonOperator
    } else if LOGIC_OPS.contains(&word) {
        TokenKind::LogicOperator
    } else if word == PRESENCE_OP {
        TokenKind::PresenceOperator
    } else {
        TokenKind::AttributePath
    }
}
