//! Lexer for SCIM filter expressions (RFC 7644 §3.4.2.2).
//!
//! The input is the raw filter including its `filter=` marker; the output is a
//! sequence of [`Token`]s whose positions point into that original string.
//!
//! ```
//! use scim_filter_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize(r#"filter=userName eq "bjensen""#).unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::AttributePath);
//! assert_eq!(tokens[2].position, 19);
//! ```

pub mod config;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod render;
pub mod token;

pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, Mode};
pub use token::{Span, Token, TokenKind};

/// Lexes a whole filter string, returning the first error if there is one.
pub fn tokenize(input: &str) -> error::Result<Vec<Token<'_>>> {
    Lexer::new(input)?.tokenize()
}
