//! SCIM filter lexer.
//!
//! A pull-based tokenizer over a `filter=`-prefixed string. The lexer is a small
//! state machine: in [`Mode::Filter`] it reads bare words and grouping punctuation,
//! and after a comparison operator it switches to [`Mode::ComparisonValue`] which
//! hands over to one of the literal modes for exactly one value.
//!
//! ```text
//! Filter ──(eq|ne|co|sw|ew|gt|lt|ge|le)──▶ ComparisonValue
//!   ▲                                         │ first char
//!   │                ┌──────────┬───────────┬─┴────────┬──────────┐
//!   │                ▼          ▼           ▼          ▼          ▼
//!   │          StringLiteral Numeric     TrueLit    FalseLit   NullLit
//!   └──────────────────────── value emitted ─────────────────────┘
//! ```
//!
//! Grouping punctuation is checked against its immediate neighbours:
//! `[` and `]` hug the attribute they belong to, `(` and `)` hug their contents
//! and are separated from everything else by whitespace.

use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{LexError, LexErrorKind, Result};
use crate::grammar::{
    classify_word, COMPLEX_GROUP_CLOSE, COMPLEX_GROUP_OPEN, ESCAPE, FALSE_LIT, FILTER_PREFIX,
    NULL_LIT, PRECEDENCE_CLOSE, PRECEDENCE_OPEN, QUOTE, TRUE_LIT,
};
use crate::token::{Token, TokenKind};

/// The scanning state of the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Bare words and grouping punctuation
    Filter,
    /// Right after a comparison operator, before its value
    ComparisonValue,
    StringLiteral,
    NumericLiteral,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
}

#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    /// Offset of the next byte to read
    position: usize,
    mode: Mode,
    /// Set once the end of input or an error has been reported
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over a complete filter string, `filter=` prefix included.
    pub fn new(input: &'a str) -> Result<Self> {
        if !input.starts_with(FILTER_PREFIX) {
            // Point at the first character that breaks the prefix.
            let position = input
                .bytes()
                .zip(FILTER_PREFIX.bytes())
                .take_while(|(a, b)| a == b)
                .count();
            debug!(position, "rejected filter without prefix");
            return Err(LexError::new(LexErrorKind::MalformedInput, position));
        }
        Ok(Lexer {
            input,
            position: FILTER_PREFIX.len(),
            mode: Mode::Filter,
            finished: false,
        })
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Produces the next token, `Ok(None)` at the end of input.
    ///
    /// After the end of input or an error has been returned, every further call
    /// returns `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        if self.finished {
            return Ok(None);
        }
        match self.scan() {
            Ok(Some(token)) => {
                trace!(
                    kind = %token.kind,
                    value = token.value,
                    position = token.position,
                    "token"
                );
                Ok(Some(token))
            }
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(err) => {
                self.finished = true;
                debug!(kind = ?err.kind, position = err.position, "lexing failed");
                Err(err)
            }
        }
    }

    /// Lexes the remaining input into a vector, stopping at the first error.
    pub fn tokenize(self) -> Result<Vec<Token<'a>>> {
        self.collect()
    }

    fn scan(&mut self) -> Result<Option<Token<'a>>> {
        loop {
            match self.mode {
                Mode::Filter => return self.lex_filter(),
                Mode::ComparisonValue => {
                    self.skip_whitespace();
                    let Some(c) = self.peek() else {
                        return Ok(None);
                    };
                    let next_mode = match c {
                        QUOTE => Mode::StringLiteral,
                        c if c.is_ascii_digit() => Mode::NumericLiteral,
                        b't' => Mode::TrueLiteral,
                        b'f' => Mode::FalseLiteral,
                        b'n' => Mode::NullLiteral,
                        _ => {
                            return Err(
                                self.error(LexErrorKind::UnexpectedCharacter, self.position)
                            )
                        }
                    };
                    self.set_mode(next_mode);
                }
                Mode::StringLiteral => return self.read_string().map(Some),
                Mode::NumericLiteral => return self.read_number().map(Some),
                Mode::TrueLiteral => {
                    return self.read_keyword(TRUE_LIT, TokenKind::TrueLiteral).map(Some)
                }
                Mode::FalseLiteral => {
                    return self.read_keyword(FALSE_LIT, TokenKind::FalseLiteral).map(Some)
                }
                Mode::NullLiteral => {
                    return self.read_keyword(NULL_LIT, TokenKind::NullLiteral).map(Some)
                }
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            trace!(from = ?self.mode, to = ?mode, "mode");
            self.mode = mode;
        }
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.input.as_bytes().get(index).copied()
    }

    /// Returns the byte at the cursor without advancing.
    fn peek(&self) -> Option<u8> {
        self.byte_at(self.position)
    }

    /// The byte before `index`, or `None` at the start of the filter body.
    fn before(&self, index: usize) -> Option<u8> {
        if index > FILTER_PREFIX.len() {
            self.byte_at(index - 1)
        } else {
            None
        }
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn emit(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token::new(kind, &self.input[start..self.position], start)
    }

    fn error(&self, kind: LexErrorKind, position: usize) -> LexError {
        LexError::new(kind, position)
    }

    fn lex_filter(&mut self) -> Result<Option<Token<'a>>> {
        self.skip_whitespace();
        let start = self.position;

        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let token = match c {
            COMPLEX_GROUP_OPEN => self.complex_group_open(start)?,
            COMPLEX_GROUP_CLOSE => self.complex_group_close(start)?,
            PRECEDENCE_OPEN => self.precedence_group_open(start)?,
            PRECEDENCE_CLOSE => self.precedence_group_close(start)?,
            _ => self.read_word(start)?,
        };
        Ok(Some(token))
    }

    fn complex_group_open(&mut self, start: usize) -> Result<Token<'a>> {
        if is_space(self.byte_at(start + 1)) {
            return Err(self.error(LexErrorKind::NoSpaceAfterComplexGroupOpen, start + 1));
        }
        if is_space(self.before(start)) {
            return Err(self.error(LexErrorKind::NoSpaceBeforeComplexGroupOpen, start - 1));
        }
        self.bump();
        Ok(self.emit(TokenKind::ComplexFilterGroupStart, start))
    }

    fn complex_group_close(&mut self, start: usize) -> Result<Token<'a>> {
        if !is_space_or_absent(self.byte_at(start + 1)) {
            return Err(self.error(LexErrorKind::MissingSpaceAfterComplexGroupClose, start));
        }
        if is_space(self.before(start)) {
            return Err(self.error(LexErrorKind::NoSpaceBeforeComplexGroupClose, start - 1));
        }
        self.bump();
        Ok(self.emit(TokenKind::ComplexFilterGroupEnd, start))
    }

    fn precedence_group_open(&mut self, start: usize) -> Result<Token<'a>> {
        if is_space(self.byte_at(start + 1)) {
            return Err(self.error(LexErrorKind::NoSpaceAfterPrecedenceGroupOpen, start + 1));
        }
        if !is_space_or_absent(self.before(start)) {
            return Err(self.error(LexErrorKind::MissingSpaceBeforePrecedenceGroupOpen, start));
        }
        self.bump();
        Ok(self.emit(TokenKind::PrecedenceGroupStart, start))
    }

    fn precedence_group_close(&mut self, start: usize) -> Result<Token<'a>> {
        if is_space(self.before(start)) {
            return Err(self.error(LexErrorKind::NoSpaceBeforePrecedenceGroupClose, start - 1));
        }
        if !is_space_or_absent(self.byte_at(start + 1)) {
            return Err(self.error(LexErrorKind::MissingSpaceAfterPrecedenceGroupClose, start));
        }
        self.bump();
        Ok(self.emit(TokenKind::PrecedenceGroupEnd, start))
    }

    /// Reads a bare word up to whitespace, `[` or the end of input, and classifies
    /// it once it is complete, so that `androidId` is not mistaken for `and`.
    ///
    /// Grouping punctuation other than `[` can only start a token, never sit
    /// inside one.
    fn read_word(&mut self, start: usize) -> Result<Token<'a>> {
        while let Some(c) = self.peek() {
            match c {
                PRECEDENCE_OPEN => {
                    return Err(self.error(
                        LexErrorKind::MissingSpaceBeforePrecedenceGroupOpen,
                        self.position,
                    ))
                }
                PRECEDENCE_CLOSE | COMPLEX_GROUP_CLOSE => {
                    return Err(self.error(LexErrorKind::UnexpectedCharacter, self.position))
                }
                COMPLEX_GROUP_OPEN => break,
                c if c.is_ascii_whitespace() => break,
                _ => {
                    self.bump();
                }
            }
        }

        let token = self.emit(classify_word(&self.input[start..self.position]), start);
        if token.kind == TokenKind::ComparisonOperator {
            self.set_mode(Mode::ComparisonValue);
        }
        Ok(token)
    }

    /// Reads a double-quoted string. Only `\"` is treated as escaped; nothing is
    /// decoded.
    fn read_string(&mut self) -> Result<Token<'a>> {
        let start = self.position;
        self.bump(); // opening quote

        loop {
            match self.peek() {
                None => return Err(self.error(LexErrorKind::UnterminatedString, start)),
                Some(QUOTE) if self.byte_at(self.position - 1) != Some(ESCAPE) => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        self.set_mode(Mode::Filter);
        Ok(self.emit(TokenKind::StringLiteral, start))
    }

    fn read_number(&mut self) -> Result<Token<'a>> {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump();
            } else if c.is_ascii_whitespace() {
                break;
            } else {
                return Err(self.error(LexErrorKind::InvalidNumericLiteral, start));
            }
        }

        self.set_mode(Mode::Filter);
        Ok(self.emit(TokenKind::NumericLiteral, start))
    }

    /// Matches `true`, `false` or `null` exactly, followed by whitespace or the end
    /// of input.
    fn read_keyword(&mut self, keyword: &str, kind: TokenKind) -> Result<Token<'a>> {
        let start = self.position;
        let end = start + keyword.len();
        if end > self.input.len() {
            return Err(self.error(LexErrorKind::UnexpectedEndOfInput, self.input.len()));
        }

        for (offset, expected) in keyword.bytes().enumerate() {
            if self.byte_at(start + offset) != Some(expected) {
                return Err(self.error(LexErrorKind::UnexpectedCharacter, start + offset));
            }
        }
        if let Some(c) = self.byte_at(end) {
            if !c.is_ascii_whitespace() {
                return Err(self.error(LexErrorKind::UnexpectedCharacter, end));
            }
        }

        self.position = end;
        self.set_mode(Mode::Filter);
        Ok(self.emit(kind, start))
    }
}

fn is_space(c: Option<u8>) -> bool {
    matches!(c, Some(c) if c.is_ascii_whitespace())
}

/// Whitespace, or no character at all at either end of the filter body.
fn is_space_or_absent(c: Option<u8>) -> bool {
    c.map_or(true, |c| c.is_ascii_whitespace())
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl FusedIterator for Lexer<'_> {}
