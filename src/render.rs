//! Formatting of token streams and lexing errors for display.

use std::borrow::Cow;
use std::fmt::Write;

use crate::error::LexError;
use crate::grammar::FILTER_PREFIX;
use crate::token::Token;

/// Prepends `filter=` to `input` when `auto_prefix` is set and the marker is missing.
pub fn with_prefix(input: &str, auto_prefix: bool) -> Cow<'_, str> {
    if auto_prefix && !input.starts_with(FILTER_PREFIX) {
        Cow::Owned(format!("{FILTER_PREFIX}{input}"))
    } else {
        Cow::Borrowed(input)
    }
}

/// One line per token: position, kind and value.
pub fn render_table(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {}",
            token.position,
            token.kind.name(),
            token.value
        );
    }
    out
}

pub fn render_json(tokens: &[Token<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tokens)
}

/// Renders an error with the input and a caret under the offending character.
pub fn render_error(input: &str, err: &LexError) -> String {
    let position = err.position.min(input.len());
    let column = input
        .get(..position)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(position);
    format!("{err}\n  {input}\n  {}^", " ".repeat(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorKind;
    use crate::tokenize;

    #[test]
    fn test_with_prefix() {
        assert_eq!(with_prefix("title pr", true), "filter=title pr");
        assert_eq!(with_prefix("filter=title pr", true), "filter=title pr");
        assert_eq!(with_prefix("title pr", false), "title pr");
    }

    #[test]
    fn test_render_table() {
        let tokens = tokenize("filter=title pr").unwrap();
        assert_eq!(
            render_table(&tokens),
            "    7  AttributePath            title\n   13  PresenceOperator         pr\n"
        );
    }

    #[test]
    fn test_render_json() {
        let tokens = tokenize("filter=title pr").unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&tokens).unwrap()).unwrap();
        assert_eq!(json[1]["kind"], "PresenceOperator");
        assert_eq!(json[1]["position"], 13);
    }

    #[test]
    fn test_render_error_points_at_position() {
        let input = "filter=userType eq 7657sa387090";
        let err = tokenize(input).unwrap_err();
        let rendered = render_error(input, &err);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Invalid numeric literal at position: 19");
        assert_eq!(lines[1], format!("  {input}"));
        assert_eq!(lines[2].find('^'), Some(2 + 19));
    }

    #[test]
    fn test_render_error_past_end_of_input() {
        let input = "filter=a eq tr";
        let err = LexError::new(LexErrorKind::UnexpectedEndOfInput, 99);
        let rendered = render_error(input, &err);
        assert!(rendered.ends_with(&format!("{}^", " ".repeat(input.len()))));
    }
}
