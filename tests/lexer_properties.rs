//! Property-based tests for the lexer.
//!
//! Generated filters are checked for:
//! 1. Token values being the exact input slice at their position
//! 2. Deterministic output across fresh lexers
//! 3. No panics on arbitrary input, multibyte characters included

use proptest::prelude::*;
use scim_filter_lexer::{tokenize, Lexer, TokenKind};

fn attribute_path() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,8}(\\.[a-zA-Z][a-zA-Z0-9_-]{0,8})?"
        .prop_filter("operator names are not attribute paths", |s| {
            !matches!(
                s.as_str(),
                "eq" | "ne" | "co" | "sw" | "ew" | "gt" | "lt" | "ge" | "le" | "and" | "or"
                    | "not" | "pr"
            )
        })
}

fn comparison_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,6}",
        Just("true".to_string()),
        Just("false".to_string()),
        Just("null".to_string()),
        "\"[a-zA-Z0-9 @.:-]{0,12}\"",
    ]
}

fn attribute_expression() -> impl Strategy<Value = String> {
    let op = prop::sample::select(vec!["eq", "ne", "co", "sw", "ew", "gt", "lt", "ge", "le"]);
    prop_oneof![
        attribute_path().prop_map(|path| format!("{path} pr")),
        (attribute_path(), op, comparison_value())
            .prop_map(|(path, op, value)| format!("{path} {op} {value}")),
    ]
}

fn quoted_comparison() -> impl Strategy<Value = String> {
    let op = prop::sample::select(vec!["eq", "ne", "co", "sw", "ew", "gt", "lt", "ge", "le"]);
    (attribute_path(), op, "[a-zA-Z0-9 @.:-]{0,12}")
        .prop_map(|(path, op, text)| format!("{path} {op} \"{text}\""))
}

/// Contents of `(...)` and `[...]`. Only a string literal can sit right before
/// the closing punctuation.
fn group_body() -> impl Strategy<Value = String> {
    prop::collection::vec(quoted_comparison(), 1..4).prop_map(|exprs| exprs.join(" and "))
}

fn filter_term() -> impl Strategy<Value = String> {
    prop_oneof![
        attribute_expression(),
        group_body().prop_map(|e| format!("({e})")),
        group_body().prop_map(|e| format!("not ({e})")),
        (attribute_path(), group_body()).prop_map(|(path, e)| format!("{path}[{e}]")),
    ]
}

fn filter_body() -> impl Strategy<Value = String> {
    (
        filter_term(),
        prop::collection::vec((prop::sample::select(vec!["and", "or"]), filter_term()), 0..4),
    )
        .prop_map(|(first, rest)| {
            let mut body = first;
            for (op, term) in rest {
                body.push_str(&format!(" {op} {term}"));
            }
            body
        })
}

/// Fragments that put multibyte characters next to punctuation, quotes and
/// the first letters of keyword literals.
fn mixed_fragments() -> impl Strategy<Value = String> {
    let fragment = prop::sample::select(vec![
        "(", ")", "[", "]", "\"", "\\", " ", "t", "f", "n", "1", "eq ", "pr", "é", "日本",
        "🦀", "tr\u{fc}e", "n\u{fc}ll",
    ]);
    prop::collection::vec(fragment, 0..40).prop_map(|parts| parts.concat())
}

fn assert_lexing_terminates(input: &str) -> Result<(), TestCaseError> {
    let mut lexer = Lexer::new(input).unwrap();
    // Every call advances or ends the stream.
    let mut steps = 0;
    while let Some(result) = lexer.next() {
        steps += 1;
        prop_assert!(steps <= input.len() + 1);
        match result {
            Ok(token) => prop_assert_eq!(&input[token.span().start..token.span().end], token.value),
            Err(err) => {
                prop_assert!(err.position <= input.len());
                break;
            }
        }
    }
    prop_assert!(lexer.next().is_none());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tokens_are_slices_of_input(body in filter_body()) {
        let input = format!("filter={body}");
        let tokens = tokenize(&input).unwrap();
        prop_assert!(!tokens.is_empty());
        for token in &tokens {
            prop_assert!(!token.value.is_empty());
            let span = token.span();
            prop_assert_eq!(&input[span.start..span.end], token.value);
        }
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span().end <= pair[1].position);
        }
    }

    #[test]
    fn relexing_is_deterministic(body in filter_body()) {
        let input = format!("filter={body}");
        prop_assert_eq!(tokenize(&input), tokenize(&input));
    }

    #[test]
    fn whitespace_joined_values_relex_identically(body in filter_body()) {
        let input = format!("filter={body}");
        let tokens = tokenize(&input).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

        // Reinsert the original spacing between token values.
        let mut rebuilt = String::from("filter=");
        let mut cursor = rebuilt.len();
        for token in &tokens {
            rebuilt.push_str(&" ".repeat(token.position - cursor));
            rebuilt.push_str(token.value);
            cursor = token.position + token.value.len();
        }
        let relexed: Vec<_> = tokenize(&rebuilt).unwrap().iter().map(|t| t.kind).collect();
        prop_assert_eq!(kinds, relexed);
    }

    #[test]
    fn string_literals_are_quoted(body in filter_body()) {
        let input = format!("filter={body}");
        for token in tokenize(&input).unwrap() {
            if token.kind == TokenKind::StringLiteral {
                prop_assert!(token.value.starts_with('"') && token.value.ends_with('"'));
                prop_assert_eq!(token.string_payload().map(str::len), Some(token.value.len() - 2));
            }
        }
    }

    #[test]
    fn never_panics_on_arbitrary_input(s in "\\PC{0,200}") {
        assert_lexing_terminates(&format!("filter={s}"))?;
    }

    #[test]
    fn never_panics_on_multibyte_next_to_punctuation(s in mixed_fragments()) {
        assert_lexing_terminates(&format!("filter={s}"))?;
    }
}
