// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shell-like splitting of a line into tokens. Single quoted spans are one token. There
//! is no escaping and no double quote handling. Nothing here can fail: an unterminated
//! quote is closed at the end of the line.

use crate::InlineVec;

const SINGLE_QUOTE: char = '\'';

/// Append a closing `'` if the line has an odd number of them.
///
/// ```rust
/// use termline::repair_unclosed_single_quotes;
///
/// assert_eq!(repair_unclosed_single_quotes("say 'hi there"), "say 'hi there'");
/// assert_eq!(repair_unclosed_single_quotes("say 'hi'"), "say 'hi'");
/// ```
#[must_use]
pub fn repair_unclosed_single_quotes(line: &str) -> String {
    let quote_count = line.chars().filter(|it| *it == SINGLE_QUOTE).count();
    let mut return_it = line.to_string();
    if quote_count % 2 != 0 {
        return_it.push(SINGLE_QUOTE);
    }
    return_it
}

/// Split `line` into tokens.
///
/// At each position whitespace is skipped. A token that starts with `'` runs to the next
/// `'` (inclusive), otherwise it is the longest run of non whitespace chars. Every
/// non empty `'...'` pair inside a token is then unwrapped, so `''` stays as is.
///
/// ```rust
/// use termline::tokenize;
///
/// let tokens = tokenize("git commit -m 'first commit'");
/// assert_eq!(tokens.as_slice(), ["git", "commit", "-m", "first commit"]);
/// ```
#[must_use]
pub fn tokenize(line: &str) -> InlineVec<String> {
    let line = repair_unclosed_single_quotes(line);
    let mut return_it = InlineVec::new();

    let mut rest = line.as_str();
    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            break;
        };

        let token_len = if first == SINGLE_QUOTE {
            // The repair above guarantees a closing quote exists somewhere after this
            // one. Fall back to the whitespace rule just in case.
            match rest[1..].find(SINGLE_QUOTE) {
                Some(closing_idx) => closing_idx + 2,
                None => find_whitespace_end(rest),
            }
        } else {
            find_whitespace_end(rest)
        };

        let (token, remainder) = rest.split_at(token_len);
        return_it.push(strip_single_quotes(token));
        rest = remainder;
    }

    return_it
}

/// Byte length of the leading run of non whitespace chars in `text`.
fn find_whitespace_end(text: &str) -> usize {
    text.char_indices()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(text.len(), |(idx, _)| idx)
}

/// Replace every `'x...'` (at least one char between the quotes) with its content.
fn strip_single_quotes(token: &str) -> String {
    let mut return_it = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(open_idx) = rest.find(SINGLE_QUOTE) {
        let after_open = &rest[open_idx + 1..];
        match after_open.find(SINGLE_QUOTE) {
            Some(close_idx) if close_idx > 0 => {
                return_it.push_str(&rest[..open_idx]);
                return_it.push_str(&after_open[..close_idx]);
                rest = &after_open[close_idx + 1..];
            }
            _ => {
                // Empty pair or a lone quote, keep the opening quote and move past it.
                return_it.push_str(&rest[..=open_idx]);
                rest = after_open;
            }
        }
    }

    return_it.push_str(rest);
    return_it
}

/// Split a submitted line into the command name and its argument string. Arguments are
/// whitespace separated tokens joined with a single space. Quotes are not interpreted
/// here, handlers receive the raw argument text.
///
/// ```rust
/// use termline::split_command_and_args;
///
/// assert_eq!(
///     split_command_and_args("  echo   hello    world "),
///     ("echo".to_string(), "hello world".to_string())
/// );
/// ```
#[must_use]
pub fn split_command_and_args(line: &str) -> (String, String) {
    let mut iter = line.split_whitespace();
    let name = iter.next().unwrap_or_default().to_string();
    let args = iter.collect::<Vec<_>>().join(" ");
    (name, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("", &[] ; "empty")]
    #[test_case("   \t ", &[] ; "only whitespace")]
    #[test_case("run build", &["run", "build"] ; "plain words")]
    #[test_case("  run   build  ", &["run", "build"] ; "extra whitespace")]
    #[test_case("echo 'hello world'", &["echo", "hello world"] ; "quoted span")]
    #[test_case("echo 'hello world", &["echo", "hello world"] ; "unterminated quote")]
    #[test_case("echo ''", &["echo", "''"] ; "empty quotes kept")]
    #[test_case("a'b c'd", &["a'b", "c'd"] ; "quotes inside word split on whitespace")]
    #[test_case("a'b'c", &["abc"] ; "quotes inside word are stripped")]
    #[test_case("'a''b'", &["a", "b"] ; "adjacent quoted spans")]
    #[test_case("'", &["''"] ; "lone quote becomes empty pair")]
    #[test_case("héllo 'wörld ✓'", &["héllo", "wörld ✓"] ; "non ascii")]
    fn test_tokenize(input: &str, expected: &[&str]) {
        let tokens = tokenize(input);
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_odd_quote_count_is_same_as_repaired() {
        for input in ["x 'a b", "'", "it's", "a 'b' 'c d"] {
            let repaired = format!("{input}'");
            assert_eq!(tokenize(input), tokenize(&repaired));
        }
    }

    #[test]
    fn test_repair() {
        assert_eq!(repair_unclosed_single_quotes(""), "");
        assert_eq!(repair_unclosed_single_quotes("it's"), "it's'");
        assert_eq!(repair_unclosed_single_quotes("'a' 'b'"), "'a' 'b'");
    }

    #[test_case("", "", "")]
    #[test_case("ls", "ls", "")]
    #[test_case("echo hi", "echo", "hi")]
    #[test_case("  echo  a   b ", "echo", "a b")]
    #[test_case("say 'a  b'", "say", "'a b'")]
    fn test_split_command_and_args(input: &str, name: &str, args: &str) {
        assert_eq!(
            split_command_and_args(input),
            (name.to_string(), args.to_string())
        );
    }
}
