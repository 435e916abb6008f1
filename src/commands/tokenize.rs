//! Shell-style command-line splitting
//!
//! POSIX-shell word rules without expansion: whitespace separates words,
//! single quotes are fully literal, double quotes honour backslash only
//! before `\`, `"`, `$`, `` ` `` and newline, and a bare backslash escapes
//! the next character.

use crate::error::{LabError, LabResult};

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Between,
    Word,
    Single,
    Double,
}

/// Split `line` into argv words
pub fn split(line: &str) -> LabResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Between;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match state {
            State::Between | State::Word => match ch {
                c if c.is_whitespace() => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut current));
                        state = State::Between;
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => match chars.next() {
                    // line continuation
                    Some('\n') => {}
                    Some(next) => {
                        current.push(next);
                        state = State::Word;
                    }
                    None => return Err(LabError::TrailingEscape),
                },
                c => {
                    current.push(c);
                    state = State::Word;
                }
            },
            State::Single => match ch {
                '\'' => state = State::Word,
                c => current.push(c),
            },
            State::Double => match ch {
                '"' => state = State::Word,
                '\\' => match chars.next() {
                    Some(next @ ('\\' | '"' | '$' | '`')) => current.push(next),
                    Some('\n') => {}
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => return Err(LabError::UnbalancedQuote { quote: '"' }),
                },
                c => current.push(c),
            },
        }
    }

    match state {
        State::Single => Err(LabError::UnbalancedQuote { quote: '\'' }),
        State::Double => Err(LabError::UnbalancedQuote { quote: '"' }),
        State::Word => {
            words.push(current);
            Ok(words)
        }
        State::Between => Ok(words),
    }
}

/// Split `line` and require at least a program name
pub fn parse_command(line: &str) -> LabResult<Vec<String>> {
    let argv = split(line)?;
    if argv.is_empty() {
        return Err(LabError::EmptyCommand);
    }
    Ok(argv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test_case("ls -l", &["ls", "-l"]; "plain words")]
    #[test_case("  echo   a\tb  ", &["echo", "a", "b"]; "collapses whitespace")]
    #[test_case("echo 'hello world'", &["echo", "hello world"]; "single quoted segment")]
    #[test_case("echo \"a b\" c", &["echo", "a b", "c"]; "double quoted segment")]
    #[test_case("echo pre'fix 'post", &["echo", "prefix post"]; "quotes join adjacent text")]
    #[test_case("echo ''", &["echo", ""]; "empty quoted word")]
    #[test_case("echo a\\ b", &["echo", "a b"]; "escaped space")]
    #[test_case("echo '\\n'", &["echo", "\\n"]; "backslash literal in single quotes")]
    #[test_case("echo \"\\\"x\\\" \\q\"", &["echo", "\"x\" \\q"]; "double quote escapes")]
    #[test_case("echo a\\\nb", &["echo", "ab"]; "line continuation")]
    fn splits_like_a_shell(line: &str, expected: &[&str]) {
        assert_eq!(split(line).unwrap(), words(expected));
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(matches!(
            split("echo 'oops"),
            Err(LabError::UnbalancedQuote { quote: '\'' })
        ));
        assert!(matches!(
            split("echo \"oops"),
            Err(LabError::UnbalancedQuote { quote: '"' })
        ));
    }

    #[test]
    fn trailing_backslash_is_rejected() {
        assert!(matches!(split("echo \\"), Err(LabError::TrailingEscape)));
    }

    #[test]
    fn empty_command_needs_a_program() {
        assert!(split("   ").unwrap().is_empty());
        assert!(matches!(parse_command("  "), Err(LabError::EmptyCommand)));
        assert_eq!(parse_command("true").unwrap(), words(&["true"]));
    }
}
