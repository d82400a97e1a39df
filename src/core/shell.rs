//! Shell-style tokenization and quoting utilities.

use crate::error::{Error, Result};

/// Split a string into tokens using shell-style quoting rules.
///
/// - Whitespace separates tokens.
/// - Single quotes preserve everything literally.
/// - Double quotes preserve everything except `\"` and `\\` escapes.
/// - Outside quotes, a backslash escapes the next character.
/// - An unterminated quote is a validation error.
///
/// `--a "b c"` becomes two tokens: `--a` and `b c`.
pub fn split_tokens(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => {
                            return Err(Error::Validation(
                                "Unterminated single quote in extra arguments".to_string(),
                            ))
                        }
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => {
                                return Err(Error::Validation(
                                    "Unterminated double quote in extra arguments".to_string(),
                                ))
                            }
                        },
                        Some(c) => current.push(c),
                        None => {
                            return Err(Error::Validation(
                                "Unterminated double quote in extra arguments".to_string(),
                            ))
                        }
                    }
                }
            }
            '\\' => {
                in_token = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => {
                        return Err(Error::Validation(
                            "Trailing backslash in extra arguments".to_string(),
                        ))
                    }
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_simple() {
        assert_eq!(
            split_tokens("--relay --key abc").unwrap(),
            vec!["--relay", "--key", "abc"]
        );
    }

    #[test]
    fn split_double_quoted_multiword() {
        assert_eq!(
            split_tokens(r#"--a "b c""#).unwrap(),
            vec!["--a", "b c"]
        );
    }

    #[test]
    fn split_single_quoted() {
        assert_eq!(
            split_tokens("--title 'Acme Remote'").unwrap(),
            vec!["--title", "Acme Remote"]
        );
    }

    #[test]
    fn split_adjacent_quotes_join() {
        assert_eq!(split_tokens(r#"a"b c"d"#).unwrap(), vec!["ab cd"]);
    }

    #[test]
    fn split_escaped_space() {
        assert_eq!(split_tokens(r"two\ words").unwrap(), vec!["two words"]);
    }

    #[test]
    fn split_escaped_quote_inside_double() {
        assert_eq!(split_tokens(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
    }

    #[test]
    fn split_empty_quoted_token() {
        assert_eq!(split_tokens("a '' b").unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn split_empty_input() {
        assert!(split_tokens("").unwrap().is_empty());
        assert!(split_tokens("   ").unwrap().is_empty());
    }

    #[test]
    fn split_unterminated_single_quote_errors() {
        assert!(split_tokens("--a 'oops").is_err());
    }

    #[test]
    fn split_unterminated_double_quote_errors() {
        assert!(split_tokens(r#"--a "oops"#).is_err());
    }

    #[test]
    fn split_trailing_backslash_errors() {
        assert!(split_tokens(r"oops\").is_err());
    }
}
