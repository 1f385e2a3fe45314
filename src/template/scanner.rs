//! `{{…}}` directive tokenizer.
//!
//! Walks the template one character at a time with an explicit position
//! counter, the same shape as the teacher's `Lexer::advance`/`current_char`
//! pair, generalized from dplyr tokens to literal runs and `{{…}}` bodies.

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    Literal(String),
    /// The trimmed text between `{{` and `}}`, plus the byte offset of the
    /// opening `{{` (for error messages).
    Directive { text: String, position: usize },
}

pub fn scan(template: &str) -> Result<Vec<RawToken>, ParseError> {
    let chars: Vec<char> = template.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '{' && chars.get(i + 1) == Some(&'{') {
            if !literal.is_empty() {
                tokens.push(RawToken::Literal(std::mem::take(&mut literal)));
            }
            let start = i;
            i += 2;
            let body_start = i;
            let mut found_close = false;
            while i < chars.len() {
                if chars[i] == '}' && chars.get(i + 1) == Some(&'}') {
                    found_close = true;
                    break;
                }
                i += 1;
            }
            if !found_close {
                return Err(ParseError::UnbalancedBraces { position: start });
            }
            let text: String = chars[body_start..i].iter().collect();
            tokens.push(RawToken::Directive {
                text: text.trim().to_string(),
                position: start,
            });
            i += 2;
        } else if chars[i] == '}' && chars.get(i + 1) == Some(&'}') {
            return Err(ParseError::UnbalancedBraces { position: i });
        } else {
            literal.push(chars[i]);
            i += 1;
        }
    }

    if !literal.is_empty() {
        tokens.push(RawToken::Literal(literal));
    }

    Ok(tokens)
}

/// Splits a directive body into its handler name and the remaining option
/// text.
pub fn split_name(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_literal_and_directive() {
        let tokens = scan("SELECT {{columns}} FROM users").unwrap();
        assert_eq!(
            tokens,
            vec![
                RawToken::Literal("SELECT ".to_string()),
                RawToken::Directive {
                    text: "columns".to_string(),
                    position: 7
                },
                RawToken::Literal(" FROM users".to_string()),
            ]
        );
    }

    #[test]
    fn unbalanced_open_brace_is_error() {
        let err = scan("SELECT {{columns FROM users").unwrap_err();
        assert_eq!(err, ParseError::UnbalancedBraces { position: 7 });
    }

    #[test]
    fn unbalanced_close_brace_is_error() {
        let err = scan("SELECT columns}} FROM users").unwrap_err();
        assert_eq!(err, ParseError::UnbalancedBraces { position: 14 });
    }

    #[test]
    fn split_name_separates_handler_from_options() {
        assert_eq!(split_name("columns --exclude Id"), ("columns", "--exclude Id"));
        assert_eq!(split_name("table"), ("table", ""));
    }
}
