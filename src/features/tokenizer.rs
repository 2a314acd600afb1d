//! Post tokenizer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Word tokens of at least two word characters.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Lowercase `text` and split it into word tokens.
///
/// Single-character words ("I", "a") never become tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_short_words() {
        assert_eq!(tokenize("I am Happy"), vec!["am", "happy"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(
            tokenize("don't stop-believing!! #rust"),
            vec!["don", "stop", "believing", "rust"]
        );
    }

    #[test]
    fn test_tokenize_keeps_digits_and_underscores() {
        assert_eq!(tokenize("x 42 snake_case"), vec!["42", "snake_case"]);
    }

    #[test]
    fn test_tokenize_unicode_words() {
        assert_eq!(tokenize("Ça va très bien"), vec!["ça", "va", "très", "bien"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("a b c !").is_empty());
    }
}
