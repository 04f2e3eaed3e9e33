//! Word splitting, token validation, and the stop-word set.
//!
//! Tokenization is deliberately minimal: words are separated by runs of
//! the space character (0x20) and nothing else; tabs and newlines do not
//! split. A word is valid iff it contains no control byte in
//! `[0x00, 0x1F]`. Both rules are part of the engine's observable
//! contract and must not be "upgraded" to generic whitespace handling.

use crate::error::SearchError;
use std::collections::BTreeSet;

/// Splits `text` into words on runs of spaces, skipping empty tokens.
///
/// The returned slices borrow from `text`.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid iff it contains no control byte in `[0x00, 0x1F]`.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < 0x20)
}

/// Ordered set of validated stop words.
///
/// Stop words are excluded from indexing and from parsed queries.
/// Construction rejects words containing control characters; empty
/// strings are silently discarded.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    /// Builds the set from a collection of words.
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidArgument(format!(
                    "stop word {word:?} contains a control character"
                )));
            }
            words.insert(word.to_string());
        }
        Ok(Self { words })
    }

    /// Builds the set from a single space-delimited string.
    pub fn from_text(stop_words_text: &str) -> Result<Self, SearchError> {
        Self::new(split_words(stop_words_text))
    }

    /// Membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` if no stop words are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skips_repeated_spaces() {
        let words: Vec<&str> = split_words("  cat  in   the city ").collect();
        assert_eq!(words, vec!["cat", "in", "the", "city"]);
    }

    #[test]
    fn test_split_does_not_split_on_tabs_or_newlines() {
        let words: Vec<&str> = split_words("cat\tdog\nbird").collect();
        assert_eq!(words, vec!["cat\tdog\nbird"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert_eq!(split_words("").count(), 0);
        assert_eq!(split_words("   ").count(), 0);
    }

    #[test]
    fn test_word_validity() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("naïve"));
        assert!(!is_valid_word("ca\u{1}t"));
        assert!(!is_valid_word("\u{1f}"));
    }

    #[test]
    fn test_stop_word_set_from_text() {
        let set = StopWordSet::from_text("in  the ").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("in"));
        assert!(set.contains("the"));
        assert!(!set.contains("cat"));
    }

    #[test]
    fn test_stop_word_set_discards_empty_strings() {
        let set = StopWordSet::new(["in", "", "the"]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_stop_word_set_rejects_control_characters() {
        let err = StopWordSet::new(["in", "th\u{2}e"]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    #[test]
    fn test_stop_word_set_deduplicates() {
        let set = StopWordSet::from_text("the the the").unwrap();
        assert_eq!(set.len(), 1);
    }
}
