//! Query parsing: plus-words, minus-words, and validation.
//!
//! A raw query is split into words; a leading `-` marks a minus-word and
//! is stripped. Stop words are dropped from both lists. The normalized
//! parse (used by scoring) sorts and deduplicates both lists; the raw
//! parse (used by the parallel match path) keeps insertion order and
//! duplicates.

use crate::error::SearchError;
use crate::tokenizer::{is_valid_word, split_words, StopWordSet};

/// A parsed query: plus-words select documents, minus-words exclude them.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub plus_words: Vec<String>,
    pub minus_words: Vec<String>,
}

struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(
    text: &'a str,
    stop_words: &StopWordSet,
) -> Result<QueryWord<'a>, SearchError> {
    let (word, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if word.is_empty() || word.starts_with('-') || !is_valid_word(word) {
        return Err(SearchError::InvalidArgument(format!(
            "query word {text:?} is invalid"
        )));
    }
    Ok(QueryWord {
        word,
        is_minus,
        is_stop: stop_words.contains(word),
    })
}

impl Query {
    /// Parses `text`, then sorts and deduplicates both word lists.
    pub fn parse_normalized(text: &str, stop_words: &StopWordSet) -> Result<Self, SearchError> {
        let mut query = Self::parse_raw(text, stop_words)?;
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();
        Ok(query)
    }

    /// Parses `text` keeping insertion order and duplicates.
    pub fn parse_raw(text: &str, stop_words: &StopWordSet) -> Result<Self, SearchError> {
        let mut query = Self::default();
        for word in split_words(text) {
            let parsed = parse_query_word(word, stop_words)?;
            if parsed.is_stop {
                continue;
            }
            if parsed.is_minus {
                query.minus_words.push(parsed.word.to_string());
            } else {
                query.plus_words.push(parsed.word.to_string());
            }
        }
        Ok(query)
    }
}
