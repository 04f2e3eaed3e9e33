//! The search engine façade.
//!
//! [`SearchEngine`] owns the inverted index and the stop-word set and
//! exposes ingestion, ranked retrieval, matching, removal, and inspection.
//! Read operations take `&self` and are safe to call concurrently as long
//! as no mutation runs at the same time; the engine holds no internal
//! locks around its main structures.

mod ranker;

use crate::document::{Document, DocumentStatus};
use crate::error::SearchError;
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::tokenizer::{is_valid_word, split_words, StopWordSet};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// How a hot-path operation distributes its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    /// Single-threaded evaluation.
    #[default]
    Sequential,
    /// Work-stealing parallel evaluation over the rayon pool.
    Parallel,
}

/// In-memory inverted-index search engine with TF-IDF ranking.
#[derive(Debug, Default)]
pub struct SearchEngine {
    index: InvertedIndex,
    stop_words: StopWordSet,
}

impl SearchEngine {
    /// Creates an engine from a collection of stop words.
    ///
    /// Empty strings are discarded; words containing control characters
    /// are rejected.
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            index: InvertedIndex::default(),
            stop_words: StopWordSet::new(stop_words)?,
        })
    }

    /// Creates an engine from a space-delimited stop-word string.
    pub fn from_text(stop_words_text: &str) -> Result<Self, SearchError> {
        Self::new(split_words(stop_words_text))
    }

    /// Ingests a document.
    ///
    /// `id` must be non-negative and unused; every token of `text` must be
    /// free of control characters. On error the engine is unchanged.
    /// `rating` is recorded as the truncated integer mean of `ratings`
    /// (0 when empty). Stop words are not indexed.
    pub fn add_document(
        &mut self,
        id: i32,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if id < 0 {
            return Err(SearchError::InvalidArgument(format!(
                "document id {id} is negative"
            )));
        }
        if self.index.contains(id) {
            return Err(SearchError::InvalidArgument(format!(
                "document id {id} is already in use"
            )));
        }
        let words = self.split_into_words_no_stop(text)?;
        self.index
            .add_document(id, &words, average_rating(ratings), status);
        tracing::debug!("Added document {} ({} indexed words)", id, words.len());
        Ok(())
    }

    /// Tokenizes `text`, validating every token and dropping stop words.
    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>, SearchError> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidArgument(format!(
                    "word {word:?} contains a control character"
                )));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    /// Top ranked documents with status [`DocumentStatus::Actual`], sequential.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top ranked documents with the given status, sequential.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, move |_, s, _| {
            s == status
        })
    }

    /// Top ranked documents passing an arbitrary predicate, sequential.
    pub fn find_top_documents_filtered<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(i32, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// The general ranked-retrieval form: explicit execution policy and
    /// `(id, status, rating)` predicate.
    ///
    /// Returns at most [`MAX_RESULT_DOCUMENT_COUNT`](crate::config::MAX_RESULT_DOCUMENT_COUNT)
    /// documents ordered by relevance descending, with ties (within
    /// [`RELEVANCE_EPSILON`](crate::config::RELEVANCE_EPSILON)) broken by
    /// rating descending. Documents containing any minus-word are excluded
    /// regardless of the predicate.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(i32, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse_normalized(raw_query, &self.stop_words)?;
        let matched = match policy {
            ExecutionPolicy::Sequential => {
                ranker::find_all_documents(&self.index, &query, &predicate)
            }
            ExecutionPolicy::Parallel => {
                ranker::find_all_documents_par(&self.index, &query, &predicate)
            }
        };
        Ok(ranker::sort_and_truncate(matched))
    }

    /// Explains which query words matched a document, sequential.
    ///
    /// Returns the document's status together with the sorted, unique
    /// plus-words it contains, or an empty list if any minus-word hits.
    /// Unknown ids yield [`SearchError::DocumentNotFound`].
    pub fn match_document(
        &self,
        raw_query: &str,
        id: i32,
    ) -> Result<(Vec<String>, DocumentStatus), SearchError> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// [`Self::match_document`] with an explicit execution policy.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: i32,
    ) -> Result<(Vec<String>, DocumentStatus), SearchError> {
        let status = self
            .index
            .document_data(id)
            .ok_or(SearchError::DocumentNotFound(id))?
            .status;

        match policy {
            ExecutionPolicy::Sequential => {
                let query = Query::parse_normalized(raw_query, &self.stop_words)?;
                if self.any_minus_word_hits(&query.minus_words, id) {
                    return Ok((Vec::new(), status));
                }
                let matched = query
                    .plus_words
                    .into_iter()
                    .filter(|word| self.word_in_document(word, id))
                    .collect();
                Ok((matched, status))
            }
            ExecutionPolicy::Parallel => {
                let query = Query::parse_raw(raw_query, &self.stop_words)?;
                let minus_hit = query
                    .minus_words
                    .par_iter()
                    .any(|word| self.word_in_document(word, id));
                if minus_hit {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<String> = query
                    .plus_words
                    .into_par_iter()
                    .filter(|word| self.word_in_document(word, id))
                    .collect();
                matched.sort_unstable();
                matched.dedup();
                Ok((matched, status))
            }
        }
    }

    fn any_minus_word_hits(&self, minus_words: &[String], id: i32) -> bool {
        minus_words
            .iter()
            .any(|word| self.word_in_document(word, id))
    }

    fn word_in_document(&self, word: &str, id: i32) -> bool {
        self.index
            .postings(word)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// Removes a document; unknown ids are a silent no-op.
    pub fn remove_document(&mut self, id: i32) {
        self.remove_document_with(ExecutionPolicy::Sequential, id);
    }

    /// [`Self::remove_document`] with an explicit execution policy.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: i32) {
        let removed = match policy {
            ExecutionPolicy::Sequential => self.index.remove_document(id),
            ExecutionPolicy::Parallel => self.index.remove_document_par(id),
        };
        if removed {
            tracing::debug!("Removed document {}", id);
        }
    }

    /// Word → frequency map of a document; empty (with a stable address)
    /// when the id is unknown.
    pub fn word_frequencies(&self, id: i32) -> &BTreeMap<String, f64> {
        self.index.word_frequencies(id)
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Live document ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.index.iter()
    }
}

/// Truncated-toward-zero integer mean; 0 for an empty list.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    ratings.iter().sum::<i32>() / ratings.len() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), 0);
        assert_eq!(average_rating(&[1, 2, 3, 8, 13]), 5);
        assert_eq!(average_rating(&[-7, -4]), -5);
    }

    #[test]
    fn test_add_rejects_negative_id() {
        let mut engine = SearchEngine::default();
        let err = engine
            .add_document(-1, "cat", DocumentStatus::Actual, &[1])
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut engine = SearchEngine::default();
        engine
            .add_document(1, "cat", DocumentStatus::Actual, &[1])
            .unwrap();
        assert!(engine
            .add_document(1, "dog", DocumentStatus::Actual, &[1])
            .is_err());
        assert_eq!(engine.document_count(), 1);
    }

    #[test]
    fn test_failed_add_leaves_engine_unchanged() {
        let mut engine = SearchEngine::default();
        engine
            .add_document(1, "cat", DocumentStatus::Actual, &[1])
            .unwrap();
        let err = engine
            .add_document(2, "bad\u{1}word", DocumentStatus::Actual, &[1])
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert_eq!(engine.document_count(), 1);
        assert_eq!(engine.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_remove_unknown_id_is_silent() {
        let mut engine = SearchEngine::default();
        engine.remove_document(5);
        assert_eq!(engine.document_count(), 0);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine>();
    }
}
