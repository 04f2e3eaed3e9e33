//! Dual-map inverted index store.
//!
//! Two mirrored maps are maintained: term → (document → term frequency)
//! for scoring, and document → (term → term frequency) for per-document
//! inspection and removal. Every (term, document, frequency) triple in one
//! map appears in the other with the identical frequency; `add_document`
//! and `remove_document` are the only mutators and preserve this pairing.
//! Term frequency is `occurrences / total non-stop tokens of the doc`.

use crate::document::DocumentStatus;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

static EMPTY_WORD_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

/// Per-document metadata recorded at ingestion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// The inverted index with its document-side transpose.
#[derive(Debug, Default)]
pub(crate) struct InvertedIndex {
    /// term → (document id → term frequency). Posting lists are never empty.
    word_to_documents: BTreeMap<String, BTreeMap<i32, f64>>,
    /// document id → (term → term frequency). Mirror of the map above.
    document_to_words: BTreeMap<i32, BTreeMap<String, f64>>,
    documents: BTreeMap<i32, DocumentData>,
    document_ids: BTreeSet<i32>,
}

impl InvertedIndex {
    /// Indexes a document from its non-stop tokens.
    ///
    /// The caller guarantees `id` is unused and every word is validated.
    /// Each occurrence contributes `1/k` to the word's frequency, where
    /// `k` is the total token count.
    pub fn add_document(&mut self, id: i32, words: &[&str], rating: i32, status: DocumentStatus) {
        let word_frequencies = self.document_to_words.entry(id).or_default();
        if !words.is_empty() {
            let frequency_step = 1.0 / words.len() as f64;
            for &word in words {
                *word_frequencies.entry(word.to_string()).or_insert(0.0) += frequency_step;
                *self
                    .word_to_documents
                    .entry(word.to_string())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += frequency_step;
            }
        }
        self.documents.insert(id, DocumentData { rating, status });
        self.document_ids.insert(id);
        self.debug_validate();
    }

    /// Removes a document. Returns `false` (leaving the index untouched)
    /// if the id is unknown.
    pub fn remove_document(&mut self, id: i32) -> bool {
        let Some(word_frequencies) = self.document_to_words.remove(&id) else {
            return false;
        };
        for word in word_frequencies.keys() {
            if let Some(postings) = self.word_to_documents.get_mut(word) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.word_to_documents.remove(word);
                }
            }
        }
        self.documents.remove(&id);
        self.document_ids.remove(&id);
        self.debug_validate();
        true
    }

    /// Parallel removal: posting lists are scrubbed concurrently, one
    /// rayon task per term. Contract identical to [`Self::remove_document`].
    pub fn remove_document_par(&mut self, id: i32) -> bool {
        let Some(word_frequencies) = self.document_to_words.remove(&id) else {
            return false;
        };
        self.word_to_documents
            .par_iter_mut()
            .for_each(|(word, postings)| {
                if word_frequencies.contains_key(word.as_str()) {
                    postings.remove(&id);
                }
            });
        self.word_to_documents.retain(|_, postings| !postings.is_empty());
        self.documents.remove(&id);
        self.document_ids.remove(&id);
        self.debug_validate();
        true
    }

    /// Posting list for a word, if any document contains it.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<i32, f64>> {
        self.word_to_documents.get(word)
    }

    /// Word → frequency map of a document.
    ///
    /// Unknown ids yield a reference to a shared static empty map, so the
    /// returned address is stable across calls.
    pub fn word_frequencies(&self, id: i32) -> &BTreeMap<String, f64> {
        self.document_to_words
            .get(&id)
            .unwrap_or(&EMPTY_WORD_FREQUENCIES)
    }

    /// Metadata recorded for a document at ingestion.
    pub fn document_data(&self, id: i32) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// `true` if the id is live.
    pub fn contains(&self, id: i32) -> bool {
        self.document_ids.contains(&id)
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live document ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.document_ids.iter().copied()
    }

    /// Asserts the dual-map pairing in debug builds.
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.document_ids.len(), self.documents.len());
            assert_eq!(self.document_ids.len(), self.document_to_words.len());
            for (word, postings) in &self.word_to_documents {
                assert!(!postings.is_empty(), "empty posting list for {word:?}");
                for (id, frequency) in postings {
                    let mirrored = self
                        .document_to_words
                        .get(id)
                        .and_then(|words| words.get(word));
                    assert_eq!(mirrored, Some(frequency), "map mismatch for {word:?}/{id}");
                }
            }
            for (id, words) in &self.document_to_words {
                for (word, frequency) in words {
                    let mirrored = self
                        .word_to_documents
                        .get(word)
                        .and_then(|postings| postings.get(id));
                    assert_eq!(mirrored, Some(frequency), "map mismatch for {word:?}/{id}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(index: &mut InvertedIndex, id: i32, text: &str) {
        let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
        index.add_document(id, &words, 0, DocumentStatus::Actual);
    }

    #[test]
    fn test_add_document_populates_both_maps() {
        let mut index = InvertedIndex::default();
        add(&mut index, 1, "cat in the city");
        assert_eq!(index.document_count(), 1);
        assert_eq!(index.postings("cat").unwrap()[&1], 0.25);
        assert_eq!(index.word_frequencies(1)["cat"], 0.25);
    }

    #[test]
    fn test_frequencies_accumulate_per_occurrence() {
        let mut index = InvertedIndex::default();
        add(&mut index, 1, "cat cat dog cat");
        assert_eq!(index.word_frequencies(1)["cat"], 0.75);
        assert_eq!(index.word_frequencies(1)["dog"], 0.25);
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        let mut index = InvertedIndex::default();
        add(&mut index, 1, "a b c a b a a");
        let total: f64 = index.word_frequencies(1).values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_document_cleans_empty_posting_lists() {
        let mut index = InvertedIndex::default();
        add(&mut index, 1, "cat city");
        add(&mut index, 2, "dog city");
        assert!(index.remove_document(1));
        assert!(index.postings("cat").is_none());
        assert_eq!(index.postings("city").unwrap().len(), 1);
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut index = InvertedIndex::default();
        add(&mut index, 1, "cat");
        assert!(!index.remove_document(99));
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn test_parallel_remove_matches_sequential() {
        let mut sequential = InvertedIndex::default();
        let mut parallel = InvertedIndex::default();
        for (id, text) in [(1, "cat in the city"), (2, "dog in town"), (3, "cat dog")] {
            add(&mut sequential, id, text);
            add(&mut parallel, id, text);
        }
        sequential.remove_document(2);
        parallel.remove_document_par(2);
        assert_eq!(sequential.document_count(), parallel.document_count());
        for id in sequential.iter() {
            assert_eq!(sequential.word_frequencies(id), parallel.word_frequencies(id));
        }
        assert!(parallel.postings("town").is_none());
    }

    #[test]
    fn test_word_frequencies_unknown_id_is_empty_and_stable() {
        let index = InvertedIndex::default();
        let first = index.word_frequencies(5) as *const _;
        let second = index.word_frequencies(6) as *const _;
        assert!(index.word_frequencies(5).is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_iter_ascending() {
        let mut index = InvertedIndex::default();
        for id in [30, 10, 20] {
            add(&mut index, id, "cat");
        }
        let ids: Vec<i32> = index.iter().collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_document_with_no_words_still_tracked() {
        let mut index = InvertedIndex::default();
        index.add_document(1, &[], 3, DocumentStatus::Actual);
        assert!(index.contains(1));
        assert!(index.word_frequencies(1).is_empty());
        assert!(index.remove_document(1));
        assert_eq!(index.document_count(), 0);
    }
}
