//! Removal of documents with identical word sets.
//!
//! Two documents are duplicates when they index the same set of distinct
//! words, frequencies ignored. The earliest (smallest) id of each word
//! set is kept; later ids are removed in ascending order, one diagnostic
//! line per removal.

use crate::engine::SearchEngine;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Removes word-set duplicates, writing diagnostics to stdout.
pub fn remove_duplicates(engine: &mut SearchEngine) {
    let mut stdout = io::stdout().lock();
    let _ = remove_duplicates_to(engine, &mut stdout);
}

/// Removes word-set duplicates, writing one
/// `Found duplicate document id <id>` line per removed document to `sink`.
pub fn remove_duplicates_to<W: Write>(engine: &mut SearchEngine, sink: &mut W) -> io::Result<()> {
    let mut seen_word_sets: BTreeSet<Vec<String>> = BTreeSet::new();
    let mut duplicate_ids: Vec<i32> = Vec::new();

    for id in engine.iter() {
        // Keys of an ordered map: already the sorted distinct-word set.
        let words: Vec<String> = engine.word_frequencies(id).keys().cloned().collect();
        if !seen_word_sets.insert(words) {
            duplicate_ids.push(id);
        }
    }

    for id in duplicate_ids {
        engine.remove_document(id);
        writeln!(sink, "Found duplicate document id {id}")?;
        tracing::info!("Found duplicate document id {}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    fn engine_with(texts: &[(i32, &str)]) -> SearchEngine {
        let mut engine = SearchEngine::default();
        for &(id, text) in texts {
            engine
                .add_document(id, text, DocumentStatus::Actual, &[1])
                .unwrap();
        }
        engine
    }

    #[test]
    fn test_keeps_smallest_id() {
        let mut engine = engine_with(&[(3, "cat dog"), (1, "dog cat"), (2, "cat bird")]);
        let mut sink = Vec::new();
        remove_duplicates_to(&mut engine, &mut sink).unwrap();
        assert_eq!(engine.iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "Found duplicate document id 3\n"
        );
    }

    #[test]
    fn test_frequencies_do_not_matter() {
        let mut engine = engine_with(&[(1, "cat cat dog"), (2, "cat dog dog dog")]);
        let mut sink = Vec::new();
        remove_duplicates_to(&mut engine, &mut sink).unwrap();
        assert_eq!(engine.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_idempotent() {
        let mut engine = engine_with(&[(1, "cat"), (2, "cat"), (3, "dog")]);
        let mut first = Vec::new();
        remove_duplicates_to(&mut engine, &mut first).unwrap();
        let mut second = Vec::new();
        remove_duplicates_to(&mut engine, &mut second).unwrap();
        assert!(second.is_empty());
        assert_eq!(engine.document_count(), 2);
    }

    #[test]
    fn test_no_duplicates_no_output() {
        let mut engine = engine_with(&[(1, "cat"), (2, "dog")]);
        let mut sink = Vec::new();
        remove_duplicates_to(&mut engine, &mut sink).unwrap();
        assert!(sink.is_empty());
        assert_eq!(engine.document_count(), 2);
    }
}
