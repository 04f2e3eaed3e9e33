//! TF-IDF scoring: candidate accumulation, ordering, truncation.
//!
//! The sequential path accumulates relevance into a single ordered map.
//! The parallel path fans plus-words out over rayon workers that share a
//! striped [`ConcurrentMap`], then merges; minus-word suppression runs as
//! a second parallel phase. Both paths produce the same candidates, with
//! floating-point sums agreeing within the relevance epsilon.

use crate::concurrent_map::ConcurrentMap;
use crate::config;
use crate::document::{Document, DocumentStatus};
use crate::index::InvertedIndex;
use crate::query::Query;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// `ln(total documents / documents containing the word)`.
///
/// Only called for words present in the index, so `document_count > 0`
/// and the posting list is non-empty.
fn inverse_document_frequency(index: &InvertedIndex, postings_len: usize) -> f64 {
    (index.document_count() as f64 / postings_len as f64).ln()
}

fn to_documents(index: &InvertedIndex, relevance: BTreeMap<i32, f64>) -> Vec<Document> {
    relevance
        .into_iter()
        .map(|(id, relevance)| {
            let rating = index.document_data(id).map_or(0, |data| data.rating);
            Document::new(id, relevance, rating)
        })
        .collect()
}

/// Sequential candidate scoring.
pub(crate) fn find_all_documents<P>(
    index: &InvertedIndex,
    query: &Query,
    predicate: &P,
) -> Vec<Document>
where
    P: Fn(i32, DocumentStatus, i32) -> bool,
{
    let mut document_to_relevance: BTreeMap<i32, f64> = BTreeMap::new();

    for word in &query.plus_words {
        let Some(postings) = index.postings(word) else {
            continue;
        };
        let idf = inverse_document_frequency(index, postings.len());
        for (&id, &term_frequency) in postings {
            if let Some(data) = index.document_data(id) {
                if predicate(id, data.status, data.rating) {
                    *document_to_relevance.entry(id).or_insert(0.0) += term_frequency * idf;
                }
            }
        }
    }

    for word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for &id in postings.keys() {
                document_to_relevance.remove(&id);
            }
        }
    }

    to_documents(index, document_to_relevance)
}

/// Parallel candidate scoring over the striped relevance map.
pub(crate) fn find_all_documents_par<P>(
    index: &InvertedIndex,
    query: &Query,
    predicate: &P,
) -> Vec<Document>
where
    P: Fn(i32, DocumentStatus, i32) -> bool + Sync,
{
    let document_to_relevance: ConcurrentMap<i32, f64> =
        ConcurrentMap::new(config::RELEVANCE_SHARD_COUNT);

    query.plus_words.par_iter().for_each(|word| {
        let Some(postings) = index.postings(word) else {
            return;
        };
        let idf = inverse_document_frequency(index, postings.len());
        for (&id, &term_frequency) in postings {
            if let Some(data) = index.document_data(id) {
                if predicate(id, data.status, data.rating) {
                    *document_to_relevance.access(id) += term_frequency * idf;
                }
            }
        }
    });

    query.minus_words.par_iter().for_each(|word| {
        if let Some(postings) = index.postings(word) {
            for &id in postings.keys() {
                document_to_relevance.erase(id);
            }
        }
    });

    to_documents(index, document_to_relevance.build_ordinary_map())
}

/// Orders candidates by relevance descending, rating descending within the
/// relevance epsilon, and truncates to the result limit. The sort is
/// stable, so equal keys keep the ascending-id order of the candidates.
pub(crate) fn sort_and_truncate(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < config::RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance
                .partial_cmp(&lhs.relevance)
                .unwrap_or(Ordering::Equal)
        }
    });
    documents.truncate(config::MAX_RESULT_DOCUMENT_COUNT);
    documents
}
