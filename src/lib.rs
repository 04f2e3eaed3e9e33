//! # lexsearch
//!
//! Embeddable, in-memory inverted-index text search engine with TF-IDF
//! ranking: stop-word filtering, minus-word exclusion, filtered top-K
//! retrieval, document matching, word-set deduplication, parallel batch
//! queries, and a rolling empty-result request tracker.
//!
//! The engine is a plain library with no async dependencies, suitable
//! for embedding directly in a host process. Read operations hold no
//! locks and are concurrently callable under a single-writer discipline;
//! the parallel execution paths run on the rayon pool.

/// Parallel evaluation of query batches.
pub mod batch;
/// Global configuration constants: result limits and tuning parameters.
pub mod config;
/// Striped concurrent map used for parallel score accumulation.
pub mod concurrent_map;
/// Removal of documents with identical word sets.
pub mod dedup;
/// Core document types: `Document` result record and `DocumentStatus`.
pub mod document;
/// The `SearchEngine` façade and execution policies.
pub mod engine;
/// Error types.
pub mod error;
/// Query parsing: plus-words, minus-words, validation.
pub mod query;
/// Rolling window of recent queries and their emptiness.
pub mod request_queue;
/// Word splitting, token validation, and the stop-word set.
pub mod tokenizer;

mod index;

pub use batch::{process_queries, process_queries_joined};
pub use dedup::{remove_duplicates, remove_duplicates_to};
pub use document::{Document, DocumentStatus};
pub use engine::{ExecutionPolicy, SearchEngine};
pub use error::SearchError;
pub use request_queue::RequestQueue;
