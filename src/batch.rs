//! Parallel evaluation of query batches.
//!
//! Each query runs through the sequential ranker on its own rayon task;
//! results come back in input order regardless of completion order.

use crate::document::Document;
use crate::engine::SearchEngine;
use crate::error::SearchError;
use rayon::prelude::*;

/// Evaluates every query against the engine in parallel.
///
/// `result[i]` corresponds to `queries[i]`. If any query fails to parse,
/// one of the observed errors is returned and all results are discarded.
pub fn process_queries(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Vec<Document>>, SearchError> {
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query))
        .collect()
}

/// Like [`process_queries`], flattened into one list that preserves the
/// input order of the queries.
pub fn process_queries_joined(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Document>, SearchError> {
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
