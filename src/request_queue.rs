//! Rolling window of recent queries and their emptiness.
//!
//! Wraps the sequential ranker and remembers, for the last
//! [`REQUEST_WINDOW_SIZE`](crate::config::REQUEST_WINDOW_SIZE) requests,
//! whether each returned zero results. Owned by a single caller thread.

use crate::config;
use crate::document::{Document, DocumentStatus};
use crate::engine::SearchEngine;
use crate::error::SearchError;
use std::collections::VecDeque;

struct QueryResult {
    is_empty: bool,
}

/// Fixed-window tracker of empty-result queries.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<QueryResult>,
    empty_request_count: usize,
}

impl<'a> RequestQueue<'a> {
    /// Creates a tracker over the given engine.
    pub fn new(engine: &'a SearchEngine) -> Self {
        Self {
            engine,
            requests: VecDeque::with_capacity(config::REQUEST_WINDOW_SIZE),
            empty_request_count: 0,
        }
    }

    /// Runs a default query (status `Actual`) and records its emptiness.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        let result = self.engine.find_top_documents(raw_query)?;
        self.record(result.is_empty());
        Ok(result)
    }

    /// Runs a status-filtered query and records its emptiness.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        let result = self.engine.find_top_documents_with_status(raw_query, status)?;
        self.record(result.is_empty());
        Ok(result)
    }

    /// Runs a predicate-filtered query and records its emptiness.
    pub fn add_find_request_filtered<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(i32, DocumentStatus, i32) -> bool + Sync,
    {
        let result = self.engine.find_top_documents_filtered(raw_query, predicate)?;
        self.record(result.is_empty());
        Ok(result)
    }

    /// Number of empty-result requests currently inside the window.
    pub fn empty_request_count(&self) -> usize {
        self.empty_request_count
    }

    fn record(&mut self, is_empty: bool) {
        if self.requests.len() == config::REQUEST_WINDOW_SIZE {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.is_empty {
                    self.empty_request_count -= 1;
                }
            }
        }
        self.requests.push_back(QueryResult { is_empty });
        if is_empty {
            self.empty_request_count += 1;
        }
    }
}
