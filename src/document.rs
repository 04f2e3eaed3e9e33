//! Core document types for lexsearch.
//!
//! A [`Document`] is a ranked query result: the stored document's id and
//! rating together with the relevance computed for the query that produced
//! it. [`DocumentStatus`] is the moderation state used for filtering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation status of a stored document.
///
/// Queries filter on this; the default status filter is [`Actual`](Self::Actual).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live, returned by default.
    #[default]
    Actual,
    /// Indexed but no longer relevant.
    Irrelevant,
    /// Banned by moderation.
    Banned,
    /// Scheduled for removal.
    Removed,
}

/// A ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Id the document was ingested with.
    pub id: i32,
    /// TF-IDF relevance for the query that produced this result.
    pub relevance: f64,
    /// Truncated integer mean of the ingestion ratings.
    pub rating: i32,
}

impl Document {
    /// Creates a result record.
    pub fn new(id: i32, relevance: f64, rating: i32) -> Self {
        Self {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let doc = Document::new(7, 0.25, 4);
        assert_eq!(
            doc.to_string(),
            "{ document_id = 7, relevance = 0.25, rating = 4 }"
        );
    }

    #[test]
    fn test_default_status_is_actual() {
        assert_eq!(DocumentStatus::default(), DocumentStatus::Actual);
    }
}
