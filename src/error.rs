//! Error types for the search engine.

/// Errors returned by engine operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An input failed validation: negative or duplicate document id,
    /// a control character inside a word, or a malformed query word.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The requested document id is not present in the engine.
    #[error("no document with id {0}")]
    DocumentNotFound(i32),
}
