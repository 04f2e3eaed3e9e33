//! Global configuration constants for lexsearch.
//!
//! All wire-visible tuning parameters are defined here as compile-time
//! constants. Hosts embedding the engine cannot change them at runtime;
//! they are part of the observable contract.

/// Maximum number of documents returned by a single ranked query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance tie epsilon.
///
/// Two documents whose relevance differs by less than this are considered
/// tied and ordered by descending rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Number of recent queries tracked by [`RequestQueue`](crate::RequestQueue).
///
/// One slot per minute of a day. Once the window is full, each new request
/// evicts the oldest slot.
pub const REQUEST_WINDOW_SIZE: usize = 1440;

/// Shard count for the striped relevance map used by parallel scoring.
///
/// Contention during parallel accumulation is bounded to 1/N of a single
/// lock in the common case.
pub const RELEVANCE_SHARD_COUNT: usize = 10;
