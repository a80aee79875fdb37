//! Memory backend error types

use thiserror::Error;

/// Result type for memory backend operations
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory backend failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// A query or mutation referenced a collection that was never created
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}
