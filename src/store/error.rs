use thiserror::Error;

/// Failures reported by a store adapter. "Not found" is never an error at
/// this layer; lookups return `Option` and mutations return whether they hit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A document with this key already exists.
    #[error("duplicate key {0}")]
    Duplicate(String),
    /// Stored bytes could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serde(String),
    /// The adapter's own lock was poisoned.
    #[error("store lock poisoned during {0}")]
    Poisoned(&'static str),
}
