use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("token not found")]
    NotFound,
    #[error("token is expired")]
    Expired,
    /// `now + ttl` is past the last representable instant.
    #[error("session expiry out of range")]
    ExpiryOutOfRange,
    #[error(transparent)]
    Store(#[from] StoreError),
}
