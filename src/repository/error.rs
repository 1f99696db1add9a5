use thiserror::Error;

use crate::lock::LockError;
use crate::post::PostId;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("post {0} not found")]
    NotFound(PostId),
    #[error("guard for post {held} cannot write post {given}")]
    WrongPost { held: PostId, given: PostId },
    #[error("repository lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("listing serialization failed: {0}")]
    Serialize(String),
}
