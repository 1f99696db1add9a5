use thiserror::Error;

use crate::post::{CommentError, PostId};
use crate::repository::RepositoryError;
use crate::session::SessionError;

/// Response class at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Cheap, idempotent negative answer.
    NotFound,
    Unauthorized,
    Forbidden,
    /// The request itself was malformed.
    Invalid,
    /// Generic server-side failure, distinct from "not found".
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForumError {
    #[error("post {0} not found")]
    PostNotFound(PostId),
    #[error("post {0} belongs to another user")]
    NotPostOwner(PostId),
    #[error(transparent)]
    Comment(#[from] CommentError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ForumError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ForumError::PostNotFound(id),
            other => ForumError::Repository(other),
        }
    }
}

impl ForumError {
    pub fn outcome(&self) -> Outcome {
        match self {
            ForumError::PostNotFound(_) => Outcome::NotFound,
            ForumError::NotPostOwner(_) => Outcome::Forbidden,
            ForumError::Comment(err) => match err {
                CommentError::Empty | CommentError::TooLong => Outcome::Invalid,
                CommentError::NotFound(_) => Outcome::NotFound,
                CommentError::NotOwner(_) => Outcome::Forbidden,
            },
            ForumError::Session(err) => match err {
                SessionError::NotFound | SessionError::Expired => Outcome::Unauthorized,
                SessionError::ExpiryOutOfRange | SessionError::Store(_) => Outcome::Internal,
            },
            ForumError::Repository(err) => match err {
                RepositoryError::NotFound(_) => Outcome::NotFound,
                RepositoryError::WrongPost { .. }
                | RepositoryError::LockPoisoned(_)
                | RepositoryError::Lock(_)
                | RepositoryError::Store(_)
                | RepositoryError::Serialize(_) => Outcome::Internal,
            },
        }
    }
}
