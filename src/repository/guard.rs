use tracing::warn;

use super::{PostRepository, RepositoryError};
use crate::post::{Post, PostId};
use crate::store::{PostStore, UserDirectory};

/// Held lock on one post; released when dropped.
pub struct PostGuard<'a, S: PostStore, U: UserDirectory> {
    repo: &'a PostRepository<S, U>,
    id: PostId,
}

impl<'a, S: PostStore, U: UserDirectory> PostGuard<'a, S, U> {
    pub(super) fn new(repo: &'a PostRepository<S, U>, id: PostId) -> Self {
        PostGuard { repo, id }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn fetch(&self) -> Result<Post, RepositoryError> {
        self.repo.fetch(self.id)
    }

    pub fn replace(&self, post: &Post) -> Result<(), RepositoryError> {
        if post.id != self.id {
            return Err(RepositoryError::WrongPost {
                held: self.id,
                given: post.id,
            });
        }
        self.repo.replace(post)
    }

    /// Delete the post. The lock goes with it.
    pub fn remove(self) -> Result<bool, RepositoryError> {
        self.repo.remove(self.id)
    }
}

impl<S: PostStore, U: UserDirectory> Drop for PostGuard<'_, S, U> {
    fn drop(&mut self) {
        // After a successful remove the entry is gone and this is a no-op.
        if let Err(err) = self.repo.unlock(self.id) {
            warn!(id = self.id, error = %err, "failed to release post lock");
        }
    }
}
