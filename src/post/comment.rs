use chrono::{DateTime, Utc};
use thiserror::Error;

use super::model::{Author, Comment, Post};

/// Comment bodies must be strictly shorter than this many characters.
pub const MAX_COMMENT_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    #[error("comment is required")]
    Empty,
    #[error("comment must be shorter than 2000 characters")]
    TooLong,
    #[error("comment {0} not found")]
    NotFound(u64),
    #[error("comment {0} belongs to another user")]
    NotOwner(u64),
}

/// Reject empty bodies and bodies of [`MAX_COMMENT_LEN`] characters or more.
pub fn validate_body(body: &str) -> Result<(), CommentError> {
    if body.is_empty() {
        return Err(CommentError::Empty);
    }
    if body.chars().count() >= MAX_COMMENT_LEN {
        return Err(CommentError::TooLong);
    }
    Ok(())
}

impl Post {
    /// Next id from the post's own comment counter.
    pub fn take_comment_id(&mut self) -> u64 {
        let id = self.next_comment_id;
        self.next_comment_id += 1;
        id
    }

    pub fn add_comment(
        &mut self,
        author: Author,
        body: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Result<u64, CommentError> {
        let body = body.into();
        validate_body(&body)?;

        let id = self.take_comment_id();
        self.comments.push(Comment {
            id,
            author,
            body,
            created,
        });
        Ok(id)
    }

    /// Remove comment `id` if `requester` wrote it.
    pub fn remove_comment(&mut self, id: u64, requester: &Author) -> Result<Comment, CommentError> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or(CommentError::NotFound(id))?;
        if self.comments[index].author != *requester {
            return Err(CommentError::NotOwner(id));
        }
        Ok(self.comments.remove(index))
    }
}
