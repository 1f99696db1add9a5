use chrono::{DateTime, Utc};
use tracing::debug;

use super::ForumError;
use crate::config::ForumConfig;
use crate::post::{validate_body, Author, Ballot, Post, PostDraft, PostId, UserId};
use crate::repository::PostRepository;
use crate::store::{PostStore, UserDirectory};

pub struct ForumService<S, U> {
    posts: PostRepository<S, U>,
}

impl<S: PostStore, U: UserDirectory> ForumService<S, U> {
    pub fn new(posts: PostRepository<S, U>) -> Self {
        ForumService { posts }
    }

    /// Open the repository over `store` and wrap it.
    pub fn open(store: S, users: U, config: &ForumConfig) -> Result<Self, ForumError> {
        let posts = PostRepository::open(store, users, config.failed_id_policy())?;
        Ok(Self::new(posts))
    }

    pub fn posts(&self) -> &PostRepository<S, U> {
        &self.posts
    }

    /// Lock `id`, apply `change` to its current state and write it back.
    fn modify<F>(&self, id: PostId, change: F) -> Result<Post, ForumError>
    where
        F: FnOnce(&mut Post) -> Result<(), ForumError>,
    {
        let guard = self
            .posts
            .acquire(id)?
            .ok_or(ForumError::PostNotFound(id))?;
        let mut post = guard.fetch()?;
        change(&mut post)?;
        guard.replace(&post)?;
        Ok(post)
    }

    /// Publish a new post by `author`, who starts with their own upvote.
    pub fn submit(
        &self,
        author: Author,
        draft: PostDraft,
        now: DateTime<Utc>,
    ) -> Result<Post, ForumError> {
        let mut post = Post::submit(draft, author, now);
        self.posts.create(&mut post)?;
        Ok(post)
    }

    /// Read a post, counting the view.
    pub fn view(&self, id: PostId) -> Result<Post, ForumError> {
        self.modify(id, |post| {
            post.views += 1;
            Ok(())
        })
    }

    pub fn vote(&self, id: PostId, voter: UserId, ballot: Ballot) -> Result<Post, ForumError> {
        self.modify(id, |post| {
            post.cast(voter, ballot);
            Ok(())
        })
    }

    pub fn comment(
        &self,
        id: PostId,
        author: Author,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<Post, ForumError> {
        validate_body(body)?;
        self.modify(id, |post| {
            let comment_id = post.add_comment(author, body, now)?;
            debug!(post = id, comment = comment_id, "comment added");
            Ok(())
        })
    }

    pub fn uncomment(
        &self,
        id: PostId,
        comment_id: u64,
        requester: &Author,
    ) -> Result<Post, ForumError> {
        self.modify(id, |post| {
            post.remove_comment(comment_id, requester)?;
            Ok(())
        })
    }

    /// Delete a post. Only its author may.
    pub fn delete(&self, id: PostId, requester: &Author) -> Result<(), ForumError> {
        let guard = self
            .posts
            .acquire(id)?
            .ok_or(ForumError::PostNotFound(id))?;
        let post = guard.fetch()?;
        if !post.is_authored_by(requester) {
            return Err(ForumError::NotPostOwner(id));
        }
        if guard.remove()? {
            Ok(())
        } else {
            Err(ForumError::PostNotFound(id))
        }
    }

    /// JSON listing; see [`PostRepository::list_serialized`].
    pub fn list(&self, category: &str, username: &str) -> Result<Vec<u8>, ForumError> {
        Ok(self.posts.list_serialized(category, username)?)
    }
}
