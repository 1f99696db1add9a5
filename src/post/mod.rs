//! Posts - the content items the repository locks, stores and scores.
//!
//! A `Post` carries its own vote set and comment thread. Every mutation of
//! the vote set goes through [`Post::cast`], which re-runs [`recompute`]
//! so `score` and `upvote_percentage` never drift from `votes`.

mod comment;
mod model;
mod tally;

pub use comment::{validate_body, CommentError, MAX_COMMENT_LEN};
pub use model::{
    Author, Comment, Post, PostDraft, PostId, PostKind, PostListing, UserId, Vote,
};
pub use tally::{recompute, Ballot, Tally};
