//! Forum service - the read-modify-write flows request handlers run.
//!
//! Each mutating call takes the post's lock through a [`PostGuard`], reads
//! the current state, applies one change, re-tallies where votes moved and
//! writes the whole post back before the guard releases the lock. Errors
//! come back as a single [`ForumError`] whose [`ForumError::outcome`] tells
//! a transport layer which class of response to send.
//!
//! [`PostGuard`]: crate::PostGuard

mod error;
mod forum;

pub use error::{ForumError, Outcome};
pub use forum::ForumService;
