//! Concurrent core of a forum-style content service.
//!
//! - [`PostRepository`] serialises read-modify-write access to individual
//!   posts with a per-post lock table, and hands out strictly increasing,
//!   never reused post ids.
//! - [`recompute`] derives a post's score and upvote percentage from its votes.
//! - [`SessionManager`] issues, checks and refreshes authorization records,
//!   and [`SessionSweeper`] evicts expired ones in the background.
//! - [`ForumService`] strings these together into the flows a request
//!   handler runs.
//!
//! Persistence is reached only through the traits in [`store`]; the
//! in-memory adapters there are enough for tests and single-process use.

pub mod config;
pub mod lock;
pub mod post;
pub mod repository;
pub mod service;
pub mod session;
pub mod store;
pub mod sweeper;

pub use config::{ConfigError, ForumConfig};
pub use lock::{InMemoryLock, Lock, LockError, LockTable};
pub use post::{
    recompute, Author, Ballot, Comment, CommentError, Post, PostDraft, PostId, PostKind,
    PostListing, Tally, UserId, Vote,
};
pub use repository::{FailedIdPolicy, IdAllocator, PostGuard, PostRepository, RepositoryError};
pub use service::{ForumError, ForumService, Outcome};
pub use session::{SessionError, SessionManager, SweepReport};
pub use store::{
    InMemoryPostStore, InMemorySessionStore, InMemoryUserDirectory, PostFilter, PostSort,
    PostStore, SessionRecord, SessionStore, StoreError, UserDirectory, UNRESOLVED_USER,
};
pub use sweeper::{sweep_once, SessionSweeper, SweepStats};
