//! The concurrent post repository.
//!
//! `PostRepository` pairs a store adapter with an in-memory lock table and
//! an identifier allocator. Both are rebuilt from the store by
//! [`PostRepository::open`]; the store stays the system of record.
//!
//! ## Locking protocol
//!
//! ```ignore
//! if repo.lock(id)? {
//!     let mut post = repo.fetch(id)?;
//!     post.views += 1;
//!     let result = repo.replace(&post);
//!     repo.unlock(id)?;
//!     result?;
//! }
//! ```
//!
//! or, with the guard releasing on every exit path:
//!
//! ```ignore
//! if let Some(guard) = repo.acquire(id)? {
//!     let mut post = guard.fetch()?;
//!     post.views += 1;
//!     guard.replace(&post)?;
//! }
//! ```

mod allocator;
mod error;
mod guard;
mod repository;

pub use allocator::{FailedIdPolicy, IdAllocator};
pub use error::RepositoryError;
pub use guard::PostGuard;
pub use repository::PostRepository;
