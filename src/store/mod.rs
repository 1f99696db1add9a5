//! Store adapters - the persistence primitives the core consumes.
//!
//! The traits here are the whole contract with the system of record: single
//! document insert/find/replace/delete plus filtered listing. Adapters give
//! no concurrency guarantees beyond atomic single-document operations; all
//! read-modify-write coordination lives in `PostRepository`.
//!
//! The in-memory adapters are `Clone` handles over shared state, so a test
//! or a bootstrap can keep one handle while the repository owns another.

mod error;
mod in_memory;
mod posts;
mod sessions;
mod users;

pub use error::StoreError;
pub use in_memory::{InMemoryPostStore, InMemorySessionStore, InMemoryUserDirectory};
pub use posts::{PostFilter, PostSort, PostStore};
pub use sessions::{SessionRecord, SessionStore};
pub use users::{UserDirectory, UNRESOLVED_USER};
