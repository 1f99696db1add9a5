//! Per-item locking primitives.
//!
//! `PostRepository` keeps one `Lock` per live post in a `LockTable`. The
//! table itself is only a structural map; whoever owns it must serialise
//! inserts and removals (the repository does so under its top-level mutex).

mod error;
mod in_memory;
mod lock;
mod table;

pub use error::LockError;
pub use in_memory::InMemoryLock;
pub use lock::Lock;
pub use table::LockTable;
