//! Background session expiry sweep.
//!
//! `SessionSweeper` owns one OS thread that runs [`SessionManager::sweep`]
//! every `interval` until stopped. Sweep failures are logged and counted;
//! they never end the thread.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use forum_core::{InMemorySessionStore, SessionManager, SessionSweeper};
//!
//! let sessions = Arc::new(SessionManager::new(InMemorySessionStore::new()));
//! let sweeper = SessionSweeper::spawn(sessions.clone(), Duration::from_secs(5));
//!
//! // ... serve requests ...
//!
//! let stats = sweeper.stop();
//! println!("evicted {} sessions in {} cycles", stats.evicted, stats.cycles);
//! ```
//!
//! [`SessionManager::sweep`]: crate::SessionManager::sweep

mod thread;

pub use thread::{sweep_once, SessionSweeper, SweepStats};
