//! Authorization sessions and their expiry sweep.
//!
//! A session is an opaque token with an absolute expiry. Every successful
//! authentication pushes the expiry out by the configured window; expired
//! records are removed either inline (when a request presents one) or by
//! [`SessionManager::sweep`], which `SessionSweeper` runs on a timer.
//! Neither path touches the post lock table.

mod error;
mod manager;

pub use error::SessionError;
pub use manager::{SessionManager, SweepReport, DEFAULT_SESSION_TTL_SECS};

pub use crate::store::SessionRecord;
