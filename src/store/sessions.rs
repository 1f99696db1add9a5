use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;

/// An authorization record: an opaque token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Table of authorization records, keyed by token.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError>;

    fn find_expiry(&self, token: &str) -> Result<Option<DateTime<Utc>>, StoreError>;

    fn list_all(&self) -> Result<Vec<SessionRecord>, StoreError>;

    /// Returns true if a record was deleted.
    fn delete_by_token(&self, token: &str) -> Result<bool, StoreError>;

    /// Returns false if no record has this token.
    fn update_expiry(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError>;
}
