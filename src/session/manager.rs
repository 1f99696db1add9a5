use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tracing::{debug, warn};

use super::SessionError;
use crate::store::{SessionRecord, SessionStore, StoreError};

/// How long a session stays valid after issue or refresh: 7 days.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

const TOKEN_BYTES: usize = 32;

/// Outcome of one sweep cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Records examined.
    pub scanned: usize,
    /// Expired records deleted.
    pub evicted: usize,
    /// Expired records whose deletion failed.
    pub failed: usize,
    /// The first deletion failure of the cycle, if any.
    pub first_error: Option<StoreError>,
}

pub struct SessionManager<S> {
    store: S,
    ttl: Duration,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }

    pub fn with_ttl(store: S, ttl: Duration) -> Self {
        SessionManager { store, ttl }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, SessionError> {
        now.checked_add_signed(self.ttl)
            .ok_or(SessionError::ExpiryOutOfRange)
    }

    /// Create a session valid until `now + ttl`.
    pub fn issue(&self, now: DateTime<Utc>) -> Result<SessionRecord, SessionError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);

        let record = SessionRecord {
            token: URL_SAFE_NO_PAD.encode(bytes),
            expires_at: self.expiry_from(now)?,
        };
        self.store.insert(&record)?;
        Ok(record)
    }

    /// Verify `token` is known and unexpired. An expired record is deleted
    /// on the spot, independent of the sweep.
    pub fn check(&self, token: &str, now: DateTime<Utc>) -> Result<(), SessionError> {
        let expires_at = self
            .store
            .find_expiry(token)?
            .ok_or(SessionError::NotFound)?;

        if expires_at < now {
            self.store.delete_by_token(token)?;
            debug!("removed expired session during check");
            return Err(SessionError::Expired);
        }
        Ok(())
    }

    /// Extend `token` to `now + ttl`.
    pub fn refresh(&self, token: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, SessionError> {
        let expires_at = self.expiry_from(now)?;
        if self.store.update_expiry(token, expires_at)? {
            Ok(expires_at)
        } else {
            Err(SessionError::NotFound)
        }
    }

    /// What an authenticated request does: check, then refresh.
    pub fn authenticate(&self, token: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, SessionError> {
        self.check(token, now)?;
        self.refresh(token, now)
    }

    /// Log out. Returns false if the token was unknown.
    pub fn revoke(&self, token: &str) -> Result<bool, SessionError> {
        Ok(self.store.delete_by_token(token)?)
    }

    /// One expiry sweep: delete every record whose expiry is before `now`.
    ///
    /// Failing to list the records fails the cycle. A failed deletion is
    /// logged and counted and the sweep moves on to the next record.
    pub fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport, SessionError> {
        let records = self.store.list_all()?;
        let mut report = SweepReport {
            scanned: records.len(),
            ..SweepReport::default()
        };

        if records.is_empty() {
            debug!("sweep: no sessions");
            return Ok(report);
        }

        for record in records.iter().filter(|r| r.is_expired_at(now)) {
            match self.store.delete_by_token(&record.token) {
                Ok(true) => report.evicted += 1,
                // Already gone (logout or inline check got there first).
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        error = %err,
                        expired_at = %record.expires_at,
                        "sweep: failed to delete expired session"
                    );
                    report.failed += 1;
                    report.first_error.get_or_insert(err);
                }
            }
        }

        debug!(
            scanned = report.scanned,
            evicted = report.evicted,
            failed = report.failed,
            "sweep finished"
        );
        Ok(report)
    }
}
