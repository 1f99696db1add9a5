//! Runtime configuration loaded from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::repository::FailedIdPolicy;
use crate::session::DEFAULT_SESSION_TTL_SECS;

pub const SESSION_TTL_VAR: &str = "FORUM_SESSION_TTL_SECS";
pub const SWEEP_INTERVAL_VAR: &str = "FORUM_SWEEP_INTERVAL_SECS";
pub const RECLAIM_FAILED_IDS_VAR: &str = "FORUM_RECLAIM_FAILED_IDS";

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumConfig {
    /// Session validity window after issue or refresh.
    pub session_ttl_secs: i64,
    /// Pause between expiry sweeps.
    pub sweep_interval_secs: u64,
    /// Give back the id of a post whose insert failed.
    pub reclaim_failed_ids: bool,
}

impl Default for ForumConfig {
    fn default() -> Self {
        ForumConfig {
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            reclaim_failed_ids: false,
        }
    }
}

impl ForumConfig {
    /// Load from environment variables, reading `.env` first if present.
    /// Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ForumConfig::default();

        let session_ttl_secs = parse_var(&lookup, SESSION_TTL_VAR, defaults.session_ttl_secs)?;
        if session_ttl_secs <= 0 || chrono::Duration::try_seconds(session_ttl_secs).is_none() {
            return Err(ConfigError::Invalid {
                var: SESSION_TTL_VAR,
                value: session_ttl_secs.to_string(),
            });
        }
        let sweep_interval_secs =
            parse_var(&lookup, SWEEP_INTERVAL_VAR, defaults.sweep_interval_secs)?;
        if sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                var: SWEEP_INTERVAL_VAR,
                value: "0".into(),
            });
        }
        let reclaim_failed_ids =
            parse_var(&lookup, RECLAIM_FAILED_IDS_VAR, defaults.reclaim_failed_ids)?;

        Ok(ForumConfig {
            session_ttl_secs,
            sweep_interval_secs,
            reclaim_failed_ids,
        })
    }

    /// The session window. Fails for a value `from_lookup` would have rejected.
    pub fn session_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::try_seconds(self.session_ttl_secs)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| ConfigError::Invalid {
                var: SESSION_TTL_VAR,
                value: self.session_ttl_secs.to_string(),
            })
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn failed_id_policy(&self) -> FailedIdPolicy {
        if self.reclaim_failed_ids {
            FailedIdPolicy::Reclaim
        } else {
            FailedIdPolicy::Burn
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
