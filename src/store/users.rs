use crate::post::UserId;

/// Author id used in listing filters when a username does not resolve.
/// Real ids are never negative, so it matches nothing.
pub const UNRESOLVED_USER: UserId = -1;

/// Lookup into the external user directory.
pub trait UserDirectory: Send + Sync {
    fn resolve(&self, username: &str) -> Option<UserId>;
}
