use super::LockError;

/// A single exclusive lock that is not tied to a guard's lifetime.
///
/// Acquisition and release are separate calls so a request can take the
/// lock in one step of its flow and give it back in another. Nothing ties
/// a release to the thread that acquired it.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    ///
    /// There is no timeout and no cancellation: a holder that never calls
    /// [`Lock::unlock`] wedges every later caller indefinitely.
    fn lock(&self) -> Result<(), LockError>;

    /// Release the lock and wake one waiter. Releasing a free lock is a no-op.
    fn unlock(&self) -> Result<(), LockError>;
}
