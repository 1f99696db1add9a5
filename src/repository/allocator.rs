use std::sync::atomic::{AtomicU64, Ordering};

use crate::post::PostId;

/// What `create` does with an identifier whose insert failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailedIdPolicy {
    /// Leave a gap; the identifier is never handed out again.
    #[default]
    Burn,
    /// Give the identifier back if nothing was allocated after it.
    Reclaim,
}

/// Strictly increasing post identifiers.
///
/// The repository only calls [`IdAllocator::next`] while holding its
/// top-level lock, which is what makes identifier order match creation
/// order. The counter is atomic regardless, so a stray caller can never
/// produce a duplicate.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: AtomicU64,
}

impl IdAllocator {
    /// An allocator whose first identifier is `max + 1`.
    pub fn starting_after(max: PostId) -> Self {
        IdAllocator {
            last: AtomicU64::new(max),
        }
    }

    pub fn next(&self) -> PostId {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Hand `issued` back. Succeeds only if it is still the most recent
    /// allocation; otherwise nothing changes and false is returned.
    pub fn rollback(&self, issued: PostId) -> bool {
        if issued == 0 {
            return false;
        }
        self.last
            .compare_exchange(issued, issued - 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// The most recently issued identifier (or the seed).
    pub fn last(&self) -> PostId {
        self.last.load(Ordering::SeqCst)
    }
}
