use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::{FailedIdPolicy, IdAllocator, PostGuard, RepositoryError};
use crate::lock::{Lock, LockTable};
use crate::post::{Post, PostId, PostListing};
use crate::store::{PostFilter, PostSort, PostStore, UserDirectory, UNRESOLVED_USER};

/// Serialises read-modify-write access to individual posts.
///
/// Two tiers of locking:
/// - the top-level mutex guards the lock table and is held across
///   allocation + insert and across delete + entry removal;
/// - one [`Lock`] per live post, taken by [`PostRepository::lock`] and held
///   by the caller for the whole read-modify-write.
///
/// Posts with different ids never contend on the second tier.
pub struct PostRepository<S, U> {
    store: S,
    users: U,
    table: Mutex<LockTable>,
    ids: IdAllocator,
    failed_ids: FailedIdPolicy,
}

impl<S: PostStore, U: UserDirectory> PostRepository<S, U> {
    /// Rebuild repository state from the store: seed the allocator with the
    /// highest stored id and register one lock per stored post.
    pub fn open(store: S, users: U, failed_ids: FailedIdPolicy) -> Result<Self, RepositoryError> {
        let existing = store.list_matching(&PostFilter::all(), PostSort::Id)?;

        let mut table = LockTable::new();
        let mut max_id = 0;
        for post in &existing {
            table.insert(post.id);
            max_id = max_id.max(post.id);
        }
        debug!(posts = existing.len(), max_id, "post repository opened");

        Ok(PostRepository {
            store,
            users,
            table: Mutex::new(table),
            ids: IdAllocator::starting_after(max_id),
            failed_ids,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of posts with a live lock entry.
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.table("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn table(&self, operation: &'static str) -> Result<MutexGuard<'_, LockTable>, RepositoryError> {
        self.table
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned(operation))
    }

    /// Take the exclusive lock on post `id`.
    ///
    /// Returns `Ok(false)` at once if `id` has no lock entry. Otherwise
    /// **blocks until the lock is available, with no timeout**, then checks
    /// the post still exists; if another caller deleted it meanwhile the
    /// lock is released and `Ok(false)` returned. `Ok(true)` means the
    /// caller holds the lock on a live post and must call
    /// [`PostRepository::unlock`] exactly once.
    pub fn lock(&self, id: PostId) -> Result<bool, RepositoryError> {
        let Some(lock) = self.table("lock")?.get(id) else {
            return Ok(false);
        };

        lock.lock()?;
        match self.exists(id) {
            Ok(true) => Ok(true),
            Ok(false) => {
                lock.unlock()?;
                debug!(id, "lock entry outlived its post");
                Ok(false)
            }
            Err(err) => {
                lock.unlock()?;
                Err(err)
            }
        }
    }

    /// Release post `id`. Returns `Ok(false)` if it has no lock entry.
    pub fn unlock(&self, id: PostId) -> Result<bool, RepositoryError> {
        let Some(lock) = self.table("unlock")?.get(id) else {
            return Ok(false);
        };
        lock.unlock()?;
        Ok(true)
    }

    /// [`PostRepository::lock`] wrapped in a guard that unlocks on drop.
    pub fn acquire(&self, id: PostId) -> Result<Option<PostGuard<'_, S, U>>, RepositoryError> {
        if self.lock(id)? {
            Ok(Some(PostGuard::new(self, id)))
        } else {
            Ok(None)
        }
    }

    /// Assign the next id to `post` and persist it.
    ///
    /// On insert failure no lock entry is created and the error is returned;
    /// whether the id is reused depends on the [`FailedIdPolicy`].
    pub fn create(&self, post: &mut Post) -> Result<PostId, RepositoryError> {
        let mut table = self.table("create")?;

        let id = self.ids.next();
        post.id = id;
        if let Err(err) = self.store.insert(post) {
            let reclaimed =
                self.failed_ids == FailedIdPolicy::Reclaim && self.ids.rollback(id);
            warn!(id, reclaimed, error = %err, "post insert failed");
            return Err(err.into());
        }

        table.insert(id);
        debug!(id, category = %post.category, "post created");
        Ok(id)
    }

    /// Read-only probe; needs no lock.
    pub fn exists(&self, id: PostId) -> Result<bool, RepositoryError> {
        Ok(self.store.find_by_id(id)?.is_some())
    }

    /// Current stored state of post `id`. Does not take the lock; hold it
    /// for a point-in-time-consistent read-modify-write.
    pub fn fetch(&self, id: PostId) -> Result<Post, RepositoryError> {
        self.store
            .find_by_id(id)?
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Overwrite the stored post with `post`. Caller must hold its lock.
    pub fn replace(&self, post: &Post) -> Result<(), RepositoryError> {
        if self.store.replace(post)? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(post.id))
        }
    }

    /// Delete post `id` and retire its lock entry.
    ///
    /// The caller is expected to hold the post's lock; on success that lock
    /// is released here so any blocked waiters wake and see the post gone.
    /// A later `unlock(id)` is a harmless `Ok(false)`. An unknown id yields
    /// `Ok(false)` with nothing changed.
    pub fn remove(&self, id: PostId) -> Result<bool, RepositoryError> {
        let mut table = self.table("remove")?;

        if !self.store.delete_by_id(id)? {
            return Ok(false);
        }
        if let Some(lock) = table.remove(id) {
            lock.unlock()?;
        }
        debug!(id, "post removed");
        Ok(true)
    }

    /// Posts matching `category` and `username` (empty string = any), highest
    /// score first. An unknown username matches nothing.
    pub fn list(&self, category: &str, username: &str) -> Result<Vec<Post>, RepositoryError> {
        let mut filter = PostFilter::all();
        if !category.is_empty() {
            filter = filter.category(category);
        }
        if !username.is_empty() {
            let author_id = self.users.resolve(username).unwrap_or(UNRESOLVED_USER);
            filter = filter.author(author_id);
        }
        Ok(self.store.list_matching(&filter, PostSort::ScoreDescending)?)
    }

    /// [`PostRepository::list`] serialised as a JSON array of [`PostListing`]s.
    pub fn list_serialized(&self, category: &str, username: &str) -> Result<Vec<u8>, RepositoryError> {
        let posts = self.list(category, username)?;
        let listing: Vec<PostListing<'_>> = posts.iter().map(PostListing::from).collect();
        serde_json::to_vec(&listing).map_err(|e| RepositoryError::Serialize(e.to_string()))
    }
}
