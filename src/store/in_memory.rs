//! HashMap-backed adapters for tests, demos and single-process deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use super::{
    PostFilter, PostSort, PostStore, SessionRecord, SessionStore, StoreError, UserDirectory,
};
use crate::post::{Post, PostId, UserId};

/// In-memory post collection.
///
/// Posts are held as bitcode-encoded documents, so every read hands out an
/// independent snapshot the way a real document store would.
#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    documents: Arc<RwLock<HashMap<PostId, Vec<u8>>>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts.
    pub fn len(&self) -> Result<usize, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Poisoned("len"))?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn encode(post: &Post) -> Result<Vec<u8>, StoreError> {
        bitcode::serialize(post).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Post, StoreError> {
        bitcode::deserialize(bytes).map_err(|e| StoreError::Serde(e.to_string()))
    }
}

impl PostStore for InMemoryPostStore {
    fn insert(&self, post: &Post) -> Result<(), StoreError> {
        let bytes = Self::encode(post)?;
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Poisoned("insert"))?;
        if documents.contains_key(&post.id) {
            return Err(StoreError::Duplicate(post.id.to_string()));
        }
        documents.insert(post.id, bytes);
        Ok(())
    }

    fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Poisoned("find"))?;
        documents.get(&id).map(|bytes| Self::decode(bytes)).transpose()
    }

    fn list_matching(&self, filter: &PostFilter, sort: PostSort) -> Result<Vec<Post>, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Poisoned("list"))?;

        let mut posts = Vec::new();
        for bytes in documents.values() {
            let post = Self::decode(bytes)?;
            if filter.matches(&post) {
                posts.push(post);
            }
        }
        sort.apply(&mut posts);
        Ok(posts)
    }

    fn replace(&self, post: &Post) -> Result<bool, StoreError> {
        let bytes = Self::encode(post)?;
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Poisoned("replace"))?;
        match documents.get_mut(&post.id) {
            Some(slot) => {
                *slot = bytes;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_by_id(&self, id: PostId) -> Result<bool, StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Poisoned("delete"))?;
        Ok(documents.remove(&id).is_some())
    }
}

/// In-memory authorization table.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self.find_expiry(token)?.is_some())
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Poisoned("session insert"))?;
        if records.contains_key(&record.token) {
            return Err(StoreError::Duplicate(record.token.clone()));
        }
        records.insert(record.token.clone(), record.expires_at);
        Ok(())
    }

    fn find_expiry(&self, token: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Poisoned("session find"))?;
        Ok(records.get(token).copied())
    }

    fn list_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Poisoned("session list"))?;
        Ok(records
            .iter()
            .map(|(token, expires_at)| SessionRecord {
                token: token.clone(),
                expires_at: *expires_at,
            })
            .collect())
    }

    fn delete_by_token(&self, token: &str) -> Result<bool, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Poisoned("session delete"))?;
        Ok(records.remove(token).is_some())
    }

    fn update_expiry(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Poisoned("session update"))?;
        match records.get_mut(token) {
            Some(slot) => {
                *slot = expires_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory user directory handing out sequential ids from 1.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<String, UserId>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `username`, returning its id. Registering twice returns the existing id.
    pub fn register(&self, username: &str) -> Result<UserId, StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::Poisoned("user register"))?;
        let next = users.len() as UserId + 1;
        Ok(*users.entry(username.to_string()).or_insert(next))
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn resolve(&self, username: &str) -> Option<UserId> {
        // A poisoned directory resolves nobody; listings then match nothing.
        self.users.read().ok()?.get(username).copied()
    }
}
