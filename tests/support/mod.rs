//! Shared fixtures for the integration suites: a ready-made forum, post
//! drafts, and store wrappers that fail on demand.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use forum_core::{
    Author, FailedIdPolicy, ForumService, InMemoryPostStore, InMemorySessionStore,
    InMemoryUserDirectory, Post, PostDraft, PostFilter, PostId, PostKind, PostRepository,
    PostSort, PostStore, SessionRecord, SessionStore, StoreError,
};

pub type Forum = ForumService<InMemoryPostStore, InMemoryUserDirectory>;
pub type Repo = PostRepository<InMemoryPostStore, InMemoryUserDirectory>;

pub fn repo() -> Repo {
    PostRepository::open(
        InMemoryPostStore::new(),
        InMemoryUserDirectory::new(),
        FailedIdPolicy::Burn,
    )
    .unwrap()
}

/// A forum whose user directory knows `usernames`, in order from id 1.
pub fn forum_with_users(usernames: &[&str]) -> (Forum, Vec<Author>) {
    let users = InMemoryUserDirectory::new();
    let authors = usernames
        .iter()
        .map(|name| Author::new(*name, users.register(name).unwrap()))
        .collect();
    let forum = ForumService::new(
        PostRepository::open(InMemoryPostStore::new(), users, FailedIdPolicy::Burn).unwrap(),
    );
    (forum, authors)
}

pub fn text_draft(category: &str, title: &str) -> PostDraft {
    PostDraft {
        title: title.into(),
        category: category.into(),
        kind: PostKind::Text,
        text: Some(format!("{title} body")),
        url: None,
    }
}

pub fn link_draft(category: &str, title: &str, url: &str) -> PostDraft {
    PostDraft {
        title: title.into(),
        category: category.into(),
        kind: PostKind::Link,
        text: None,
        url: Some(url.into()),
    }
}

pub fn new_post(category: &str, author: Author, at: DateTime<Utc>) -> Post {
    Post::submit(text_draft(category, "post"), author, at)
}

/// Post store whose operations can each be switched to fail.
#[derive(Clone, Default)]
pub struct FlakyPostStore {
    inner: InMemoryPostStore,
    inserts: Arc<AtomicBool>,
    finds: Arc<AtomicBool>,
    replaces: Arc<AtomicBool>,
    deletes: Arc<AtomicBool>,
}

impl FlakyPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_inserts(&self, failing: bool) {
        self.inserts.store(failing, Ordering::SeqCst);
    }

    pub fn fail_finds(&self, failing: bool) {
        self.finds.store(failing, Ordering::SeqCst);
    }

    pub fn fail_replaces(&self, failing: bool) {
        self.replaces.store(failing, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, failing: bool) {
        self.deletes.store(failing, Ordering::SeqCst);
    }

    fn check(switch: &AtomicBool, operation: &str) -> Result<(), StoreError> {
        if switch.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{operation} refused")));
        }
        Ok(())
    }
}

impl PostStore for FlakyPostStore {
    fn insert(&self, post: &Post) -> Result<(), StoreError> {
        Self::check(&self.inserts, "insert")?;
        self.inner.insert(post)
    }

    fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Self::check(&self.finds, "find")?;
        self.inner.find_by_id(id)
    }

    fn list_matching(&self, filter: &PostFilter, sort: PostSort) -> Result<Vec<Post>, StoreError> {
        self.inner.list_matching(filter, sort)
    }

    fn replace(&self, post: &Post) -> Result<bool, StoreError> {
        Self::check(&self.replaces, "replace")?;
        self.inner.replace(post)
    }

    fn delete_by_id(&self, id: PostId) -> Result<bool, StoreError> {
        Self::check(&self.deletes, "delete")?;
        self.inner.delete_by_id(id)
    }
}

/// A forum over a [`FlakyPostStore`], plus a handle to flip its failures.
pub fn flaky_forum() -> (ForumService<FlakyPostStore, InMemoryUserDirectory>, FlakyPostStore) {
    let store = FlakyPostStore::new();
    let forum = ForumService::new(
        PostRepository::open(store.clone(), InMemoryUserDirectory::new(), FailedIdPolicy::Burn)
            .unwrap(),
    );
    (forum, store)
}

/// Session store that refuses to delete the listed tokens, and can be told
/// to fail listing altogether.
#[derive(Clone, Default)]
pub struct StubbornSessionStore {
    pub inner: InMemorySessionStore,
    undeletable: Arc<HashSet<String>>,
    failing_list: Arc<AtomicBool>,
}

impl StubbornSessionStore {
    pub fn refusing(tokens: &[&str]) -> Self {
        StubbornSessionStore {
            undeletable: Arc::new(tokens.iter().map(|t| t.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn fail_listing(&self, failing: bool) {
        self.failing_list.store(failing, Ordering::SeqCst);
    }
}

impl SessionStore for StubbornSessionStore {
    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError> {
        self.inner.insert(record)
    }

    fn find_expiry(&self, token: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.inner.find_expiry(token)
    }

    fn list_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        if self.failing_list.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("listing refused".into()));
        }
        self.inner.list_all()
    }

    fn delete_by_token(&self, token: &str) -> Result<bool, StoreError> {
        if self.undeletable.contains(token) {
            return Err(StoreError::Unavailable(format!("cannot delete {token}")));
        }
        self.inner.delete_by_token(token)
    }

    fn update_expiry(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        self.inner.update_expiry(token, expires_at)
    }
}
