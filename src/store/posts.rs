use super::StoreError;
use crate::post::{Post, PostId, UserId};

/// Equality filter for post listings. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<String>,
    pub author_id: Option<UserId>,
}

impl PostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| post.category == category)
            && self.author_id.map_or(true, |id| post.author.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    /// Ascending id; what a startup scan wants.
    #[default]
    Id,
    /// Highest score first, ties broken by ascending id.
    ScoreDescending,
}

impl PostSort {
    pub fn apply(self, posts: &mut [Post]) {
        match self {
            PostSort::Id => posts.sort_by_key(|p| p.id),
            PostSort::ScoreDescending => {
                posts.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)))
            }
        }
    }
}

/// Document store for posts, keyed by post id.
pub trait PostStore: Send + Sync {
    /// Insert a new document. Fails with [`StoreError::Duplicate`] if the id is taken.
    fn insert(&self, post: &Post) -> Result<(), StoreError>;

    fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    fn list_matching(&self, filter: &PostFilter, sort: PostSort) -> Result<Vec<Post>, StoreError>;

    /// Overwrite the stored document with the same id. Returns false if none matched.
    fn replace(&self, post: &Post) -> Result<bool, StoreError>;

    /// Returns true if a document was deleted.
    fn delete_by_id(&self, id: PostId) -> Result<bool, StoreError>;
}
