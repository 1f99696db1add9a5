use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tally::{recompute, Ballot};

/// Repository-assigned post identifier. Never reused.
pub type PostId = u64;

/// User identifier as issued by the user directory.
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    pub id: UserId,
}

impl Author {
    pub fn new(username: impl Into<String>, id: UserId) -> Self {
        Author {
            username: username.into(),
            id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Text,
    Link,
}

/// A single voter's standing vote. Only +1 and -1 are ever stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub user: UserId,
    pub vote: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: Author,
    pub body: String,
    pub created: DateTime<Utc>,
}

/// What a user submits; the rest of a `Post` is filled in on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub text: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub category: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub text: Option<String>,
    pub url: Option<String>,
    pub created: DateTime<Utc>,
    pub score: i64,
    pub views: u64,
    pub upvote_percentage: i64,
    pub votes: Vec<Vote>,
    pub comments: Vec<Comment>,
    /// Persisted with the post but never listed.
    #[serde(default)]
    pub next_comment_id: u64,
}

/// A post as listings show it: every field except the comment counter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListing<'a> {
    pub id: PostId,
    pub author: &'a Author,
    pub category: &'a str,
    pub title: &'a str,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub text: Option<&'a str>,
    pub url: Option<&'a str>,
    pub created: DateTime<Utc>,
    pub score: i64,
    pub views: u64,
    pub upvote_percentage: i64,
    pub votes: &'a [Vote],
    pub comments: &'a [Comment],
}

impl<'a> From<&'a Post> for PostListing<'a> {
    fn from(post: &'a Post) -> Self {
        PostListing {
            id: post.id,
            author: &post.author,
            category: &post.category,
            title: &post.title,
            kind: post.kind,
            text: post.text.as_deref(),
            url: post.url.as_deref(),
            created: post.created,
            score: post.score,
            views: post.views,
            upvote_percentage: post.upvote_percentage,
            votes: &post.votes,
            comments: &post.comments,
        }
    }
}

impl Post {
    /// Build an unsaved post (id 0) from a draft. The author's own upvote is
    /// recorded and tallied, so a fresh post starts at score 1.
    pub fn submit(draft: PostDraft, author: Author, created: DateTime<Utc>) -> Self {
        let mut post = Post {
            id: 0,
            author,
            category: draft.category,
            title: draft.title,
            kind: draft.kind,
            text: draft.text,
            url: draft.url,
            created,
            score: 0,
            views: 0,
            upvote_percentage: 0,
            votes: Vec::new(),
            comments: Vec::new(),
            next_comment_id: 0,
        };
        let author_id = post.author.id;
        post.cast(author_id, Ballot::Up);
        post
    }

    /// Record `ballot` for `voter`, replacing any earlier vote, and re-tally.
    ///
    /// [`Ballot::Clear`] leaves the voter with no entry at all.
    pub fn cast(&mut self, voter: UserId, ballot: Ballot) {
        self.votes.retain(|v| v.user != voter);
        if let Some(vote) = ballot.magnitude() {
            self.votes.push(Vote { user: voter, vote });
        }
        self.retally();
    }

    pub fn retally(&mut self) {
        let tally = recompute(&self.votes);
        self.score = tally.score;
        self.upvote_percentage = tally.upvote_percentage;
    }

    pub fn vote_of(&self, voter: UserId) -> Option<i8> {
        self.votes.iter().find(|v| v.user == voter).map(|v| v.vote)
    }

    pub fn is_authored_by(&self, author: &Author) -> bool {
        self.author == *author
    }
}
