use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a single authored text entry, optionally tagged with a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }

    /// Newest first; posts created in the same instant fall back to id order.
    pub fn newest_first(a: &Post, b: &Post) -> std::cmp::Ordering {
        b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
    }
}

/// A post that has not been stored yet. The repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(text: String, author_id: i64, group_id: Option<i64>) -> Self {
        Self {
            text,
            author_id,
            group_id,
            created_at: Utc::now(),
        }
    }
}

/// Which posts a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(i64),
    Author(i64),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match *self {
            PostFilter::All => true,
            PostFilter::Group(group_id) => post.group_id == Some(group_id),
            PostFilter::Author(author_id) => post.author_id == author_id,
        }
    }
}
