use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a published blog post.
///
/// The slug is derived from the title and unique across all posts; the
/// author never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether the given account owns this post.
    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.author_id == account_id
    }
}

/// Fields for a post about to be inserted. The store assigns the id and
/// both timestamps.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub slug: String,
}

/// Replacement values for an edit. `updated_at` is refreshed by the store;
/// the author id is deliberately absent - ownership never moves.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub description: String,
    pub content: String,
    pub slug: String,
}

/// A post joined with its author's display name, for listing and detail
/// views. The author is `None` only if the account row has vanished.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author_name: Option<String>,
}
