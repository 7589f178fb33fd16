use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, Post, PostChanges, PostDraft, PostWithAuthor};
use crate::error::RepoError;

/// Post repository - every read and write the lifecycle manager and the
/// public listing pages need.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Find a post by its slug. Used for the create-time collision check.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Find a *different* post owning the slug, so an edit may keep its own.
    async fn find_by_slug_excluding(
        &self,
        slug: &str,
        exclude_id: i32,
    ) -> Result<Option<Post>, RepoError>;

    /// All posts, newest first, with author names for the home listing.
    async fn list_recent(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// A single post with its author, for the detail page.
    async fn get_detail(&self, slug: &str) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Every post belonging to one account, for the profile page.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Insert a new post; the store assigns id and timestamps.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Replace the mutable fields of a post and refresh `updated_at`.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    /// Permanently remove a post. No soft-delete.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Account repository - what registration and login need.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError>;

    /// Find an account by its email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError>;

    async fn insert(&self, account: Account) -> Result<Account, RepoError>;
}
