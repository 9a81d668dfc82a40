use async_trait::async_trait;

use crate::domain::{Group, NewGroup, NewPost, NewUser, Post, PostFilter, User};
use crate::error::RepoError;

/// Generic repository trait for lookups by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Store a new user. Fails with `RepoError::Constraint` if the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, i64> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// All groups, ordered by title.
    async fn list(&self) -> Result<Vec<Group>, RepoError>;

    /// Store a new group. Fails with `RepoError::Constraint` if the slug is taken.
    async fn create(&self, group: NewGroup) -> Result<Group, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Up to `limit` posts matching `filter`, newest first, skipping the
    /// first `offset`.
    async fn list(
        &self,
        filter: PostFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Post>, RepoError>;

    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError>;

    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Persist the mutable fields (text, group) of an existing post.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;
}
