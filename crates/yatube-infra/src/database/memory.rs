//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use yatube_core::domain::{Group, NewGroup, NewPost, NewUser, Post, PostFilter, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

/// Rows keyed by id, with ids handed out from a counter starting at 1.
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    async fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().await.values().find(|row| pred(row)).cloned()
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.table.get(id).await)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.table.find(|u| u.username == username).await)
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        // Hold the write lock across the uniqueness check and the insert.
        let mut rows = self.table.rows.write().await;
        if rows.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        let user = User {
            id: self.table.allocate_id(),
            username: user.username,
            password_hash: user.password_hash,
            created_at: user.created_at,
        };
        rows.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory group repository.
pub struct InMemoryGroupRepository {
    table: Table<Group>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryGroupRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Group, i64> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError> {
        Ok(self.table.get(id).await)
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        Ok(self.table.find(|g| g.slug == slug).await)
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let mut groups: Vec<Group> = self.table.rows.read().await.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn create(&self, group: NewGroup) -> Result<Group, RepoError> {
        let mut rows = self.table.rows.write().await;
        if rows.values().any(|g| g.slug == group.slug) {
            return Err(RepoError::Constraint(format!(
                "group slug '{}' already exists",
                group.slug
            )));
        }

        let group = Group {
            id: self.table.allocate_id(),
            title: group.title,
            slug: group.slug,
            description: group.description,
        };
        rows.insert(group.id, group.clone());
        Ok(group)
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    table: Table<Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.table.get(id).await)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(
        &self,
        filter: PostFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .table
            .rows
            .read()
            .await
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        posts.sort_by(Post::newest_first);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        let rows = self.table.rows.read().await;
        Ok(rows.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = Post {
            id: self.table.allocate_id(),
            text: post.text,
            author_id: post.author_id,
            group_id: post.group_id,
            created_at: post.created_at,
        };
        self.table.rows.write().await.insert(post.id, post.clone());
        tracing::debug!(post_id = post.id, "Post stored in memory");
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.table.rows.write().await;
        let stored = rows.get_mut(&post.id).ok_or(RepoError::NotFound)?;

        stored.text = post.text;
        stored.group_id = post.group_id;
        Ok(stored.clone())
    }
}
