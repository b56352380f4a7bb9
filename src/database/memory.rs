use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, Post, PostDraft, User};
use crate::database::store::{BlogStore, PostFilter, StoreTransaction};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    categories: BTreeMap<i32, Category>,
    posts: BTreeMap<i32, Post>,
    next_post_id: i32,
}

/// In-process store for tests and local development.
///
/// A transaction holds the store lock for its whole lifetime, so writers are
/// serialized and readers never observe a half-applied request.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_category(&self, id: i32, name: impl Into<String>) {
        let mut tables = self.tables.lock().await;
        tables.categories.insert(id, Category { id, name: name.into() });
    }

    /// Seeds a user with a placeholder email
    pub async fn insert_user_named(&self, id: i32, username: impl Into<String>) {
        let username = username.into();
        self.insert_user(User {
            id,
            email: format!("{username}@localhost"),
            username,
        })
        .await;
    }

    pub async fn insert_user(&self, user: User) {
        let mut tables = self.tables.lock().await;
        tables.users.insert(user.id, user);
    }

    pub async fn post_count(&self) -> usize {
        self.tables.lock().await.posts.len()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DatabaseError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .posts
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }

    async fn find_post(&self, id: i32) -> Result<Option<Post>, DatabaseError> {
        Ok(self.tables.lock().await.posts.get(&id).cloned())
    }

    async fn find_category(&self, id: i32) -> Result<Option<Category>, DatabaseError> {
        Ok(self.tables.lock().await.categories.get(&id).cloned())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DatabaseError> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn find_post_for_update(&mut self, id: i32) -> Result<Option<Post>, DatabaseError> {
        Ok(self.staged.posts.get(&id).cloned())
    }

    async fn find_category(&mut self, id: i32) -> Result<Option<Category>, DatabaseError> {
        Ok(self.staged.categories.get(&id).cloned())
    }

    async fn insert_post(&mut self, user_id: i32, draft: PostDraft) -> Result<Post, DatabaseError> {
        if !self.staged.users.contains_key(&user_id) {
            return Err(DatabaseError::QueryError(format!(
                "foreign key violation: user {user_id} does not exist"
            )));
        }
        if !self.staged.categories.contains_key(&draft.category_id) {
            return Err(DatabaseError::QueryError(format!(
                "foreign key violation: category {} does not exist",
                draft.category_id
            )));
        }

        self.staged.next_post_id += 1;
        let post = Post::from_draft(self.staged.next_post_id, user_id, draft);
        self.staged.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&mut self, post: &Post) -> Result<Post, DatabaseError> {
        let stored = self
            .staged
            .posts
            .get_mut(&post.id)
            .ok_or_else(|| DatabaseError::QueryError(format!("post {} vanished during update", post.id)))?;

        let owner = stored.user_id;
        *stored = Post {
            user_id: owner,
            ..post.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_post(&mut self, id: i32) -> Result<(), DatabaseError> {
        self.staged
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::QueryError(format!("post {id} vanished during delete")))
    }

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        let MemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
