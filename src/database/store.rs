use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, Post, PostDraft, User};

/// Which slice of the posts table a listing returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostFilter {
    #[default]
    All,
    ById(i32),
    ByUser(i32),
    ByCategory(i32),
}

impl PostFilter {
    /// Picks a single filter. Owner wins over post id, post id over category.
    pub fn from_params(id: Option<i32>, user_id: Option<i32>, category_id: Option<i32>) -> Self {
        match (user_id, id, category_id) {
            (Some(user_id), _, _) => PostFilter::ByUser(user_id),
            (None, Some(id), _) => PostFilter::ById(id),
            (None, None, Some(category_id)) => PostFilter::ByCategory(category_id),
            (None, None, None) => PostFilter::All,
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match *self {
            PostFilter::All => true,
            PostFilter::ById(id) => post.id == id,
            PostFilter::ByUser(user_id) => post.user_id == user_id,
            PostFilter::ByCategory(category_id) => post.category_id == category_id,
        }
    }
}

/// Read access to users, categories and posts, plus transactions for writes
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Posts matching `filter`, ordered by id
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DatabaseError>;

    async fn find_post(&self, id: i32) -> Result<Option<Post>, DatabaseError>;

    async fn find_category(&self, id: i32) -> Result<Option<Category>, DatabaseError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError>;

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Unit of work for one mutating request.
///
/// Lookups made through the transaction lock what they return until commit or
/// drop. Staged writes become visible only after [`StoreTransaction::commit`];
/// dropping the transaction discards them.
#[async_trait]
pub trait StoreTransaction: Send {
    async fn find_post_for_update(&mut self, id: i32) -> Result<Option<Post>, DatabaseError>;

    async fn find_category(&mut self, id: i32) -> Result<Option<Category>, DatabaseError>;

    async fn insert_post(&mut self, user_id: i32, draft: PostDraft) -> Result<Post, DatabaseError>;

    async fn update_post(&mut self, post: &Post) -> Result<Post, DatabaseError>;

    async fn delete_post(&mut self, id: i32) -> Result<(), DatabaseError>;

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError>;
}
