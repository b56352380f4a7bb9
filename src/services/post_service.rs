use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::database::manager::DatabaseError;
use crate::database::models::{Post, PostDraft};
use crate::database::store::{BlogStore, PostFilter};

/// Domain failures of post management
#[derive(Debug, Error)]
pub enum PostError {
    #[error("No category found of the id")]
    CategoryNotFound,

    #[error("No posts found of the id")]
    PostNotFound,

    #[error("Sorry, you are not the owner of this post")]
    NotOwner,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Post listing and owner-checked mutations.
///
/// Every mutation runs in one store transaction: the existence and ownership
/// checks see the same rows the write touches.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn BlogStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, PostError> {
        let posts = self.store.list_posts(filter).await?;
        info!(?filter, count = posts.len(), "Listed posts");
        Ok(posts)
    }

    /// Stores a new post owned by `user_id`
    pub async fn create(&self, user_id: i32, draft: PostDraft) -> Result<Post, PostError> {
        let mut tx = self.store.begin().await?;

        if tx.find_category(draft.category_id).await?.is_none() {
            warn!(user_id, category_id = draft.category_id, "Create rejected: unknown category");
            return Err(PostError::CategoryNotFound);
        }

        let post = tx.insert_post(user_id, draft).await?;
        tx.commit().await?;

        info!(user_id, post_id = post.id, "Post created");
        Ok(post)
    }

    /// Overwrites the content of `post_id`.
    ///
    /// Checks run in a fixed order: category, then post, then owner.
    pub async fn update(&self, user_id: i32, post_id: i32, draft: PostDraft) -> Result<Post, PostError> {
        let mut tx = self.store.begin().await?;
        let existing = tx.find_post_for_update(post_id).await?;

        if tx.find_category(draft.category_id).await?.is_none() {
            warn!(user_id, post_id, category_id = draft.category_id, "Update rejected: unknown category");
            return Err(PostError::CategoryNotFound);
        }

        let Some(mut post) = existing else {
            warn!(user_id, post_id, "Update rejected: unknown post");
            return Err(PostError::PostNotFound);
        };

        if !post.is_owned_by(user_id) {
            warn!(user_id, post_id, owner = post.user_id, "Update rejected: not the owner");
            return Err(PostError::NotOwner);
        }

        post.overwrite(draft);
        let updated = tx.update_post(&post).await?;
        tx.commit().await?;

        info!(user_id, post_id, "Post updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: i32, post_id: i32) -> Result<(), PostError> {
        let mut tx = self.store.begin().await?;

        let Some(post) = tx.find_post_for_update(post_id).await? else {
            warn!(user_id, post_id, "Delete rejected: unknown post");
            return Err(PostError::PostNotFound);
        };

        if !post.is_owned_by(user_id) {
            warn!(user_id, post_id, owner = post.user_id, "Delete rejected: not the owner");
            return Err(PostError::NotOwner);
        }

        tx.delete_post(post_id).await?;
        tx.commit().await?;

        info!(user_id, post_id, "Post deleted");
        Ok(())
    }
}
