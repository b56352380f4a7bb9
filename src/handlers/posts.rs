// handlers/posts.rs - /posts collection
//
// GET is public; POST, PUT and DELETE take an AuthUser and therefore require a
// verified bearer token.

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Query, State,
};
use axum::Json;
use serde::Deserialize;

use crate::database::models::{Post, PostDraft};
use crate::database::store::PostFilter;
use crate::error::ApiError;
use crate::middleware::{ApiResult, AuthUser, Envelope};
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: i32,
}

/// Request body for create and update. Any `userId` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(flatten)]
    pub draft: PostDraft,
}

/// GET /posts?id=&userId=&categoryId=
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<Post>> {
    let Query(query) = query?;
    let filter = PostFilter::from_params(query.id, query.user_id, query.category_id);

    let posts = state.posts.list(filter).await?;
    Ok(Envelope::ok("Your posts were successfully fetched", posts))
}

/// POST /posts
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<PostPayload>, JsonRejection>,
) -> ApiResult<Post> {
    let Json(payload) = payload?;

    let post = state.posts.create(user.user_id, payload.draft).await?;
    Ok(Envelope::ok("Your post is added", post))
}

/// PUT /posts
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<PostPayload>, JsonRejection>,
) -> ApiResult<Post> {
    let Json(payload) = payload?;
    let post_id = payload
        .id
        .ok_or_else(|| ApiError::bad_request("Post id is required for update"))?;

    let post = state.posts.update(user.user_id, post_id, payload.draft).await?;
    Ok(Envelope::ok("Your post is updated", post))
}

/// DELETE /posts?id=
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<()> {
    let Query(query) = query?;

    state.posts.delete(user.user_id, query.id).await?;
    Ok(Envelope::message("Your post is deleted"))
}
