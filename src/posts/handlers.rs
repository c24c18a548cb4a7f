use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::{ApiError, MessageResponse},
    state::AppState,
};

use super::dto::{CreatePostRequest, CreatedPostResponse, UpdatePostRequest};
use super::repo::{Post, PostWithAuthor};

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostWithAuthor>>, ApiError> {
    let posts = Post::list(&state.db).await?;
    Ok(Json(posts))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostWithAuthor>, ApiError> {
    let post = Post::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
    Ok(Json(post))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), ApiError> {
    let post = payload.validate()?;
    let post_id = Post::create(&state.db, user.id, post).await?;
    info!(post_id, user_id = user.id, "post created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse {
            message: "post created",
            post_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = Post::update(&state.db, id, user.id, payload).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("post not found".into()));
    }
    info!(post_id = id, user_id = user.id, "post updated");
    Ok(Json(MessageResponse {
        message: "post updated",
    }))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = Post::delete(&state.db, id, user.id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("post not found".into()));
    }
    info!(post_id = id, user_id = user.id, "post deleted");
    Ok(Json(MessageResponse {
        message: "post deleted",
    }))
}
