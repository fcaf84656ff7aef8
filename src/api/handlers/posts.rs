/*
 * Responsibility
 * - /posts 系 CRUD handler
 * - Path の {id} は extractor で ObjectId に parse 済みのものを受け取る
 * - body は ValidJson で形式チェック済みのものを受け取る
 * - repo の結果 (値 / None / Err) を HTTP status と body に変換するだけ
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::posts::{CreatePostRequest, PostResponse, UpdatePostRequest},
        extractors::{PostId, ValidJson},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.posts.list().await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

pub async fn create_post(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let post = state.posts.create(req.into()).await?;
    tracing::debug!(post_id = %post.id, "post created");

    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn get_post(
    State(state): State<AppState>,
    post_id: PostId,
) -> Result<Json<PostResponse>, AppError> {
    let post = state
        .posts
        .find_by_id(&post_id.id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(post.into()))
}

pub async fn update_post(
    State(state): State<AppState>,
    post_id: PostId,
    ValidJson(req): ValidJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state
        .posts
        .find_by_id_and_update(&post_id.id, req.into())
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(post.into()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    post_id: PostId,
) -> Result<StatusCode, AppError> {
    // 存在しない id でも 204 (存在確認はしない)
    let removed = state.posts.find_by_id_and_remove(&post_id.id).await?;
    if removed.is_none() {
        tracing::debug!(post_id = %post_id.id, "delete matched no post");
    }

    Ok(StatusCode::NO_CONTENT)
}
