/*
 * Responsibility
 * - /api の URL 構造を定義
 * - /posts/{id} 系の handler は全て PostId extractor を取る (id の形式チェックが先に走る)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::posts::{create_post, delete_post, get_post, list_posts, update_post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
}
