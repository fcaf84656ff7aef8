/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - posts: PostRepository (backend は起動時に決定)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::PostRepository;

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
