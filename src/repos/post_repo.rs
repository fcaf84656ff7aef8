/*
 * Responsibility
 * - posts の永続化インターフェース (PostRepository)
 * - backend に依存しない Post / NewPost / PostPatch の定義
 * - id の採番・createdAt の付与は repo 側の責務
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: ObjectId,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

/// Fields to overwrite. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.tags.is_none()
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
    }
}

/// Document-store style access to posts.
///
/// Implementations must be shareable across requests (`Arc<dyn PostRepository>`).
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Persist a new post; the repo assigns `id` and `created_at`.
    async fn create(&self, post: NewPost) -> RepoResult<Post>;

    async fn list(&self) -> RepoResult<Vec<Post>>;

    async fn find_by_id(&self, id: &ObjectId) -> RepoResult<Option<Post>>;

    // Returns the removed post, or `None` if nothing matched.
    async fn find_by_id_and_remove(&self, id: &ObjectId) -> RepoResult<Option<Post>>;

    // Merge `patch` into the stored post and return the updated document.
    async fn find_by_id_and_update(
        &self,
        id: &ObjectId,
        patch: PostPatch,
    ) -> RepoResult<Option<Post>>;
}
