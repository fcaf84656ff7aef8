//! In-memory post repository.
//!
//! Used for local runs without a database (`DATABASE_URL=memory://`) and by tests.
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::repos::{NewPost, Post, PostPatch, PostRepository, RepoResult};

#[derive(Default)]
struct Store {
    posts: HashMap<ObjectId, Post>,
    // insertion order, so list() is stable
    order: Vec<ObjectId>,
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, post: NewPost) -> RepoResult<Post> {
        let post = Post {
            id: ObjectId::new(),
            title: post.title,
            body: post.body,
            tags: post.tags,
            created_at: Utc::now(),
        };

        let mut store = self.store.write().await;
        store.order.push(post.id);
        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn list(&self) -> RepoResult<Vec<Post>> {
        let store = self.store.read().await;
        Ok(store
            .order
            .iter()
            .filter_map(|id| store.posts.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepoResult<Option<Post>> {
        Ok(self.store.read().await.posts.get(id).cloned())
    }

    async fn find_by_id_and_remove(&self, id: &ObjectId) -> RepoResult<Option<Post>> {
        let mut store = self.store.write().await;
        let removed = store.posts.remove(id);
        if removed.is_some() {
            store.order.retain(|o| o != id);
        }
        Ok(removed)
    }

    async fn find_by_id_and_update(
        &self,
        id: &ObjectId,
        patch: PostPatch,
    ) -> RepoResult<Option<Post>> {
        let mut store = self.store.write().await;
        let Some(post) = store.posts.get_mut(id) else {
            return Ok(None);
        };
        patch.apply(post);
        Ok(Some(post.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.into(),
            body: "내용".into(),
            tags: vec!["a".into()],
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let repo = InMemoryPostRepository::new();
        let a = repo.create(new_post("a")).await.unwrap();
        let b = repo.create(new_post("b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        for title in ["one", "two", "three"] {
            repo.create(new_post(title)).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn remove_returns_removed_post_once() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("gone")).await.unwrap();

        let removed = repo.find_by_id_and_remove(&post.id).await.unwrap();
        assert_eq!(removed.map(|p| p.id), Some(post.id));
        assert!(repo.find_by_id_and_remove(&post.id).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_id_returns_none() {
        let repo = InMemoryPostRepository::new();
        let patch = PostPatch {
            title: Some("x".into()),
            ..Default::default()
        };
        let res = repo
            .find_by_id_and_update(&ObjectId::new(), patch)
            .await
            .unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn update_merges_and_persists() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("before")).await.unwrap();

        let patch = PostPatch {
            tags: Some(vec!["c".into()]),
            ..Default::default()
        };
        let updated = repo
            .find_by_id_and_update(&post.id, patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.tags, ["c"]);
        assert_eq!(updated.title, "before");

        let stored = repo.find_by_id(&post.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }
}
