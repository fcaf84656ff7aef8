/*
 * Responsibility
 * - posts コレクション向け MongoDB 操作 (PostRepository の Mongo 実装)
 * - _id は ObjectId、createdAt は BSON DateTime で保存
 * - 部分更新は $set + ReturnDocument::After (更新後の document を返す)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{self, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::post_repo::{NewPost, Post, PostPatch, PostRepository};

const COLLECTION: &str = "posts";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
}

impl TryFrom<PostDocument> for Post {
    type Error = RepoError;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        let millis = doc.created_at.timestamp_millis();
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| RepoError::Corrupt(format!("createdAt out of range: {millis}")))?;

        Ok(Post {
            id: doc.id,
            title: doc.title,
            body: doc.body,
            tags: doc.tags,
            created_at,
        })
    }
}

fn by_id(id: &ObjectId) -> Document {
    doc! { "_id": *id }
}

// Only supplied fields end up in $set.
fn set_document(patch: PostPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = patch.title {
        set.insert("title", title);
    }
    if let Some(body) = patch.body {
        set.insert("body", body);
    }
    if let Some(tags) = patch.tags {
        set.insert("tags", tags);
    }
    set
}

#[derive(Clone, Debug)]
pub struct MongoPostRepository {
    posts: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub async fn connect(uri: &str, database: &str) -> RepoResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(&client, database))
    }

    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            posts: client.database(database).collection(COLLECTION),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn create(&self, post: NewPost) -> RepoResult<Post> {
        let doc = PostDocument {
            id: ObjectId::new(),
            title: post.title,
            body: post.body,
            tags: post.tags,
            created_at: bson::DateTime::now(),
        };
        self.posts.insert_one(&doc).await?;

        doc.try_into()
    }

    async fn list(&self) -> RepoResult<Vec<Post>> {
        let docs: Vec<PostDocument> = self.posts.find(doc! {}).await?.try_collect().await?;

        let mut res: Vec<Post> = Vec::with_capacity(docs.len());
        for doc in docs {
            res.push(doc.try_into()?);
        }
        Ok(res)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepoResult<Option<Post>> {
        let doc = self.posts.find_one(by_id(id)).await?;
        doc.map(Post::try_from).transpose()
    }

    async fn find_by_id_and_remove(&self, id: &ObjectId) -> RepoResult<Option<Post>> {
        let doc = self.posts.find_one_and_delete(by_id(id)).await?;
        doc.map(Post::try_from).transpose()
    }

    async fn find_by_id_and_update(
        &self,
        id: &ObjectId,
        patch: PostPatch,
    ) -> RepoResult<Option<Post>> {
        // mongodb rejects an empty $set
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let doc = self
            .posts
            .find_one_and_update(by_id(id), doc! { "$set": set_document(patch) })
            .return_document(ReturnDocument::After)
            .await?;
        doc.map(Post::try_from).transpose()
    }
}
