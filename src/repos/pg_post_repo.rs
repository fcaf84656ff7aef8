/*
 * Responsibility
 * - posts テーブル向け SQLx 操作 (PostRepository の Postgres 実装)
 * - id は ObjectId (24 桁 hex) を repo 側で採番して CHAR(24) に保存
 * - テーブルは事前に存在する前提 (migration は持たない)
 *
 *   CREATE TABLE posts (
 *       id         CHAR(24)    PRIMARY KEY,
 *       title      TEXT        NOT NULL,
 *       body       TEXT        NOT NULL,
 *       tags       TEXT[]      NOT NULL DEFAULT '{}',
 *       created_at TIMESTAMPTZ NOT NULL DEFAULT now()
 *   );
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::post_repo::{NewPost, Post, PostPatch, PostRepository};

#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = RepoError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let id = ObjectId::parse_str(row.id.trim())
            .map_err(|_| RepoError::Corrupt(format!("posts.id is not an ObjectId: {}", row.id)))?;

        Ok(Post {
            id,
            title: row.title,
            body: row.body,
            tags: row.tags,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, post: NewPost) -> RepoResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, title, body, tags)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, body, tags, created_at
            "#,
        )
        .bind(ObjectId::new().to_hex())
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.tags)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list(&self) -> RepoResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, body, tags, created_at
            FROM posts
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut res: Vec<Post> = Vec::with_capacity(rows.len());
        for row in rows {
            res.push(row.try_into()?);
        }
        Ok(res)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepoResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, body, tags, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.to_hex())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::try_from).transpose()
    }

    async fn find_by_id_and_remove(&self, id: &ObjectId) -> RepoResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            DELETE FROM posts
            WHERE id = $1
            RETURNING id, title, body, tags, created_at
            "#,
        )
        .bind(id.to_hex())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::try_from).transpose()
    }

    async fn find_by_id_and_update(
        &self,
        id: &ObjectId,
        patch: PostPatch,
    ) -> RepoResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                tags = COALESCE($4, tags)
            WHERE id = $1
            RETURNING id, title, body, tags, created_at
            "#,
        )
        .bind(id.to_hex())
        .bind(patch.title)
        .bind(patch.body)
        .bind(patch.tags)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> PostRow {
        PostRow {
            id: id.into(),
            title: "t".into(),
            body: "b".into(),
            tags: vec!["x".into()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_with_object_id_converts() {
        let id = ObjectId::new();
        let post = Post::try_from(row(&id.to_hex())).unwrap();
        assert_eq!(post.id, id);
        assert_eq!(post.tags, ["x"]);
    }

    #[test]
    fn row_with_foreign_id_is_corrupt() {
        let err = Post::try_from(row("42")).unwrap_err();
        assert!(matches!(err, RepoError::Corrupt(_)));
    }
}
