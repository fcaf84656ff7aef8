/*
 * Responsibility
 * - repos の公開インターフェース (re-export)
 * - DATABASE_URL から backend を選んで PostRepository を組み立てる
 */
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{Config, StorageBackend};

pub mod error;
pub mod memory_post_repo;
pub mod mongo_post_repo;
pub mod pg_post_repo;
pub mod post_repo;

pub use error::{RepoError, RepoResult};
pub use post_repo::{NewPost, Post, PostPatch, PostRepository};

pub async fn build_post_repo(config: &Config) -> Result<Arc<dyn PostRepository>> {
    let repo: Arc<dyn PostRepository> = match config.storage {
        StorageBackend::Mongo => Arc::new(
            mongo_post_repo::MongoPostRepository::connect(
                &config.database_url,
                &config.database_name,
            )
            .await
            .context("failed to connect to mongodb")?,
        ),
        StorageBackend::Postgres => {
            let pool = sqlx::PgPool::connect(&config.database_url)
                .await
                .context("failed to connect to postgres")?;
            Arc::new(pg_post_repo::PgPostRepository::new(pool))
        }
        StorageBackend::Memory => Arc::new(memory_post_repo::InMemoryPostRepository::new()),
    };

    tracing::info!(backend = repo.backend_name(), "post repository ready");
    Ok(repo)
}
