/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - backend (mongodb / sqlx) ごとのエラーを一つの型にまとめる
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("corrupt document: {0}")]
    Corrupt(String),
}

pub type RepoResult<T> = Result<T, RepoError>;
