/*
 * Responsibility
 * - Path の {id} を ObjectId として parse する (形式チェックのみ、存在確認はしない)
 * - 失敗時は 400 (INVALID_OBJECT_ID) を返し、handler / repo は呼ばれない
 * 置くもの
 *  - DocumentId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts for DocumentId<T>
 *  - parse の共通関数
 * 置かないもの
 *  - Post といった具体リソース名 (types 側)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

use crate::error::AppError;

pub struct DocumentId<T> {
    pub id: ObjectId,
    _marker: PhantomData<T>,
}

impl<T> DocumentId<T> {
    fn new(id: ObjectId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

// derive だと T: Clone/Copy を要求されるので手で書く
impl<T> Clone for DocumentId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DocumentId<T> {}

pub(super) fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::bad_request("INVALID_OBJECT_ID", "invalid id"))
}

impl<S, T> FromRequestParts<S> for DocumentId<T>
where
    S: Send + Sync,
    T: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_OBJECT_ID", "invalid id"))?;
        let id = parse_object_id(&raw)?;
        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for DocumentId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentId").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_24_hex_chars_in_either_case() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(parse_object_id("507F1F77BCF86CD799439011").is_ok());
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in [
            "",
            "1",
            "507f1f77bcf86cd79943901",   // 23 chars
            "507f1f77bcf86cd7994390111", // 25 chars
            "507f1f77bcf86cd79943901z",
            "not-an-object-id-at-all!",
        ] {
            let err = parse_object_id(raw).unwrap_err();
            assert!(
                matches!(err, AppError::BadRequest { code: "INVALID_OBJECT_ID", .. }),
                "{raw:?} should be rejected"
            );
        }
    }
}
