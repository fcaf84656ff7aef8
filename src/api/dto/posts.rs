/*
 * Responsibility
 * - Posts の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 * - 未知の field は deny_unknown_fields で拒否 (store へ素通しさせない)
 * - id は ObjectId の hex 文字列で返す
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::dto::Validate;
use crate::repos::{NewPost, Post, PostPatch};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.body.trim().is_empty() {
            return Err("body is required");
        }
        validate_tags(&self.tags)
    }
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost {
            title: req.title,
            body: req.body,
            tags: req.tags,
        }
    }
}

// Missing field -> None. Explicit null is a type error, not "leave unchanged".
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Vec<String>>,
}

impl Validate for UpdatePostRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(body) = &self.body
            && body.trim().is_empty()
        {
            return Err("body cannot be empty");
        }
        if let Some(tags) = &self.tags {
            validate_tags(tags)?;
        }

        Ok(())
    }
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        PostPatch {
            title: req.title,
            body: req.body,
            tags: req.tags,
        }
    }
}

fn validate_tags(tags: &[String]) -> Result<(), &'static str> {
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err("tags cannot contain empty values");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String, // ObjectId hex
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id.to_hex(),
            title: post.title,
            body: post.body,
            tags: post.tags,
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(v: serde_json::Value) -> Result<CreatePostRequest, serde_json::Error> {
        serde_json::from_value(v)
    }

    fn update(v: serde_json::Value) -> Result<UpdatePostRequest, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn create_accepts_empty_tags() {
        let req = create(json!({"title": "t", "body": "b", "tags": []})).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_requires_every_field() {
        assert!(create(json!({"title": "t", "tags": []})).is_err());
        assert!(create(json!({"body": "b", "tags": []})).is_err());
        assert!(create(json!({"title": "t", "body": "b"})).is_err());
    }

    #[test]
    fn create_rejects_wrong_types_and_unknown_fields() {
        assert!(create(json!({"title": 1, "body": "b", "tags": []})).is_err());
        assert!(create(json!({"title": "t", "body": "b", "tags": "a"})).is_err());
        assert!(create(json!({"title": "t", "body": "b", "tags": [1]})).is_err());
        assert!(create(json!({"title": "t", "body": "b", "tags": [], "_id": "x"})).is_err());
    }

    #[test]
    fn create_rejects_blank_values() {
        let req = create(json!({"title": "  ", "body": "b", "tags": []})).unwrap();
        assert_eq!(req.validate(), Err("title is required"));

        let req = create(json!({"title": "t", "body": "", "tags": []})).unwrap();
        assert_eq!(req.validate(), Err("body is required"));

        let req = create(json!({"title": "t", "body": "b", "tags": ["a", ""]})).unwrap();
        assert_eq!(req.validate(), Err("tags cannot contain empty values"));
    }

    #[test]
    fn update_fields_are_optional() {
        let req = update(json!({})).unwrap();
        assert!(req.validate().is_ok());
        assert!(PostPatch::from(req).is_empty());

        let req = update(json!({"tags": ["c"]})).unwrap();
        assert_eq!(req.tags.as_deref(), Some(&["c".to_string()][..]));
        assert!(req.title.is_none());
    }

    #[test]
    fn update_rejects_null_and_unknown_fields() {
        assert!(update(json!({"title": null})).is_err());
        assert!(update(json!({"tags": null})).is_err());
        assert!(update(json!({"createdAt": "2024-01-01T00:00:00Z"})).is_err());
    }

    #[test]
    fn update_rejects_blank_values() {
        let req = update(json!({"body": " "})).unwrap();
        assert_eq!(req.validate(), Err("body cannot be empty"));
    }

    #[test]
    fn response_uses_camel_case_and_hex_id() {
        let id = mongodb::bson::oid::ObjectId::new();
        let res = PostResponse::from(Post {
            id,
            title: "t".into(),
            body: "b".into(),
            tags: vec!["a".into()],
            created_at: Utc::now(),
        });

        let v = serde_json::to_value(res).unwrap();
        assert_eq!(v["id"], id.to_hex());
        assert!(v.get("createdAt").is_some());
        assert!(v.get("created_at").is_none());
        assert_eq!(v["tags"], json!(["a"]));
    }
}
