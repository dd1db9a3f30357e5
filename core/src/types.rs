//! Domain DTOs for the posts/comments service.
//!
//! # Design
//! These types mirror the service's JSON shapes (camelCase keys) and are
//! defined independently from the mock-server crate; the integration tests
//! catch any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A post as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// A comment attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u64,
    pub id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Request payload for `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Request payload for `PATCH /posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostPatch {
    pub title: String,
}

/// Query for `GET /comments`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQuery {
    pub post_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_uses_camel_case_keys() {
        let post = Post {
            user_id: 1,
            id: 2,
            title: "foo".to_string(),
            body: "bar".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["id"], 2);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn comment_parses_service_shape() {
        let raw = r#"{
            "postId": 1,
            "id": 1,
            "name": "id labore ex et quam laborum",
            "email": "Eliseo@gardner.biz",
            "body": "laudantium enim quasi est"
        }"#;
        let comment: Comment = serde_json::from_str(raw).unwrap();
        assert_eq!(comment.post_id, 1);
        assert_eq!(comment.email, "Eliseo@gardner.biz");
    }

    #[test]
    fn new_post_serializes_exactly_three_fields() {
        let input = NewPost {
            title: "foo".to_string(),
            body: "bar".to_string(),
            user_id: 1,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"title": "foo", "body": "bar", "userId": 1}));
    }

    #[test]
    fn post_rejects_missing_fields() {
        let result: Result<Post, _> = serde_json::from_str(r#"{"id":1,"title":"x"}"#);
        assert!(result.is_err());
    }
}
