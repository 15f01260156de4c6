//
//  klog-sdk
//  api/resources/comments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Post comments.
//!
//! Comments form threads through `parent_id`; the server may expand a
//! comment's `parent` and `replies`. Guests can comment by giving a name and
//! email instead of authenticating.
//!
//! # Comment States
//!
//! * `pending` - Awaiting moderation
//! * `approved` - Visible to readers
//! * `spam` - Rejected
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`CommentService::list_for_post`] | GET | `/api/v1/posts/{postId}/comments` |
//! | [`CommentService::create`] | POST | `/api/v1/posts/{postId}/comments` |
//! | [`CommentService::update_status`] | PUT | `/api/v1/comments/{id}` |
//! | [`CommentService::delete`] | DELETE | `/api/v1/comments/{id}` |
//!
//! # Example
//!
//! ```rust,ignore
//! use klog_sdk::{CommentStatus, CommentUpdateRequest};
//!
//! for comment in sdk.comments.list_for_post(42).await? {
//!     if comment.status == CommentStatus::Pending {
//!         let approve = CommentUpdateRequest { status: CommentStatus::Approved };
//!         sdk.comments.update_status(comment.id, &approve).await?;
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - Moderation and deletion require an authenticated session
//! - New guest comments usually start out `pending`

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use super::posts::Post;
use super::users::User;
use crate::api::client::KlogClient;
use crate::api::common::KlogError;

/// Moderation state of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    /// Awaiting moderation.
    Pending,
    /// Visible to readers.
    Approved,
    /// Rejected as spam.
    Spam,
}

/// A comment on a post.
///
/// # Fields
///
/// * `id` - Unique numeric identifier
/// * `post_id` - Post the comment belongs to
/// * `user_id` - Author, when logged in
/// * `name`, `email` - Author details, filled in for guests
/// * `content` - Comment text
/// * `ip` - Address the comment was posted from
/// * `status` - Moderation state
/// * `parent_id` - Comment this one replies to
/// * `created_at` - ISO 8601 timestamp
/// * `post`, `user`, `parent`, `replies` - Expansions, present only when the
///   server includes them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique numeric identifier.
    pub id: u64,

    /// Post the comment belongs to.
    pub post_id: u64,

    /// Set when the author was logged in.
    #[serde(default)]
    pub user_id: Option<u64>,

    /// Display name of the author.
    #[serde(default)]
    pub name: String,

    /// Author email. Empty when the server hides it.
    #[serde(default)]
    pub email: String,

    /// Comment text.
    pub content: String,

    /// Address the comment was posted from. Empty when the server hides it.
    #[serde(default)]
    pub ip: String,

    /// Moderation state.
    pub status: CommentStatus,

    /// The comment this one replies to.
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// ISO 8601 timestamp of creation.
    pub created_at: String,

    /// Expanded post.
    #[serde(default)]
    pub post: Option<Box<Post>>,

    /// Expanded author.
    #[serde(default)]
    pub user: Option<User>,

    /// Expanded parent comment.
    #[serde(default)]
    pub parent: Option<Box<Comment>>,

    /// Direct replies.
    #[serde(default)]
    pub replies: Option<Vec<Comment>>,
}

/// Request body for [`CommentService::create`].
///
/// `name` and `email` identify guest authors and can be left out when the
/// session is authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreateRequest {
    /// Comment text.
    pub content: String,

    /// Comment being replied to; `None` starts a new thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    /// Guest display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Guest email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Request body for [`CommentService::update_status`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdateRequest {
    /// New moderation state.
    pub status: CommentStatus,
}

/// Comment operations.
#[derive(Debug, Clone)]
pub struct CommentService {
    client: KlogClient,
}

impl CommentService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Lists the comments of a post.
    pub async fn list_for_post(&self, post_id: u64) -> Result<Vec<Comment>, KlogError> {
        self.client.get(&format!("/api/v1/posts/{post_id}/comments")).await
    }

    /// Adds a comment (or reply) to a post.
    pub async fn create(&self, post_id: u64, data: &CommentCreateRequest) -> Result<Comment, KlogError> {
        self.client
            .post(&format!("/api/v1/posts/{post_id}/comments"), data)
            .await
    }

    /// Changes a comment's moderation state and returns the updated comment.
    pub async fn update_status(&self, id: u64, data: &CommentUpdateRequest) -> Result<Comment, KlogError> {
        self.client.put(&format!("/api/v1/comments/{id}"), data).await
    }

    /// Deletes the comment with the given ID.
    pub async fn delete(&self, id: u64) -> Result<(), KlogError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/v1/comments/{id}"))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_threaded_comment_decodes() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 1, "post_id": 9, "user_id": null, "name": "guest", "email": "g@x.io",
            "content": "first", "ip": "127.0.0.1", "status": "approved", "parent_id": null,
            "created_at": "2024-01-01T00:00:00Z",
            "replies": [{
                "id": 2, "post_id": 9, "name": "ada", "email": "a@x.io", "content": "reply",
                "ip": "127.0.0.1", "status": "pending", "parent_id": 1,
                "created_at": "2024-01-02T00:00:00Z"
            }]
        }))
        .unwrap();
        let replies = comment.replies.unwrap();
        assert_eq!(replies[0].parent_id, Some(1));
        assert_eq!(replies[0].status, CommentStatus::Pending);
    }

    #[test]
    fn test_status_update_body() {
        let body = CommentUpdateRequest {
            status: CommentStatus::Spam,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"status": "spam"}));
    }
}
