//
//  klog-sdk
//  api/resources/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User profiles.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`UserService::get`] | GET | `/api/v1/users/{id}` |
//! | [`UserService::update`] | PUT | `/api/v1/users/{id}` |

use serde::{Deserialize, Serialize};

use crate::api::client::KlogClient;
use crate::api::common::KlogError;

/// A registered author or reader.
///
/// Appears nested inside posts (`author`) and comments (`user`) when the
/// server expands those relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique numeric identifier.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Display name.
    #[serde(default)]
    pub nickname: String,

    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: String,

    /// ISO 8601 last-update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Public profile returned by the user and `auth/me` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfoResponse {
    /// Unique numeric identifier.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Display name.
    #[serde(default)]
    pub nickname: String,

    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial profile update. Only the fields that are set are sent.
///
/// Changing the password requires both `old_password` and `new_password`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    /// New login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// New avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// New biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// New email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Current password, checked before a password change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,

    /// Replacement password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// User operations.
#[derive(Debug, Clone)]
pub struct UserService {
    client: KlogClient,
}

impl UserService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Fetches a user's public profile.
    pub async fn get(&self, id: u64) -> Result<UserInfoResponse, KlogError> {
        self.client.get(&format!("/api/v1/users/{id}")).await
    }

    /// Updates a user's profile.
    pub async fn update(&self, id: u64, data: &UserUpdateRequest) -> Result<UserInfoResponse, KlogError> {
        self.client.put(&format!("/api/v1/users/{id}"), data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_sends_only_set_fields() {
        let req = UserUpdateRequest {
            nickname: Some("Ada".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({"nickname": "Ada"}));
    }

    #[test]
    fn test_user_tolerates_null_optionals() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"ada","email":"a@x.io","nickname":"Ada","bio":null,"avatar_url":null,
                "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(user.bio, None);
        assert_eq!(user.nickname, "Ada");
    }
}
