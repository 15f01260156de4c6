//
//  klog-sdk
//  api/resources/tags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Post tags.
//!
//! Tags are flat, free-form labels. A post can carry any number of them, and
//! the post list can be filtered by a tag's slug.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`TagService::list`] | GET | `/api/v1/tags` |
//! | [`TagService::create`] | POST | `/api/v1/tags` |
//! | [`TagService::update`] | PUT | `/api/v1/tags/{id}` |
//! | [`TagService::delete`] | DELETE | `/api/v1/tags/{id}` |
//!
//! # Example
//!
//! ```rust,ignore
//! use klog_sdk::TagCreateRequest;
//!
//! let tag = sdk
//!     .tags
//!     .create(&TagCreateRequest {
//!         name: "Rust".to_string(),
//!         slug: "rust".to_string(),
//!     })
//!     .await?;
//! println!("created tag #{}", tag.id);
//! ```
//!
//! # Notes
//!
//! - Creating and changing tags requires an authenticated session
//! - Slugs must be unique; a clash is reported as a validation error

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::api::client::KlogClient;
use crate::api::common::KlogError;

/// A free-form label attached to posts.
///
/// # Fields
///
/// * `id` - Server-assigned identifier
/// * `name` - Display name
/// * `slug` - URL-safe identifier, used by the post list `tag` filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Server-assigned identifier.
    pub id: u64,

    /// Display name (e.g. `Rust`).
    pub name: String,

    /// URL-safe identifier (e.g. `rust`).
    pub slug: String,
}

/// Request body for [`TagService::create`].
///
/// Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreateRequest {
    /// Display name.
    pub name: String,

    /// URL-safe identifier; must not clash with an existing tag.
    pub slug: String,
}

/// Request body for [`TagService::update`].
///
/// Only the fields that are `Some` are sent; the rest keep their current
/// value on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagUpdateRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Tag operations.
///
/// Obtained from [`Klog::tags`](crate::Klog::tags); holds nothing but a handle
/// to the shared client.
#[derive(Debug, Clone)]
pub struct TagService {
    client: KlogClient,
}

impl TagService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Lists every tag.
    ///
    /// The list is not paginated.
    pub async fn list(&self) -> Result<Vec<Tag>, KlogError> {
        self.client.get("/api/v1/tags").await
    }

    /// Creates a tag and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// A duplicate slug comes back as an error for which
    /// [`KlogError::is_validation_error`] is true.
    pub async fn create(&self, data: &TagCreateRequest) -> Result<Tag, KlogError> {
        self.client.post("/api/v1/tags", data).await
    }

    /// Updates the tag with the given ID and returns the new state.
    pub async fn update(&self, id: u64, data: &TagUpdateRequest) -> Result<Tag, KlogError> {
        self.client.put(&format!("/api/v1/tags/{id}"), data).await
    }

    /// Deletes the tag with the given ID.
    ///
    /// Posts that carried the tag simply lose it.
    pub async fn delete(&self, id: u64) -> Result<(), KlogError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/v1/tags/{id}"))
            .await
            .map(|_| ())
    }
}
