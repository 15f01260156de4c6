//
//  klog-sdk
//  api/resources/categories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Post categories.
//!
//! Every post belongs to at most one category. Categories are a flat list
//! (there is no nesting) and each has a unique slug that the post list accepts
//! as a filter.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`CategoryService::list`] | GET | `/api/v1/categories` |
//! | [`CategoryService::create`] | POST | `/api/v1/categories` |
//! | [`CategoryService::update`] | PUT | `/api/v1/categories/{id}` |
//! | [`CategoryService::delete`] | DELETE | `/api/v1/categories/{id}` |
//!
//! # Example
//!
//! ```rust,ignore
//! use klog_sdk::CategoryCreateRequest;
//!
//! let category = sdk
//!     .categories
//!     .create(&CategoryCreateRequest {
//!         name: "Engineering".to_string(),
//!         slug: "engineering".to_string(),
//!         description: Some("Build notes and postmortems".to_string()),
//!     })
//!     .await?;
//! ```

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::api::client::KlogClient;
use crate::api::common::KlogError;

/// A category a post can be filed under.
///
/// # Fields
///
/// * `id` - Server-assigned identifier
/// * `name` - Display name
/// * `slug` - URL-safe identifier
/// * `description` - Optional blurb shown on the category page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// URL-safe identifier, also accepted by the post list `category` filter.
    pub slug: String,

    /// Optional blurb shown on the category page.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for [`CategoryService::create`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreateRequest {
    /// Display name.
    pub name: String,

    /// URL-safe identifier; must be unique.
    pub slug: String,

    /// Optional blurb. Omitted from the body when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for [`CategoryService::update`].
///
/// Partial update: `None` fields are left out of the body and keep their
/// current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdateRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Category operations.
#[derive(Debug, Clone)]
pub struct CategoryService {
    client: KlogClient,
}

impl CategoryService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Lists every category. The list is not paginated.
    pub async fn list(&self) -> Result<Vec<Category>, KlogError> {
        self.client.get("/api/v1/categories").await
    }

    /// Creates a category and returns it with its assigned ID.
    pub async fn create(&self, data: &CategoryCreateRequest) -> Result<Category, KlogError> {
        self.client.post("/api/v1/categories", data).await
    }

    /// Updates the category with the given ID and returns the new state.
    pub async fn update(&self, id: u64, data: &CategoryUpdateRequest) -> Result<Category, KlogError> {
        self.client.put(&format!("/api/v1/categories/{id}"), data).await
    }

    /// Deletes the category with the given ID.
    ///
    /// Whether posts filed under it are detached or the call is refused is up
    /// to the server.
    pub async fn delete(&self, id: u64) -> Result<(), KlogError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/v1/categories/{id}"))
            .await
            .map(|_| ())
    }
}
