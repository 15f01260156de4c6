//
//  klog-sdk
//  api/resources/settings.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Site-wide key/value settings.
//!
//! Values are stored as strings; interpreting them is up to the caller.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`SettingService::list`] | GET | `/api/v1/settings` |
//! | [`SettingService::get`] | GET | `/api/v1/settings/{key}` |
//! | [`SettingService::upsert`] | PUT | `/api/v1/settings` |
//! | [`SettingService::batch_upsert`] | PUT | `/api/v1/settings/batch` |
//! | [`SettingService::delete`] | DELETE | `/api/v1/settings/{key}` |
//!
//! # Notes
//!
//! - `get` and `delete` insert the key into the path as given, without
//!   percent-encoding. Keep keys to letters, digits, `_`, `-` and `.`, or
//!   encode them yourself before the call
//! - `upsert` and `batch_upsert` send keys in the JSON body, so any key is
//!   safe there

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::api::client::KlogClient;
use crate::api::common::KlogError;

/// A single setting.
///
/// # Fields
///
/// * `key` - Unique name
/// * `value` - Stored value, always a string
/// * `description` - Optional human-readable note
/// * `created_at`, `updated_at` - ISO 8601 timestamps, when the server sends
///   them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Unique name (e.g. `site_title`).
    pub key: String,

    /// Stored value.
    pub value: String,

    /// Optional human-readable note.
    #[serde(default)]
    pub description: Option<String>,

    /// ISO 8601 timestamp of creation.
    #[serde(default)]
    pub created_at: Option<String>,

    /// ISO 8601 timestamp of the last write.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Creates the setting, or replaces the value of an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingUpsertRequest {
    /// Setting name.
    pub key: String,

    /// New value.
    pub value: String,

    /// Note to store alongside. Omitted from the body when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SettingUpsertRequest {
    /// An upsert of `key` to `value` with no description.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }
}

/// Several upserts applied in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingBatchRequest {
    /// Upserts, applied in order.
    pub settings: Vec<SettingUpsertRequest>,
}

/// The settings written by a batch upsert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingBatchResponse {
    /// Settings as stored after the batch.
    #[serde(default)]
    pub settings: Vec<Setting>,
}

/// Every stored setting.
pub type SettingsResponse = Vec<Setting>;

/// Setting operations.
#[derive(Debug, Clone)]
pub struct SettingService {
    client: KlogClient,
}

impl SettingService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Lists every stored setting.
    pub async fn list(&self) -> Result<SettingsResponse, KlogError> {
        self.client.get("/api/v1/settings").await
    }

    /// Fetches one setting by key.
    ///
    /// The key is not URL-encoded. A key containing `/`, `?`, `#` or `%`
    /// reaches a different route or query than intended; encode such keys
    /// before calling.
    pub async fn get(&self, key: &str) -> Result<Setting, KlogError> {
        self.client.get(&format!("/api/v1/settings/{key}")).await
    }

    /// Creates or replaces a setting and returns the stored value.
    pub async fn upsert(&self, data: &SettingUpsertRequest) -> Result<Setting, KlogError> {
        self.client.put("/api/v1/settings", data).await
    }

    /// Writes several settings at once.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let batch = SettingBatchRequest {
    ///     settings: vec![
    ///         SettingUpsertRequest::new("site_title", "My Blog"),
    ///         SettingUpsertRequest::new("posts_per_page", "10"),
    ///     ],
    /// };
    /// let written = sdk.settings.batch_upsert(&batch).await?;
    /// ```
    pub async fn batch_upsert(&self, data: &SettingBatchRequest) -> Result<SettingBatchResponse, KlogError> {
        self.client.put("/api/v1/settings/batch", data).await
    }

    /// Deletes one setting by key.
    ///
    /// The key is not URL-encoded; the caveat on [`get`](Self::get) applies.
    pub async fn delete(&self, key: &str) -> Result<(), KlogError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/v1/settings/{key}"))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upsert_omits_missing_description() {
        let req = SettingUpsertRequest::new("site_title", "My Blog");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"key": "site_title", "value": "My Blog"})
        );
    }

    #[test]
    fn test_setting_decodes_without_timestamps() {
        let setting: Setting = serde_json::from_value(json!({"key": "k", "value": "v"})).unwrap();
        assert_eq!(setting.description, None);
        assert_eq!(setting.updated_at, None);
    }
}
