//
//  klog-sdk
//  api/resources/media.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Uploaded media files.
//!
//! Files can be uploaded two ways:
//!
//! - [`MediaService::upload_file`] sends `multipart/form-data` and can report
//!   progress
//! - [`MediaService::upload_base64`] sends a JSON body with the file inlined as
//!   base64, for hosts where multipart is inconvenient
//!
//! Stored files are served from `{base}/api/v1/media/i/{file_path}`; build
//! that address with [`MediaService::media_url`].
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`MediaService::upload_file`] | POST | `/api/v1/media/upload` (multipart) |
//! | [`MediaService::upload_base64`] | POST | `/api/v1/media/upload` (JSON) |
//! | [`MediaService::list`] | GET | `/api/v1/media` |
//! | [`MediaService::delete`] | DELETE | `/api/v1/media/{id}` |

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::api::client::{KlogClient, RequestOptions};
use crate::api::common::{KlogError, PaginatedResponse};
use crate::api::upload::{MultipartPayload, ProgressCallback};

/// Multipart field name the server reads the file from.
const FILE_FIELD: &str = "file";

/// A stored media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Unique numeric identifier.
    pub id: u64,

    /// Original file name.
    pub file_name: String,

    /// Storage path, relative to the media serving endpoint.
    pub file_path: String,

    /// Content hash used by the server to de-duplicate uploads.
    #[serde(default)]
    pub file_hash: String,

    /// MIME type recorded at upload.
    pub mime_type: String,

    /// Size in bytes.
    pub size: u64,

    /// ISO 8601 upload timestamp.
    pub created_at: String,

    /// ISO 8601 last-update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Inline (base64) upload body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUploadRequest {
    /// Name to store the file under.
    pub file_name: String,

    /// File contents, base64-encoded.
    pub data: String,

    /// MIME type of the decoded contents.
    pub mime_type: String,
}

impl MediaUploadRequest {
    /// Builds a request by base64-encoding raw file bytes.
    pub fn from_bytes(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }
}

/// The stored file, including its public URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUploadResponse {
    /// ID of the stored file.
    pub id: u64,

    /// Stored file name.
    pub file_name: String,

    /// Storage path, relative to the media serving endpoint.
    pub file_path: String,

    /// Content hash.
    #[serde(default)]
    pub file_hash: String,

    /// Public address of the file.
    pub url: String,

    /// MIME type recorded by the server.
    pub mime_type: String,

    /// Size in bytes.
    pub size: u64,

    /// ISO 8601 upload timestamp.
    pub created_at: String,
}

/// Paging for [`MediaService::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaQueryParams {
    /// 1-based page number. Defaults to 1.
    pub page: u32,

    /// Page size. Defaults to 20.
    pub limit: u32,
}

impl Default for MediaQueryParams {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// Media operations.
#[derive(Debug, Clone)]
pub struct MediaService {
    client: KlogClient,
}

impl MediaService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Uploads a file as `multipart/form-data`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let bytes = std::fs::read("cover.png")?;
    /// let stored = sdk
    ///     .media
    ///     .upload_file("cover.png", "image/png", bytes, Some(Arc::new(|p| println!("{p}%"))))
    ///     .await?;
    /// println!("{}", stored.url);
    /// ```
    pub async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<MediaUploadResponse, KlogError> {
        let payload = MultipartPayload::new().file(FILE_FIELD, file_name, mime_type, bytes);
        self.client
            .upload("/api/v1/media/upload", payload, on_progress)
            .await
    }

    /// Uploads a file inlined as base64 in a JSON body.
    pub async fn upload_base64(&self, data: &MediaUploadRequest) -> Result<MediaUploadResponse, KlogError> {
        self.client.post("/api/v1/media/upload", data).await
    }

    /// Lists stored media, one page at a time.
    pub async fn list(&self, params: MediaQueryParams) -> Result<PaginatedResponse<Media>, KlogError> {
        let options = RequestOptions::new().query(&params)?;
        self.client.get_with("/api/v1/media", &options).await
    }

    /// Deletes the stored file with the given ID.
    pub async fn delete(&self, id: u64) -> Result<(), KlogError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/v1/media/{id}"))
            .await
            .map(|_| ())
    }

    /// Builds the public address of a stored file. No request is made.
    pub fn media_url(&self, file_path: &str) -> String {
        format!("{}/api/v1/media/i/{}", self.client.base_url(), file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    #[test]
    fn test_from_bytes_encodes_base64() {
        let req = MediaUploadRequest::from_bytes("a.txt", "text/plain", b"hello");
        assert_eq!(req.data, "aGVsbG8=");
        assert_eq!(req.mime_type, "text/plain");
    }

    #[test]
    fn test_media_url() {
        let client = KlogClient::new(ClientConfig::new("https://blog.example.com/")).unwrap();
        let media = MediaService::new(client);
        assert_eq!(
            media.media_url("2024/01/abc.png"),
            "https://blog.example.com/api/v1/media/i/2024/01/abc.png"
        );
    }

    #[test]
    fn test_default_paging() {
        assert_eq!(MediaQueryParams::default(), MediaQueryParams { page: 1, limit: 20 });
    }
}
