//
//  klog-sdk
//  api/upload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Multipart payloads and upload progress reporting.
//!
//! [`MultipartPayload`] describes a `multipart/form-data` body as plain data
//! (text fields and in-memory files). The client turns it into a
//! `reqwest::multipart::Form` right before dispatch. When a progress callback
//! is supplied, file parts are streamed in chunks and the callback receives an
//! integer percentage after every chunk.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Body;

use super::common::KlogError;

/// Callback receiving upload progress as a whole percentage (0-100).
pub type ProgressCallback = Arc<dyn Fn(u32) + Send + Sync>;

/// Size of each streamed chunk when progress is reported.
const CHUNK_SIZE: usize = 16 * 1024;

/// Computes `round(loaded * 100 / total)`.
///
/// Returns `None` when the total is unknown or zero, in which case no
/// progress should be reported at all.
///
/// # Example
///
/// ```rust,ignore
/// use klog_sdk::api::upload::progress_percent;
///
/// assert_eq!(progress_percent(50, Some(200)), Some(25));
/// assert_eq!(progress_percent(50, None), None);
/// ```
pub fn progress_percent(loaded: u64, total: Option<u64>) -> Option<u32> {
    let total = total.filter(|t| *t > 0)?;
    let percent = (u128::from(loaded) * 100 + u128::from(total / 2)) / u128::from(total);
    Some(u32::try_from(percent).unwrap_or(u32::MAX))
}

/// One field of a multipart body.
#[derive(Debug, Clone)]
enum MultipartField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

/// A `multipart/form-data` request body.
///
/// # Example
///
/// ```rust,ignore
/// use klog_sdk::api::upload::MultipartPayload;
///
/// let payload = MultipartPayload::new()
///     .text("alt", "A sunset")
///     .file("file", "sunset.png", "image/png", std::fs::read("sunset.png")?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    fields: Vec<MultipartField>,
}

impl MultipartPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plain text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(MultipartField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a file field held in memory.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.fields.push(MultipartField::File {
            name: name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        });
        self
    }

    /// Total size of all file parts in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.fields
            .iter()
            .map(|field| match field {
                MultipartField::File { bytes, .. } => bytes.len() as u64,
                MultipartField::Text { .. } => 0,
            })
            .sum()
    }

    /// Checks if the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds the reqwest form, wiring file parts to the progress tracker.
    pub(crate) fn into_form(self, on_progress: Option<ProgressCallback>) -> Result<Form, KlogError> {
        let tracker = on_progress
            .map(|callback| Arc::new(UploadProgress::new(Some(self.total_bytes()), callback)));

        let mut form = Form::new();
        for field in self.fields {
            form = match field {
                MultipartField::Text { name, value } => form.text(name, value),
                MultipartField::File {
                    name,
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let part = match &tracker {
                        Some(tracker) => {
                            let length = bytes.len() as u64;
                            Part::stream_with_length(progress_body(bytes, Arc::clone(tracker)), length)
                        }
                        None => Part::bytes(bytes),
                    };
                    let part = part.file_name(file_name).mime_str(&mime_type).map_err(|e| {
                        KlogError::InvalidRequest(format!("invalid MIME type `{mime_type}`: {e}"))
                    })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// Byte counter shared by all streamed parts of one upload.
pub(crate) struct UploadProgress {
    loaded: AtomicU64,
    total: Option<u64>,
    callback: ProgressCallback,
}

impl UploadProgress {
    pub(crate) fn new(total: Option<u64>, callback: ProgressCallback) -> Self {
        Self {
            loaded: AtomicU64::new(0),
            total,
            callback,
        }
    }

    /// Records `sent` more bytes and reports the new percentage.
    pub(crate) fn advance(&self, sent: u64) {
        let loaded = self.loaded.fetch_add(sent, Ordering::Relaxed) + sent;
        if let Some(percent) = progress_percent(loaded, self.total) {
            (self.callback)(percent);
        }
    }
}

fn progress_body(bytes: Vec<u8>, tracker: Arc<UploadProgress>) -> Body {
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        tracker.advance(chunk.len() as u64);
        Ok::<_, std::io::Error>(chunk)
    }));
    Body::wrap_stream(stream)
}
