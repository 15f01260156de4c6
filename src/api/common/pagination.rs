//
//  klog-sdk
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for KLog API Responses
//!
//! List endpoints that page their results (posts, media) return an
//! offset-paged collection:
//!
//! ```json
//! {"total": 42, "page": 1, "limit": 20, "data": [ ... ]}
//! ```
//!
//! Ordering and content are decided by the server. Any additional fields the
//! server includes (for example cursor tokens on newer deployments) are kept
//! in [`PaginatedResponse::extra`] instead of being dropped.

use serde::{Deserialize, Serialize};

/// A single page of results.
///
/// # Type Parameters
///
/// - `T` - The type of items contained in the `data` array
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `total` | `u64` | Total number of items across all pages |
/// | `page` | `u32` | Current page number (1-indexed) |
/// | `limit` | `u32` | Maximum number of items per page |
/// | `data` | `Vec<T>` | Items in the current page |
/// | `extra` | map | Any other fields the server sent |
///
/// # Example
///
/// ```rust,ignore
/// use klog_sdk::api::common::PaginatedResponse;
///
/// let json = r#"{"total": 45, "page": 2, "limit": 20, "data": [1, 2, 3]}"#;
/// let page: PaginatedResponse<u32> = serde_json::from_str(json).unwrap();
///
/// assert_eq!(page.total_pages(), 3);
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: u32,

    /// Maximum number of items per page.
    #[serde(default)]
    pub limit: u32,

    /// Items in the current page. May be empty.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    /// Fields beyond the offset-paging shape, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl<T> PaginatedResponse<T> {
    /// Returns the number of pages implied by `total` and `limit`.
    ///
    /// A zero `limit` yields zero pages.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }

    /// Checks if a page after the current one exists.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// Checks if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
