//
//  klog-sdk
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the KLog API
//!
//! This module provides the types shared by every resource module: the
//! response envelope the server wraps each body in, the structured error it
//! carries, and the [`KlogError`] taxonomy every call resolves to.
//!
//! # Overview
//!
//! - [`KlogError`] - Classified failure returned by every API operation
//! - [`Envelope`] - The `{success, data, error}` wrapper around each body
//! - [`ApiErrorBody`] - The structured `{code, message}` error payload
//! - Pagination types (re-exported from the `pagination` submodule)
//!
//! # Example
//!
//! ```rust,ignore
//! use klog_sdk::api::common::KlogError;
//!
//! fn handle<T>(result: Result<T, KlogError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(e) if e.is_auth_error() => println!("Please log in first"),
//!         Err(e) if e.is_network_error() => println!("Offline: {}", e),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Message carried by every [`KlogError::Network`] raised when no response
/// reached the client (DNS, connect, or timeout failures).
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network request failed, please check your network connection";

/// Classified failure for all KLog API operations.
///
/// Every failed call resolves to exactly one of these variants. The first two
/// are the wire-level categories:
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `Api` | A response arrived and carried a structured `{code, message}` error |
/// | `Network` | No response arrived, or a non-2xx response had no structured error |
/// | `Decode` | A 2xx response could not be decoded into the requested type |
/// | `InvalidRequest` | The request could not be built locally and was never sent |
///
/// # Example
///
/// ```rust,ignore
/// use klog_sdk::api::common::KlogError;
///
/// let err = KlogError::Api {
///     code: "INVALID_PARAMS".to_string(),
///     message: "bad slug".to_string(),
///     status: 400,
/// };
/// assert!(err.is_validation_error());
/// assert_eq!(err.to_string(), "bad slug");
/// ```
///
/// # Notes
///
/// - The category predicates only ever return `true` for `Api` errors
/// - Errors are never retried; they propagate to the immediate caller
#[derive(Error, Debug)]
pub enum KlogError {
    /// The server answered with a structured error envelope.
    #[error("{message}")]
    Api {
        /// Machine-readable error code (e.g. `UNAUTHORIZED`, `INVALID_PARAMS`).
        code: String,
        /// Human-readable message from the server.
        message: String,
        /// HTTP status of the response that carried the error.
        status: u16,
    },

    /// The request failed at the transport level.
    ///
    /// Either nothing came back (`status` is `None` and `message` is
    /// [`NETWORK_ERROR_MESSAGE`]) or a non-2xx response arrived without a
    /// structured error body (`status` holds the HTTP status).
    #[error("{message}")]
    Network {
        /// User-facing description of the failure.
        message: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Underlying transport error, when there was one.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A successful response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request could not be constructed (invalid URL, header, body, ...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl KlogError {
    /// Builds an API error from a structured error body and the HTTP status.
    pub fn api(error: ApiErrorBody, status: u16) -> Self {
        Self::Api {
            code: error.code,
            message: error.message,
            status,
        }
    }

    /// Builds the transport error for a non-2xx response without an error body.
    pub fn http_status(status: u16) -> Self {
        Self::Network {
            message: format!("Request failed: {status}"),
            status: Some(status),
            source: None,
        }
    }

    /// Builds the transport error for a request that never got a response.
    pub fn unreachable(source: reqwest::Error) -> Self {
        Self::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: None,
            source: Some(source),
        }
    }

    /// Returns the machine-readable error code of an API error.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Checks whether this is an authentication failure.
    ///
    /// True for API errors with code `UNAUTHORIZED` or status 401.
    pub fn is_auth_error(&self) -> bool {
        self.api_matches("UNAUTHORIZED", 401)
    }

    /// Checks whether this is an authorization failure.
    ///
    /// True for API errors with code `FORBIDDEN` or status 403.
    pub fn is_forbidden_error(&self) -> bool {
        self.api_matches("FORBIDDEN", 403)
    }

    /// Checks whether the requested resource does not exist (status 404).
    pub fn is_not_found_error(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Checks whether the server rejected the request parameters.
    ///
    /// True for API errors with code `INVALID_PARAMS` or status 400.
    pub fn is_validation_error(&self) -> bool {
        self.api_matches("INVALID_PARAMS", 400)
    }

    /// Checks whether this is a transport-level failure.
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    fn api_matches(&self, expected_code: &str, expected_status: u16) -> bool {
        match self {
            Self::Api { code, status, .. } => code == expected_code || *status == expected_status,
            _ => false,
        }
    }
}

/// Structured error payload carried by a failed envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Uniform wrapper every KLog response body follows.
///
/// ```json
/// {"success": true, "data": {"id": 1}}
/// {"success": false, "error": {"code": "NOT_FOUND", "message": "post not found"}}
/// ```
///
/// Only one of `data` / `error` is meaningfully populated. The client never
/// hands an envelope to callers; it returns `data` or raises a [`KlogError`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the server considers the call successful.
    #[serde(default)]
    pub success: bool,

    /// Payload of a successful call.
    #[serde(default)]
    pub data: Option<T>,

    /// Structured error of a failed call.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: &str, status: u16) -> KlogError {
        KlogError::Api {
            code: code.to_string(),
            message: "boom".to_string(),
            status,
        }
    }

    #[test]
    fn test_predicates_match_by_code_or_status() {
        assert!(api("UNAUTHORIZED", 200).is_auth_error());
        assert!(api("OTHER", 401).is_auth_error());
        assert!(api("FORBIDDEN", 500).is_forbidden_error());
        assert!(api("OTHER", 403).is_forbidden_error());
        assert!(api("INVALID_PARAMS", 422).is_validation_error());
        assert!(api("OTHER", 400).is_validation_error());
        assert!(api("OTHER", 404).is_not_found_error());
        assert!(!api("NOT_FOUND", 410).is_not_found_error());
    }

    #[test]
    fn test_network_errors_have_no_categories() {
        let err = KlogError::http_status(401);
        assert!(err.is_network_error());
        assert!(!err.is_auth_error());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "Request failed: 401");
    }

    #[test]
    fn test_api_error_displays_server_message() {
        let err = KlogError::api(
            ApiErrorBody {
                code: "INVALID_PARAMS".to_string(),
                message: "bad slug".to_string(),
            },
            400,
        );
        assert_eq!(err.to_string(), "bad slug");
        assert_eq!(err.code(), Some("INVALID_PARAMS"));
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_envelope_defaults_missing_fields() {
        let env: Envelope<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert!(env.error.is_none());
    }
}
