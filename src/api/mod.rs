//
//  klog-sdk
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP side of the SDK.
//!
//! ## Architecture
//!
//! - [`client`]: The transport client. Bearer injection, envelope unwrapping,
//!   error classification and the 401 hook all live here
//! - [`common`]: Shared types (errors, the response envelope, pagination)
//! - [`upload`]: Multipart payloads and upload progress
//! - [`resources`]: Per-domain models and services built on the client
//!
//! ## Error Handling
//!
//! Every failure is returned as a [`KlogError`]:
//!
//! - `Api`: the server answered with a structured `{code, message}` error
//! - `Network`: no response arrived, or a non-2xx response had no structured error
//! - `Decode`: a successful response did not have the expected shape
//! - `InvalidRequest`: the request could not be built and was never sent

/// Core HTTP client for the KLog API.
pub mod client;

/// Error taxonomy, response envelope and pagination types.
pub mod common;

/// Resource models and services.
pub mod resources;

/// Multipart upload support.
pub mod upload;

pub use client::{ClientConfig, KlogClient, RequestOptions};
pub use common::{KlogError, PaginatedResponse};
pub use upload::{MultipartPayload, ProgressCallback};
