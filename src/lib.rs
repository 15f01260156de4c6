//
//  klog-sdk
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # KLog SDK
//!
//! A typed client for the KLog blogging API, plus the `klog` command-line
//! tool built on it.
//!
//! ## Overview
//!
//! Every call goes through one transport client, [`KlogClient`], which:
//!
//! - attaches the stored token as `Authorization: Bearer <token>`
//! - unwraps the `{success, data, error}` envelope and returns `data`
//! - turns failures into a [`KlogError`] with predicates such as
//!   [`KlogError::is_auth_error`]
//! - fires an optional hook on every HTTP 401
//!
//! The [`Klog`] facade wires a pluggable [`TokenStore`] into that client and
//! exposes one service per API domain.
//!
//! ## Module Structure
//!
//! - [`api`]: Transport client, errors, resource models and services
//! - [`auth`]: Token stores (keyring, file, memory)
//! - [`sdk`]: The [`Klog`] facade
//! - [`config`]: Configuration file for the `klog` binary
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Table and JSON output
//! - [`interactive`]: Terminal prompts
//! - [`util`]: Formatting helpers
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use klog_sdk::{Klog, KlogConfig, LoginRequest, PostQueryParams};
//!
//! let sdk = Klog::new(KlogConfig::new("https://blog.example.com"))?;
//! sdk.auth
//!     .login(&LoginRequest { login: "ada".into(), password: "secret".into() })
//!     .await?;
//!
//! let page = sdk.posts.list(&PostQueryParams::default()).await?;
//! println!("{} posts", page.total);
//! ```

/// HTTP transport, error taxonomy, and resource services.
pub mod api;

/// Pluggable token persistence.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
///
/// - Linux: `~/.config/klog/config.toml`
/// - macOS: `~/Library/Application Support/klog/config.toml`
/// - Windows: `%APPDATA%\klog\config\config.toml`
pub mod config;

/// Interactive terminal prompts.
pub mod interactive;

/// Output formatting (table and JSON).
pub mod output;

/// The SDK facade.
pub mod sdk;

/// Formatting helpers.
pub mod util;

pub use api::client::{ClientConfig, KlogClient, RequestOptions, DEFAULT_TIMEOUT};
pub use api::common::{KlogError, PaginatedResponse, NETWORK_ERROR_MESSAGE};
pub use api::resources::*;
pub use api::upload::{MultipartPayload, ProgressCallback};
pub use auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore, DEFAULT_TOKEN_KEY};
pub use cli::Cli;
pub use config::Config;
pub use sdk::{Klog, KlogConfig};

/// Application version constant.
///
/// Derived from Cargo.toml at compile time; also sent in the `User-Agent`
/// header as `klog-sdk/<version>`.
///
/// # Example
///
/// ```rust
/// use klog_sdk::VERSION;
///
/// println!("klog version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the `klog` binary.
///
/// Scripts can tell failure kinds apart without parsing stderr.
///
/// # Example
///
/// ```rust,no_run
/// use klog_sdk::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// An unspecified error occurred. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid arguments. Clap exits with this code on its own.
    pub const USAGE: i32 = 2;

    /// The token is missing, expired, or rejected (HTTP 401 / `UNAUTHORIZED`).
    ///
    /// Run `klog auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist (HTTP 404).
    pub const NOT_FOUND: i32 = 8;

    /// The server could not be reached, or answered without a structured error.
    pub const NETWORK: i32 = 32;
}
