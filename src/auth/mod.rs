//
//  klog-sdk
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Storage Module
//!
//! This module provides the pluggable persistence for the bearer token the
//! SDK sends with every request.
//!
//! ## Storage Backends
//!
//! - [`KeyringTokenStore`]: System keyring (Keychain, Secret Service, Credential
//!   Manager). The default.
//! - [`FileTokenStore`]: A plain file with owner-only permissions, for
//!   headless hosts without a keyring daemon.
//! - [`MemoryTokenStore`]: Process memory only. Nothing survives a restart.
//!
//! ## Failure Model
//!
//! A store never returns an error. Backend failures are logged through
//! `tracing` and degrade to "no token" on read and a no-op on write, so a
//! broken keyring can at worst log the user out.
//!
//! ## Example
//!
//! ```rust,ignore
//! use klog_sdk::auth::{MemoryTokenStore, TokenStore};
//!
//! let store = MemoryTokenStore::new();
//! store.set_token(Some("abc123"));
//! assert_eq!(store.token().as_deref(), Some("abc123"));
//!
//! store.clear_token();
//! assert!(store.token().is_none());
//! ```

mod file;
mod keyring;
mod memory;

pub use file::*;
pub use keyring::*;
pub use memory::*;

/// Key the token is stored under unless another is configured.
pub const DEFAULT_TOKEN_KEY: &str = "klog_token";

/// Persistence for the bearer token.
///
/// Implementations must be safe to share across tasks; the SDK holds the
/// store behind an `Arc` and reads it on every request.
///
/// # Contract
///
/// - `set_token(None)` and `set_token(Some(""))` both clear the token
/// - No method panics or reports an error to the caller
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` if there is none or it could not
    /// be read.
    fn token(&self) -> Option<String>;

    /// Stores `token`, replacing any previous value. `None` clears.
    fn set_token(&self, token: Option<&str>);

    /// Removes the stored token.
    fn clear_token(&self) {
        self.set_token(None);
    }
}

/// Normalizes a token argument so empty strings mean "clear".
pub(crate) fn non_empty(token: Option<&str>) -> Option<&str> {
    token.filter(|t| !t.is_empty())
}
