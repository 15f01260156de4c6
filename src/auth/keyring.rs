//
//  klog-sdk
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # System Keyring Storage
//!
//! Stores the token in the platform's native secret store:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `klog`
//! - **Key**: [`DEFAULT_TOKEN_KEY`] (`klog_token`) unless configured
//! - **Value**: The raw token
//!
//! When no keyring is reachable (containers, CI) reads return `None` and
//! writes are dropped; use [`FileTokenStore`](super::FileTokenStore) there.

use keyring::Entry;

use super::{non_empty, TokenStore, DEFAULT_TOKEN_KEY};

/// Service name all entries are grouped under.
const SERVICE_NAME: &str = "klog";

/// Token storage backed by the system keyring.
///
/// # Example
///
/// ```rust,ignore
/// use klog_sdk::auth::{KeyringTokenStore, TokenStore};
///
/// let store = KeyringTokenStore::new();
/// store.set_token(Some("abc123"));
/// ```
///
/// # Notes
///
/// - The keyring may require user interaction (password, biometrics) on first access.
/// - On Linux, ensure a secret service daemon (GNOME Keyring, KWallet) is running.
pub struct KeyringTokenStore {
    key: String,
    /// `None` when the entry could not be created; every call is then a no-op.
    entry: Option<Entry>,
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringTokenStore {
    /// Creates a store for the default key.
    pub fn new() -> Self {
        Self::with_key(DEFAULT_TOKEN_KEY)
    }

    /// Creates a store under a custom key, e.g. one per site.
    pub fn with_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let entry = match Entry::new(SERVICE_NAME, &key) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(key = key.as_str(), error = %e, "keyring unavailable, token will not persist");
                None
            }
        };
        Self { key, entry }
    }

    /// Returns the key the token is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TokenStore for KeyringTokenStore {
    fn token(&self) -> Option<String> {
        let entry = self.entry.as_ref()?;
        match entry.get_password() {
            Ok(token) => non_empty(Some(&token)).map(str::to_owned),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                tracing::debug!(key = self.key.as_str(), error = %e, "failed to read token from keyring");
                None
            }
        }
    }

    fn set_token(&self, token: Option<&str>) {
        let Some(entry) = &self.entry else {
            return;
        };

        let result = match non_empty(token) {
            Some(token) => entry.set_password(token),
            None => match entry.delete_credential() {
                Err(keyring::Error::NoEntry) => Ok(()), // Already gone
                other => other,
            },
        };

        if let Err(e) = result {
            tracing::warn!(key = self.key.as_str(), error = %e, "failed to update token in keyring");
        }
    }
}

impl std::fmt::Debug for KeyringTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringTokenStore")
            .field("service", &SERVICE_NAME)
            .field("key", &self.key)
            .field("available", &self.entry.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn use_mock_keyring() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
    }

    #[test]
    fn test_keyring_round_trip() {
        use_mock_keyring();
        let store = KeyringTokenStore::with_key("test_round_trip");

        assert!(store.token().is_none());
        store.set_token(Some("abc123"));
        assert_eq!(store.token().as_deref(), Some("abc123"));

        store.clear_token();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_clearing_missing_entry_is_quiet() {
        use_mock_keyring();
        let store = KeyringTokenStore::with_key("test_missing");
        store.clear_token();
        store.set_token(Some(""));
        assert!(store.token().is_none());
    }

    #[test]
    fn test_default_key() {
        use_mock_keyring();
        assert_eq!(KeyringTokenStore::new().key(), DEFAULT_TOKEN_KEY);
    }
}
