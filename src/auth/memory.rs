//
//  klog-sdk
//  auth/memory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::{PoisonError, RwLock};

use super::{non_empty, TokenStore};

/// Volatile token storage that lives as long as the store itself.
///
/// Use it for tests, short-lived scripts, and hosts where nothing should be
/// written to disk.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_token(Some(&token.into()));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_token(&self, token: Option<&str>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = non_empty(token).map(str::to_owned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.token().is_none());

        store.set_token(Some("abc"));
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.clear_token();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_empty_string_clears() {
        let store = MemoryTokenStore::with_token("abc");
        store.set_token(Some(""));
        assert!(store.token().is_none());
    }
}
