//
//  klog-sdk
//  sdk.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # SDK Entry Point
//!
//! [`Klog`] is the composition root: it owns one [`TokenStore`] and one
//! [`KlogClient`], wires the store in as the client's token getter/setter, and
//! hands a clone of the client to every resource service.
//!
//! ## Example
//!
//! ```rust,ignore
//! use klog_sdk::{Klog, KlogConfig, LoginRequest, MemoryTokenStore};
//!
//! let sdk = Klog::new(
//!     KlogConfig::new("https://blog.example.com")
//!         .token_store(MemoryTokenStore::new())
//!         .on_token_expired(|| eprintln!("please log in again")),
//! )?;
//!
//! sdk.auth.login(&LoginRequest { login: "ada".into(), password: "secret".into() }).await?;
//! let tags = sdk.tags.list().await?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::client::{ClientConfig, KlogClient, TokenExpiredHook, DEFAULT_TIMEOUT};
use crate::api::common::KlogError;
use crate::api::resources::{
    AuthService, CategoryService, CommentService, MediaService, PostService, SettingService,
    TagService, UserService,
};
use crate::auth::{KeyringTokenStore, TokenStore};

/// Construction options for [`Klog`].
///
/// # Fields
///
/// * `base_url` - Server root, without the `/api/v1` prefix
/// * `timeout` - Per-request timeout
/// * `token_store` - Where the bearer token lives
/// * `on_token_expired` - Hook run on every 401 response
#[derive(Clone)]
pub struct KlogConfig {
    /// Server root (e.g. `https://blog.example.com`). A trailing slash is
    /// ignored.
    pub base_url: String,

    /// Per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub timeout: Duration,

    /// Defaults to a [`KeyringTokenStore`] when unset.
    pub token_store: Option<Arc<dyn TokenStore>>,

    /// Called whenever a response has status 401. The token is not cleared.
    pub on_token_expired: Option<TokenExpiredHook>,
}

impl KlogConfig {
    /// Options for `base_url` with the default timeout, the keyring token
    /// store and no expiry hook.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            token_store: None,
            on_token_expired: None,
        }
    }

    /// Overrides the per-request timeout. An elapsed timeout surfaces as a
    /// network error.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses `store` for the token instead of the system keyring.
    pub fn token_store<S: TokenStore + 'static>(self, store: S) -> Self {
        self.shared_token_store(Arc::new(store))
    }

    /// Like [`token_store`](Self::token_store), for a store the caller keeps a
    /// handle to.
    pub fn shared_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Calls `hook` whenever a response has status 401.
    pub fn on_token_expired<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_token_expired = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for KlogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KlogConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("token_store", &self.token_store.is_some())
            .field("on_token_expired", &self.on_token_expired.is_some())
            .finish()
    }
}

/// The KLog SDK.
///
/// Every service shares the same client, so a token stored by
/// `auth.login` is immediately used by `posts`, `media` and the rest.
#[derive(Clone)]
pub struct Klog {
    client: KlogClient,
    token_store: Arc<dyn TokenStore>,

    /// Login, registration and the current user.
    pub auth: AuthService,

    /// Posts.
    pub posts: PostService,

    /// Categories.
    pub categories: CategoryService,

    /// Tags.
    pub tags: TagService,

    /// Comments and moderation.
    pub comments: CommentService,

    /// Uploads and the media library.
    pub media: MediaService,

    /// User profiles.
    pub users: UserService,

    /// Site settings.
    pub settings: SettingService,
}

impl Klog {
    /// Builds the SDK.
    ///
    /// # Errors
    ///
    /// Returns [`KlogError::InvalidRequest`] if the base URL is invalid.
    pub fn new(config: KlogConfig) -> Result<Self, KlogError> {
        let token_store = config
            .token_store
            .unwrap_or_else(|| Arc::new(KeyringTokenStore::new()));

        let getter = Arc::clone(&token_store);
        let setter = Arc::clone(&token_store);
        let mut client_config = ClientConfig::new(config.base_url)
            .timeout(config.timeout)
            .token_getter(move || getter.token())
            .token_setter(move |token| setter.set_token(token));
        client_config.on_token_expired = config.on_token_expired;

        let client = KlogClient::new(client_config)?;
        tracing::debug!(base_url = client.base_url(), "klog sdk initialized");

        Ok(Self {
            auth: AuthService::new(client.clone()),
            posts: PostService::new(client.clone()),
            categories: CategoryService::new(client.clone()),
            tags: TagService::new(client.clone()),
            comments: CommentService::new(client.clone()),
            media: MediaService::new(client.clone()),
            users: UserService::new(client.clone()),
            settings: SettingService::new(client.clone()),
            client,
            token_store,
        })
    }

    /// The shared transport client, for endpoints the services don't cover.
    pub fn client(&self) -> &KlogClient {
        &self.client
    }

    /// The current token, read from the token store on every call.
    pub fn token(&self) -> Option<String> {
        self.client.token()
    }

    /// Writes `token` to the token store. `None` clears it.
    ///
    /// Every service picks up the change on its next request.
    pub fn set_token(&self, token: Option<&str>) {
        self.client.set_token(token);
    }

    /// Removes the token from the store directly, bypassing the client.
    pub fn clear_token(&self) {
        self.token_store.clear_token();
    }

    /// True when a non-empty token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|token| !token.is_empty())
    }
}

impl fmt::Debug for Klog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Klog")
            .field("client", &self.client)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    fn sdk_with(store: Arc<dyn TokenStore>) -> Klog {
        Klog::new(KlogConfig::new("http://localhost:8080").shared_token_store(store)).unwrap()
    }

    #[test]
    fn test_token_lifecycle() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let sdk = sdk_with(Arc::clone(&store));
        assert!(!sdk.is_authenticated());

        sdk.set_token(Some("abc"));
        assert!(sdk.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("abc"));

        sdk.clear_token();
        assert!(!sdk.is_authenticated());
        assert!(sdk.token().is_none());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let sdk = sdk_with(Arc::new(MemoryTokenStore::new()));
        sdk.set_token(Some(""));
        assert!(!sdk.is_authenticated());
    }

    #[test]
    fn test_store_is_authoritative() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let sdk = sdk_with(Arc::clone(&store));
        store.set_token(Some("set-elsewhere"));
        assert_eq!(sdk.token().as_deref(), Some("set-elsewhere"));
    }

    #[test]
    fn test_services_share_base_url() {
        let sdk = sdk_with(Arc::new(MemoryTokenStore::new()));
        assert_eq!(sdk.media.media_url("a.png"), "http://localhost:8080/api/v1/media/i/a.png");
    }
}
