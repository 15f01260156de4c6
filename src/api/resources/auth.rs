//
//  klog-sdk
//  api/resources/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Registration, login, and session endpoints.
//!
//! Two operations touch the stored token:
//!
//! - [`AuthService::login`] stores the returned token on the client, so later
//!   calls are authenticated without any extra step
//! - [`AuthService::logout`] clears the token, but only once the server call
//!   has succeeded; on failure the token is left in place
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`AuthService::register`] | POST | `/api/v1/auth/register` |
//! | [`AuthService::login`] | POST | `/api/v1/auth/login` |
//! | [`AuthService::me`] | GET | `/api/v1/auth/me` |
//! | [`AuthService::logout`] | POST | `/api/v1/auth/logout` |

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use super::users::UserInfoResponse;
use crate::api::client::KlogClient;
use crate::api::common::KlogError;

/// New account details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login name; must be unique.
    pub username: String,

    /// Email address; must be unique.
    pub email: String,

    /// Plain-text password, sent over the connection as is.
    pub password: String,

    /// Display name.
    pub nickname: String,
}

/// The account created by a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// ID of the new account.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Display name.
    #[serde(default)]
    pub nickname: String,
}

/// Credentials for a login. `login` accepts a username or an email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub login: String,

    /// Password.
    pub password: String,
}

/// A successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
}

/// Authentication operations.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: KlogClient,
}

impl AuthService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Creates a new account.
    ///
    /// Registration does not log in; call [`login`](Self::login) afterwards.
    pub async fn register(&self, data: &RegisterRequest) -> Result<RegisterResponse, KlogError> {
        self.client.post("/api/v1/auth/register", data).await
    }

    /// Logs in and stores the returned token on the client.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = sdk.auth.login(&LoginRequest {
    ///     login: "ada".to_string(),
    ///     password: "secret".to_string(),
    /// }).await?;
    /// assert!(sdk.is_authenticated());
    /// ```
    pub async fn login(&self, data: &LoginRequest) -> Result<LoginResponse, KlogError> {
        let response: LoginResponse = self.client.post("/api/v1/auth/login", data).await?;
        self.client.set_token(Some(&response.token));
        Ok(response)
    }

    /// Returns the profile of the authenticated user.
    pub async fn me(&self) -> Result<UserInfoResponse, KlogError> {
        self.client.get("/api/v1/auth/me").await
    }

    /// Ends the session on the server, then clears the local token.
    ///
    /// If the server call fails the error is returned and the token is kept;
    /// use `Klog::clear_token` to drop it regardless.
    pub async fn logout(&self) -> Result<(), KlogError> {
        let _: IgnoredAny = self.client.post_empty("/api/v1/auth/logout").await?;
        self.client.set_token(None);
        Ok(())
    }
}
