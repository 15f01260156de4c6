//
//  klog-sdk
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the KLog API
//!
//! This module provides the single client every resource operation funnels
//! through. Each call runs the same three steps in order:
//!
//! 1. **Authorize** ([`authorize`]): read the current token and set it as the
//!    bearer `Authorization` header when present
//! 2. **Dispatch**: send the request through `reqwest`
//! 3. **Classify** ([`classify_response`]): unwrap the envelope's `data` on
//!    success or turn the response into a [`KlogError`]
//!
//! A 401 response additionally fires the configured token-expired hook before
//! classification. The hook is a notification only; the error is still
//! returned.
//!
//! ## Features
//!
//! - Pluggable token getter/setter with an in-memory fallback slot
//! - Envelope unwrapping and error classification
//! - JSON and multipart request bodies, query parameters, per-request timeouts
//! - Upload progress reporting
//! - Custom User-Agent header

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Request, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::common::{Envelope, KlogError};
use super::upload::{MultipartPayload, ProgressCallback};

/// Request timeout applied when none is configured (30 000 ms).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Reads the current token from an external owner.
pub type TokenGetter = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Writes (or, with `None`, clears) the token held by an external owner.
pub type TokenSetter = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// Notified whenever a response comes back with HTTP 401.
pub type TokenExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Construction options for [`KlogClient`].
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use klog_sdk::api::client::ClientConfig;
///
/// let config = ClientConfig::new("https://blog.example.com")
///     .timeout(Duration::from_secs(10))
///     .on_token_expired(|| eprintln!("session expired"));
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Base address every request path is appended to.
    pub base_url: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// Optional external token getter.
    pub get_token: Option<TokenGetter>,
    /// Optional external token setter.
    pub set_token: Option<TokenSetter>,
    /// Optional hook fired on HTTP 401.
    pub on_token_expired: Option<TokenExpiredHook>,
}

impl ClientConfig {
    /// Creates a configuration with the default timeout and no hooks.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            get_token: None,
            set_token: None,
            on_token_expired: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads tokens through `getter` instead of the internal slot.
    pub fn token_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.get_token = Some(Arc::new(getter));
        self
    }

    /// Propagates every token change to `setter`.
    pub fn token_setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        self.set_token = Some(Arc::new(setter));
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

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("get_token", &self.get_token.is_some())
            .field("set_token", &self.set_token.is_some())
            .field("on_token_expired", &self.on_token_expired.is_some())
            .finish()
    }
}

/// Per-request options accepted by the `*_with` verb primitives.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use klog_sdk::api::client::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query(&serde_json::json!({"page": 2, "limit": 10}))?
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends query parameters serialized from a map-shaped value.
    ///
    /// `None` fields are skipped; sequences repeat the key.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, KlogError> {
        self.query.extend(query_pairs(params)?);
        Ok(self)
    }

    /// Adds a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Overrides the client timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the collected query pairs.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Flattens a serializable map into `(key, value)` query pairs.
///
/// # Errors
///
/// Returns [`KlogError::InvalidRequest`] if the value does not serialize to a
/// JSON object (or `null`).
pub fn query_pairs<Q: Serialize + ?Sized>(params: &Q) -> Result<Vec<(String, String)>, KlogError> {
    let value = serde_json::to_value(params)
        .map_err(|e| KlogError::InvalidRequest(format!("unserializable query: {e}")))?;

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(KlogError::InvalidRequest(format!(
                "query parameters must serialize to a map, got `{other}`"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_to_string(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_to_string(other) {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Outbound stage: attaches the bearer credential when one is present.
///
/// The header is replaced rather than appended, so an `Authorization` value
/// passed through [`RequestOptions::header`] never reaches the server
/// alongside the token. An absent or empty token leaves the request
/// untouched; the server decides whether the call needed authentication.
///
/// # Errors
///
/// Returns [`KlogError::InvalidRequest`] if the token is not a valid header
/// value (e.g. it contains a newline).
pub fn authorize(mut request: Request, token: Option<&str>) -> Result<Request, KlogError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(request);
    };

    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| KlogError::InvalidRequest("token is not a valid header value".to_string()))?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(request)
}

/// Inbound stage: unwraps the envelope or classifies the failure.
///
/// | Response | Result |
/// |----------|--------|
/// | 2xx, empty body | `Ok(None)` |
/// | 2xx, envelope with `success:false` and an `error` | `Err(Api)` |
/// | 2xx, envelope | `Ok(data)` (`None` when `data` is absent or null) |
/// | 2xx, anything else | `Err(Decode)` |
/// | non-2xx, envelope with an `error` | `Err(Api)` |
/// | non-2xx, anything else | `Err(Network)` carrying the status |
pub fn classify_response(status: StatusCode, body: &[u8]) -> Result<Option<Value>, KlogError> {
    if status.is_success() {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope: Envelope<Value> = serde_json::from_slice(body).map_err(KlogError::Decode)?;
        return match envelope {
            Envelope {
                success: false,
                error: Some(error),
                ..
            } => Err(KlogError::api(error, status.as_u16())),
            Envelope { data, .. } => Ok(data),
        };
    }

    match serde_json::from_slice::<Envelope<Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error)
    {
        Some(error) => Err(KlogError::api(error, status.as_u16())),
        None => Err(KlogError::http_status(status.as_u16())),
    }
}

/// Maps a reqwest failure to the error taxonomy.
fn transport_error(error: reqwest::Error) -> KlogError {
    if error.is_builder() {
        KlogError::InvalidRequest(error.to_string())
    } else {
        KlogError::unreachable(error)
    }
}

fn decode<T: DeserializeOwned>(data: Option<Value>) -> Result<T, KlogError> {
    serde_json::from_value(data.unwrap_or(Value::Null)).map_err(KlogError::Decode)
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<Value, KlogError> {
    serde_json::to_value(body).map_err(|e| KlogError::InvalidRequest(format!("unserializable body: {e}")))
}

/// Body attached to an outgoing request.
enum Payload {
    Empty,
    Json(Value),
    Multipart(reqwest::multipart::Form),
}

/// The HTTP client for the KLog API.
///
/// Cloning is cheap: clones share the connection pool, the hooks, and the
/// fallback token slot, so every resource façade can hold its own handle.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use klog_sdk::api::client::{ClientConfig, KlogClient};
///
/// let client = KlogClient::new(ClientConfig::new("https://blog.example.com"))?;
/// client.set_token(Some("abc123"));
///
/// let tags: Vec<klog_sdk::Tag> = client.get("/api/v1/tags").await?;
/// ```
#[derive(Clone)]
pub struct KlogClient {
    /// The underlying HTTP client
    http: Client,
    /// Base address without a trailing slash
    base_url: String,
    get_token: Option<TokenGetter>,
    set_token: Option<TokenSetter>,
    on_token_expired: Option<TokenExpiredHook>,
    /// Fallback slot used when no getter is configured
    token: Arc<RwLock<Option<String>>>,
}

impl KlogClient {
    /// Creates a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KlogError::InvalidRequest`] if the base URL does not parse or
    /// the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, KlogError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| KlogError::InvalidRequest(format!("invalid base URL `{base_url}`: {e}")))?;

        let http = Client::builder()
            .user_agent(format!("klog-sdk/{}", crate::VERSION))
            .timeout(config.timeout)
            .build()
            .map_err(|e| KlogError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            get_token: config.get_token,
            set_token: config.set_token,
            on_token_expired: config.on_token_expired,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Returns the base address (without a trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the current token.
    ///
    /// Reads through the configured getter when there is one, otherwise from
    /// the internal slot.
    pub fn token(&self) -> Option<String> {
        match &self.get_token {
            Some(getter) => getter(),
            None => self.token.read().unwrap_or_else(PoisonError::into_inner).clone(),
        }
    }

    /// Replaces (or with `None`, clears) the token.
    ///
    /// The internal slot is always updated, and the change is forwarded to
    /// the configured setter so a backing store stays authoritative.
    pub fn set_token(&self, token: Option<&str>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.map(str::to_owned);
        if let Some(setter) = &self.set_token {
            setter(token);
        }
    }

    /// Makes a GET request and returns the unwrapped `data`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, KlogError> {
        self.get_with(path, &RequestOptions::default()).await
    }

    /// Makes a GET request with query parameters or other options.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, KlogError> {
        decode(self.send(Method::GET, path, Payload::Empty, options).await?)
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, KlogError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_with(path, body, &RequestOptions::default()).await
    }

    /// Makes a POST request with a JSON body and options.
    pub async fn post_with<T, B>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, KlogError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = Payload::Json(to_json(body)?);
        decode(self.send(Method::POST, path, payload, options).await?)
    }

    /// Makes a POST request without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, KlogError> {
        decode(
            self.send(Method::POST, path, Payload::Empty, &RequestOptions::default())
                .await?,
        )
    }

    /// Makes a PUT request with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, KlogError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put_with(path, body, &RequestOptions::default()).await
    }

    /// Makes a PUT request with a JSON body and options.
    pub async fn put_with<T, B>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, KlogError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = Payload::Json(to_json(body)?);
        decode(self.send(Method::PUT, path, payload, options).await?)
    }

    /// Makes a DELETE request.
    ///
    /// Returns `Ok(None)` when the server answers with no content (e.g. 204).
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, KlogError> {
        self.delete_with(path, &RequestOptions::default()).await
    }

    /// Makes a DELETE request with options.
    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Option<T>, KlogError> {
        match self.send(Method::DELETE, path, Payload::Empty, options).await? {
            Some(data) => serde_json::from_value(data).map(Some).map_err(KlogError::Decode),
            None => Ok(None),
        }
    }

    /// Uploads a multipart body with POST.
    ///
    /// The `multipart/form-data` content type (with boundary) is always used.
    /// When `on_progress` is given it receives `round(sent * 100 / total)`
    /// after each streamed chunk; nothing is reported when the payload has no
    /// file bytes.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: MultipartPayload,
        on_progress: Option<ProgressCallback>,
    ) -> Result<T, KlogError> {
        let form = payload.into_form(on_progress)?;
        decode(
            self.send(Method::POST, path, Payload::Multipart(form), &RequestOptions::default())
                .await?,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: &RequestOptions,
    ) -> Result<Option<Value>, KlogError> {
        let url = self.url(path);
        tracing::debug!(method = method.as_str(), url = url.as_str(), "sending request");

        let mut request = self.http.request(method, &url);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(&body),
            Payload::Multipart(form) => request.multipart(form),
        };

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Option<Value>, KlogError> {
        let request = request.build().map_err(transport_error)?;
        let request = authorize(request, self.token().as_deref())?;

        let response = self.http.execute(request).await.map_err(transport_error)?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");

        if status == StatusCode::UNAUTHORIZED {
            if let Some(hook) = &self.on_token_expired {
                hook();
            }
        }

        let body = response.bytes().await.map_err(transport_error)?;
        classify_response(status, &body)
    }
}

impl fmt::Debug for KlogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KlogClient")
            .field("base_url", &self.base_url)
            .field("external_token_store", &self.get_token.is_some())
            .finish()
    }
}
