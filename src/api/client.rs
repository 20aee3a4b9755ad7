//
//  gocd-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the GoCD API
//!
//! This module provides [`GocdClient`], the dispatcher every service facade
//! goes through. It handles authentication, revision negotiation and
//! response decoding.
//!
//! ## Features
//!
//! - `Accept` header chosen per request, defaulting to the baseline revision
//! - Basic authentication or a captured session cookie (cookie wins)
//! - Memoized server version with explicit invalidation
//! - Cancellation through a [`CancellationToken`] on every call
//! - Opt-in mutual exclusion for read-modify-write sequences
//! - Custom User-Agent header

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthCredential;

use super::common::{extract_error_message, ApiError};
use super::request::{ApiRequest, ApiResponse, HeadOutcome, RequestBody, ResponseType};
use super::version::{ApiVersion, RawServerVersion, ServerVersion, ServerVersionCache};

/// The main HTTP client for interacting with a GoCD server.
///
/// Cloning is cheap. Clones share the connection pool, the session cookie,
/// the server version cache and the exclusive-section lock.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use gocd_client::api::GocdClient;
/// use gocd_client::auth::AuthCredential;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), gocd_client::api::ApiError> {
/// let client = GocdClient::new("https://ci.example.com/go/")?
///     .with_auth(AuthCredential::basic("admin", "secret"));
///
/// let cancel = CancellationToken::new();
/// let (version, cached) = client.server_version(&cancel).await?;
/// println!("GoCD {} (cached: {cached})", version.version);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GocdClient {
    http: Client,
    base_url: Url,
    auth: Option<AuthCredential>,
    cookie: Arc<RwLock<Option<String>>>,
    server_version: ServerVersionCache,
    exclusive: Arc<Mutex<()>>,
}

impl std::fmt::Debug for GocdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GocdClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .field("has_cookie", &self.cookie.read().is_some())
            .finish()
    }
}

impl GocdClient {
    /// Creates a client for the server rooted at `server`.
    ///
    /// `server` is the URL GoCD is served under, usually ending in `/go/`.
    /// A missing trailing slash is added so request paths join beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if `server` is not an absolute URL or the HTTP client
    /// could not be created.
    pub fn new(server: &str) -> Result<Self, ApiError> {
        Self::with_tls_verification(server, true)
    }

    /// Like [`GocdClient::new`], optionally accepting invalid certificates.
    pub fn with_tls_verification(server: &str, verify: bool) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(server)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(format!("gocd-client/{}", crate::VERSION))
            .danger_accept_invalid_certs(!verify)
            .build()?;

        Ok(Self {
            http,
            base_url,
            auth: None,
            cookie: Arc::new(RwLock::new(None)),
            server_version: ServerVersionCache::new(),
            exclusive: Arc::new(Mutex::new(())),
        })
    }

    /// Sets the credentials used for every request.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session cookie captured by [`GocdClient::login`], if any.
    pub fn cookie(&self) -> Option<String> {
        self.cookie.read().clone()
    }

    pub fn set_cookie(&self, cookie: Option<String>) {
        *self.cookie.write() = cookie;
    }

    /// The server version cache shared by this client and its clones.
    pub fn server_version_cache(&self) -> &ServerVersionCache {
        &self.server_version
    }

    /// Acquires the client-wide exclusive section.
    ///
    /// Hold the guard across a GET-then-PUT sequence so that another task
    /// using the same client cannot interleave its own update. Single calls
    /// never take this lock themselves.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.exclusive.lock().await
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(cookie) = self.cookie.read().as_deref() {
            let pair = cookie.split(';').next().unwrap_or(cookie).trim();
            return request.header(COOKIE, pair);
        }
        match &self.auth {
            Some(auth) => auth.apply_to_request(request),
            None => request,
        }
    }

    /// Sends `request` and returns the successful response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Cancelled`] if `cancel` fired before or during the exchange
    /// - [`ApiError::Network`] on transport failure
    /// - [`ApiError::HttpStatus`] on any non-2xx status
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        request: ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let url = self.url(&request.path)?;
        // An explicit Accept header (non-JSON endpoints) beats the revision.
        let accept = match request.header_value(ACCEPT.as_str()) {
            Some(explicit) => explicit.to_string(),
            None => request
                .api_version
                .unwrap_or(ApiVersion::BASELINE)
                .media_type(),
        };

        debug!(method = %request.method, url = %url, accept = %accept, "Sending GoCD request");

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, &accept);
        builder = self.authenticate(builder);
        for (name, value) in &request.headers {
            if name.eq_ignore_ascii_case(ACCEPT.as_str()) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(pairs) => builder.form(pairs),
        };

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            response = builder.send() => response?,
        };

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let message = match response.text().await {
                Ok(text) => extract_error_message(&text),
                Err(_) => None,
            };
            warn!(method = %request.method, url = %url, status = %status, "GoCD request failed");
            return Err(ApiError::HttpStatus { status, message });
        }

        let body = if request.method == Method::HEAD || request.response_type == ResponseType::Empty {
            String::new()
        } else {
            tokio::select! {
                _ = cancel.cancelled() => return Err(ApiError::Cancelled),
                text = response.text() => text?,
            }
        };

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// Executes `request` and decodes its JSON body.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        request: ApiRequest,
    ) -> Result<(T, ApiResponse), ApiError> {
        let response = self.execute(cancel, request).await?;
        let value = response.json()?;
        Ok((value, response))
    }

    /// Makes an HTTP GET request and decodes the JSON response.
    ///
    /// `version` overrides the `Accept` revision; `None` sends the baseline.
    pub async fn get<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        version: Option<ApiVersion>,
    ) -> Result<T, ApiError> {
        let request = with_version(ApiRequest::get(path), version);
        Ok(self.execute_json(cancel, request).await?.0)
    }

    /// Makes an HTTP GET request for a non-JSON body such as XML.
    pub async fn get_text(
        &self,
        cancel: &CancellationToken,
        path: &str,
        version: Option<ApiVersion>,
    ) -> Result<ApiResponse, ApiError> {
        let request = with_version(ApiRequest::get(path), version).response_type(ResponseType::Text);
        self.execute(cancel, request).await
    }

    /// Makes an HTTP POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        version: Option<ApiVersion>,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = with_version(ApiRequest::post(path), version).json(body)?;
        Ok(self.execute_json(cancel, request).await?.0)
    }

    /// Makes an HTTP PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        version: Option<ApiVersion>,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = with_version(ApiRequest::put(path), version).json(body)?;
        Ok(self.execute_json(cancel, request).await?.0)
    }

    /// Makes an HTTP PATCH request with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        version: Option<ApiVersion>,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = with_version(ApiRequest::patch(path), version).json(body)?;
        Ok(self.execute_json(cancel, request).await?.0)
    }

    /// Makes an HTTP DELETE request and returns the server's `message`.
    pub async fn delete(
        &self,
        cancel: &CancellationToken,
        path: &str,
        version: Option<ApiVersion>,
    ) -> Result<String, ApiError> {
        let request = with_version(ApiRequest::delete(path), version);
        let (body, _) = self
            .execute_json::<serde_json::Value>(cancel, request)
            .await?;
        Ok(body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string())
    }

    /// Checks whether `path` answers at all.
    ///
    /// See [`HeadOutcome`] for how statuses map to `exists`.
    pub async fn head(
        &self,
        cancel: &CancellationToken,
        path: &str,
        version: Option<ApiVersion>,
    ) -> HeadOutcome {
        let request = with_version(ApiRequest::head(path), version);
        match self.execute(cancel, request).await {
            Ok(response) => HeadOutcome {
                exists: true,
                response: Some(response),
                error: None,
            },
            Err(error @ ApiError::HttpStatus { .. }) => HeadOutcome {
                exists: true,
                response: None,
                error: Some(error),
            },
            Err(error) => HeadOutcome {
                exists: false,
                response: None,
                error: Some(error),
            },
        }
    }

    /// Returns the server version, fetching it on first use.
    ///
    /// The flag is `true` when the value came from the cache and no request
    /// was made.
    pub async fn server_version(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(Arc<ServerVersion>, bool), ApiError> {
        if let Some(version) = self.server_version.get() {
            debug!(version = %version.version, "Server version cache hit");
            return Ok((version, true));
        }

        let request = ApiRequest::get("api/version").api_version(ApiVersion::BASELINE);
        let (raw, _) = self.execute_json::<RawServerVersion>(cancel, request).await?;
        let version = ServerVersion::try_from(raw)?;
        debug!(version = %version.version, "Fetched server version");

        Ok((self.server_version.set(version), false))
    }

    /// Resolves the revision the live server speaks for `endpoint`.
    pub async fn api_version(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
    ) -> Result<ApiVersion, ApiError> {
        let (version, _) = self.server_version(cancel).await?;
        version.api_version(endpoint)
    }

    /// Authenticates with the configured credentials and keeps the session
    /// cookie the server hands back.
    ///
    /// Later requests from this client and its clones send the cookie
    /// instead of basic credentials.
    pub async fn login(&self, cancel: &CancellationToken) -> Result<String, ApiError> {
        let version = self.api_version(cancel, "/api/agents").await?;
        let response = self
            .execute(cancel, ApiRequest::get("api/agents").api_version(version))
            .await?;

        let cookie = response
            .header(SET_COOKIE.as_str())
            .map(str::to_string)
            .ok_or(ApiError::MissingHeader("Set-Cookie"))?;

        self.set_cookie(Some(cookie.clone()));
        Ok(cookie)
    }
}

fn with_version(request: ApiRequest, version: Option<ApiVersion>) -> ApiRequest {
    match version {
        Some(version) => request.api_version(version),
        None => request,
    }
}
