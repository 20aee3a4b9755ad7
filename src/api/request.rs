//
//  gocd-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request descriptors and decoded responses for the dispatcher.
//!
//! An [`ApiRequest`] describes one logical exchange: method, path relative to
//! the server URL, optional body, optional `Accept` override and any extra
//! headers. [`GocdClient::execute`](crate::api::GocdClient::execute) turns it
//! into an HTTP call and hands back an [`ApiResponse`].

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::ApiError;
use super::version::ApiVersion;

/// Header sent by the pre-versioning API on confirmed actions.
pub const CONFIRM_HEADER: &str = "Confirm";
/// Header sent by every versioned API on confirmed actions.
pub const GOCD_CONFIRM_HEADER: &str = "X-GoCD-Confirm";

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs, in order.
    Form(Vec<(String, String)>),
}

/// What the caller expects back on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// A JSON document. An empty body decodes as `{}`.
    #[default]
    Json,
    /// Raw text such as XML or CSV.
    Text,
    /// Nothing; the body is ignored.
    Empty,
}

/// A logical request, built with the `ApiRequest::get(..)`-style constructors.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    pub api_version: Option<ApiVersion>,
    pub headers: Vec<(String, String)>,
    pub response_type: ResponseType,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            api_version: None,
            headers: Vec::new(),
            response_type: ResponseType::Json,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD, path).response_type(ResponseType::Empty)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Overrides the `Accept` revision for this request.
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Serializes `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Replaces a header of the same name, ignoring case, or appends it.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Attaches `If-Match: "<version>"` for an optimistic-concurrency update.
    pub fn if_match(self, version: &str) -> Self {
        self.header("If-Match", format!("\"{}\"", version.trim_matches('"')))
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Picks the confirmation header for a revision.
///
/// The unversioned API takes `Confirm: true` and returns nothing useful.
/// Every versioned API takes `X-GoCD-Confirm: true` and answers with a JSON
/// object, possibly empty.
pub fn choose_confirm_header(request: &mut ApiRequest, version: ApiVersion) {
    if version.is_unversioned() {
        request.set_header(CONFIRM_HEADER, "true");
        request.response_type = ResponseType::Empty;
    } else {
        request.set_header(GOCD_CONFIRM_HEADER, "true");
        request.response_type = ResponseType::Json;
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// True for `application/json` and the `vnd.go.cd` media types.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.contains("json"))
            .unwrap_or(false)
    }

    /// Decodes the body. An empty body decodes as `{}`.
    ///
    /// A body declared as something other than JSON is not decoded; the
    /// error carries it raw. Without a `Content-Type` the body is tried as
    /// JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::from_str("{}")?);
        }
        if let Some(content_type) = self.content_type().filter(|_| !self.is_json()) {
            return Err(ApiError::UnexpectedContentType {
                content_type: content_type.to_string(),
                body: self.body.clone(),
            });
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The optimistic-concurrency token from `ETag` (or the legacy `Etag`),
    /// with surrounding quotes removed.
    pub fn etag(&self) -> Option<String> {
        // HeaderMap lookups are case-insensitive, so this covers both spellings.
        self.header("ETag")
            .map(|v| v.trim().trim_start_matches("W/").trim_matches('"').to_string())
    }
}

/// Result of a `HEAD` existence check.
///
/// Any HTTP answer proves the endpoint exists, so `exists` is true even when
/// the status is not 2xx; `error` then describes the status. Only a failure
/// to get an answer at all yields `exists == false`.
#[derive(Debug)]
pub struct HeadOutcome {
    pub exists: bool,
    pub response: Option<ApiResponse>,
    pub error: Option<ApiError>,
}
