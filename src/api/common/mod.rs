//
//  gocd-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the GoCD client
//!
//! This module provides the types shared by every part of the API layer:
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`HalLinks`] - The `_links` hypermedia envelope (re-exported from [`links`])
//! - [`extract_error_message`] - Pulls the human readable message out of a GoCD error body
//!
//! # Example
//!
//! ```rust
//! use gocd_client::api::common::ApiError;
//!
//! fn describe<T>(result: Result<T, ApiError>) -> String {
//!     match result {
//!         Ok(_) => "ok".to_string(),
//!         Err(ApiError::HttpStatus { status, .. }) if status.as_u16() == 404 => "missing".to_string(),
//!         Err(ApiError::NoCompatibleApiVersion(v)) => format!("server {v} is too old"),
//!         Err(e) => e.to_string(),
//!     }
//! }
//! ```

mod links;

pub use links::*;

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::resources::ResourceError;

/// Unified error type for all GoCD API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Network` | Connectivity, TLS or DNS failure |
/// | `Cancelled` | The cancellation token fired before or during the call |
/// | `HttpStatus` | Any non-2xx response |
/// | `UnknownEndpoint` | No version table is registered for the endpoint |
/// | `NoCompatibleApiVersion` | The server predates every revision of the endpoint |
/// | `VersionParse` | The server reported a version that is not dotted numbers |
/// | `Json` | A body could not be encoded or decoded |
/// | `Xml` | An XML feed could not be decoded |
/// | `UnexpectedContentType` | A JSON result was expected but the body is declared as something else |
/// | `Url` | A request path could not be joined onto the server URL |
/// | `Link` | A `_links` href was malformed |
/// | `Resource` | Local validation or comparison failure |
/// | `MissingHeader` | An expected response header was absent |
/// | `InvalidHeader` | A header value could not be sent |
///
/// # Notes
///
/// - The `Network` variant automatically converts from `reqwest::Error`
/// - Nothing in the client retries; every error is returned to the caller
#[derive(Error, Debug)]
pub enum ApiError {
    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the `message` field of a JSON error body when present,
    /// the raw body otherwise, and `None` when the body could not be read.
    #[error("Received HTTP Status '{status}'{}", render_message(.message))]
    HttpStatus {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("could not find API version tag for '{0}'")]
    UnknownEndpoint(String),

    #[error("could not find api version for server version '{0}'")]
    NoCompatibleApiVersion(String),

    #[error("could not parse server version '{0}'")]
    VersionParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The raw body is kept for callers that can use text or XML.
    #[error("expected a JSON response but got '{content_type}'")]
    UnexpectedContentType { content_type: String, body: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("response is missing the '{0}' header")]
    MissingHeader(&'static str),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// The HTTP status carried by a status error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

fn render_message(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}

/// Parses a GoCD error body and extracts a user-friendly message.
///
/// GoCD returns errors in the format:
/// ```json
/// {"message": "Human readable message"}
/// ```
///
/// Validation failures may also carry a `data.errors` object; only the top
/// level message is used. If the body is not JSON, the trimmed body itself is
/// returned. Empty bodies yield `None`.
pub fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return Some(message.to_string());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
