//
//  gocd-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides a version-aware client for the GoCD REST API.
//!
//! ## Architecture
//!
//! - [`client`]: the dispatcher, with authentication, revision negotiation
//!   and response decoding
//! - [`version`]: server version parsing and the per-endpoint revision tables
//! - [`request`]: request descriptors and decoded responses
//! - [`resources`]: the typed resource model
//! - [`services`]: one facade per resource family
//! - [`common`]: errors and HAL links
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gocd_client::api::GocdClient;
//! use gocd_client::auth::AuthCredential;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), gocd_client::api::ApiError> {
//! let client = GocdClient::new("https://ci.example.com/go/")?
//!     .with_auth(AuthCredential::basic("admin", "secret"));
//! let cancel = CancellationToken::new();
//!
//! let status = client.pipelines().status(&cancel, "build").await?;
//! if status.locked {
//!     client.pipelines().release_lock(&cancel, "build").await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is an [`ApiError`]. Non-2xx answers keep the status and the
//! server's `message`, so callers can match on `404`, `409` or `412`.

pub mod client;

pub mod common;

pub mod request;

pub mod resources;

pub mod services;

pub mod version;

pub use client::GocdClient;

pub use common::ApiError;

pub use request::{ApiRequest, ApiResponse};

pub use version::{ApiVersion, ServerVersion};
