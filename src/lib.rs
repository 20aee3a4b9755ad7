//
//  gocd-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GoCD Client Library
//!
//! A client for the GoCD continuous-delivery server's REST API that adapts
//! to the server it talks to.
//!
//! ## Overview
//!
//! GoCD versions its API per endpoint: the same resource is served under
//! different `Accept` media types (`application/vnd.go.cd.v4+json`, ...) on
//! different server releases. This library asks the server for its version
//! once, caches it, and picks the matching revision for every call.
//!
//! ## Module Structure
//!
//! - [`api`]: the version-aware client, resources and service facades
//! - [`auth`]: basic and session-cookie credentials
//! - [`config`]: profile file and environment configuration
//! - [`output`]: JSON and YAML rendering for the `gocd` binary
//! - [`logging`]: tracing subscriber setup
//! - [`cli`]: command-line interface definitions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gocd_client::config::Configuration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Configuration::load("default")?.client()?;
//! let agents = client.agents().list(&CancellationToken::new()).await?;
//! println!("{} agents", agents.len());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// The GoCD REST client.
pub mod api;

/// Credentials sent with each request.
pub mod auth;

/// Configuration file management.
pub mod config;

pub mod logging;

/// Output formatting for command results.
pub mod output;

pub use api::{ApiError, GocdClient};
pub use cli::Cli;
pub use config::Configuration;

/// Name of the CLI binary.
pub const APP_NAME: &str = "gocd";

/// The current version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Operation-related issues
pub mod exit_codes {
    use crate::api::ApiError;

    pub const SUCCESS: i32 = 0;

    pub const ERROR: i32 = 1;

    /// Invalid arguments.
    pub const USAGE: i32 = 2;

    /// The server rejected the credentials (401 or 403).
    pub const AUTH_ERROR: i32 = 4;

    /// The resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// A concurrent change won (409 or 412).
    pub const CONFLICT: i32 = 9;

    /// The call was cancelled, typically by Ctrl+C.
    pub const CANCELLED: i32 = 16;

    /// Maps a command failure to its exit code.
    pub fn for_error(err: &anyhow::Error) -> i32 {
        let Some(api) = err.chain().find_map(|e| e.downcast_ref::<ApiError>()) else {
            return ERROR;
        };
        if matches!(api, ApiError::Cancelled) {
            return CANCELLED;
        }
        match api.status().map(|s| s.as_u16()) {
            Some(401 | 403) => AUTH_ERROR,
            Some(404) => NOT_FOUND,
            Some(409 | 412) => CONFLICT,
            _ => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use reqwest::StatusCode;

        fn http(status: StatusCode) -> anyhow::Error {
            ApiError::HttpStatus {
                status,
                message: None,
            }
            .into()
        }

        #[test]
        fn test_for_error() {
            assert_eq!(for_error(&http(StatusCode::UNAUTHORIZED)), AUTH_ERROR);
            assert_eq!(for_error(&http(StatusCode::FORBIDDEN)), AUTH_ERROR);
            assert_eq!(for_error(&http(StatusCode::NOT_FOUND)), NOT_FOUND);
            assert_eq!(for_error(&http(StatusCode::PRECONDITION_FAILED)), CONFLICT);
            assert_eq!(for_error(&http(StatusCode::BAD_GATEWAY)), ERROR);
            assert_eq!(for_error(&ApiError::Cancelled.into()), CANCELLED);
            assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
        }

        #[test]
        fn test_for_error_looks_through_context() {
            let err = anyhow::Error::from(ApiError::HttpStatus {
                status: StatusCode::NOT_FOUND,
                message: Some("Not found".into()),
            })
            .context("Failed to fetch agent");
            assert_eq!(for_error(&err), NOT_FOUND);
        }
    }
}
