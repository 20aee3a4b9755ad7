//
//  gocd-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! GoCD accepts two forms of authentication from this client:
//!
//! - **Basic Authentication**: username and password sent on every request
//! - **Session Cookie**: the `Set-Cookie` value captured by
//!   [`GocdClient::login`](crate::api::GocdClient::login) and replayed as
//!   `Cookie` afterwards
//!
//! When both are available the session cookie wins.
//!
//! ## Example
//!
//! ```rust
//! use gocd_client::auth::AuthCredential;
//!
//! let credential = AuthCredential::basic("mockUsername", "mockPassword");
//! assert_eq!(
//!     credential.authorization_header(),
//!     "Basic bW9ja1VzZXJuYW1lOm1vY2tQYXNzd29yZA=="
//! );
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{AUTHORIZATION, COOKIE};
use reqwest::RequestBuilder;

/// Credentials attached to outgoing requests.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Standard HTTP Basic authentication.
    Basic {
        username: String,
        password: String,
    },
    /// A session cookie previously issued by the server.
    Cookie(String),
}

impl AuthCredential {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn cookie(value: impl Into<String>) -> Self {
        Self::Cookie(value.into())
    }

    /// The `Authorization` value for basic credentials.
    ///
    /// Cookie credentials have no authorization header and return an empty
    /// string.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
            Self::Cookie(_) => String::new(),
        }
    }

    /// Adds the matching header to `request`.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { .. } => request.header(AUTHORIZATION, self.authorization_header()),
            Self::Cookie(cookie) => request.header(COOKIE, cookie),
        }
    }
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Cookie(_) => f.debug_tuple("Cookie").field(&"***").finish(),
        }
    }
}
