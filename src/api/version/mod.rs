//
//  gocd-client
//  api/version/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server Versions and API Revisions
//!
//! GoCD has shipped more than a dozen incompatible revisions of its JSON
//! wire contract. Each revision is selected through content negotiation with
//! an `Accept` header such as `application/vnd.go.cd.v6+json`. Which revision
//! a given endpoint speaks depends on the version of the server behind it.
//!
//! This module holds the three pieces needed to make that decision:
//!
//! - [`ServerVersion`]: the payload of `GET /api/version`, with its version
//!   string parsed into comparable [`VersionParts`]
//! - [`ApiVersion`]: one revision of the wire contract
//! - [`mapping`]: per-endpoint tables of "minimum server version to revision"
//!
//! ## Example
//!
//! ```rust
//! use gocd_client::api::version::{ApiVersion, ServerVersion};
//!
//! let server = ServerVersion::from_version("18.8.0")?;
//! let api = server.api_version("/api/admin/pipelines/:pipeline_name")?;
//! assert_eq!(api, ApiVersion::V6);
//! assert_eq!(api.media_type(), "application/vnd.go.cd.v6+json");
//! # Ok::<(), gocd_client::api::ApiError>(())
//! ```

mod cache;
pub mod mapping;

pub use cache::ServerVersionCache;
pub use mapping::{ApiVersionMapping, ApiVersionTable};

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::api::common::{ApiError, HalLinks};

/// A single dotted component: digits only.
static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// A dotted version number decomposed into its numeric components.
///
/// Comparison is component-wise and numeric. Missing trailing components
/// count as zero, so `18.8` and `18.8.0` are equal.
///
/// Pre-release and build suffixes (`-rc1`, `+3348`) are dropped on parse;
/// GoCD only ever reports the numeric part in its `version` field.
#[derive(Debug, Clone, Default)]
pub struct VersionParts(Vec<u64>);

impl VersionParts {
    /// Parses a dotted version string such as `"18.8.0"`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::VersionParse`] when the string is empty or any
    /// component is not a non-negative integer.
    pub fn parse(version: &str) -> Result<Self, ApiError> {
        let core = version
            .trim()
            .split(['-', '+'])
            .next()
            .unwrap_or_default();

        if core.is_empty() {
            return Err(ApiError::VersionParse(version.to_string()));
        }

        let mut parts = Vec::new();
        for segment in core.split('.') {
            if !NUMERIC_SEGMENT.is_match(segment) {
                return Err(ApiError::VersionParse(version.to_string()));
            }
            let value = segment
                .parse::<u64>()
                .map_err(|_| ApiError::VersionParse(version.to_string()))?;
            parts.push(value);
        }

        Ok(Self(parts))
    }

    /// The numeric components in order.
    pub fn segments(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for VersionParts {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}

impl Ord for VersionParts {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        for i in 0..len {
            let a = self.0.get(i).copied().unwrap_or(0);
            let b = other.0.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionParts {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionParts {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionParts {}

/// One revision of the GoCD JSON wire contract.
///
/// `V0` stands for the endpoints that predate versioned media types and are
/// negotiated with a plain `application/json`. Every later revision maps to
/// `application/vnd.go.cd.vN+json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion(u8);

impl ApiVersion {
    pub const V0: ApiVersion = ApiVersion(0);
    pub const V1: ApiVersion = ApiVersion(1);
    pub const V2: ApiVersion = ApiVersion(2);
    pub const V3: ApiVersion = ApiVersion(3);
    pub const V4: ApiVersion = ApiVersion(4);
    pub const V5: ApiVersion = ApiVersion(5);
    pub const V6: ApiVersion = ApiVersion(6);
    pub const V7: ApiVersion = ApiVersion(7);
    pub const V8: ApiVersion = ApiVersion(8);
    pub const V9: ApiVersion = ApiVersion(9);
    pub const V10: ApiVersion = ApiVersion(10);
    pub const V11: ApiVersion = ApiVersion(11);

    /// Revision used when a request names no endpoint table.
    pub const BASELINE: ApiVersion = ApiVersion::V1;

    pub const fn new(revision: u8) -> Self {
        Self(revision)
    }

    pub const fn revision(self) -> u8 {
        self.0
    }

    /// True for the pre-versioning dialect.
    pub const fn is_unversioned(self) -> bool {
        self.0 == 0
    }

    /// The `Accept` header value for this revision.
    pub fn media_type(self) -> String {
        if self.is_unversioned() {
            "application/json".to_string()
        } else {
            format!("application/vnd.go.cd.v{}+json", self.0)
        }
    }

    /// Recovers a revision from an `Accept`/`Content-Type` value.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let media_type = media_type.split(';').next().unwrap_or_default().trim();
        if media_type == "application/json" {
            return Some(Self::V0);
        }
        media_type
            .strip_prefix("application/vnd.go.cd.v")
            .and_then(|rest| rest.strip_suffix("+json"))
            .and_then(|n| n.parse::<u8>().ok())
            .map(Self)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.media_type())
    }
}

/// Metadata returned by `GET /api/version`.
///
/// ```json
/// {
///   "version": "16.6.0",
///   "build_number": "3348",
///   "git_sha": "a7a5717cbd60c30006314fb8dd529796c93adaf0",
///   "full_version": "16.6.0 (3348-a7a5717cbd60c30006314fb8dd529796c93adaf0)",
///   "commit_url": "https://github.com/gocd/gocd/commits/a7a5717cbd60c30006314fb8dd529796c93adaf0"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawServerVersion")]
pub struct ServerVersion {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,

    pub version: String,

    pub build_number: String,

    pub git_sha: String,

    pub full_version: String,

    pub commit_url: String,

    #[serde(skip)]
    parts: VersionParts,
}

/// The wire shape of [`ServerVersion`], before `version` is parsed.
#[derive(Debug, Deserialize)]
pub struct RawServerVersion {
    #[serde(rename = "_links", default)]
    links: Option<HalLinks>,

    #[serde(default)]
    version: String,

    #[serde(default)]
    build_number: String,

    #[serde(default)]
    git_sha: String,

    #[serde(default)]
    full_version: String,

    #[serde(default)]
    commit_url: String,
}

impl TryFrom<RawServerVersion> for ServerVersion {
    type Error = ApiError;

    fn try_from(raw: RawServerVersion) -> Result<Self, Self::Error> {
        let parts = VersionParts::parse(&raw.version)?;
        Ok(Self {
            links: raw.links,
            version: raw.version,
            build_number: raw.build_number,
            git_sha: raw.git_sha,
            full_version: raw.full_version,
            commit_url: raw.commit_url,
            parts,
        })
    }
}

impl ServerVersion {
    /// Builds a bare version value, mainly for resolution without a server.
    pub fn from_version(version: &str) -> Result<Self, ApiError> {
        Ok(Self {
            parts: VersionParts::parse(version)?,
            version: version.to_string(),
            ..Default::default()
        })
    }

    pub fn parts(&self) -> &VersionParts {
        &self.parts
    }

    pub fn less_than(&self, other: &ServerVersion) -> bool {
        self.parts < other.parts
    }

    pub fn equal(&self, other: &ServerVersion) -> bool {
        self.parts == other.parts
    }

    /// Resolves the revision this server speaks for `endpoint`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnknownEndpoint`] when no table is registered for the pattern
    /// - [`ApiError::NoCompatibleApiVersion`] when the server predates every floor
    pub fn api_version(&self, endpoint: &str) -> Result<ApiVersion, ApiError> {
        let table = ApiVersionTable::for_endpoint(endpoint)
            .ok_or_else(|| ApiError::UnknownEndpoint(endpoint.to_string()))?;

        table
            .resolve(&self.parts)
            .ok_or_else(|| ApiError::NoCompatibleApiVersion(self.version.clone()))
    }
}

impl Serialize for VersionParts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VersionParts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        VersionParts::parse(&raw).map_err(serde::de::Error::custom)
    }
}
