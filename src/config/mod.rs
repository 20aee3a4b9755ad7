//
//  gocd-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Connection settings for a GoCD server, grouped into named profiles in a
//! TOML file.
//!
//! ## Configuration File Location
//!
//! `~/.gocd.conf` by default. Set `GOCD_CONFIG_PATH` to use another file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [profiles.default]
//! server = "https://ci.example.com/go/"
//! username = "admin"
//! password = "secret"
//! skip_ssl_check = false
//!
//! [profiles.staging]
//! server = "https://staging-ci.example.com/go/"
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `GOCD_URL` | `server` |
//! | `GOCD_USERNAME` | `username` |
//! | `GOCD_PASSWORD` | `password` |
//! | `GOCD_SKIP_SSL_CHECK` | `skip_ssl_check` (`1`, `true` or `yes`) |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gocd_client::config::Configuration;
//!
//! let config = Configuration::load("default")?;
//! let client = config.client()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::GocdClient;
use crate::auth::AuthCredential;

/// Profile used when none is named.
pub const DEFAULT_PROFILE: &str = "default";

/// Overrides the profile file location.
pub const CONFIG_PATH_ENV: &str = "GOCD_CONFIG_PATH";

const CONFIG_FILE_NAME: &str = ".gocd.conf";

/// Connection settings for one GoCD server.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Server URL, usually ending in `/go/`.
    #[serde(default)]
    pub server: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub skip_ssl_check: bool,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("skip_ssl_check", &self.skip_ssl_check)
            .finish()
    }
}

impl Configuration {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Default::default()
        }
    }

    /// Loads `profile` from the profile file and applies the environment
    /// overrides.
    ///
    /// A missing file or profile is not an error; the environment alone may
    /// supply everything.
    pub fn load(profile: &str) -> Result<Self> {
        let path = ConfigFile::config_path()?;
        let file = ConfigFile::load_from(&path)?;
        let mut config = file.profile(profile).cloned().unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok());
        debug!(profile, path = %path.display(), server = %config.server, "Loaded configuration");
        Ok(config)
    }

    /// Applies `GOCD_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup("GOCD_URL").filter(|v| !v.is_empty()) {
            self.server = server;
        }
        if let Some(username) = lookup("GOCD_USERNAME").filter(|v| !v.is_empty()) {
            self.username = Some(username);
        }
        if let Some(password) = lookup("GOCD_PASSWORD").filter(|v| !v.is_empty()) {
            self.password = Some(password);
        }
        if let Some(skip) = lookup("GOCD_SKIP_SSL_CHECK") {
            self.skip_ssl_check = matches!(
                skip.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
    }

    /// Both a username and a password are set.
    pub fn has_auth(&self) -> bool {
        self.username.as_deref().is_some_and(|u| !u.is_empty())
            && self.password.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn credential(&self) -> Option<AuthCredential> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) if self.has_auth() => {
                Some(AuthCredential::basic(username.clone(), password.clone()))
            }
            _ => None,
        }
    }

    /// Builds a client for this server, with basic credentials when set.
    pub fn client(&self) -> Result<GocdClient> {
        if self.server.trim().is_empty() {
            bail!("No GoCD server configured. Set GOCD_URL or add `server` to the profile");
        }
        let client = GocdClient::with_tls_verification(&self.server, !self.skip_ssl_check)
            .with_context(|| format!("Invalid GoCD server URL '{}'", self.server))?;
        Ok(match self.credential() {
            Some(credential) => client.with_auth(credential),
            None => client,
        })
    }
}

/// The profile file: named [`Configuration`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, Configuration>,
}

impl ConfigFile {
    /// `$GOCD_CONFIG_PATH`, else `~/.gocd.conf`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dirs = BaseDirs::new().context("Could not determine home directory")?;
        Ok(dirs.home_dir().join(CONFIG_FILE_NAME))
    }

    /// Parses the file at `path`; a missing file yields no profiles.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        write_config_file(path, &content)
    }

    pub fn profile(&self, name: &str) -> Option<&Configuration> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: impl Into<String>, config: Configuration) {
        self.profiles.insert(name.into(), config);
    }
}
