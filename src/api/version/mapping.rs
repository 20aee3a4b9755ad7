//
//  gocd-client
//  api/version/mapping.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Version-floor tables mapping server releases to API revisions.
//!
//! Every versioned endpoint owns an [`ApiVersionTable`]: a list of
//! `(minimum server version, revision)` pairs kept sorted by floor.
//! Resolution picks the greatest floor that is `<=` the live server version,
//! which is the newest revision the server is guaranteed to speak.
//!
//! Endpoint patterns are written the way GoCD documents them
//! (`/api/admin/pipelines/:pipeline_name`). Lookups accept the pattern with
//! or without the leading `/api/`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{ApiVersion, VersionParts};

/// One floor in an endpoint table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersionMapping {
    pub server: VersionParts,
    pub api: ApiVersion,
}

impl ApiVersionMapping {
    /// Builds a mapping from a dotted floor such as `"18.7.0"`.
    ///
    /// Returns `None` if the floor does not parse.
    pub fn new(server: &str, api: ApiVersion) -> Option<Self> {
        VersionParts::parse(server)
            .ok()
            .map(|server| Self { server, api })
    }
}

/// Sorted collection of floors for a single endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiVersionTable {
    mappings: Vec<ApiVersionMapping>,
}

impl ApiVersionTable {
    /// Builds a table from mappings in any order. For a repeated floor the
    /// last mapping wins.
    pub fn new(mappings: Vec<ApiVersionMapping>) -> Self {
        let mut table = Self::default();
        for mapping in mappings {
            table.insert(mapping);
        }
        table
    }

    /// Stable ascending sort by floor. Calling it twice changes nothing.
    pub fn sort(&mut self) {
        self.mappings.sort_by(|a, b| a.server.cmp(&b.server));
    }

    /// Inserts a mapping at its sorted position. A mapping with the same
    /// floor is replaced and returned; floors stay strictly increasing.
    pub fn insert(&mut self, mapping: ApiVersionMapping) -> Option<ApiVersionMapping> {
        let at = self.mappings.partition_point(|m| m.server < mapping.server);
        match self.mappings.get_mut(at) {
            Some(existing) if existing.server == mapping.server => {
                Some(std::mem::replace(existing, mapping))
            }
            _ => {
                self.mappings.insert(at, mapping);
                None
            }
        }
    }

    pub fn mappings(&self) -> &[ApiVersionMapping] {
        &self.mappings
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Greatest floor `<= version`, or `None` if `version` predates them all.
    pub fn resolve(&self, version: &VersionParts) -> Option<ApiVersion> {
        let qualifying = self.mappings.partition_point(|m| m.server <= *version);
        qualifying
            .checked_sub(1)
            .and_then(|i| self.mappings.get(i))
            .map(|m| m.api)
    }

    /// The registered table for an endpoint pattern, if any.
    pub fn for_endpoint(endpoint: &str) -> Option<&'static ApiVersionTable> {
        REGISTRY.get(normalize_endpoint(endpoint))
    }
}

/// Strips the leading `/` and `api/` so both spellings share one key.
pub(crate) fn normalize_endpoint(endpoint: &str) -> &str {
    let trimmed = endpoint.trim_start_matches('/');
    trimmed.strip_prefix("api/").unwrap_or(trimmed)
}

fn table(floors: &[(&str, ApiVersion)]) -> ApiVersionTable {
    ApiVersionTable::new(
        floors
            .iter()
            .filter_map(|(server, api)| ApiVersionMapping::new(server, *api))
            .collect(),
    )
}

static REGISTRY: Lazy<HashMap<&'static str, ApiVersionTable>> = Lazy::new(|| {
    use ApiVersion as V;

    let pipeline_config = table(&[
        ("16.10.0", V::V4),
        ("17.12.0", V::V5),
        ("18.7.0", V::V6),
        ("18.10.0", V::V7),
        ("19.4.0", V::V8),
        ("19.6.0", V::V9),
        ("19.10.0", V::V10),
        ("20.1.0", V::V11),
    ]);
    let templates = table(&[("16.10.0", V::V3), ("18.7.0", V::V4)]);
    let environments = table(&[("16.7.0", V::V1), ("18.2.0", V::V2), ("19.9.0", V::V3)]);
    let agents = table(&[
        ("15.2.0", V::V2),
        ("16.10.0", V::V3),
        ("17.12.0", V::V4),
        ("19.3.0", V::V5),
    ]);
    // Pipeline runtime calls moved off the unversioned API in 18.2.0.
    let pipeline_actions = table(&[("14.3.0", V::V0), ("18.2.0", V::V1)]);
    let config_repos = table(&[("18.8.0", V::V1)]);
    let plugin_info = table(&[
        ("16.7.0", V::V2),
        ("17.3.0", V::V3),
        ("17.9.0", V::V4),
        ("18.3.0", V::V5),
        ("19.3.0", V::V6),
        ("19.9.0", V::V7),
    ]);
    let roles = table(&[("17.5.0", V::V1), ("19.11.0", V::V2)]);

    let mut registry = HashMap::new();
    registry.insert("version", table(&[("0.0.0", V::V1)]));
    registry.insert("admin/pipelines", pipeline_config.clone());
    registry.insert("admin/pipelines/:pipeline_name", pipeline_config);
    registry.insert("admin/templates", templates.clone());
    registry.insert("admin/templates/:template_name", templates);
    registry.insert("admin/environments", environments.clone());
    registry.insert("admin/environments/:environment_name", environments);
    registry.insert("agents", agents.clone());
    registry.insert("agents/:uuid", agents);
    registry.insert("agents/:uuid/job_run_history", table(&[("14.3.0", V::V0), ("19.4.0", V::V1)]));
    registry.insert("pipelines/:pipeline_name/pause", pipeline_actions.clone());
    registry.insert("pipelines/:pipeline_name/unpause", pipeline_actions.clone());
    registry.insert("pipelines/:pipeline_name/unlock", pipeline_actions.clone());
    registry.insert("pipelines/:pipeline_name/schedule", pipeline_actions.clone());
    registry.insert("pipelines/:pipeline_name/status", pipeline_actions.clone());
    registry.insert("pipelines/:pipeline_name/instance/:pipeline_counter", pipeline_actions);
    registry.insert("admin/config_repos", config_repos.clone());
    registry.insert("admin/config_repos/:id", config_repos);
    registry.insert("admin/plugin_info", plugin_info.clone());
    registry.insert("admin/plugin_info/:plugin_id", plugin_info);
    registry.insert("admin/security/roles", roles.clone());
    registry.insert("admin/security/roles/:role_name", roles);
    registry.insert("admin/encrypt", table(&[("17.1.0", V::V1)]));
    registry
});
