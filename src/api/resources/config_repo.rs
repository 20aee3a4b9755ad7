//
//  gocd-client
//  api/resources/config_repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::{impl_hal_container, impl_versioned, null_as_default, ConfigurationProperty, Material};
use crate::api::common::HalLinks;

/// A repository holding pipeline definitions, parsed by a config plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRepo {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub id: String,
    pub plugin_id: String,
    pub material: Material,
    #[serde(default, deserialize_with = "null_as_default")]
    pub configuration: Vec<ConfigurationProperty>,
    #[serde(skip)]
    pub version: String,
}

impl ConfigRepo {
    pub fn new(id: impl Into<String>, plugin_id: impl Into<String>, material: Material) -> Self {
        Self {
            links: None,
            id: id.into(),
            plugin_id: plugin_id.into(),
            material,
            configuration: Vec::new(),
            version: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigReposEmbedded {
    #[serde(default)]
    pub config_repos: Vec<ConfigRepo>,
}

/// `GET /api/admin/config_repos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigReposResponse {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(rename = "_embedded", default)]
    pub embedded: ConfigReposEmbedded,
}

impl_hal_container!(ConfigRepo, ConfigReposResponse);
impl_versioned!(ConfigRepo);

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::resources::{GitMaterial, MaterialAttributes, Versioned};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    pub(crate) fn config_repo_body() -> Value {
        json!({
            "_links": {
                "self": {"href": "https://ci.example.com/go/api/admin/config_repos/repo1"},
                "doc": {"href": "https://api.gocd.org/#config-repos"},
                "find": {"href": "https://ci.example.com/go/api/admin/config_repos/:id"}
            },
            "id": "repo1",
            "plugin_id": "json.config.plugin",
            "material": {
                "type": "git",
                "attributes": {
                    "url": "https://github.com/config-repo/gocd-json-config-example.git",
                    "name": null,
                    "branch": "master",
                    "auto_update": true
                }
            },
            "configuration": []
        })
    }

    pub(crate) fn sample_repo() -> ConfigRepo {
        ConfigRepo::new(
            "repo1",
            "json.config.plugin",
            Material::from(GitMaterial {
                url: "https://github.com/config-repo/gocd-json-config-example.git".into(),
                branch: "master".into(),
                auto_update: true,
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_decode_config_repo() {
        let repo: ConfigRepo = serde_json::from_value(config_repo_body()).unwrap();
        assert_eq!(repo.id, "repo1");
        assert_eq!(repo.plugin_id, "json.config.plugin");
        let MaterialAttributes::Git(git) = &repo.material.attributes else {
            panic!("expected a git material");
        };
        assert_eq!(git.url, "https://github.com/config-repo/gocd-json-config-example.git");
        assert_eq!(git.branch, "master");
        assert_eq!(
            repo.links.as_ref().unwrap()["Find"].href,
            "https://ci.example.com/go/api/admin/config_repos/:id"
        );
    }

    #[test]
    fn test_version_accessors() {
        let mut repo = sample_repo();
        assert_eq!(repo.version(), "");
        repo.set_version("test-version".into());
        assert_eq!(repo.version(), "test-version");
        assert!(serde_json::to_value(&repo).unwrap().get("version").is_none());
    }
}
