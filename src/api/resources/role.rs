//
//  gocd-client
//  api/resources/role.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::{impl_hal_container, impl_versioned, ConfigurationProperty};
use crate::api::common::HalLinks;

/// Attributes of a role. `gocd` roles list users; `plugin` roles point at an
/// authorization configuration and pass properties to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAttributes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_config_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<ConfigurationProperty>,
}

/// A security role under `/api/admin/security/roles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub name: String,
    #[serde(rename = "type")]
    pub role_type: String,
    #[serde(default)]
    pub attributes: RoleAttributes,
    #[serde(skip)]
    pub version: String,
}

impl Role {
    /// A `gocd` role with the given members.
    pub fn gocd(name: impl Into<String>, users: Vec<String>) -> Self {
        Self {
            name: name.into(),
            role_type: "gocd".to_string(),
            attributes: RoleAttributes {
                users,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesEmbedded {
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesResponse {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(rename = "_embedded", default)]
    pub embedded: RolesEmbedded,
}

impl_hal_container!(Role, RolesResponse);
impl_versioned!(Role);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_gocd_role_body() {
        let role = Role::gocd("spacetiger", vec!["alice".into(), "bob".into(), "robin".into()]);
        assert_eq!(
            serde_json::to_value(&role).unwrap(),
            json!({
                "name": "spacetiger",
                "type": "gocd",
                "attributes": {"users": ["alice", "bob", "robin"]}
            })
        );
    }

    #[test]
    fn test_decode_plugin_role() {
        let role: Role = serde_json::from_value(json!({
            "name": "blackbird",
            "type": "plugin",
            "attributes": {
                "auth_config_id": "ldap",
                "properties": [
                    {"key": "UserGroupMembershipAttribute", "value": "memberOf"}
                ]
            }
        }))
        .unwrap();
        assert_eq!(role.attributes.auth_config_id.as_deref(), Some("ldap"));
        assert_eq!(role.attributes.properties[0].value, "memberOf");
        assert!(role.version.is_empty());
    }
}
