//
//  gocd-client
//  api/resources/plugin.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{impl_hal_container, is_false};
use crate::api::common::HalLinks;

/// A key/value pair handed to a plugin. Secure values travel encrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationProperty {
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encrypted_value: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub secure: bool,
}

impl ConfigurationProperty {
    pub fn plain(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginStatus {
    pub state: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginVendor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginAbout {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub target_go_version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_operating_systems: Vec<String>,
    #[serde(default)]
    pub vendor: Option<PluginVendor>,
}

/// One extension point a plugin implements. The settings differ per
/// extension type and are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginExtension {
    #[serde(rename = "type")]
    pub extension_type: String,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

/// Plugin info as reported by `/api/admin/plugin_info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub id: String,
    /// Only sent by revisions before v4, which had a single extension.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub plugin_type: String,
    #[serde(default)]
    pub status: Option<PluginStatus>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plugin_file_location: String,
    #[serde(default)]
    pub bundled_plugin: bool,
    #[serde(default)]
    pub about: Option<PluginAbout>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<PluginExtension>,
}

impl Plugin {
    /// The types of every extension the plugin provides.
    pub fn extension_types(&self) -> Vec<&str> {
        if self.extensions.is_empty() && !self.plugin_type.is_empty() {
            return vec![self.plugin_type.as_str()];
        }
        self.extensions
            .iter()
            .map(|e| e.extension_type.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginsEmbedded {
    #[serde(default)]
    pub plugin_info: Vec<Plugin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginsResponse {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(rename = "_embedded", default)]
    pub embedded: PluginsEmbedded,
}

impl_hal_container!(Plugin, PluginsResponse);
