//
//  gocd-client
//  api/resources/environment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::{impl_hal_container, impl_versioned, null_as_default, EnvironmentVariable, PipelineReference};
use crate::api::common::HalLinks;

/// An agent reference inside an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentAgent {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub uuid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pipelines: Vec<PipelineReference>,
    /// Only sent by revisions before v3; later servers derive membership
    /// from the agents themselves.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<EnvironmentAgent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(skip)]
    pub version: String,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn pipeline_names(&self) -> Vec<&str> {
        self.pipelines.iter().map(|p| p.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentsEmbedded {
    #[serde(default)]
    pub environments: Vec<Environment>,
}

/// `GET /api/admin/environments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentsResponse {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(rename = "_embedded", default)]
    pub embedded: EnvironmentsEmbedded,
}

/// Names to add to and remove from a list. Empty sides are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchStringAction {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariablesAction {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<EnvironmentVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

/// Body of `PATCH /api/admin/environments/:environment_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentPatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipelines: Option<PatchStringAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<PatchStringAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<EnvironmentVariablesAction>,
}

impl_hal_container!(Environment, EnvironmentAgent, EnvironmentsResponse);
impl_versioned!(Environment);
