//
//  gocd-client
//  api/resources/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pipelines
//!
//! [`Pipeline`] is the pipeline *configuration* exchanged with
//! `/api/admin/pipelines`. Runtime views live next to it:
//! [`PipelineInstance`] (one run), [`PipelineStatus`] (paused/locked flags)
//! and the [`ScheduleRequest`] used to trigger a run.

use serde::{Deserialize, Serialize};

use super::{
    impl_hal_container, impl_versioned, null_as_default, EnvironmentVariable, Material, Stage,
    StageContainer, StageInstance,
};
use crate::api::common::HalLinks;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// Where a pipeline definition lives: `gocd` for the XML config, otherwise
/// a config repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfigOrigin {
    #[serde(rename = "type")]
    pub origin_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub spec: String,
    #[serde(default)]
    pub only_on_changes: bool,
}

/// A pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label_template: String,
    /// `lockOnFailure`, `unlockWhenFinished` or `none`. Servers before
    /// 17.12.0 use [`Pipeline::enable_pipeline_locking`] instead.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lock_behavior: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pipeline_locking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<PipelineConfigOrigin>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<Material>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<Timer>,
    #[serde(skip)]
    pub version: String,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl StageContainer for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn stages(&self) -> &[Stage] {
        &self.stages
    }

    fn stages_mut(&mut self) -> &mut Vec<Stage> {
        &mut self.stages
    }
}

/// A pipeline referenced by name from an environment or a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReference {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub name: String,
}

impl PipelineReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            links: None,
            name: name.into(),
        }
    }
}

/// Body of `POST /api/admin/pipelines`.
#[derive(Debug, Serialize)]
pub struct PipelineConfigRequest<'a> {
    pub group: &'a str,
    pub pipeline: &'a Pipeline,
}

/// Runtime flags from `GET /api/pipelines/:pipeline_name/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStatus {
    #[serde(default)]
    pub paused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused_by: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub schedulable: bool,
}

/// Body of the versioned pause call.
#[derive(Debug, Serialize)]
pub struct PauseRequest<'a> {
    pub pause_cause: &'a str,
}

/// A material as summarized in runtime views: no attributes, just identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSummary {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub material_type: String,
    pub fingerprint: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub revision: String,
    #[serde(default)]
    pub modified_time: u64,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRevision {
    #[serde(default)]
    pub changed: bool,
    pub material: MaterialSummary,
    #[serde(default)]
    pub modifications: Vec<Modification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCause {
    #[serde(default)]
    pub trigger_message: String,
    #[serde(default)]
    pub trigger_forced: bool,
    #[serde(default)]
    pub approver: String,
    #[serde(default)]
    pub material_revisions: Vec<MaterialRevision>,
}

/// One run of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineInstance {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub counter: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub natural_order: f32,
    #[serde(default)]
    pub can_run: bool,
    #[serde(default)]
    pub preparing_to_schedule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_cause: Option<BuildCause>,
    #[serde(default)]
    pub stages: Vec<StageInstance>,
}

/// A material revision to pin when scheduling.
///
/// The versioned API identifies materials by `fingerprint`; the legacy
/// dialect uses `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMaterial {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
    pub revision: String,
}

/// Body of `POST /api/pipelines/:pipeline_name/schedule`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<ScheduleMaterial>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_materials_before_scheduling: Option<bool>,
}

impl ScheduleRequest {
    /// Form pairs for the legacy dialect:
    /// `materials[name]`, `variables[name]` and `secure_variables[name]`.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        let materials = self
            .materials
            .iter()
            .map(|m| (format!("materials[{}]", m.name), m.revision.clone()));
        let variables = self.environment_variables.iter().map(|v| {
            let key = if v.secure { "secure_variables" } else { "variables" };
            (format!("{key}[{}]", v.name), v.value.clone())
        });
        materials.chain(variables).collect()
    }
}

impl_hal_container!(Pipeline, PipelineReference);
impl_versioned!(Pipeline);
