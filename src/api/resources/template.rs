//
//  gocd-client
//  api/resources/template.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::{
    impl_hal_container, impl_versioned, null_as_default, Parameter, PipelineReference, Stage,
    StageContainer,
};
use crate::api::common::HalLinks;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEmbedded {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pipelines: Vec<PipelineReference>,
}

/// A pipeline template. Listing returns only names and the pipelines using
/// each template; fetching one returns its stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTemplate {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub name: String,
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<TemplateEmbedded>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<Stage>,
    #[serde(skip)]
    pub version: String,
}

impl PipelineTemplate {
    pub fn new(name: impl Into<String>, stages: Vec<Stage>) -> Self {
        Self {
            name: name.into(),
            stages,
            ..Default::default()
        }
    }

    /// Pipelines built from this template.
    pub fn pipelines(&self) -> &[PipelineReference] {
        self.embedded
            .as_ref()
            .map(|e| e.pipelines.as_slice())
            .unwrap_or_default()
    }
}

impl StageContainer for PipelineTemplate {
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatesEmbedded {
    #[serde(default)]
    pub templates: Vec<PipelineTemplate>,
}

/// `GET /api/admin/templates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatesResponse {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(rename = "_embedded", default)]
    pub embedded: TemplatesEmbedded,
}

impl_hal_container!(PipelineTemplate, TemplatesResponse);
impl_versioned!(PipelineTemplate);
