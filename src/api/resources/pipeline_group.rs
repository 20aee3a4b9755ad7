//
//  gocd-client
//  api/resources/pipeline_group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::MaterialSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineGroupStage {
    pub name: String,
}

/// A pipeline as listed by `/api/config/pipeline_groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineGroupPipeline {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub stages: Vec<PipelineGroupStage>,
    #[serde(default)]
    pub materials: Vec<MaterialSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineGroup {
    pub name: String,
    #[serde(default)]
    pub pipelines: Vec<PipelineGroupPipeline>,
}

/// Pipeline groups, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineGroups(pub Vec<PipelineGroup>);

impl PipelineGroups {
    /// Keeps only the group called `name`. An empty name keeps everything.
    pub fn filter_by_name(self, name: &str) -> Self {
        if name.is_empty() {
            return self;
        }
        Self(self.0.into_iter().filter(|g| g.name == name).collect())
    }

    /// The group that contains `pipeline`.
    pub fn group_by_pipeline_name(&self, pipeline: &str) -> Option<&PipelineGroup> {
        self.0
            .iter()
            .find(|g| g.pipelines.iter().any(|p| p.name == pipeline))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipelineGroup> {
        self.0.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) const GROUPS_BODY: &str = r#"[
        {
            "name": "first",
            "pipelines": [{
                "name": "up42",
                "label": "${COUNT}",
                "stages": [{"name": "up42_stage"}],
                "materials": [{
                    "type": "Git",
                    "fingerprint": "2d05446cd52a998fe3afd840fc2c46b7c7e421051f0209c7f619c95bedc28b88",
                    "description": "URL: https://github.com/gocd/gocd, Branch: master"
                }]
            }]
        },
        {"name": "filter-group", "pipelines": []}
    ]"#;

    #[test]
    fn test_decode_and_filter() {
        let groups: PipelineGroups = serde_json::from_str(GROUPS_BODY).unwrap();
        assert_eq!(groups.len(), 2);

        let first = &groups.0[0];
        assert_eq!(first.name, "first");
        let pipeline = &first.pipelines[0];
        assert_eq!(pipeline.label, "${COUNT}");
        assert_eq!(pipeline.stages[0].name, "up42_stage");
        assert_eq!(pipeline.materials[0].material_type, "Git");
        assert_eq!(
            pipeline.materials[0].description,
            "URL: https://github.com/gocd/gocd, Branch: master"
        );

        let filtered = groups.clone().filter_by_name("filter-group");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.0[0].name, "filter-group");

        assert_eq!(groups.clone().filter_by_name("").len(), 2);
        assert!(groups.clone().filter_by_name("missing").is_empty());
    }

    #[test]
    fn test_group_by_pipeline_name() {
        let groups: PipelineGroups = serde_json::from_str(GROUPS_BODY).unwrap();
        assert_eq!(
            groups.group_by_pipeline_name("up42").map(|g| g.name.as_str()),
            Some("first")
        );
        assert!(groups.group_by_pipeline_name("nope").is_none());
    }
}
