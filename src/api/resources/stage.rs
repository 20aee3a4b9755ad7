//
//  gocd-client
//  api/resources/stage.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::{EnvironmentVariable, Job, ResourceError};
use crate::api::common::ApiError;

/// Who may trigger a manual stage. Both lists are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// `success` runs the stage automatically, `manual` waits for a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    #[serde(rename = "type")]
    pub approval_type: String,
    #[serde(default)]
    pub authorization: Authorization,
}

impl Approval {
    pub fn success() -> Self {
        Self {
            approval_type: "success".to_string(),
            authorization: Authorization::default(),
        }
    }

    pub fn manual() -> Self {
        Self {
            approval_type: "manual".to_string(),
            authorization: Authorization::default(),
        }
    }
}

fn validate_stage(name: &str, jobs: &[Job], kind: &'static str) -> Result<(), ResourceError> {
    if name.is_empty() {
        return Err(ResourceError::EmptyName(kind));
    }
    if jobs.is_empty() {
        return Err(ResourceError::NoJobs);
    }
    jobs.iter().try_for_each(Job::validate)
}

/// A stage as configured in a pipeline or template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub fetch_materials: bool,
    #[serde(default)]
    pub clean_working_directory: bool,
    #[serde(default)]
    pub never_cleanup_artifacts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<Approval>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Checks the stage name, then that there is a job, then every job name.
    pub fn validate(&self) -> Result<(), ResourceError> {
        validate_stage(&self.name, &self.jobs, "Stage")
    }

    pub fn json_string(&self) -> Result<String, ApiError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A stage run as reported by pipeline and stage history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInstance {
    pub name: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub can_run: bool,
    #[serde(default)]
    pub scheduled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub approval_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub approved_by: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub counter: String,
    #[serde(default)]
    pub operate_permission: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerun_of_counter: Option<u64>,
}

impl StageInstance {
    pub fn validate(&self) -> Result<(), ResourceError> {
        validate_stage(&self.name, &self.jobs, "StageInstance")
    }

    pub fn json_string(&self) -> Result<String, ApiError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_validate_order() {
        let mut stage = Stage::default();
        assert_eq!(stage.validate().unwrap_err().to_string(), "`Stage.name` is empty");

        stage.name = "test-stage".into();
        assert_eq!(
            stage.validate().unwrap_err().to_string(),
            "At least one `Job` must be specified"
        );

        stage.jobs = vec![Job::default()];
        assert_eq!(stage.validate().unwrap_err().to_string(), "`Job.name` is empty");

        stage.jobs[0].name = "test-job".into();
        assert_eq!(stage.validate(), Ok(()));
    }

    #[test]
    fn test_stage_json_string_fails_without_name() {
        let stage = Stage {
            approval: Some(Approval::success()),
            ..Default::default()
        };
        assert_eq!(
            stage.json_string().unwrap_err().to_string(),
            "`Stage.name` is empty"
        );
    }

    #[test]
    fn test_stage_json_string() {
        let stage = Stage {
            approval: Some(Approval::success()),
            jobs: vec![Job::new("test-job")],
            ..Stage::new("test-stage")
        };
        assert_eq!(
            stage.json_string().unwrap(),
            r#"{
  "name": "test-stage",
  "fetch_materials": false,
  "clean_working_directory": false,
  "never_cleanup_artifacts": false,
  "approval": {
    "type": "success",
    "authorization": {
      "users": [],
      "roles": []
    }
  },
  "jobs": [
    {
      "name": "test-job"
    }
  ]
}"#
        );
    }

    #[test]
    fn test_stage_instance_validate_order() {
        let mut stage = StageInstance::default();
        assert_eq!(
            stage.validate().unwrap_err().to_string(),
            "`StageInstance.name` is empty"
        );
        stage.name = "test-stage".into();
        assert_eq!(stage.validate(), Err(ResourceError::NoJobs));
        stage.jobs = vec![Job::default()];
        assert_eq!(stage.validate(), Err(ResourceError::EmptyName("Job")));
        stage.jobs[0].name = "test-job".into();
        assert_eq!(stage.validate(), Ok(()));
    }

    #[test]
    fn test_stage_instance_json_string() {
        let stage = StageInstance {
            name: "stage1".into(),
            approved_by: "admin".into(),
            jobs: vec![Job {
                result: "Failed".into(),
                state: "Completed".into(),
                id: 13,
                scheduled_date: 1436172201081,
                ..Job::new("job1")
            }],
            can_run: true,
            result: "Failed".into(),
            approval_type: "success".into(),
            counter: "1".into(),
            id: 13,
            operate_permission: true,
            scheduled: true,
            rerun_of_counter: Some(1),
        };

        assert_eq!(
            stage.json_string().unwrap(),
            r#"{
  "name": "stage1",
  "id": 13,
  "jobs": [
    {
      "name": "job1",
      "scheduled_date": 1436172201081,
      "result": "Failed",
      "state": "Completed",
      "id": 13
    }
  ],
  "can_run": true,
  "scheduled": true,
  "approval_type": "success",
  "approved_by": "admin",
  "counter": "1",
  "operate_permission": true,
  "result": "Failed",
  "rerun_of_counter": 1
}"#
        );
    }
}
