//
//  gocd-client
//  api/resources/job.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::fmt;

use serde::de::{self, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ConfigurationProperty, ResourceError, Task};
use crate::api::common::ApiError;

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// A plain or secure variable exposed to a job's environment.
///
/// Plain variables always carry `value`, even when it is empty. Secure
/// variables fetched from the server carry `encrypted_value` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub encrypted_value: String,
    #[serde(default)]
    pub secure: bool,
}

impl EnvironmentVariable {
    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn secure(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secure: true,
            ..Default::default()
        }
    }
}

impl Serialize for EnvironmentVariable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encrypted = !self.encrypted_value.is_empty();
        let mut state = serializer.serialize_struct("EnvironmentVariable", 3)?;
        state.serialize_field("name", &self.name)?;
        if encrypted {
            state.serialize_field("encrypted_value", &self.encrypted_value)?;
        } else {
            state.serialize_field("value", &self.value)?;
        }
        state.serialize_field("secure", &self.secure)?;
        state.end()
    }
}

/// Job timeout in minutes. `0` means never time out.
///
/// Servers send a number, a numeric string, `"never"` or `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeoutField(pub u64);

struct TimeoutVisitor;

impl<'de> Visitor<'de> for TimeoutVisitor {
    type Value = TimeoutField;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number of minutes, \"never\" or null")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TimeoutField(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(TimeoutField)
            .map_err(|_| E::custom(format!("negative timeout {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            "" | "never" | "null" => Ok(TimeoutField(0)),
            other => other
                .parse()
                .map(TimeoutField)
                .map_err(|_| E::custom(format!("invalid timeout '{other}'"))),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TimeoutField(0))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TimeoutField(0))
    }
}

impl<'de> Deserialize<'de> for TimeoutField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimeoutVisitor)
    }
}

/// A custom tab on the job details page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub name: String,
    pub path: String,
}

/// A build, test or external artifact published by a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub store_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configuration: Vec<ConfigurationProperty>,
}

/// A job, either as configured or as a scheduled instance.
///
/// Only `name` is always serialized; the instance fields (`scheduled_date`,
/// `result`, `state`, `id`) come back from stage instance queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_instance_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<Tab>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub scheduled_date: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub result: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.name.is_empty() {
            return Err(ResourceError::EmptyName("Job"));
        }
        Ok(())
    }

    /// Validates the job and renders it as two-space indented JSON.
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
    fn test_validate() {
        let mut job = Job::default();
        assert_eq!(job.validate(), Err(ResourceError::EmptyName("Job")));
        job.name = "job-name".into();
        assert_eq!(job.validate(), Ok(()));
    }

    #[test]
    fn test_json_string() {
        assert_eq!(
            Job::new("test-job").json_string().unwrap(),
            "{\n  \"name\": \"test-job\"\n}"
        );
        assert_eq!(
            Job::default().json_string().unwrap_err().to_string(),
            "`Job.name` is empty"
        );
    }

    #[test]
    fn test_empty_environment_variable_value() {
        let job = Job {
            environment_variables: vec![EnvironmentVariable::plain("test", "")],
            ..Job::new("test-job")
        };
        assert_eq!(
            job.json_string().unwrap(),
            r#"{
  "name": "test-job",
  "environment_variables": [
    {
      "name": "test",
      "value": "",
      "secure": false
    }
  ]
}"#
        );
    }

    #[test]
    fn test_encrypted_variable_drops_value() {
        let variable = EnvironmentVariable {
            name: "TOKEN".into(),
            encrypted_value: "AES:abc".into(),
            secure: true,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&variable).unwrap(),
            r#"{"name":"TOKEN","encrypted_value":"AES:abc","secure":true}"#
        );
    }

    #[test]
    fn test_timeout_field() {
        for (input, minutes) in [("5", 5), (r#""10""#, 10), (r#""never""#, 0), (r#""null""#, 0), ("null", 0)] {
            let timeout: TimeoutField = serde_json::from_str(input).unwrap();
            assert_eq!(timeout, TimeoutField(minutes), "{input}");
        }
        assert!(serde_json::from_str::<TimeoutField>(r#""soon""#).is_err());
        assert_eq!(serde_json::to_string(&TimeoutField(3)).unwrap(), "3");
    }

    #[test]
    fn test_decode_job_config() {
        let job: Job = serde_json::from_str(
            r#"{
                "name": "defaultJob",
                "run_instance_count": null,
                "timeout": "never",
                "environment_variables": [],
                "resources": ["linux"],
                "tasks": [{"type": "exec", "attributes": {"run_if": ["passed"], "command": "make"}}],
                "tabs": [{"name": "coverage", "path": "target/coverage/index.html"}],
                "artifacts": [{"type": "build", "source": "target/release", "destination": "bin"}]
            }"#,
        )
        .unwrap();

        assert_eq!(job.timeout, Some(TimeoutField(0)));
        assert_eq!(job.run_instance_count, None);
        assert_eq!(job.tasks[0].task_type(), "exec");
        assert_eq!(job.tabs[0].path, "target/coverage/index.html");
        assert_eq!(job.artifacts[0].artifact_type, "build");
    }
}
