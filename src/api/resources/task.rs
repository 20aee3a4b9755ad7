//
//  gocd-client
//  api/resources/task.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Job Tasks
//!
//! A task is one executable step of a job, tagged on the wire by `type`:
//!
//! ```json
//! {"type": "exec", "attributes": {"run_if": ["passed"], "command": "make", "working_directory": "src"}}
//! ```
//!
//! Decoding dispatches on the tag through [`Task::from_generic`], so JSON
//! input and untyped maps share one path. Unknown attribute keys are ignored.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{ConfigurationProperty, ResourceError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecTask {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_if: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_directory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_cancel: Option<Box<Task>>,
}

/// Attributes shared by the ant, nant and rake build tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTask {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_if: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_file: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_directory: String,
    /// Only meaningful for nant.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nant_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_cancel: Option<Box<Task>>,
}

/// Fetches an artifact produced by an upstream job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTask {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_if: Vec<String>,
    /// `gocd` or `external`; servers before 18.7.0 do not know this field.
    #[serde(default, rename = "artifact_origin", skip_serializing_if = "String::is_empty")]
    pub origin: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pipeline: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stage: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default)]
    pub is_source_a_file: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configuration: Vec<ConfigurationProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_cancel: Option<Box<Task>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfiguration {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: String,
}

/// A task provided by a task plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluggableTask {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_if: Vec<String>,
    #[serde(default)]
    pub plugin_configuration: PluginConfiguration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configuration: Vec<ConfigurationProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_cancel: Option<Box<Task>>,
}

/// Variant-specific task attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAttributes {
    Exec(ExecTask),
    Ant(BuildTask),
    Nant(BuildTask),
    Rake(BuildTask),
    Fetch(FetchTask),
    Pluggable(PluggableTask),
}

/// A single step within a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub attributes: TaskAttributes,
}

fn require(task: &'static str, field: &'static str, present: bool) -> Result<(), ResourceError> {
    if present {
        Ok(())
    } else {
        Err(ResourceError::MissingTaskField { task, field })
    }
}

impl Task {
    pub fn new(attributes: TaskAttributes) -> Self {
        Self { attributes }
    }

    /// The wire `type` discriminator.
    pub fn task_type(&self) -> &'static str {
        match &self.attributes {
            TaskAttributes::Exec(_) => "exec",
            TaskAttributes::Ant(_) => "ant",
            TaskAttributes::Nant(_) => "nant",
            TaskAttributes::Rake(_) => "rake",
            TaskAttributes::Fetch(_) => "fetch",
            TaskAttributes::Pluggable(_) => "pluggable_task",
        }
    }

    /// Builds a task from its discriminator and an untyped attribute map.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::MissingTaskType`] when `kind` is empty
    /// - [`ResourceError::UnexpectedTaskType`] for an unknown `kind`
    /// - [`ResourceError::InvalidTaskAttributes`] when a known key holds a
    ///   value of the wrong shape
    pub fn from_generic(kind: &str, attributes: &Map<String, Value>) -> Result<Self, ResourceError> {
        fn decode<T: serde::de::DeserializeOwned>(
            kind: &str,
            attributes: &Map<String, Value>,
        ) -> Result<T, ResourceError> {
            serde_json::from_value(Value::Object(attributes.clone())).map_err(|e| {
                ResourceError::InvalidTaskAttributes {
                    kind: kind.to_string(),
                    reason: e.to_string(),
                }
            })
        }

        let attributes = match kind {
            "" => return Err(ResourceError::MissingTaskType),
            "exec" => TaskAttributes::Exec(decode(kind, attributes)?),
            "ant" => TaskAttributes::Ant(decode(kind, attributes)?),
            "nant" => TaskAttributes::Nant(decode(kind, attributes)?),
            "rake" => TaskAttributes::Rake(decode(kind, attributes)?),
            "fetch" => TaskAttributes::Fetch(decode(kind, attributes)?),
            "pluggable_task" | "pluggable" => TaskAttributes::Pluggable(decode(kind, attributes)?),
            other => return Err(ResourceError::UnexpectedTaskType(other.to_string())),
        };
        Ok(Self::new(attributes))
    }

    /// Projects the attributes onto an untyped map.
    pub fn generate_generic(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let value = match &self.attributes {
            TaskAttributes::Exec(t) => serde_json::to_value(t)?,
            TaskAttributes::Ant(t) | TaskAttributes::Nant(t) | TaskAttributes::Rake(t) => {
                serde_json::to_value(t)?
            }
            TaskAttributes::Fetch(t) => serde_json::to_value(t)?,
            TaskAttributes::Pluggable(t) => serde_json::to_value(t)?,
        };
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    /// Checks the fields each task type needs, reporting the first one missing.
    pub fn validate(&self) -> Result<(), ResourceError> {
        let kind = self.task_type();
        match &self.attributes {
            TaskAttributes::Exec(t) => {
                require(kind, "run_if", !t.run_if.is_empty())?;
                require(kind, "command", !t.command.is_empty())?;
                require(kind, "working_directory", !t.working_directory.is_empty())
            }
            TaskAttributes::Ant(t) | TaskAttributes::Nant(t) | TaskAttributes::Rake(t) => {
                require(kind, "run_if", !t.run_if.is_empty())?;
                require(kind, "build_file", !t.build_file.is_empty())?;
                require(kind, "target", !t.target.is_empty())?;
                require(kind, "working_directory", !t.working_directory.is_empty())
            }
            TaskAttributes::Fetch(t) => {
                require(kind, "run_if", !t.run_if.is_empty())?;
                require(kind, "pipeline", !t.pipeline.is_empty())?;
                require(kind, "stage", !t.stage.is_empty())?;
                require(kind, "job", !t.job.is_empty())?;
                require(kind, "source", !t.source.is_empty())?;
                require(kind, "destination", !t.destination.is_empty())
            }
            TaskAttributes::Pluggable(t) => {
                require(kind, "plugin_configuration.id", !t.plugin_configuration.id.is_empty())?;
                require(
                    kind,
                    "plugin_configuration.version",
                    !t.plugin_configuration.version.is_empty(),
                )
            }
        }
    }
}

impl From<ExecTask> for Task {
    fn from(task: ExecTask) -> Self {
        Self::new(TaskAttributes::Exec(task))
    }
}

impl From<FetchTask> for Task {
    fn from(task: FetchTask) -> Self {
        Self::new(TaskAttributes::Fetch(task))
    }
}

impl From<PluggableTask> for Task {
    fn from(task: PluggableTask) -> Self {
        Self::new(TaskAttributes::Pluggable(task))
    }
}

#[derive(Serialize)]
struct TaskOut<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    attributes: Map<String, Value>,
}

#[derive(Deserialize)]
struct TaskIn {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    attributes: Option<Map<String, Value>>,
}

impl Serialize for Task {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = self
            .generate_generic()
            .map_err(serde::ser::Error::custom)?;
        TaskOut {
            kind: self.task_type(),
            attributes,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = TaskIn::deserialize(deserializer)?;
        let attributes = raw.attributes.unwrap_or_default();
        Task::from_generic(&raw.kind, &attributes).map_err(D::Error::custom)
    }
}
