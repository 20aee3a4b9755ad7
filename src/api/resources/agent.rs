//
//  gocd-client
//  api/resources/agent.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{impl_hal_container, PatchStringAction};
use crate::api::common::HalLinks;

/// Agents list their environments as plain names before v5 and as
/// `{"name": .., "origin": ..}` objects afterwards. Both decode to names.
fn environment_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match value {
            Value::String(name) => Some(name),
            Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect())
}

/// Free disk space in bytes. Agents that have not reported yet send
/// `"unknown"`.
fn free_space<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// The job an agent is currently building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDetails {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(default)]
    pub pipeline: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub job: String,
}

/// A build agent. Serializing an agent produces an update body: only the
/// fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_plugin_id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sandbox: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operating_system: String,
    #[serde(default, deserialize_with = "free_space", skip_serializing_if = "Option::is_none")]
    pub free_space: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub agent_config_state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub agent_state: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default, deserialize_with = "environment_names", skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_details: Option<BuildDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentsEmbedded {
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// `GET /api/agents`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentsResponse {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    #[serde(rename = "_embedded", default)]
    pub embedded: AgentsEmbedded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentBulkOperations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<PatchStringAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<PatchStringAction>,
}

/// Body of `PATCH /api/agents`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentBulkUpdate {
    pub uuids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<AgentBulkOperations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_config_state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStateTransition {
    pub state_change_time: u64,
    pub id: u64,
    pub state: String,
}

/// One job an agent has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRunHistoryItem {
    pub agent_uuid: String,
    pub name: String,
    #[serde(default)]
    pub job_state_transitions: Vec<JobStateTransition>,
    #[serde(default)]
    pub scheduled_date: u64,
    #[serde(default)]
    pub original_job_id: Option<u64>,
    #[serde(default)]
    pub pipeline_counter: u64,
    #[serde(default)]
    pub rerun: bool,
    pub pipeline_name: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub state: String,
    pub id: u64,
    #[serde(default)]
    pub stage_counter: String,
    pub stage_name: String,
}

/// `GET /api/agents/:uuid/job_run_history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRunHistory {
    #[serde(default)]
    pub jobs: Vec<JobRunHistoryItem>,
}

impl_hal_container!(Agent, AgentsResponse, BuildDetails);
