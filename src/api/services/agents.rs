//
//  gocd-client
//  api/services/agents.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Agent administration under `/api/agents`.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{message_of, write_body};
use crate::api::common::ApiError;
use crate::api::request::ApiRequest;
use crate::api::resources::{Agent, AgentBulkUpdate, AgentsResponse, JobRunHistory, JobRunHistoryItem};

service!(
    /// Lists, updates and removes build agents.
    AgentsService
);

impl AgentsService<'_> {
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Agent>, ApiError> {
        let version = self.client.api_version(cancel, "/api/agents").await?;
        let response: AgentsResponse = self.client.get(cancel, "api/agents", Some(version)).await?;
        Ok(response.embedded.agents)
    }

    pub async fn get(&self, cancel: &CancellationToken, uuid: &str) -> Result<Agent, ApiError> {
        let version = self.client.api_version(cancel, "/api/agents/:uuid").await?;
        self.client
            .get(cancel, &format!("api/agents/{uuid}"), Some(version))
            .await
    }

    /// Sends the fields set on `agent` and returns the agent as stored.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        agent: &Agent,
    ) -> Result<Agent, ApiError> {
        let version = self.client.api_version(cancel, "/api/agents/:uuid").await?;
        self.client
            .patch(cancel, &format!("api/agents/{uuid}"), Some(version), &write_body(agent)?)
            .await
    }

    /// Applies one change to several agents and returns the server message.
    pub async fn bulk_update(
        &self,
        cancel: &CancellationToken,
        update: &AgentBulkUpdate,
    ) -> Result<String, ApiError> {
        let version = self.client.api_version(cancel, "/api/agents").await?;
        debug!(agents = update.uuids.len(), "Bulk updating agents");
        let request = ApiRequest::patch("api/agents").api_version(version).json(update)?;
        let (body, _) = self
            .client
            .execute_json::<serde_json::Value>(cancel, request)
            .await?;
        Ok(message_of(&body))
    }

    pub async fn delete(&self, cancel: &CancellationToken, uuid: &str) -> Result<String, ApiError> {
        let version = self.client.api_version(cancel, "/api/agents/:uuid").await?;
        self.client
            .delete(cancel, &format!("api/agents/{uuid}"), Some(version))
            .await
    }

    /// Jobs the agent has run, newest first.
    pub async fn job_run_history(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<Vec<JobRunHistoryItem>, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/agents/:uuid/job_run_history")
            .await?;
        let history: JobRunHistory = self
            .client
            .get(cancel, &format!("api/agents/{uuid}/job_run_history"), Some(version))
            .await?;
        Ok(history.jobs)
    }
}
