//
//  gocd-client
//  api/services/pipelines.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pipeline Runtime
//!
//! Status, history lookup and the confirmed actions under
//! `/api/pipelines/:pipeline_name`.
//!
//! ## Two dialects
//!
//! Before 18.2.0 these calls were unversioned: they take `Confirm: true`,
//! form parameters and answer with plain text. Later servers take
//! `X-GoCD-Confirm: true`, JSON bodies and answer with a JSON message. The
//! dialect follows the negotiated revision; callers see the same API.

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::common::ApiError;
use crate::api::request::{choose_confirm_header, ApiRequest};
use crate::api::resources::{PauseRequest, PipelineInstance, PipelineStatus, ScheduleRequest};
use crate::api::version::ApiVersion;

service!(
    /// Runtime operations on pipelines.
    PipelinesService
);

impl PipelinesService<'_> {
    pub async fn status(
        &self,
        cancel: &CancellationToken,
        name: &str,
    ) -> Result<PipelineStatus, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/pipelines/:pipeline_name/status")
            .await?;
        self.client
            .get(cancel, &format!("api/pipelines/{name}/status"), Some(version))
            .await
    }

    /// One run of `name`, by counter.
    pub async fn instance(
        &self,
        cancel: &CancellationToken,
        name: &str,
        counter: u64,
    ) -> Result<PipelineInstance, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/pipelines/:pipeline_name/instance/:pipeline_counter")
            .await?;
        self.client
            .get(
                cancel,
                &format!("api/pipelines/{name}/instance/{counter}"),
                Some(version),
            )
            .await
    }

    /// Pauses scheduling of `name`, optionally recording why.
    pub async fn pause(
        &self,
        cancel: &CancellationToken,
        name: &str,
        cause: Option<&str>,
    ) -> Result<(), ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/pipelines/:pipeline_name/pause")
            .await?;
        let mut request = ApiRequest::post(format!("api/pipelines/{name}/pause")).api_version(version);
        if let Some(cause) = cause {
            request = if version.is_unversioned() {
                request.form(vec![("pauseCause".to_string(), cause.to_string())])
            } else {
                request.json(&PauseRequest { pause_cause: cause })?
            };
        }
        self.confirm(cancel, request, version).await?;
        info!(pipeline = name, "Paused pipeline");
        Ok(())
    }

    pub async fn unpause(&self, cancel: &CancellationToken, name: &str) -> Result<(), ApiError> {
        self.action(cancel, name, "unpause").await
    }

    /// Releases the lock held on `name` after a failed run.
    pub async fn release_lock(&self, cancel: &CancellationToken, name: &str) -> Result<(), ApiError> {
        self.action(cancel, name, "unlock").await
    }

    /// Triggers a run of `name`. `options` pins material revisions and
    /// overrides variables.
    pub async fn schedule(
        &self,
        cancel: &CancellationToken,
        name: &str,
        options: Option<&ScheduleRequest>,
    ) -> Result<(), ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/pipelines/:pipeline_name/schedule")
            .await?;
        let request = ApiRequest::post(format!("api/pipelines/{name}/schedule")).api_version(version);
        let request = match (options, version.is_unversioned()) {
            (Some(options), true) => request.form(options.form_pairs()),
            (None, true) => request,
            (options, false) => request.json(&options.cloned().unwrap_or_default())?,
        };
        self.confirm(cancel, request, version).await?;
        info!(pipeline = name, "Scheduled pipeline");
        Ok(())
    }

    async fn action(&self, cancel: &CancellationToken, name: &str, action: &str) -> Result<(), ApiError> {
        let version = self
            .client
            .api_version(cancel, &format!("/api/pipelines/:pipeline_name/{action}"))
            .await?;
        let request = ApiRequest::post(format!("api/pipelines/{name}/{action}")).api_version(version);
        self.confirm(cancel, request, version).await?;
        info!(pipeline = name, action, "Pipeline action accepted");
        Ok(())
    }

    async fn confirm(
        &self,
        cancel: &CancellationToken,
        mut request: ApiRequest,
        version: ApiVersion,
    ) -> Result<(), ApiError> {
        choose_confirm_header(&mut request, version);
        self.client.execute(cancel, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::mock_version;
    use crate::api::resources::{EnvironmentVariable, ScheduleMaterial, ScheduleRequest};
    use crate::api::GocdClient;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_status() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let _mock = server
            .mock("GET", "/api/pipelines/test-pipeline/status")
            .match_header("accept", "application/vnd.go.cd.v1+json")
            .with_body(r#"{"paused": true, "paused_cause": "Reason for pausing this pipeline", "paused_by": "admin", "locked": false, "schedulable": false}"#)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let status = client
            .pipelines()
            .status(&CancellationToken::new(), "test-pipeline")
            .await
            .unwrap();

        assert!(status.paused);
        assert_eq!(status.paused_by.as_deref(), Some("admin"));
        assert!(!status.schedulable);
    }

    #[tokio::test]
    async fn test_instance() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "17.3.0").await;
        let _mock = server
            .mock("GET", "/api/pipelines/test-pipeline/instance/1")
            .match_header("accept", "application/json")
            .with_body(
                json!({
                    "id": 1,
                    "name": "test-pipeline",
                    "counter": 1,
                    "label": "1",
                    "natural_order": 1.0,
                    "can_run": true,
                    "preparing_to_schedule": false,
                    "comment": null,
                    "stages": [{"name": "stage1", "id": 1, "jobs": [{"name": "job1", "result": "Passed"}], "counter": "1"}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let instance = client
            .pipelines()
            .instance(&CancellationToken::new(), "test-pipeline", 1)
            .await
            .unwrap();

        assert_eq!(instance.counter, 1);
        assert_eq!(instance.stages[0].jobs[0].result, "Passed");
    }

    #[tokio::test]
    async fn test_pause_unversioned_uses_confirm_and_form() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "17.12.0").await;
        let mock = server
            .mock("POST", "/api/pipelines/test-pipeline/pause")
            .match_header("accept", "application/json")
            .match_header("confirm", "true")
            .match_header("x-gocd-confirm", Matcher::Missing)
            .match_body(Matcher::UrlEncoded("pauseCause".into(), "maintenance".into()))
            .with_body("Pipeline 'test-pipeline' paused successfully.")
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        client
            .pipelines()
            .pause(&CancellationToken::new(), "test-pipeline", Some("maintenance"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_pause_versioned_sends_json() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let mock = server
            .mock("POST", "/api/pipelines/test-pipeline/pause")
            .match_header("accept", "application/vnd.go.cd.v1+json")
            .match_header("x-gocd-confirm", "true")
            .match_body(Matcher::Json(json!({"pause_cause": "maintenance"})))
            .with_body(r#"{"message": "Pipeline 'test-pipeline' paused successfully."}"#)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        client
            .pipelines()
            .pause(&CancellationToken::new(), "test-pipeline", Some("maintenance"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unpause_and_release_lock() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let unpause = server
            .mock("POST", "/api/pipelines/test-pipeline/unpause")
            .match_header("x-gocd-confirm", "true")
            .with_body("{}")
            .create_async()
            .await;
        let unlock = server
            .mock("POST", "/api/pipelines/test-pipeline/unlock")
            .match_header("x-gocd-confirm", "true")
            .with_body(r#"{"message": "Pipeline lock released for test-pipeline"}"#)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let cancel = CancellationToken::new();
        client.pipelines().unpause(&cancel, "test-pipeline").await.unwrap();
        client.pipelines().release_lock(&cancel, "test-pipeline").await.unwrap();

        unpause.assert_async().await;
        unlock.assert_async().await;
    }

    #[tokio::test]
    async fn test_release_lock_conflict() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let _mock = server
            .mock("POST", "/api/pipelines/test-pipeline/unlock")
            .with_status(409)
            .with_body(r#"{"message": "Lock exists within the pipeline configuration but no pipeline instance is currently in progress."}"#)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let err = client
            .pipelines()
            .release_lock(&CancellationToken::new(), "test-pipeline")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_schedule_unversioned_form() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "16.1.0").await;
        let mock = server
            .mock("POST", "/api/pipelines/test-pipeline/schedule")
            .match_header("confirm", "true")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("materials[svn_material]".into(), "3456".into()),
                Matcher::UrlEncoded("variables[USE_CACHE]".into(), "true".into()),
            ]))
            .with_status(202)
            .with_body("Request to schedule pipeline test-pipeline accepted")
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let options = ScheduleRequest {
            materials: vec![ScheduleMaterial {
                name: "svn_material".into(),
                revision: "3456".into(),
                ..Default::default()
            }],
            environment_variables: vec![EnvironmentVariable::plain("USE_CACHE", "true")],
            ..Default::default()
        };
        client
            .pipelines()
            .schedule(&CancellationToken::new(), "test-pipeline", Some(&options))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_schedule_versioned_json() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let mock = server
            .mock("POST", "/api/pipelines/test-pipeline/schedule")
            .match_header("x-gocd-confirm", "true")
            .match_body(Matcher::Json(json!({
                "materials": [{"fingerprint": "abc123", "revision": "3456"}],
                "update_materials_before_scheduling": true
            })))
            .with_status(202)
            .with_body(r#"{"message": "Request to schedule pipeline test-pipeline accepted"}"#)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let options = ScheduleRequest {
            materials: vec![ScheduleMaterial {
                fingerprint: "abc123".into(),
                revision: "3456".into(),
                ..Default::default()
            }],
            update_materials_before_scheduling: Some(true),
            ..Default::default()
        };
        client
            .pipelines()
            .schedule(&CancellationToken::new(), "test-pipeline", Some(&options))
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
