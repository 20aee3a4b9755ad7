//
//  gocd-client
//  api/services/environments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Environment configuration under `/api/admin/environments`.

use tokio_util::sync::CancellationToken;

use super::{with_etag, write_body};
use crate::api::common::ApiError;
use crate::api::request::ApiRequest;
use crate::api::resources::{Environment, EnvironmentPatchRequest, EnvironmentsResponse, Versioned};

service!(
    /// CRUD and partial updates for environments.
    EnvironmentsService
);

impl EnvironmentsService<'_> {
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Environment>, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/environments").await?;
        let response: EnvironmentsResponse = self
            .client
            .get(cancel, "api/admin/environments", Some(version))
            .await?;
        Ok(response.embedded.environments)
    }

    pub async fn get(&self, cancel: &CancellationToken, name: &str) -> Result<Environment, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/environments/:environment_name")
            .await?;
        let request = ApiRequest::get(format!("api/admin/environments/{name}")).api_version(version);
        let (environment, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(environment, &response))
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        environment: &Environment,
    ) -> Result<Environment, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/environments").await?;
        let request = ApiRequest::post("api/admin/environments")
            .api_version(version)
            .json(environment)?;
        let (created, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(created, &response))
    }

    /// Replaces the environment, guarded by `environment.version`.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        environment: &Environment,
    ) -> Result<Environment, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/environments/:environment_name")
            .await?;
        let request = ApiRequest::put(format!("api/admin/environments/{}", environment.name))
            .api_version(version)
            .if_match(environment.version())
            .json(&write_body(environment)?)?;
        let (updated, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(updated, &response))
    }

    /// Adds and removes pipelines, agents and variables without a version.
    pub async fn patch(
        &self,
        cancel: &CancellationToken,
        name: &str,
        changes: &EnvironmentPatchRequest,
    ) -> Result<Environment, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/environments/:environment_name")
            .await?;
        let request = ApiRequest::patch(format!("api/admin/environments/{name}"))
            .api_version(version)
            .json(changes)?;
        let (patched, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(patched, &response))
    }

    pub async fn delete(&self, cancel: &CancellationToken, name: &str) -> Result<String, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/environments/:environment_name")
            .await?;
        self.client
            .delete(cancel, &format!("api/admin/environments/{name}"), Some(version))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::mock_version;
    use crate::api::resources::environment::tests::environment_body;
    use crate::api::resources::{Environment, EnvironmentPatchRequest, PatchStringAction};
    use crate::api::GocdClient;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    const ACCEPT_V2: &str = "application/vnd.go.cd.v2+json";

    #[tokio::test]
    async fn test_list_environments() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let _mock = server
            .mock("GET", "/api/admin/environments")
            .match_header("accept", ACCEPT_V2)
            .with_body(
                json!({"_embedded": {"environments": [environment_body("foobar")]}}).to_string(),
            )
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let environments = client
            .environments()
            .list(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(environments.len(), 1);
        assert_eq!(environments[0].name, "foobar");
        assert_eq!(environments[0].pipeline_names(), vec!["up42"]);
    }

    #[tokio::test]
    async fn test_get_environment_reads_etag() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "19.9.0").await;
        let _mock = server
            .mock("GET", "/api/admin/environments/my_environment_1")
            .match_header("accept", "application/vnd.go.cd.v3+json")
            .with_header("etag", "\"03e5facd6b6ae1c0f6e4cc4fd7c1b9e3\"")
            .with_body(environment_body("my_environment_1").to_string())
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let environment = client
            .environments()
            .get(&CancellationToken::new(), "my_environment_1")
            .await
            .unwrap();

        assert_eq!(environment.version, "03e5facd6b6ae1c0f6e4cc4fd7c1b9e3");
        assert_eq!(environment.environment_variables.len(), 2);
    }

    #[tokio::test]
    async fn test_create_environment() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let mock = server
            .mock("POST", "/api/admin/environments")
            .match_body(Matcher::PartialJson(json!({"name": "new_environment"})))
            .with_body(json!({"name": "new_environment", "pipelines": [], "environment_variables": []}).to_string())
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let created = client
            .environments()
            .create(&CancellationToken::new(), &Environment::new("new_environment"))
            .await
            .unwrap();

        assert_eq!(created.name, "new_environment");
        assert!(created.pipelines.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_environment_sends_if_match() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let mock = server
            .mock("PUT", "/api/admin/environments/foobar")
            .match_header("if-match", "\"v1\"")
            .with_header("etag", "\"v2\"")
            .with_body(environment_body("foobar").to_string())
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let mut environment = Environment::new("foobar");
        environment.version = "v1".into();
        let updated = client
            .environments()
            .update(&CancellationToken::new(), &environment)
            .await
            .unwrap();

        assert_eq!(updated.version, "v2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_patch_environment() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let mock = server
            .mock("PATCH", "/api/admin/environments/my_environment")
            .match_header("accept", ACCEPT_V2)
            .match_body(Matcher::Json(json!({
                "pipelines": {"add": ["up42"], "remove": ["sample"]}
            })))
            .with_body(environment_body("my_environment").to_string())
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let changes = EnvironmentPatchRequest {
            pipelines: Some(PatchStringAction {
                add: vec!["up42".into()],
                remove: vec!["sample".into()],
            }),
            ..Default::default()
        };
        let patched = client
            .environments()
            .patch(&CancellationToken::new(), "my_environment", &changes)
            .await
            .unwrap();

        assert_eq!(patched.pipeline_names(), vec!["up42"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_environment() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "18.2.0").await;
        let _mock = server
            .mock("DELETE", "/api/admin/environments/my_environment_1")
            .with_body(r#"{"message": "Environment 'my_environment_1' was deleted successfully."}"#)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let message = client
            .environments()
            .delete(&CancellationToken::new(), "my_environment_1")
            .await
            .unwrap();
        assert_eq!(message, "Environment 'my_environment_1' was deleted successfully.");
    }
}
