//
//  gocd-client
//  api/services/config_repos.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Config repositories under `/api/admin/config_repos`, available from
//! GoCD 18.8.0.

use tokio_util::sync::CancellationToken;

use super::{with_etag, write_body};
use crate::api::common::ApiError;
use crate::api::request::ApiRequest;
use crate::api::resources::{ConfigRepo, ConfigReposResponse, Versioned};

service!(
    /// CRUD for config repositories.
    ConfigReposService
);

impl ConfigReposService<'_> {
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<ConfigRepo>, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/config_repos").await?;
        let response: ConfigReposResponse = self
            .client
            .get(cancel, "api/admin/config_repos", Some(version))
            .await?;
        Ok(response.embedded.config_repos)
    }

    /// Fetches one repository with its `ETag` as the version.
    pub async fn get(&self, cancel: &CancellationToken, id: &str) -> Result<ConfigRepo, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/config_repos/:id").await?;
        let request = ApiRequest::get(format!("api/admin/config_repos/{id}")).api_version(version);
        let (repo, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(repo, &response))
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        repo: &ConfigRepo,
    ) -> Result<ConfigRepo, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/config_repos").await?;
        let request = ApiRequest::post("api/admin/config_repos")
            .api_version(version)
            .json(repo)?;
        let (created, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(created, &response))
    }

    /// Replaces the repository, guarded by `repo.version`.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        repo: &ConfigRepo,
    ) -> Result<ConfigRepo, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/config_repos/:id").await?;
        let request = ApiRequest::put(format!("api/admin/config_repos/{}", repo.id))
            .api_version(version)
            .if_match(repo.version())
            .json(&write_body(repo)?)?;
        let (updated, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(updated, &response))
    }

    pub async fn delete(&self, cancel: &CancellationToken, id: &str) -> Result<String, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/config_repos/:id").await?;
        self.client
            .delete(cancel, &format!("api/admin/config_repos/{id}"), Some(version))
            .await
    }
}
