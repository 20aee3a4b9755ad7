//
//  gocd-client
//  api/services/roles.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Security roles under `/api/admin/security/roles`.

use tokio_util::sync::CancellationToken;

use super::{with_etag, write_body};
use crate::api::common::ApiError;
use crate::api::request::ApiRequest;
use crate::api::resources::{Role, RolesResponse, Versioned};

service!(
    /// CRUD for security roles.
    RolesService
);

impl RolesService<'_> {
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Role>, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/security/roles").await?;
        let response: RolesResponse = self
            .client
            .get(cancel, "api/admin/security/roles", Some(version))
            .await?;
        Ok(response.embedded.roles)
    }

    pub async fn get(&self, cancel: &CancellationToken, name: &str) -> Result<Role, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/security/roles/:role_name")
            .await?;
        let request = ApiRequest::get(format!("api/admin/security/roles/{name}")).api_version(version);
        let (role, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(role, &response))
    }

    pub async fn create(&self, cancel: &CancellationToken, role: &Role) -> Result<Role, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/security/roles").await?;
        let request = ApiRequest::post("api/admin/security/roles")
            .api_version(version)
            .json(role)?;
        let (created, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(created, &response))
    }

    /// Replaces the role, guarded by `role.version`.
    pub async fn update(&self, cancel: &CancellationToken, role: &Role) -> Result<Role, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/security/roles/:role_name")
            .await?;
        let request = ApiRequest::put(format!("api/admin/security/roles/{}", role.name))
            .api_version(version)
            .if_match(role.version())
            .json(&write_body(role)?)?;
        let (updated, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(updated, &response))
    }

    pub async fn delete(&self, cancel: &CancellationToken, name: &str) -> Result<String, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/security/roles/:role_name")
            .await?;
        self.client
            .delete(cancel, &format!("api/admin/security/roles/{name}"), Some(version))
            .await
    }
}
