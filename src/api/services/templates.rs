//
//  gocd-client
//  api/services/templates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline templates under `/api/admin/templates`.

use tokio_util::sync::CancellationToken;

use super::{with_etag, write_body};
use crate::api::common::ApiError;
use crate::api::request::ApiRequest;
use crate::api::resources::{PipelineTemplate, TemplatesResponse, Versioned};

service!(
    /// CRUD for pipeline templates.
    TemplatesService
);

impl TemplatesService<'_> {
    /// Template names and the pipelines using each; stages are not included.
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<PipelineTemplate>, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/templates").await?;
        let response: TemplatesResponse = self
            .client
            .get(cancel, "api/admin/templates", Some(version))
            .await?;
        Ok(response.embedded.templates)
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        name: &str,
    ) -> Result<PipelineTemplate, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/templates/:template_name")
            .await?;
        let request = ApiRequest::get(format!("api/admin/templates/{name}")).api_version(version);
        let (template, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(template, &response))
    }

    /// Creates a template after checking every stage locally.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        template: &PipelineTemplate,
    ) -> Result<PipelineTemplate, ApiError> {
        template.stages.iter().try_for_each(|s| s.validate())?;
        let version = self.client.api_version(cancel, "/api/admin/templates").await?;
        let request = ApiRequest::post("api/admin/templates")
            .api_version(version)
            .json(template)?;
        let (created, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(created, &response))
    }

    /// Replaces the template, guarded by `template.version`.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        template: &PipelineTemplate,
    ) -> Result<PipelineTemplate, ApiError> {
        template.stages.iter().try_for_each(|s| s.validate())?;
        let version = self
            .client
            .api_version(cancel, "/api/admin/templates/:template_name")
            .await?;
        let request = ApiRequest::put(format!("api/admin/templates/{}", template.name))
            .api_version(version)
            .if_match(template.version())
            .json(&write_body(template)?)?;
        let (updated, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(updated, &response))
    }

    pub async fn delete(&self, cancel: &CancellationToken, name: &str) -> Result<String, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/templates/:template_name")
            .await?;
        self.client
            .delete(cancel, &format!("api/admin/templates/{name}"), Some(version))
            .await
    }
}
