//
//  gocd-client
//  api/services/pipeline_configs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pipeline Configuration
//!
//! Reads and writes pipeline definitions under `/api/admin/pipelines`. This
//! endpoint has the longest revision history of the API (v4 on 16.10.0 up to
//! v11 on 20.1.0), so the negotiated revision matters more here than
//! anywhere else.
//!
//! ## Read-modify-write
//!
//! Updates carry the `ETag` from the last read as `If-Match`; a stale
//! version is rejected with `412 Precondition Failed`.
//! [`PipelineConfigsService::edit`] runs the whole cycle inside the client's
//! exclusive section:
//!
//! ```rust,no_run
//! use gocd_client::api::GocdClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(client: GocdClient) -> Result<(), gocd_client::api::ApiError> {
//! let cancel = CancellationToken::new();
//! client
//!     .pipeline_configs()
//!     .edit(&cancel, "build", |pipeline| {
//!         pipeline.label_template = "${COUNT}-${git[:8]}".into();
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{with_etag, write_body};
use crate::api::common::ApiError;
use crate::api::request::ApiRequest;
use crate::api::resources::{HalContainer, Pipeline, PipelineConfigRequest, Versioned};

service!(
    /// CRUD for pipeline configurations.
    PipelineConfigsService
);

impl PipelineConfigsService<'_> {
    pub async fn get(&self, cancel: &CancellationToken, name: &str) -> Result<Pipeline, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/pipelines/:pipeline_name")
            .await?;
        let request = ApiRequest::get(format!("api/admin/pipelines/{name}")).api_version(version);
        let (pipeline, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(pipeline, &response))
    }

    /// Creates `pipeline` inside `group`.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        group: &str,
        pipeline: &Pipeline,
    ) -> Result<Pipeline, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/pipelines").await?;
        let request = ApiRequest::post("api/admin/pipelines")
            .api_version(version)
            .json(&PipelineConfigRequest { group, pipeline })?;
        let (created, response) = self.client.execute_json(cancel, request).await?;
        info!(pipeline = %pipeline.name, group, "Created pipeline");
        Ok(with_etag(created, &response))
    }

    /// Replaces the pipeline, guarded by `pipeline.version`.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        pipeline: &Pipeline,
    ) -> Result<Pipeline, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/pipelines/:pipeline_name")
            .await?;
        let request = ApiRequest::put(format!("api/admin/pipelines/{}", pipeline.name))
            .api_version(version)
            .if_match(pipeline.version())
            .json(&write_body(pipeline)?)?;
        let (updated, response) = self.client.execute_json(cancel, request).await?;
        Ok(with_etag(updated, &response))
    }

    pub async fn delete(&self, cancel: &CancellationToken, name: &str) -> Result<String, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/pipelines/:pipeline_name")
            .await?;
        self.client
            .delete(cancel, &format!("api/admin/pipelines/{name}"), Some(version))
            .await
    }

    /// Fetches `name`, applies `change` and writes it back while holding the
    /// client lock.
    pub async fn edit<F>(
        &self,
        cancel: &CancellationToken,
        name: &str,
        change: F,
    ) -> Result<Pipeline, ApiError>
    where
        F: FnOnce(&mut Pipeline),
    {
        let _guard = self.client.lock().await;
        let mut pipeline = self.get(cancel, name).await?;
        change(&mut pipeline);
        pipeline.remove_links();
        self.update(cancel, &pipeline).await
    }
}
