//
//  gocd-client
//  api/services/plugins.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use tokio_util::sync::CancellationToken;

use crate::api::common::ApiError;
use crate::api::resources::{Plugin, PluginsResponse};

service!(
    /// Installed plugin information.
    PluginsService
);

impl PluginsService<'_> {
    pub async fn list(&self, cancel: &CancellationToken) -> Result<PluginsResponse, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/plugin_info").await?;
        self.client
            .get(cancel, "api/admin/plugin_info", Some(version))
            .await
    }

    pub async fn get(&self, cancel: &CancellationToken, id: &str) -> Result<Plugin, ApiError> {
        let version = self
            .client
            .api_version(cancel, "/api/admin/plugin_info/:plugin_id")
            .await?;
        self.client
            .get(cancel, &format!("api/admin/plugin_info/{id}"), Some(version))
            .await
    }
}
