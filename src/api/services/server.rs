//
//  gocd-client
//  api/services/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::api::common::ApiError;
use crate::api::request::{ApiRequest, ResponseType};
use crate::api::version::ServerVersion;

const CONFIG_MD5_HEADER: &str = "X-CRUISE-CONFIG-MD5";

/// The raw server configuration and the checksum that guards edits to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigXml {
    pub xml: String,
    pub md5: String,
}

service!(
    /// Server-wide information.
    ServerService
);

impl ServerService<'_> {
    /// The server version, from the client cache when populated.
    pub async fn version(&self, cancel: &CancellationToken) -> Result<Arc<ServerVersion>, ApiError> {
        let (version, _) = self.client.server_version(cancel).await?;
        Ok(version)
    }

    /// Downloads `cruise-config.xml` with its `X-CRUISE-CONFIG-MD5`.
    pub async fn config_xml(&self, cancel: &CancellationToken) -> Result<ConfigXml, ApiError> {
        let request = ApiRequest::get("api/admin/config.xml")
            .header("Accept", "application/xml")
            .response_type(ResponseType::Text);
        let response = self.client.execute(cancel, request).await?;
        let md5 = response
            .header(CONFIG_MD5_HEADER)
            .ok_or(ApiError::MissingHeader(CONFIG_MD5_HEADER))?
            .to_string();
        Ok(ConfigXml {
            xml: response.body,
            md5,
        })
    }
}
