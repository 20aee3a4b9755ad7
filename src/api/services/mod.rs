//
//  gocd-client
//  api/services/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Service Facades
//!
//! One facade per GoCD resource family, borrowed from a [`GocdClient`]:
//!
//! ```rust,no_run
//! use gocd_client::api::GocdClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), gocd_client::api::ApiError> {
//! let client = GocdClient::new("https://ci.example.com/go/")?;
//! let cancel = CancellationToken::new();
//!
//! for agent in client.agents().list(&cancel).await? {
//!     println!("{} {}", agent.uuid, agent.hostname);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every call resolves the revision the live server speaks for its endpoint
//! before sending, so the same code works against servers from 14.x to 20.x.
//! Reads of versioned resources copy the `ETag` onto the returned value and
//! updates send it back as `If-Match`.

/// Declares a facade struct borrowing the client.
macro_rules! service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            client: &'a $crate::api::GocdClient,
        }

        impl<'a> $name<'a> {
            pub fn new(client: &'a $crate::api::GocdClient) -> Self {
                Self { client }
            }
        }
    };
}

pub mod agents;
pub mod config_repos;
pub mod encryption;
pub mod environments;
pub mod jobs;
pub mod pipeline_configs;
pub mod pipeline_groups;
pub mod pipelines;
pub mod plugins;
pub mod roles;
pub mod server;
pub mod templates;

pub use agents::AgentsService;
pub use config_repos::ConfigReposService;
pub use encryption::EncryptionService;
pub use environments::EnvironmentsService;
pub use jobs::JobsService;
pub use pipeline_configs::PipelineConfigsService;
pub use pipeline_groups::PipelineGroupsService;
pub use pipelines::PipelinesService;
pub use plugins::PluginsService;
pub use roles::RolesService;
pub use server::{ConfigXml, ServerService};
pub use templates::TemplatesService;

use super::client::GocdClient;
use super::request::ApiResponse;
use serde::Serialize;
use serde_json::Value;

use super::common::ApiError;
use super::resources::Versioned;

impl GocdClient {
    pub fn agents(&self) -> AgentsService<'_> {
        AgentsService::new(self)
    }

    pub fn config_repos(&self) -> ConfigReposService<'_> {
        ConfigReposService::new(self)
    }

    pub fn encryption(&self) -> EncryptionService<'_> {
        EncryptionService::new(self)
    }

    pub fn environments(&self) -> EnvironmentsService<'_> {
        EnvironmentsService::new(self)
    }

    pub fn jobs(&self) -> JobsService<'_> {
        JobsService::new(self)
    }

    pub fn pipeline_configs(&self) -> PipelineConfigsService<'_> {
        PipelineConfigsService::new(self)
    }

    pub fn pipeline_groups(&self) -> PipelineGroupsService<'_> {
        PipelineGroupsService::new(self)
    }

    pub fn pipelines(&self) -> PipelinesService<'_> {
        PipelinesService::new(self)
    }

    pub fn plugins(&self) -> PluginsService<'_> {
        PluginsService::new(self)
    }

    pub fn roles(&self) -> RolesService<'_> {
        RolesService::new(self)
    }

    pub fn server(&self) -> ServerService<'_> {
        ServerService::new(self)
    }

    pub fn templates(&self) -> TemplatesService<'_> {
        TemplatesService::new(self)
    }
}

/// Copies the response `ETag`, if any, onto `resource`.
pub(crate) fn with_etag<T: Versioned>(mut resource: T, response: &ApiResponse) -> T {
    if let Some(etag) = response.etag() {
        resource.set_version(etag);
    }
    resource
}

/// Serializes `resource` as a request body, without its `_links`.
pub(crate) fn write_body<T: Serialize + ?Sized>(resource: &T) -> Result<Value, ApiError> {
    let mut body = serde_json::to_value(resource)?;
    if let Value::Object(map) = &mut body {
        map.shift_remove("_links");
    }
    Ok(body)
}

/// The `message` field of a JSON acknowledgement, or empty.
pub(crate) fn message_of(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
