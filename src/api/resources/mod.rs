//
//  gocd-client
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GoCD Resource Model
//!
//! Typed, version-independent representations of the objects the GoCD API
//! exchanges. Most resources carry:
//!
//! - an optional [`HalLinks`](crate::api::common::HalLinks) envelope, `None`
//!   until the value has been fetched (see [`HalContainer`])
//! - an optimistic-concurrency token read from the `ETag` header and sent
//!   back as `If-Match` on update (see [`Versioned`])
//!
//! Polymorphic fields are closed enums dispatched on the wire `type`
//! discriminator: [`Material`] and [`Task`].

/// Implements [`HalContainer`] for structs with a `links` field.
macro_rules! impl_hal_container {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::api::resources::HalContainer for $ty {
                fn links(&self) -> Option<&$crate::api::common::HalLinks> {
                    self.links.as_ref()
                }

                fn set_links(&mut self, links: Option<$crate::api::common::HalLinks>) {
                    self.links = links;
                }
            }
        )+
    };
}

/// Implements [`Versioned`] for structs with a `version` field.
macro_rules! impl_versioned {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::api::resources::Versioned for $ty {
                fn version(&self) -> &str {
                    &self.version
                }

                fn set_version(&mut self, version: String) {
                    self.version = version;
                }
            }
        )+
    };
}

pub(crate) use impl_hal_container;
pub(crate) use impl_versioned;

pub mod agent;
pub mod config_repo;
pub mod encryption;
pub mod environment;
pub mod job;
pub mod material;
pub mod pipeline;
pub mod pipeline_group;
pub mod plugin;
pub mod role;
pub mod scheduled_job;
pub mod stage;
pub mod task;
pub mod template;

pub use agent::*;
pub use config_repo::*;
pub use encryption::*;
pub use environment::*;
pub use job::*;
pub use material::*;
pub use pipeline::*;
pub use pipeline_group::*;
pub use plugin::*;
pub use role::*;
pub use scheduled_job::*;
pub use stage::*;
pub use task::*;
pub use template::*;

use thiserror::Error;

use crate::api::common::HalLinks;

/// Local failures raised by the resource model before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("missing task attribute type")]
    MissingTaskType,

    #[error("unexpected task attribute type '{0}'")]
    UnexpectedTaskType(String),

    #[error("invalid attributes for '{kind}' task: {reason}")]
    InvalidTaskAttributes { kind: String, reason: String },

    #[error("`{task}` task requires `{field}`")]
    MissingTaskField {
        task: &'static str,
        field: &'static str,
    },

    #[error("missing material type")]
    MissingMaterialType,

    #[error("unexpected material type '{0}'")]
    UnknownMaterialType(String),

    #[error("can only compare with same material type")]
    MaterialTypeMismatch,

    #[error("`{0}.name` is empty")]
    EmptyName(&'static str),

    #[error("At least one `Job` must be specified")]
    NoJobs,
}

/// Resources that carry a `_links` envelope.
pub trait HalContainer {
    fn links(&self) -> Option<&HalLinks>;

    fn set_links(&mut self, links: Option<HalLinks>);

    /// Drops the envelope so values fetched from different servers compare
    /// equal on their domain fields.
    fn remove_links(&mut self) {
        self.set_links(None);
    }
}

/// Resources updated with optimistic concurrency.
pub trait Versioned {
    fn version(&self) -> &str;

    fn set_version(&mut self, version: String);
}

/// Pipelines and templates: named owners of an ordered stage list.
pub trait StageContainer {
    fn name(&self) -> &str;

    fn stages(&self) -> &[Stage];

    fn stages_mut(&mut self) -> &mut Vec<Stage>;

    fn add_stage(&mut self, stage: Stage) {
        self.stages_mut().push(stage);
    }

    fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages().iter().find(|s| s.name == name)
    }

    /// Replaces the stage with the same name, or appends it.
    fn set_stage(&mut self, stage: Stage) {
        let stages = self.stages_mut();
        match stages.iter_mut().find(|s| s.name == stage.name) {
            Some(existing) => *existing = stage,
            None => stages.push(stage),
        }
    }

    fn set_stages(&mut self, stages: Vec<Stage>) {
        *self.stages_mut() = stages;
    }
}

/// serde helper: skip `false` booleans.
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// serde helper: decode an explicit `null` as the default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
