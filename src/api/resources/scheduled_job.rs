//
//  gocd-client
//  api/resources/scheduled_job.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jobs waiting for an agent, from the XML feed at
//! `/api/jobs/scheduled.xml`:
//!
//! ```xml
//! <scheduledJobs>
//!   <job name="job1" id="6">
//!     <link rel="self" href="https://ci.example.com/go/tab/build/detail/mypipeline/5/defaultStage/1/job1"/>
//!     <buildLocator>mypipeline/5/defaultStage/1/job1</buildLocator>
//!   </job>
//! </scheduledJobs>
//! ```

use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJobLink {
    #[serde(rename(deserialize = "@rel"), default)]
    pub rel: String,
    #[serde(rename(deserialize = "@href"), default)]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
    /// Numeric on the server but sent as an attribute string.
    #[serde(rename(deserialize = "@id"), default)]
    pub id: String,
    #[serde(rename(deserialize = "buildLocator"), default)]
    pub build_locator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<ScheduledJobLink>,
}

#[derive(Debug, Default, Deserialize)]
struct ScheduledJobs {
    #[serde(rename = "job", default)]
    jobs: Vec<ScheduledJob>,
}

impl ScheduledJob {
    /// Decodes a `<scheduledJobs>` document.
    pub fn parse_list(xml: &str) -> Result<Vec<ScheduledJob>, ApiError> {
        if xml.trim().is_empty() {
            return Ok(Vec::new());
        }
        let document: ScheduledJobs = quick_xml::de::from_str(xml)?;
        Ok(document.jobs)
    }
}
