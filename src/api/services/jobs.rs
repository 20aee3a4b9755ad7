//
//  gocd-client
//  api/services/jobs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use tokio_util::sync::CancellationToken;

use crate::api::common::ApiError;
use crate::api::request::{ApiRequest, ResponseType};
use crate::api::resources::ScheduledJob;

service!(
    /// The scheduled job queue.
    JobsService
);

impl JobsService<'_> {
    /// Jobs scheduled but not yet assigned to an agent. The feed is XML
    /// and unversioned.
    pub async fn list_scheduled(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<ScheduledJob>, ApiError> {
        let request = ApiRequest::get("api/jobs/scheduled.xml")
            .header("Accept", "application/xml")
            .response_type(ResponseType::Text);
        let response = self.client.execute(cancel, request).await?;
        let jobs = ScheduledJob::parse_list(&response.body)?;
        tracing::debug!(count = jobs.len(), "fetched scheduled jobs");
        Ok(jobs)
    }
}
