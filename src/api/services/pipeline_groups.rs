//
//  gocd-client
//  api/services/pipeline_groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use tokio_util::sync::CancellationToken;

use crate::api::common::ApiError;
use crate::api::resources::PipelineGroups;
use crate::api::version::ApiVersion;

service!(
    /// Read-only view of pipeline groups from `/api/config/pipeline_groups`.
    PipelineGroupsService
);

impl PipelineGroupsService<'_> {
    /// Lists groups, keeping only the one called `name` unless it is empty.
    ///
    /// This endpoint predates API versioning and always speaks plain JSON.
    pub async fn list(&self, cancel: &CancellationToken, name: &str) -> Result<PipelineGroups, ApiError> {
        let groups: PipelineGroups = self
            .client
            .get(cancel, "api/config/pipeline_groups", Some(ApiVersion::V0))
            .await?;
        Ok(groups.filter_by_name(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::resources::pipeline_group::tests::GROUPS_BODY;
    use crate::api::GocdClient;
    use mockito::Server;
    use pretty_assertions::assert_eq;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_list_all_groups() {
        let mut server = Server::new_async().await;
        let version = server.mock("GET", "/api/version").expect(0).create_async().await;
        let _mock = server
            .mock("GET", "/api/config/pipeline_groups")
            .match_header("accept", "application/json")
            .with_body(GROUPS_BODY)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let groups = client
            .pipeline_groups()
            .list(&CancellationToken::new(), "")
            .await
            .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups.group_by_pipeline_name("up42").map(|g| g.name.as_str()),
            Some("first")
        );
        version.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_filtered() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/config/pipeline_groups")
            .with_body(GROUPS_BODY)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let groups = client
            .pipeline_groups()
            .list(&CancellationToken::new(), "first")
            .await
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.0[0].name, "first");
    }
}
