//
//  gocd-client
//  api/services/encryption.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use tokio_util::sync::CancellationToken;

use crate::api::common::ApiError;
use crate::api::resources::{CipherText, EncryptRequest};

service!(
    /// Encrypts secrets with the server's cipher.
    EncryptionService
);

impl EncryptionService<'_> {
    /// Returns the server-side ciphertext for `plaintext`.
    pub async fn encrypt(
        &self,
        cancel: &CancellationToken,
        plaintext: &str,
    ) -> Result<CipherText, ApiError> {
        let version = self.client.api_version(cancel, "/api/admin/encrypt").await?;
        self.client
            .post(
                cancel,
                "api/admin/encrypt",
                Some(version),
                &EncryptRequest { value: plaintext },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::mock_version;
    use crate::api::GocdClient;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_encrypt() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "17.1.0").await;
        let mock = server
            .mock("POST", "/api/admin/encrypt")
            .match_header("accept", "application/vnd.go.cd.v1+json")
            .match_body(Matcher::Json(json!({"value": "badger"})))
            .with_body(
                json!({
                    "_links": {"doc": {"href": "https://api.gocd.org/#encryption"}},
                    "encrypted_value": "aSdiFgRRZ6A="
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let cipher = client
            .encryption()
            .encrypt(&CancellationToken::new(), "badger")
            .await
            .unwrap();

        assert_eq!(cipher.encrypted_value, "aSdiFgRRZ6A=");
        assert_eq!(
            cipher.links.unwrap()["Doc"].href,
            "https://api.gocd.org/#encryption"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_encrypt_failure_carries_message() {
        let mut server = Server::new_async().await;
        let _version = mock_version(&mut server, "17.1.0").await;
        let _mock = server
            .mock("POST", "/api/admin/encrypt")
            .with_status(401)
            .with_body(r#"{"message": "You are not authorized to perform this action."}"#)
            .create_async()
            .await;

        let client = GocdClient::new(&server.url()).unwrap();
        let err = client
            .encryption()
            .encrypt(&CancellationToken::new(), "badger")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Received HTTP Status '401 Unauthorized': You are not authorized to perform this action."
        );
    }
}
