//! Storage object passthrough.

use crate::client::{SupabaseClient, response_error, transport_error};
use async_trait::async_trait;
use folio_core::error::Result;
use folio_core::gateway::ObjectStorage;

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<String> {
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        let request = self
            .http
            .post(self.storage_url(bucket, path))
            .header("Content-Type", content_type)
            .body(bytes);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(format!("{bucket}/{path}"))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.config.service_url
        )
    }
}
