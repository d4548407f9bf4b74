use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};

use super::interface::VisionInterface;
use crate::azure::SUBSCRIPTION_KEY_HEADER;
use crate::error::RemoteServiceError;

const DESCRIBE_PARAMS: &[(&str, &str)] = &[("maxCandidates", "1")];
const ANALYZE_PARAMS: &[(&str, &str)] = &[
    ("visualFeatures", "Categories"),
    ("details", "Celebrities"),
    ("language", "en"),
];

/// Computer Vision v2.0 client.
pub struct AzureVisionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AzureVisionClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        debug!("Initialized AzureVisionClient: base_url={}", base_url);
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn post_image(
        &self,
        operation: &str,
        params: &[(&str, &str)],
        image: &[u8],
    ) -> Result<String, RemoteServiceError> {
        let url = format!("{}/vision/v2.0/{}", self.base_url, operation);
        debug!(operation, bytes = image.len(), "Sending image to vision service");

        let response = self
            .client
            .post(&url)
            .query(params)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .body(image.to_vec())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "Vision service rejected request");
            return Err(RemoteServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl VisionInterface for AzureVisionClient {
    async fn describe(&self, image: &[u8]) -> Result<String, RemoteServiceError> {
        self.post_image("describe", DESCRIBE_PARAMS, image).await
    }

    async fn analyze(&self, image: &[u8]) -> Result<String, RemoteServiceError> {
        self.post_image("analyze", ANALYZE_PARAMS, image).await
    }
}
