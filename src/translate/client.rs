use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::interface::TranslateInterface;
use crate::azure::SUBSCRIPTION_KEY_HEADER;
use crate::error::TranslationError;

const API_VERSION: &str = "3.0";

/// Translator Text v3.0 client.
pub struct AzureTranslatorClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct TranslateItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResult {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

impl AzureTranslatorClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        debug!("Initialized AzureTranslatorClient: base_url={}", base_url);
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl TranslateInterface for AzureTranslatorClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let url = format!("{}/translate", self.base_url);
        let body = [TranslateItem { text }];

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", API_VERSION), ("to", target_lang)])
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(TranslationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Translator rejected request");
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let results: Vec<TranslateResult> =
            response.json().await.map_err(TranslationError::Decode)?;

        results
            .into_iter()
            .next()
            .and_then(|r| r.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or(TranslationError::Empty)
    }
}
