use std::sync::Arc;

use reqwest::{Client, ClientBuilder};

use crate::config::Config;
use crate::translate::{AzureTranslatorClient, TranslateInterface};
use crate::vision::{AzureVisionClient, VisionInterface};

/// Per-process state shared by every handler. Nothing in here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub vision: Arc<dyn VisionInterface>,
    pub translator: Arc<dyn TranslateInterface>,
}

impl AppState {
    /// Build the real service clients over one pooled HTTP client.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_client_builder(config, Client::builder())
    }

    /// Same as [`AppState::new`], starting from a caller-supplied builder.
    /// The configured request timeout is always applied.
    pub fn with_client_builder(config: Config, builder: ClientBuilder) -> anyhow::Result<Self> {
        let client = builder.timeout(config.request_timeout()).build()?;

        let vision = Arc::new(AzureVisionClient::new(
            client.clone(),
            &config.service_config.vision_base_url,
            &config.vision_key,
        ));
        let translator = Arc::new(AzureTranslatorClient::new(
            client,
            &config.service_config.translator_base_url,
            &config.translator_key,
        ));

        Ok(Self::with_services(config, vision, translator))
    }

    pub fn with_services(
        config: Config,
        vision: Arc<dyn VisionInterface>,
        translator: Arc<dyn TranslateInterface>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            vision,
            translator,
        }
    }

    pub fn translation_fallback(&self) -> &str {
        &self.config.service_config.translation_fallback
    }
}
