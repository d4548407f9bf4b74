use async_trait::async_trait;

use crate::error::TranslationError;

/// Single-string translation backed by a remote service.
#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Translate `text` into `target_lang`. The language code is passed
    /// through to the service unchecked.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError>;
}
