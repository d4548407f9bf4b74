use serde_json::Value;
use tracing::{debug, warn};

use super::language::TargetLanguage;
use crate::error::{PipelineError, PipelineResult};
use crate::translate::TranslateInterface;
use crate::vision::VisionInterface;

/// Caption the image, then translate every caption in place.
///
/// A vision failure or an unexpected response shape aborts the run. A failed
/// translation only replaces that caption's text with `fallback`.
pub async fn describe_image(
    vision: &dyn VisionInterface,
    translator: &dyn TranslateInterface,
    image: &[u8],
    lang: &TargetLanguage,
    fallback: &str,
) -> PipelineResult<String> {
    let raw = vision.describe(image).await?;
    let mut result: Value = serde_json::from_str(&raw)?;
    translate_captions(&mut result, translator, lang, fallback).await?;
    Ok(serde_json::to_string(&result)?)
}

async fn translate_captions(
    result: &mut Value,
    translator: &dyn TranslateInterface,
    lang: &TargetLanguage,
    fallback: &str,
) -> PipelineResult<()> {
    let captions = result
        .pointer_mut("/description/captions")
        .and_then(Value::as_array_mut)
        .ok_or(PipelineError::MissingCaptions)?;
    debug!(count = captions.len(), %lang, "Translating captions");

    for (index, caption) in captions.iter_mut().enumerate() {
        let text = caption
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(PipelineError::MissingCaptionText(index))?;

        let translated = match translator.translate(&text, lang.as_str()).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(index, error = %e, "Caption translation failed, using fallback");
                fallback.to_string()
            }
        };
        caption["text"] = Value::String(translated);
    }
    Ok(())
}
