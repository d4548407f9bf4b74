use serde_json::Value;

use crate::error::PipelineResult;
use crate::vision::VisionInterface;

/// Run celebrity analysis and pass the result through.
///
/// The body is parsed and re-serialized so a non-JSON reply counts as a
/// failure; no field is inspected.
pub async fn find_celebrity(vision: &dyn VisionInterface, image: &[u8]) -> PipelineResult<String> {
    let raw = vision.analyze(image).await?;
    let result: Value = serde_json::from_str(&raw)?;
    Ok(serde_json::to_string(&result)?)
}
