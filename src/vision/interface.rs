use async_trait::async_trait;

use crate::error::RemoteServiceError;

/// Image analysis backed by a remote vision service.
///
/// Both operations return the service's response body verbatim; parsing is
/// left to the pipelines.
#[async_trait]
pub trait VisionInterface: Send + Sync {
    /// Caption the image (at most one candidate).
    async fn describe(&self, image: &[u8]) -> Result<String, RemoteServiceError>;

    /// Categorize the image with celebrity details.
    async fn analyze(&self, image: &[u8]) -> Result<String, RemoteServiceError>;
}
