use async_trait::async_trait;

use crate::domain::{Document, StagedImage};

/// Normalizes an uploaded image to PNG and stages it on disk for attachment
/// to a vision request.
#[async_trait]
pub trait ImageStager: Send + Sync {
    async fn stage(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<StagedImage, ImageStagerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageStagerError {
    #[error("image decode failed: {0}")]
    DecodeFailed(String),
    #[error("staging failed: {0}")]
    StagingFailed(String),
}
