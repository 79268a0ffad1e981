use std::io::{Cursor, Write};

use async_trait::async_trait;
use image::ImageFormat;

use crate::application::ports::{ImageStager, ImageStagerError};
use crate::domain::{ContentType, Document, StagedImage};

/// Decodes an uploaded image and re-encodes it as PNG into a named temp
/// file, so the vision request always attaches a single known format.
#[derive(Default)]
pub struct PngImageStager;

impl PngImageStager {
    pub fn new() -> Self {
        Self
    }

    fn stage_blocking(data: &[u8]) -> Result<StagedImage, ImageStagerError> {
        let img = image::load_from_memory(data)
            .map_err(|e| ImageStagerError::DecodeFailed(e.to_string()))?;

        let mut png_bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| ImageStagerError::StagingFailed(format!("PNG encode failed: {e}")))?;

        let mut temp_file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| ImageStagerError::StagingFailed(format!("temp file failed: {e}")))?;

        temp_file
            .write_all(&png_bytes)
            .and_then(|_| temp_file.flush())
            .map_err(|e| ImageStagerError::StagingFailed(format!("temp file write failed: {e}")))?;

        Ok(StagedImage::new(temp_file))
    }
}

#[async_trait]
impl ImageStager for PngImageStager {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn stage(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<StagedImage, ImageStagerError> {
        if document.content_type != ContentType::Image {
            return Err(ImageStagerError::DecodeFailed(format!(
                "not an image upload: {}",
                document.content_type.as_mime()
            )));
        }

        let bytes = data.to_vec();
        let staged = tokio::task::spawn_blocking(move || Self::stage_blocking(&bytes))
            .await
            .map_err(|e| ImageStagerError::StagingFailed(format!("task join error: {e}")))??;

        tracing::info!(path = %staged.path().display(), "Image normalized to PNG");
        Ok(staged)
    }
}
