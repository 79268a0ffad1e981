use std::sync::Arc;

use crate::application::ports::{
    FileLoader, FileLoaderError, ImageStager, ImageStagerError,
};
use crate::domain::{ContentType, Document, StagedImage};

/// Routes an uploaded file to the extractor matching its declared content
/// type. Text and PDF uploads yield extracted text; image uploads yield a
/// staged PNG. The two outcomes are mutually exclusive.
pub struct ContextService<F, I>
where
    F: FileLoader,
    I: ImageStager,
{
    file_loader: Arc<F>,
    image_stager: Arc<I>,
}

#[derive(Debug)]
pub enum ExtractedContext {
    Text(String),
    Image(StagedImage),
}

impl<F, I> ContextService<F, I>
where
    F: FileLoader,
    I: ImageStager,
{
    pub fn new(file_loader: Arc<F>, image_stager: Arc<I>) -> Self {
        Self {
            file_loader,
            image_stager,
        }
    }

    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            content_type = %document.content_type.as_mime(),
        )
    )]
    pub async fn ingest(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<ExtractedContext, ContextError> {
        match document.content_type {
            ContentType::Text | ContentType::Pdf => {
                let text = self.file_loader.extract_text(data, document).await?;
                tracing::info!(chars = text.len(), "Context extracted");
                Ok(ExtractedContext::Text(text))
            }
            ContentType::Image => {
                let staged = self.image_stager.stage(data, document).await?;
                tracing::info!(path = %staged.path().display(), "Image staged");
                Ok(ExtractedContext::Image(staged))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("extraction: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("staging: {0}")]
    Staging(#[from] ImageStagerError),
}
