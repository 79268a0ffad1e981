use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Routes a text-bearing upload to the adapter for its content type. Image
/// uploads never reach this loader; they go through the image stager.
pub struct CompositeFileLoader {
    text_adapter: Arc<dyn FileLoader>,
    pdf_adapter: Arc<dyn FileLoader>,
}

impl CompositeFileLoader {
    pub fn new(text_adapter: Arc<dyn FileLoader>, pdf_adapter: Arc<dyn FileLoader>) -> Self {
        Self {
            text_adapter,
            pdf_adapter,
        }
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = match document.content_type {
            ContentType::Text => &self.text_adapter,
            ContentType::Pdf => &self.pdf_adapter,
            ContentType::Image => {
                return Err(FileLoaderError::UnsupportedContentType(
                    document.content_type.as_mime().to_string(),
                ));
            }
        };

        adapter.extract_text(data, document).await
    }
}
