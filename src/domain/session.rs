use std::path::Path;

use super::StagedImage;

/// Holds whatever context the current upload produced: extracted text or a
/// staged image, never both. Each upload replaces the previous state
/// wholesale, which also drops (and deletes) any previously staged image.
#[derive(Debug, Default)]
pub struct Session {
    context: String,
    staged_image: Option<StagedImage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_with_text(&mut self, context: String) {
        self.context = context;
        self.staged_image = None;
    }

    pub fn replace_with_image(&mut self, image: StagedImage) {
        self.context = String::new();
        self.staged_image = Some(image);
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.staged_image.as_ref().map(StagedImage::path)
    }

    pub fn has_image(&self) -> bool {
        self.staged_image.is_some()
    }
}
