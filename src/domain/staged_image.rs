use std::path::Path;

use tempfile::NamedTempFile;

/// A normalized PNG copy of an uploaded image, staged in a named temp file
/// for attachment to a vision request.
///
/// The backing file is deleted when the value is dropped, so a staged image
/// lives exactly as long as the session slot holding it.
#[derive(Debug)]
pub struct StagedImage {
    file: NamedTempFile,
}

impl StagedImage {
    pub fn new(file: NamedTempFile) -> Self {
        Self { file }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
