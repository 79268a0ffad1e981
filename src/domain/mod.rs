mod document;
mod message;
mod session;
mod staged_image;

pub use document::{ContentType, Document, DocumentId};
pub use message::{Message, MessageRole};
pub use session::Session;
pub use staged_image::StagedImage;
