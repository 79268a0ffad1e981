mod chat_client;
mod file_loader;
mod image_stager;
mod search_client;

pub use chat_client::{ChatClient, ChatClientError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use image_stager::{ImageStager, ImageStagerError};
pub use search_client::{SearchClient, SearchClientError, SearchResult};
