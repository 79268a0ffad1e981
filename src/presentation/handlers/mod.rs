mod chat;
mod health;
mod search;
mod upload;

pub use chat::chat_handler;
pub use health::health_handler;
pub use search::search_handler;
pub use upload::upload_handler;
