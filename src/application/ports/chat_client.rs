use std::path::Path;

use async_trait::async_trait;

use crate::domain::Message;

/// Chat-completion backend. One request per call, no retained state.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the message sequence, optionally attaching the image at `image`,
    /// and returns the assistant's reply text.
    async fn complete(
        &self,
        messages: &[Message],
        image: Option<&Path>,
    ) -> Result<String, ChatClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChatClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("attachment unreadable: {0}")]
    AttachmentUnreadable(String),
}
