use std::sync::Arc;

use crate::application::ports::{ChatClient, ChatClientError};
use crate::domain::{Message, Session};

/// Fixed system persona for the helpdesk assistant.
pub const PERSONA: &str = "You are BLR Pulse, a virtual assistant at Kempegowda International Airport (Bangalore). \
You provide real-time flight information, airport navigation, travel assistance, dining and shopping suggestions, \
and help with transportation. Offer clear and helpful responses tailored to the needs of travelers at BLR Airport. \
Be friendly, calm, and efficient, ensuring a seamless airport experience.";

/// Builds the single-turn message sequence: one system entry carrying the
/// persona and the labeled context, then one user entry with the question.
/// The context label is emitted even when the context is empty.
pub fn assemble_prompt(question: &str, context: &str) -> Vec<Message> {
    vec![
        Message::system(format!("{PERSONA}\n\nContext: {context}")),
        Message::user(question),
    ]
}

pub struct AssistantService<C>
where
    C: ChatClient,
{
    chat_client: Arc<C>,
}

impl<C> AssistantService<C>
where
    C: ChatClient,
{
    pub fn new(chat_client: Arc<C>) -> Self {
        Self { chat_client }
    }

    #[tracing::instrument(skip(self, session), fields(has_image = session.has_image()))]
    pub async fn answer(
        &self,
        question: &str,
        session: &Session,
    ) -> Result<String, AssistantError> {
        let messages = assemble_prompt(question, session.context());
        let answer = self
            .chat_client
            .complete(&messages, session.image_path())
            .await?;
        Ok(answer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("completion: {0}")]
    Completion(#[from] ChatClientError),
}
