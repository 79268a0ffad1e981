use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatClient, ChatClientError};
use crate::domain::{Message, MessageRole};
use crate::presentation::config::LlmSettings;

pub struct OpenAiChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    vision_model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: WireContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiChatClient {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            chat_model: settings.chat_model.clone(),
            vision_model: settings.vision_model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }

    /// Model selection depends only on whether an image is attached.
    pub fn model_for(&self, has_image: bool) -> &str {
        if has_image {
            &self.vision_model
        } else {
            &self.chat_model
        }
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn build_wire_messages(
        &self,
        messages: &[Message],
        image: Option<&Path>,
    ) -> Result<Vec<WireMessage>, ChatClientError> {
        let data_url = match image {
            Some(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| ChatClientError::AttachmentUnreadable(e.to_string()))?;
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                Some(format!("data:image/png;base64,{encoded}"))
            }
            None => None,
        };

        let mut wire = Vec::with_capacity(messages.len());
        for message in messages {
            // The staged image rides along with the user entry.
            let content = match (&data_url, message.role) {
                (Some(url), MessageRole::User) => WireContent::Parts(vec![
                    ContentPart::Text {
                        text: message.content.clone(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: url.clone() },
                    },
                ]),
                _ => WireContent::Text(message.content.clone()),
            };
            wire.push(WireMessage {
                role: message.role.as_str(),
                content,
            });
        }

        Ok(wire)
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    #[tracing::instrument(skip(self, messages), fields(has_image = image.is_some()))]
    async fn complete(
        &self,
        messages: &[Message],
        image: Option<&Path>,
    ) -> Result<String, ChatClientError> {
        let model = self.model_for(image.is_some()).to_string();
        let wire_messages = self.build_wire_messages(messages, image).await?;

        let request_body = ChatCompletionRequest {
            model: model.clone(),
            messages: wire_messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| ChatClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatClientError::InvalidResponse(e.to_string()))?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ChatClientError::InvalidResponse("no choices in response".to_string()))?;

        tracing::debug!(model = %model, "Chat completion received");
        Ok(answer)
    }
}
