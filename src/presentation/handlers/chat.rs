use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatClient, FileLoader, ImageStager, SearchClient};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn chat_handler<F, I, C, S>(
    State(state): State<AppState<F, I, C, S>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    I: ImageStager + 'static,
    C: ChatClient + 'static,
    S: SearchClient + 'static,
{
    let message = request.message.trim();

    if message.is_empty() {
        tracing::warn!("Chat request with empty user message");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No user message provided".to_string(),
            }),
        )
            .into_response();
    }

    let session = state.session.read().await;
    match state.assistant_service.answer(message, &session).await {
        Ok(answer) => {
            tracing::info!("Chat completion successful");
            (StatusCode::OK, Json(ChatResponse { answer })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat completion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Chat failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
