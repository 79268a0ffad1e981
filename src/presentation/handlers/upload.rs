use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{ChatClient, FileLoader, ImageStager, SearchClient};
use crate::application::services::ExtractedContext;
use crate::domain::{ContentType, Document};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<F, I, C, S>(
    State(state): State<AppState<F, I, C, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    I: ImageStager + 'static,
    C: ChatClient + 'static,
    S: SearchClient + 'static,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = field.file_name().unwrap_or("unknown").to_string();
    let content_type_str = field.content_type().unwrap_or("application/octet-stream");

    tracing::debug!(filename = %filename, content_type = %content_type_str, "Processing file upload");

    let content_type = match ContentType::from_mime(content_type_str) {
        Some(ct) => ct,
        None => {
            tracing::warn!(content_type = %content_type_str, "Unsupported file type");
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorResponse {
                    error: format!("Unsupported file type: {}", content_type_str),
                }),
            )
                .into_response();
        }
    };

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(bytes = data.len(), "File data received");

    let document = Document::new(filename.clone(), content_type, data.len() as u64);
    let doc_id = document.id;

    let extracted = match state.context_service.ingest(&data, &document).await {
        Ok(extracted) => extracted,
        Err(e) => {
            tracing::error!(error = %e, "Context extraction failed");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Could not process file: {}", e),
                }),
            )
                .into_response();
        }
    };

    // Each upload replaces the previous session context wholesale. Dropping a
    // previously staged image also deletes its temp file.
    let (kind, message) = match extracted {
        ExtractedContext::Text(text) => {
            let chars = text.len();
            state.session.write().await.replace_with_text(text);
            ("text", format!("Extracted {} characters of context", chars))
        }
        ExtractedContext::Image(staged) => {
            state.session.write().await.replace_with_image(staged);
            ("image", "Image staged for the next question".to_string())
        }
    };

    tracing::info!(
        document_id = %doc_id.as_uuid(),
        filename = %filename,
        kind,
        "Upload processed"
    );

    (
        StatusCode::OK,
        Json(UploadResponse {
            document_id: doc_id.as_uuid().to_string(),
            kind,
            message,
        }),
    )
        .into_response()
}
