use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ChatClient, FileLoader, ImageStager, SearchClient};
use crate::presentation::handlers::{chat_handler, health_handler, search_handler, upload_handler};
use crate::presentation::state::AppState;

pub fn create_router<F, I, C, S>(state: AppState<F, I, C, S>) -> Router
where
    F: FileLoader + 'static,
    I: ImageStager + 'static,
    C: ChatClient + 'static,
    S: SearchClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/upload", post(upload_handler::<F, I, C, S>))
        .route("/api/v1/chat", post(chat_handler::<F, I, C, S>))
        .route("/api/v1/search", get(search_handler::<F, I, C, S>))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
