use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatClient, FileLoader, ImageStager, SearchClient};
use crate::presentation::state::AppState;

/// Display cap; the search client itself returns the backend's full list.
const MAX_DISPLAY_RESULTS: usize = 5;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultBody>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct SearchResultBody {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, params), fields(query = %params.q))]
pub async fn search_handler<F, I, C, S>(
    State(state): State<AppState<F, I, C, S>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    I: ImageStager + 'static,
    C: ChatClient + 'static,
    S: SearchClient + 'static,
{
    let query = params.q.trim();

    if query.is_empty() {
        tracing::warn!("Search request with empty query");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No search query provided".to_string(),
            }),
        )
            .into_response();
    }

    match state.search_client.search(query).await {
        Ok(results) => {
            let total = results.len();
            let displayed: Vec<SearchResultBody> = results
                .into_iter()
                .take(MAX_DISPLAY_RESULTS)
                .map(|r| SearchResultBody {
                    title: r.title,
                    link: r.link,
                    snippet: r.snippet,
                })
                .collect();

            tracing::info!(total, displayed = displayed.len(), "Search successful");
            (
                StatusCode::OK,
                Json(SearchResponse {
                    results: displayed,
                    total,
                }),
            )
                .into_response()
        }
        Err(e) => {
            // A backend failure is not the same as an empty result list.
            tracing::error!(error = %e, "Search failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Search failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
