use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{SearchClient, SearchClientError, SearchResult};
use crate::presentation::config::SearchSettings;

pub struct GoogleSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

#[derive(Deserialize)]
struct CustomSearchResponse {
    // Absent when the engine reports no matches.
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Deserialize)]
struct CustomSearchItem {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleSearchClient {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            engine_id: settings.engine_id.clone(),
        }
    }
}

#[async_trait]
impl SearchClient for GoogleSearchClient {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchClientError> {
        let response = self
            .client
            .get(self.base_url.as_str())
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| SearchClientError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: CustomSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchClientError::InvalidResponse(e.to_string()))?;

        let results: Vec<SearchResult> = body
            .items
            .into_iter()
            .map(|item| SearchResult {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
            })
            .collect();

        tracing::info!(count = results.len(), "Search results received");
        Ok(results)
    }
}
