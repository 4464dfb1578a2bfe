//! HTTP category source backed by a jService-style trivia API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use trivia_core::{CategoryDetail, CategoryId, CategorySource, CategorySummary, TriviaError};

/// Talks to `GET {base}categories?count=N` and `GET {base}category?id=ID`.
#[derive(Debug, Clone)]
pub struct JServiceSource {
    base_url: String,
    client: Client,
}

impl JServiceSource {
    /// `base_url` must end with `/`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TriviaError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(network_error)?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn categories_url(&self, count: usize) -> String {
        format!("{}categories?count={}", self.base_url, count)
    }

    pub fn category_url(&self, id: CategoryId) -> String {
        format!("{}category?id={}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, TriviaError> {
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            network_error(e)
        })?;

        let response = response.error_for_status().map_err(|e| {
            warn!(%url, error = %e, "upstream returned an error status");
            network_error(e)
        })?;

        response.json::<T>().await.map_err(network_error)
    }
}

impl CategorySource for JServiceSource {
    #[instrument(skip(self))]
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>, TriviaError> {
        let pool: Vec<CategorySummary> = self.get_json(self.categories_url(count)).await?;
        debug!(received = pool.len(), "fetched category pool");
        Ok(pool)
    }

    #[instrument(skip(self))]
    async fn category(&self, id: CategoryId) -> Result<CategoryDetail, TriviaError> {
        let detail: CategoryDetail = self.get_json(self.category_url(id)).await?;
        debug!(title = %detail.title, clues = detail.clues.len(), "fetched category");
        Ok(detail)
    }
}

fn network_error(e: reqwest::Error) -> TriviaError {
    TriviaError::Network(e.to_string())
}
