//! Google Custom Search client. Returns raw result items; relevance filtering and
//! classification live with the domain modules that consume them.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::analysis::formations::{formation_query, FormationSearch};
use crate::errors::AppError;

const SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";
/// The API never returns more than 10 items per request.
pub const MAX_RESULTS_PER_QUERY: u32 = 10;
/// Items fetched per missing skill when looking for formations.
const FORMATION_RESULTS_PER_SKILL: u32 = 3;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One search-engine result. Missing fields deserialize to `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, rename = "displayLink")]
    pub display_link: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    api_key: String,
    engine_id: String,
}

impl SearchClient {
    pub fn new(api_key: String, engine_id: String) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_key,
            engine_id,
        })
    }

    /// Runs one query; `num` is clamped to `1..=MAX_RESULTS_PER_QUERY`.
    pub async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchItem>, SearchError> {
        let num = num.clamp(1, MAX_RESULTS_PER_QUERY).to_string();

        let response = self
            .client
            .get(SEARCH_API_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        info!("Search returned {} items", parsed.items.len());
        Ok(parsed.items)
    }
}

#[async_trait]
impl FormationSearch for SearchClient {
    async fn search_formations(&self, skill: &str) -> Result<Vec<SearchItem>, AppError> {
        info!("Searching formations for: {skill}");
        self.search(&formation_query(skill), FORMATION_RESULTS_PER_SKILL)
            .await
            .map_err(AppError::from)
    }
}
