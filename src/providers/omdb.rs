use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::errors::SearchError;
use crate::models::CatalogMatch;
use crate::providers::CatalogSearch;

/// Public OMDb endpoint
pub const DEFAULT_OMDB_ENDPOINT: &str = "https://www.omdbapi.com/";

/// Error text OMDb uses for an explicit "no such title" answer
const MOVIE_NOT_FOUND_ERROR: &str = "Movie not found!";

/// OMDb client for resolving titles to IMDb identifiers
#[derive(Debug)]
pub struct Omdb {
    /// HTTP client for API requests
    client: Client,
    /// API key sent with every request
    api_key: String,
    /// Base endpoint URL
    endpoint: String,
}

/// Title lookup response (`?t=` queries)
#[derive(Debug, Deserialize)]
pub struct OmdbResponse {
    /// "True" or "False"
    #[serde(rename = "Response", default)]
    pub response: String,

    /// IMDb identifier of the matched title
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,

    /// Title as OMDb spells it
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,

    /// Error message when `response` is "False"
    #[serde(rename = "Error", default)]
    pub error: String,
}

impl Omdb {
    /// Create a new OMDb client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the lookup URL; `y` is only present when a year is known
    pub fn build_search_url(&self, title: &str, year: Option<u16>) -> Result<Url, SearchError> {
        let endpoint = if self.endpoint.is_empty() {
            DEFAULT_OMDB_ENDPOINT
        } else {
            self.endpoint.as_str()
        };

        let mut params = vec![("apikey", self.api_key.clone()), ("t", title.to_string())];
        if let Some(year) = year {
            params.push(("y", year.to_string()));
        }

        Url::parse_with_params(endpoint, &params)
            .map_err(|e| SearchError::ServiceError(format!("invalid OMDb endpoint '{}': {}", endpoint, e)))
    }

    /// Map an HTTP status and body onto the search result taxonomy
    pub fn classify_response(status: StatusCode, body: &str) -> Result<CatalogMatch, SearchError> {
        let parsed = serde_json::from_str::<OmdbResponse>(body);

        if !status.is_success() {
            let detail = match &parsed {
                Ok(response) if !response.error.is_empty() => response.error.clone(),
                _ => body.chars().take(200).collect(),
            };
            return Err(SearchError::ServiceError(format!("OMDb API error ({}): {}", status, detail)));
        }

        let response = parsed
            .map_err(|e| SearchError::ServiceError(format!("Failed to decode OMDb API response: {}", e)))?;

        if response.response != "True" {
            if response.error == MOVIE_NOT_FOUND_ERROR {
                return Err(SearchError::NotFound);
            }
            return Err(SearchError::ServiceError(format!("OMDb API error: {}", response.error)));
        }

        if response.imdb_id.is_empty() {
            return Err(SearchError::ServiceError("OMDb API returned a match without imdbID".to_string()));
        }

        Ok(CatalogMatch::new(response.imdb_id, response.title))
    }
}

#[async_trait]
impl CatalogSearch for Omdb {
    async fn search(&self, title: &str, year: Option<u16>) -> Result<CatalogMatch, SearchError> {
        let url = self.build_search_url(title, year)?;
        debug!("OMDb lookup: '{}' ({})", title, year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()));

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| {
                error!("OMDb API request error for '{}': {}", title, e);
                SearchError::ServiceError(format!("OMDb API request error: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| SearchError::ServiceError(format!("Failed to read OMDb API response: {}", e)))?;

        Self::classify_response(status, &body)
    }
}
