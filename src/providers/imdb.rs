use std::time::Duration;
use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::RatingSubmitter;

/// Public IMDb GraphQL endpoint
pub const DEFAULT_IMDB_ENDPOINT: &str = "https://api.graphql.imdb.com/";

const UPDATE_RATING_MUTATION: &str = r#"
mutation UpdateTitleRating($rating: Int!, $titleId: ID!) {
  rateTitle(input: {rating: $rating, titleId: $titleId}) {
    rating {
      value
    }
  }
}"#;

/// IMDb client authenticated with a browser session cookie
#[derive(Debug)]
pub struct Imdb {
    /// HTTP client for API requests
    client: Client,
    /// Raw `cookie` header copied from a logged-in browser session
    cookie: String,
    /// GraphQL endpoint URL
    endpoint: String,
}

/// GraphQL request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    pub operation_name: String,
    pub variables: RateTitleVariables,
}

/// Variables of the `UpdateTitleRating` mutation
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateTitleVariables {
    pub rating: u8,
    pub title_id: String,
}

/// Minimal view of a GraphQL response; only errors are inspected
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,
}

impl GraphQLRequest {
    /// Build the rating mutation for one title
    pub fn update_rating(title_id: impl Into<String>, rating: u8) -> Self {
        Self {
            query: UPDATE_RATING_MUTATION.to_string(),
            operation_name: "UpdateTitleRating".to_string(),
            variables: RateTitleVariables {
                rating,
                title_id: title_id.into(),
            },
        }
    }
}

impl Imdb {
    /// Create a new IMDb client
    pub fn new(cookie: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            cookie: cookie.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Map an HTTP status and body onto success or a provider error
    pub fn check_response(status: StatusCode, body: &str) -> Result<(), ProviderError> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::AuthenticationError(format!("IMDb session rejected ({})", status)));
        }

        if status != StatusCode::OK {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let response: GraphQLResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(first) = response.errors.first() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: first.message.clone(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl RatingSubmitter for Imdb {
    async fn submit_rating(&self, external_id: &str, rating: u8) -> Result<(), ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            DEFAULT_IMDB_ENDPOINT
        } else {
            self.endpoint.as_str()
        };
        let request = GraphQLRequest::update_rating(external_id, rating);

        let response = self.client.post(api_url)
            .header(header::ACCEPT, "application/graphql+json, application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, &self.cookie)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Error sending rating request for {}: {}", external_id, e);
                ProviderError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read IMDb response: {}", e)))?;

        Self::check_response(status, &body).inspect_err(|e| {
            error!("IMDb rating update for {} failed: {}", external_id, e);
        })
    }
}
