/*!
 * Error types for the kp2imdb application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::models::UncertainMatch;

/// Result of a single catalog lookup that did not produce a match
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The catalog explicitly reported that no title matches the query
    #[error("title not found")]
    NotFound,

    /// The catalog could not answer: transport failure, non-success status,
    /// undecodable body or an API-level error such as an exhausted quota
    #[error("catalog service error: {0}")]
    ServiceError(String),
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Terminal per-record failure surfaced to the operator.
///
/// Every processed record produces at most one of these. `UncertainMatch` is
/// reported even though the rating was submitted, so a human can double check it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    /// The record carries no usable 1-10 rating
    #[error("no rating")]
    NoRating,

    /// No catalog entry could be resolved for the record
    #[error("not found")]
    NotFound,

    /// The title was resolved but the rating write failed
    #[error("update rating")]
    UpdateRatingFailed,

    /// The catalog search service failed or refused further requests
    #[error("catalog service limit")]
    ServiceRateLimited,

    /// The rating was submitted for a match that needs manual verification
    #[error("maybe incorrect movie")]
    UncertainMatch(UncertainMatch),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while reading or writing JSON documents
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
