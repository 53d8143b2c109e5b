/*!
 * Clients for the external services the tool talks to.
 *
 * - `omdb`: title + year lookups against OMDb, yielding IMDb identifiers
 * - `imdb`: rating submission through the IMDb GraphQL API
 * - `mock`: scripted in-memory implementations for tests and dry runs
 *
 * The resolver and the record processor only depend on the two traits below,
 * so any implementation can be swapped in.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::{ProviderError, SearchError};
use crate::models::CatalogMatch;

/// Title lookup against a movie catalog
#[async_trait]
pub trait CatalogSearch: Send + Sync + Debug {
    /// Perform exactly one lookup.
    ///
    /// # Arguments
    /// * `title` - Query title, sent verbatim
    /// * `year` - Release year; omitted from the request when `None`
    ///
    /// # Returns
    /// * `Ok(CatalogMatch)` on a hit, `SearchError::NotFound` when the catalog
    ///   explicitly reports no match, `SearchError::ServiceError` otherwise
    async fn search(&self, title: &str, year: Option<u16>) -> Result<CatalogMatch, SearchError>;
}

/// Rating write to the rating service
#[async_trait]
pub trait RatingSubmitter: Send + Sync + Debug {
    /// Set the user's rating (1-10) for the given external identifier
    async fn submit_rating(&self, external_id: &str, rating: u8) -> Result<(), ProviderError>;
}

pub mod omdb;
pub mod imdb;
pub mod mock;
