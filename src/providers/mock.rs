/*!
 * Mock provider implementations for testing.
 *
 * - `MockCatalog` answers lookups from a script keyed by (title, year) and
 *   reports `NotFound` for anything unscripted
 * - `MockRater` accepts or rejects rating submissions
 *
 * Both record every call so tests can assert how many requests were made and
 * in which order.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::{ProviderError, SearchError};
use crate::models::CatalogMatch;
use crate::providers::{CatalogSearch, RatingSubmitter};

/// One recorded catalog lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub title: String,
    pub year: Option<u16>,
}

/// Behavior mode for the mock catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogBehavior {
    /// Answer from the script, `NotFound` for unscripted queries
    Scripted,
    /// Every lookup fails with a service error
    Failing,
}

/// Scripted catalog for resolver tests
#[derive(Debug, Clone)]
pub struct MockCatalog {
    behavior: CatalogBehavior,
    script: HashMap<(String, Option<u16>), Result<CatalogMatch, SearchError>>,
    calls: Arc<Mutex<Vec<SearchCall>>>,
}

impl MockCatalog {
    /// Create an empty scripted catalog; every lookup is `NotFound` until scripted
    pub fn new() -> Self {
        Self {
            behavior: CatalogBehavior::Scripted,
            script: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a catalog whose every lookup fails with a service error
    pub fn failing() -> Self {
        Self {
            behavior: CatalogBehavior::Failing,
            ..Self::new()
        }
    }

    /// Answer `title` + `year` with a match
    pub fn with_match(
        mut self,
        title: &str,
        year: Option<u16>,
        external_id: &str,
        matched_title: &str,
    ) -> Self {
        self.script.insert(
            (title.to_string(), year),
            Ok(CatalogMatch::new(external_id, matched_title)),
        );
        self
    }

    /// Answer `title` + `year` with an error
    pub fn with_error(mut self, title: &str, year: Option<u16>, error: SearchError) -> Self {
        self.script.insert((title.to_string(), year), Err(error));
        self
    }

    /// All lookups made so far, in order
    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of lookups made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSearch for MockCatalog {
    async fn search(&self, title: &str, year: Option<u16>) -> Result<CatalogMatch, SearchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(SearchCall {
                title: title.to_string(),
                year,
            });
        }

        match self.behavior {
            CatalogBehavior::Failing => Err(SearchError::ServiceError(
                "Simulated catalog failure".to_string(),
            )),
            CatalogBehavior::Scripted => self
                .script
                .get(&(title.to_string(), year))
                .cloned()
                .unwrap_or(Err(SearchError::NotFound)),
        }
    }
}

/// Rating submitter that records submissions instead of sending them
#[derive(Debug, Clone, Default)]
pub struct MockRater {
    failing: bool,
    submissions: Arc<Mutex<Vec<(String, u8)>>>,
}

impl MockRater {
    /// Create a rater that accepts every submission
    pub fn working() -> Self {
        Self::default()
    }

    /// Create a rater that rejects every submission
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// All submissions received so far, in order
    pub fn submissions(&self) -> Vec<(String, u8)> {
        self.submissions.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RatingSubmitter for MockRater {
    async fn submit_rating(&self, external_id: &str, rating: u8) -> Result<(), ProviderError> {
        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push((external_id.to_string(), rating));
        }

        if self.failing {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated rating failure".to_string(),
            });
        }
        Ok(())
    }
}
