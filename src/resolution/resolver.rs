/*!
 * Title resolution: maps a local record onto one catalog entry.
 *
 * Variants are tried in a fixed order and the first decisive answer wins:
 *
 * 1. original title + year, exact title agreement
 * 2. localized title + year, exact title agreement
 * 3. original title + (year + 1), accepted as uncertain
 * 4. transliterated localized title + year, last resort
 * 5. similarity floor on the last-resort match, accepted as uncertain
 *
 * A service error on any variant ends the resolution immediately.
 */

use std::fmt;
use std::sync::Arc;

use log::{debug, error, warn};

use crate::errors::SearchError;
use crate::models::{CatalogMatch, ResolutionOutcome};
use crate::providers::CatalogSearch;
use crate::resolution::similarity::{any_similar, DEFAULT_SIMILARITY_THRESHOLD};
use crate::resolution::transliteration::transliterate;

/// Search variant, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchVariant {
    OriginalTitle,
    PrimaryTitle,
    YearShift,
    Transliterated,
}

impl fmt::Display for SearchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OriginalTitle => "original title",
            Self::PrimaryTitle => "localized title",
            Self::YearShift => "year shift",
            Self::Transliterated => "transliteration",
        };
        write!(f, "{}", name)
    }
}

/// Resolves titles against a catalog
#[derive(Debug, Clone)]
pub struct TitleResolver {
    catalog: Arc<dyn CatalogSearch>,
    similarity_threshold: f64,
}

impl TitleResolver {
    /// Create a resolver with the default similarity threshold
    pub fn new(catalog: Arc<dyn CatalogSearch>) -> Self {
        Self::with_threshold(catalog, DEFAULT_SIMILARITY_THRESHOLD)
    }

    /// Create a resolver with a custom similarity threshold (clamped to 0.0-1.0)
    pub fn with_threshold(catalog: Arc<dyn CatalogSearch>, similarity_threshold: f64) -> Self {
        Self {
            catalog,
            similarity_threshold: similarity_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    /// Resolve one title to a catalog entry.
    ///
    /// `original_title` may be empty, in which case `primary_title` stands in
    /// for it. Titles are sent and compared byte for byte, so callers trim
    /// them first. Performs at most four lookups.
    pub async fn resolve(
        &self,
        primary_title: &str,
        original_title: &str,
        year: Option<u16>,
    ) -> ResolutionOutcome {
        let primary = primary_title;
        let original = if original_title.is_empty() { primary } else { original_title };

        if original.is_empty() {
            warn!("Nothing to resolve: both titles are empty");
            return ResolutionOutcome::NotFound;
        }

        match self.attempt(SearchVariant::OriginalTitle, original, year).await {
            Err(reason) => return ResolutionOutcome::ServiceError(reason),
            Ok(Some(found)) if found.matched_title == original => {
                return ResolutionOutcome::Resolved(found);
            }
            Ok(_) => {}
        }

        if !primary.is_empty() && primary != original {
            match self.attempt(SearchVariant::PrimaryTitle, primary, year).await {
                Err(reason) => return ResolutionOutcome::ServiceError(reason),
                Ok(Some(found)) if found.matched_title == primary => {
                    return ResolutionOutcome::Resolved(found);
                }
                Ok(_) => {}
            }
        }

        if let Some(year) = year {
            let shifted = year.saturating_add(1);
            match self.attempt(SearchVariant::YearShift, original, Some(shifted)).await {
                Err(reason) => return ResolutionOutcome::ServiceError(reason),
                Ok(Some(found))
                    if found.matched_title == original
                        || (!primary.is_empty() && found.matched_title == primary) =>
                {
                    warn!(
                        "'{}' ({}) found as '{}' only with year {}",
                        original, year, found.matched_title, shifted
                    );
                    return ResolutionOutcome::ResolvedUncertain {
                        found,
                        searched_as: original.to_string(),
                        evidence_year: Some(shifted),
                    };
                }
                Ok(_) => {}
            }
        }

        let source = if primary.is_empty() { original } else { primary };
        let transliterated = transliterate(source);

        let found = match self.attempt(SearchVariant::Transliterated, &transliterated, year).await {
            Err(reason) => return ResolutionOutcome::ServiceError(reason),
            Ok(None) => {
                debug!("'{}' not found", original);
                return ResolutionOutcome::NotFound;
            }
            Ok(Some(found)) => found,
        };

        // OMDb answers loose queries with unrelated titles now and then
        if !any_similar(
            &found.matched_title,
            &[transliterated.as_str(), original],
            self.similarity_threshold,
        ) {
            warn!(
                "'{}' searched as '{}', found '{}'. Rejected as unrelated",
                original, transliterated, found.matched_title
            );
            return ResolutionOutcome::NotFound;
        }

        ResolutionOutcome::ResolvedUncertain {
            found,
            searched_as: transliterated,
            evidence_year: year,
        }
    }

    /// One lookup; `Ok(None)` for not found, `Err` with the reason for a service failure
    async fn attempt(
        &self,
        variant: SearchVariant,
        title: &str,
        year: Option<u16>,
    ) -> Result<Option<CatalogMatch>, String> {
        match self.catalog.search(title, year).await {
            Ok(found) => {
                debug!(
                    "[{}] '{}' -> '{}' ({})",
                    variant, title, found.matched_title, found.external_id
                );
                Ok(Some(found))
            }
            Err(SearchError::NotFound) => {
                debug!("[{}] '{}' not found", variant, title);
                Ok(None)
            }
            Err(SearchError::ServiceError(reason)) => {
                error!("[{}] search '{}': {}", variant, title, reason);
                Err(reason)
            }
        }
    }
}
