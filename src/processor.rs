/*!
 * Per-record pipeline: rating validation, title resolution, rating submission.
 */

use std::sync::Arc;

use log::{error, info, warn};

use crate::errors::ProcessingError;
use crate::models::{LocalMovieRecord, RecordOutcome, ResolutionOutcome, UncertainMatch};
use crate::providers::RatingSubmitter;
use crate::resolution::TitleResolver;

/// Processes local records one at a time
#[derive(Debug, Clone)]
pub struct RecordProcessor {
    resolver: TitleResolver,
    rater: Arc<dyn RatingSubmitter>,
    dry_run: bool,
}

impl RecordProcessor {
    pub fn new(resolver: TitleResolver, rater: Arc<dyn RatingSubmitter>) -> Self {
        Self {
            resolver,
            rater,
            dry_run: false,
        }
    }

    /// Resolve titles but never submit ratings
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn resolver(&self) -> &TitleResolver {
        &self.resolver
    }

    /// Run one record through the pipeline.
    ///
    /// Records without any title are skipped; records without a valid rating
    /// fail before any lookup is made.
    pub async fn process_record(&self, record: &LocalMovieRecord) -> RecordOutcome {
        let record = record.normalized();
        if record.is_blank() {
            return RecordOutcome::Skipped;
        }

        let Some(rating) = record.rating() else {
            warn!("'{}' has no rating ('{}')", record.search_title(), record.my_rating);
            return RecordOutcome::Failed(ProcessingError::NoRating);
        };

        let title = record.search_title().to_string();
        let year = record.release_year();

        let outcome = self.resolver
            .resolve(record.name.trim(), record.original_name.trim(), year)
            .await;

        let (found, evidence) = match outcome {
            ResolutionOutcome::Resolved(found) => (found, None),
            ResolutionOutcome::ResolvedUncertain { found, searched_as, evidence_year } => {
                warn!(
                    "'{}' ({}) searched as '{}', found IMDb title '{}'. Check if it's correct",
                    title, record.year, searched_as, found.matched_title
                );
                let evidence = UncertainMatch {
                    title: title.clone(),
                    year,
                    searched_as,
                    searched_year: evidence_year,
                    matched_title: found.matched_title.clone(),
                    external_id: found.external_id.clone(),
                };
                (found, Some(evidence))
            }
            ResolutionOutcome::NotFound => {
                warn!("'{}' not found", title);
                return RecordOutcome::Failed(ProcessingError::NotFound);
            }
            ResolutionOutcome::ServiceError(reason) => {
                error!("Search '{}': {}", title, reason);
                return RecordOutcome::Failed(ProcessingError::ServiceRateLimited);
            }
        };

        if self.dry_run {
            info!("[dry run] Title: {}, Rating: {}, IMDb Title: {}, IMDb ID: {}",
                title, rating, found.matched_title, found.external_id);
        } else {
            if let Err(e) = self.rater.submit_rating(&found.external_id, rating).await {
                error!("Error updating rating for {}: {}", title, e);
                return RecordOutcome::Failed(ProcessingError::UpdateRatingFailed);
            }
            info!("Title: {}, Rating: {}, IMDb Title: {}, IMDb ID: {}",
                title, rating, found.matched_title, found.external_id);
        }

        match evidence {
            Some(evidence) => RecordOutcome::RatedUncertain(evidence),
            None => RecordOutcome::Rated(found),
        }
    }
}
