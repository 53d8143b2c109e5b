use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::messages::explain;
use crate::models::{FailureEntry, LocalMovieRecord, RecordOutcome, ResolutionOutcome};
use crate::processor::RecordProcessor;
use crate::providers::imdb::Imdb;
use crate::providers::omdb::Omdb;
use crate::providers::{CatalogSearch, RatingSubmitter};
use crate::resolution::TitleResolver;

// @module: Application controller for rating synchronization

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rated: usize,
    pub uncertain: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Rated(_) => self.rated += 1,
            RecordOutcome::RatedUncertain(_) => self.uncertain += 1,
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.rated + self.uncertain + self.skipped + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rated, {} need verification, {} skipped, {} failed",
            self.rated, self.uncertain, self.skipped, self.failed
        )
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Record pipeline wired to the configured services
    processor: RecordProcessor,
}

impl Controller {
    // @method: Create a controller talking to OMDb and IMDb as configured
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let catalog = Arc::new(Omdb::new(
            config.omdb_api_key.clone(),
            config.omdb_endpoint.clone(),
            config.timeout_secs,
        ));
        let rater = Arc::new(Imdb::new(
            config.imdb_cookie.clone(),
            config.imdb_endpoint.clone(),
            config.timeout_secs,
        ));

        Ok(Self::with_providers(config, catalog, rater))
    }

    /// Create a controller with explicit service implementations
    pub fn with_providers(
        config: Config,
        catalog: Arc<dyn CatalogSearch>,
        rater: Arc<dyn RatingSubmitter>,
    ) -> Self {
        let resolver = TitleResolver::with_threshold(catalog, config.similarity_threshold);
        let processor = RecordProcessor::new(resolver, rater);
        Self { config, processor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a single title without rating it
    pub async fn resolve_one(
        &self,
        title: &str,
        original_title: &str,
        year: Option<u16>,
    ) -> ResolutionOutcome {
        self.processor.resolver().resolve(title.trim(), original_title.trim(), year).await
    }

    /// Load the export at `input_path` and process every record.
    ///
    /// Records are processed from last to first: the export lists the newest
    /// ratings first. Every record needing attention is appended to
    /// `warnings_path` as soon as it has been processed.
    pub async fn run(&self, input_path: &Path, warnings_path: &Path, dry_run: bool) -> Result<RunSummary> {
        let records: Vec<LocalMovieRecord> = FileManager::read_json_array(input_path)
            .with_context(|| format!("Failed to load records from {:?}", input_path))?;

        info!("Loaded {} records from {:?}", records.len(), input_path);
        self.process_records(&records, warnings_path, dry_run).await
    }

    /// Process already loaded records; see [`Controller::run`]
    pub async fn process_records(
        &self,
        records: &[LocalMovieRecord],
        warnings_path: &Path,
        dry_run: bool,
    ) -> Result<RunSummary> {
        let processor = self.processor.clone().dry_run(dry_run);
        let mut summary = RunSummary::default();

        let progress_bar = ProgressBar::new(records.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} titles {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);

        for record in records.iter().rev() {
            progress_bar.set_message(record.search_title().to_string());

            let outcome = processor.process_record(record).await;
            summary.record(&outcome);

            if let Some(error) = outcome.into_error() {
                let entry = FailureEntry::new(record.clone(), explain(&error, self.config.locale));
                if let Err(e) = FileManager::append_json_entry(warnings_path, &entry) {
                    warn!("Error appending to {:?}: {}", warnings_path, e);
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        info!("Done: {}", summary);

        Ok(summary)
    }
}
