/*!
 * # kp2imdb - move Kinopoisk ratings to IMDb
 *
 * A Rust library for transferring movie ratings exported from Kinopoisk to IMDb.
 *
 * ## Features
 *
 * - Resolve noisy, multi-lingual titles to IMDb identifiers through OMDb:
 *   - exact original and localized title lookups
 *   - one-year release shift
 *   - Cyrillic transliteration with a similarity floor
 * - Submit ratings through the IMDb GraphQL API
 * - Record every title that needs attention, explained in English or Russian
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `models`: Records, matches and outcomes
 * - `resolution`: Title resolution:
 *   - `resolution::similarity`: Jaro title similarity
 *   - `resolution::transliteration`: Cyrillic to Latin mapping
 *   - `resolution::resolver`: The ordered search-variant algorithm
 * - `providers`: Client implementations for external services:
 *   - `providers::omdb`: OMDb title lookups
 *   - `providers::imdb`: IMDb rating submission
 *   - `providers::mock`: Scripted test doubles
 * - `processor`: Per-record pipeline
 * - `messages`: Localized failure explanations
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod messages;
pub mod models;
pub mod processor;
pub mod providers;
pub mod resolution;

// Re-export main types for easier usage
pub use app_config::{Config, Locale};
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ProcessingError, ProviderError, SearchError};
pub use messages::explain;
pub use models::{CatalogMatch, LocalMovieRecord, RecordOutcome, ResolutionOutcome, UncertainMatch};
pub use resolution::{similarity, transliterate, TitleResolver};
