/*!
 * Data model shared by the resolver, the record processor and the controller.
 *
 * `LocalMovieRecord` mirrors the JSON produced by the Kinopoisk export script:
 * every field is kept as the raw string so that failure entries can echo the
 * record exactly as it was read.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trailing parenthesized suffix of a localized title, e.g. `Title (1999)` or `Title (TV)`
static TRAILING_PARENS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\(([^)]+)\)$").expect("trailing parentheses pattern is valid")
});

/// One rated entry of the local export
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalMovieRecord {
    /// Localized (primary) title
    #[serde(default)]
    pub name: String,

    /// Original-language title, empty when the catalog shows none
    #[serde(default)]
    pub original_name: String,

    /// User rating as exported, expected to be "1".."10"
    #[serde(default)]
    pub my_rating: String,

    /// Release year as exported, expected to be four digits or empty
    #[serde(default)]
    pub year: String,
}

impl LocalMovieRecord {
    pub fn new(
        name: impl Into<String>,
        original_name: impl Into<String>,
        my_rating: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            original_name: original_name.into(),
            my_rating: my_rating.into(),
            year: year.into(),
        }
    }

    /// Rating in the 1..=10 range, `None` for anything else
    pub fn rating(&self) -> Option<u8> {
        match self.my_rating.trim().parse::<u8>() {
            Ok(rating) if (1..=10).contains(&rating) => Some(rating),
            _ => None,
        }
    }

    /// Four-digit release year, `None` when empty or malformed
    pub fn release_year(&self) -> Option<u16> {
        parse_year(&self.year)
    }

    /// Both titles are empty, nothing to search for
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.original_name.trim().is_empty()
    }

    /// Title used as the original-language query; falls back to the localized one
    pub fn search_title(&self) -> &str {
        if self.original_name.trim().is_empty() {
            self.name.trim()
        } else {
            self.original_name.trim()
        }
    }

    /// Returns a copy with a trailing `(...)` removed from the localized title.
    ///
    /// When the record has no year and the suffix is exactly four digits, the
    /// suffix becomes the year. Raw exports sometimes keep it glued to the name.
    pub fn normalized(&self) -> Self {
        let mut record = self.clone();

        if let Some(captures) = TRAILING_PARENS_REGEX.captures(&self.name) {
            let suffix = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            if record.year.trim().is_empty() && parse_year(suffix).is_some() {
                record.year = suffix.to_string();
            }
            record.name = TRAILING_PARENS_REGEX.replace(&self.name, "").to_string();
        }

        record
    }
}

fn parse_year(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u16>().ok().filter(|year| *year >= 1000)
}

/// Catalog entry returned by one successful search attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMatch {
    /// Stable IMDb identifier, e.g. `tt0120689`
    pub external_id: String,
    /// Title exactly as the catalog spells it
    pub matched_title: String,
}

impl CatalogMatch {
    pub fn new(external_id: impl Into<String>, matched_title: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            matched_title: matched_title.into(),
        }
    }
}

/// Classified result of resolving one record
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// Exact title agreement on the original or localized title
    Resolved(CatalogMatch),

    /// Plausible match found through a weaker variant (year shift or transliteration)
    ResolvedUncertain {
        found: CatalogMatch,
        /// Query string that produced the match
        searched_as: String,
        /// Year sent with that query, if any
        evidence_year: Option<u16>,
    },

    /// No variant produced a usable match
    NotFound,

    /// The catalog service failed; no further variants were tried
    ServiceError(String),
}

/// Evidence kept for a rating that was submitted on an uncertain match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncertainMatch {
    /// Title as known locally (original title, or the localized one)
    pub title: String,
    /// Release year of the local record
    pub year: Option<u16>,
    /// Query string that produced the match
    pub searched_as: String,
    /// Year sent with that query; differs from `year` after a year shift
    pub searched_year: Option<u16>,
    /// Title as the catalog spells it
    pub matched_title: String,
    /// IMDb identifier that was rated
    pub external_id: String,
}

/// Per-record result of the processing pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Rating submitted for a confidently resolved title
    Rated(CatalogMatch),
    /// Rating submitted, but the match should be verified by hand
    RatedUncertain(UncertainMatch),
    /// Nothing to do for this record (no titles at all)
    Skipped,
    /// Terminal failure for this record
    Failed(crate::errors::ProcessingError),
}

impl RecordOutcome {
    /// The single operator-facing error for this record, if any
    pub fn into_error(self) -> Option<crate::errors::ProcessingError> {
        match self {
            Self::Rated(_) | Self::Skipped => None,
            Self::RatedUncertain(evidence) => {
                Some(crate::errors::ProcessingError::UncertainMatch(evidence))
            }
            Self::Failed(error) => Some(error),
        }
    }
}

/// Entry appended to the warnings file for every record that needs attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEntry {
    #[serde(flatten)]
    pub record: LocalMovieRecord,
    /// Localized explanation of the failure
    pub error: String,
    /// RFC 3339 timestamp of when the failure was recorded
    pub date: String,
}

impl FailureEntry {
    pub fn new(record: LocalMovieRecord, error: impl Into<String>) -> Self {
        Self {
            record,
            error: error.into(),
            date: chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
        }
    }
}
