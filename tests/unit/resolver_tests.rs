/*!
 * Tests for the title resolution algorithm
 */

use std::sync::Arc;

use kp2imdb::errors::SearchError;
use kp2imdb::models::{CatalogMatch, ResolutionOutcome};
use kp2imdb::providers::mock::{MockCatalog, SearchCall};
use kp2imdb::resolution::TitleResolver;

use crate::common;

const PRIMARY: &str = "Зеленая миля";
const ORIGINAL: &str = "The Green Mile";
const TRANSLITERATED: &str = "Zelenaya milya";

fn resolver(catalog: &MockCatalog) -> TitleResolver {
    common::init_test_logging();
    TitleResolver::new(Arc::new(catalog.clone()))
}

fn call(title: &str, year: Option<u16>) -> SearchCall {
    SearchCall { title: title.to_string(), year }
}

fn service_error() -> SearchError {
    SearchError::ServiceError("502 Bad Gateway".to_string())
}

#[tokio::test]
async fn test_resolve_greenMile_shouldResolveWithoutFurtherSearches() {
    let catalog = MockCatalog::new().with_match(ORIGINAL, Some(1999), "tt0120689", ORIGINAL);

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    assert_eq!(outcome, ResolutionOutcome::Resolved(CatalogMatch::new("tt0120689", ORIGINAL)));
    assert_eq!(catalog.calls(), vec![call(ORIGINAL, Some(1999))]);
}

#[tokio::test]
async fn test_resolve_exactLocalizedTitle_shouldResolveOnSecondAttempt() {
    let catalog = MockCatalog::new()
        .with_match(ORIGINAL, Some(1999), "tt9999999", "The Green Mile Returns")
        .with_match(PRIMARY, Some(1999), "tt0120689", PRIMARY);

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    assert_eq!(outcome, ResolutionOutcome::Resolved(CatalogMatch::new("tt0120689", PRIMARY)));
    assert_eq!(catalog.call_count(), 2);
}

#[tokio::test]
async fn test_resolve_oldMovie_shouldAcceptYearShiftAsUncertain() {
    let catalog = MockCatalog::new().with_match("Old Movie", Some(1996), "tt0000042", "Old Movie");

    let outcome = resolver(&catalog).resolve("Старое кино", "Old Movie", Some(1995)).await;

    assert_eq!(
        outcome,
        ResolutionOutcome::ResolvedUncertain {
            found: CatalogMatch::new("tt0000042", "Old Movie"),
            searched_as: "Old Movie".to_string(),
            evidence_year: Some(1996),
        }
    );
    assert_eq!(
        catalog.calls(),
        vec![
            call("Old Movie", Some(1995)),
            call("Старое кино", Some(1995)),
            call("Old Movie", Some(1996)),
        ]
    );
}

#[tokio::test]
async fn test_resolve_yearShiftMatchingLocalizedTitle_shouldBeUncertain() {
    let catalog = MockCatalog::new().with_match(ORIGINAL, Some(2000), "tt0120689", PRIMARY);

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    assert!(matches!(
        outcome,
        ResolutionOutcome::ResolvedUncertain { evidence_year: Some(2000), .. }
    ));
}

#[tokio::test]
async fn test_resolve_yearShiftWithOtherTitle_shouldFallThroughToTransliteration() {
    let catalog = MockCatalog::new()
        .with_match(ORIGINAL, Some(2000), "tt1111111", "Something Else");

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    assert_eq!(outcome, ResolutionOutcome::NotFound);
    assert_eq!(catalog.calls().last(), Some(&call(TRANSLITERATED, Some(1999))));
}

#[tokio::test]
async fn test_resolve_paddedTitle_shouldSearchAndCompareVerbatim() {
    let catalog = MockCatalog::new()
        .with_match(" The Green Mile", Some(1999), "tt0120689", "The Green Mile");

    let outcome = resolver(&catalog).resolve(PRIMARY, " The Green Mile", Some(1999)).await;

    assert_eq!(catalog.calls()[0], call(" The Green Mile", Some(1999)));
    assert!(!matches!(outcome, ResolutionOutcome::Resolved(_)));
}

#[tokio::test]
async fn test_resolve_allNotFound_shouldBeNotFoundAfterFourSearches() {
    let catalog = MockCatalog::new();

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    assert_eq!(outcome, ResolutionOutcome::NotFound);
    assert_eq!(
        catalog.calls(),
        vec![
            call(ORIGINAL, Some(1999)),
            call(PRIMARY, Some(1999)),
            call(ORIGINAL, Some(2000)),
            call(TRANSLITERATED, Some(1999)),
        ]
    );
}

#[tokio::test]
async fn test_resolve_withoutYear_shouldSkipYearShift() {
    let catalog = MockCatalog::new();

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, None).await;

    assert_eq!(outcome, ResolutionOutcome::NotFound);
    assert_eq!(
        catalog.calls(),
        vec![call(ORIGINAL, None), call(PRIMARY, None), call(TRANSLITERATED, None)]
    );
}

#[tokio::test]
async fn test_resolve_serviceErrorOnFirstAttempt_shouldStopImmediately() {
    let catalog = MockCatalog::new().with_error(ORIGINAL, Some(1999), service_error());

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    assert!(matches!(outcome, ResolutionOutcome::ServiceError(_)));
    assert_eq!(catalog.call_count(), 1);
}

#[tokio::test]
async fn test_resolve_serviceErrorOnLaterAttempts_shouldStopAtFailingStep() {
    let queries = [
        (PRIMARY, Some(1999)),
        (ORIGINAL, Some(2000)),
        (TRANSLITERATED, Some(1999)),
    ];

    for (index, (title, year)) in queries.iter().enumerate() {
        let catalog = MockCatalog::new().with_error(title, *year, service_error());

        let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

        assert!(matches!(outcome, ResolutionOutcome::ServiceError(_)), "step {}", index + 2);
        assert_eq!(catalog.call_count(), index + 2);
    }
}

#[tokio::test]
async fn test_resolve_failingCatalog_shouldReportServiceError() {
    let catalog = MockCatalog::failing();

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    assert_eq!(
        outcome,
        ResolutionOutcome::ServiceError("Simulated catalog failure".to_string())
    );
    assert_eq!(catalog.call_count(), 1);
}

#[tokio::test]
async fn test_resolve_transliteratedSimilarMatch_shouldBeUncertain() {
    let catalog = MockCatalog::new().with_match("Brat", Some(1997), "tt0118767", "Brat");

    let outcome = resolver(&catalog).resolve("Брат", "", Some(1997)).await;

    assert_eq!(
        outcome,
        ResolutionOutcome::ResolvedUncertain {
            found: CatalogMatch::new("tt0118767", "Brat"),
            searched_as: "Brat".to_string(),
            evidence_year: Some(1997),
        }
    );
}

#[tokio::test]
async fn test_resolve_transliteratedMatchSimilarToOriginal_shouldBeUncertain() {
    let catalog = MockCatalog::new()
        .with_match(TRANSLITERATED, Some(1999), "tt0120689", "The Green Mile.");

    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;

    match outcome {
        ResolutionOutcome::ResolvedUncertain { found, searched_as, .. } => {
            assert_eq!(found.external_id, "tt0120689");
            assert_eq!(searched_as, TRANSLITERATED);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_transliteratedUnrelatedMatch_shouldBeNotFound() {
    let catalog = MockCatalog::new().with_match("Brat", Some(1997), "tt0110932", "Quiz Show");

    let outcome = resolver(&catalog).resolve("Брат", "", Some(1997)).await;

    assert_eq!(outcome, ResolutionOutcome::NotFound);
}

#[tokio::test]
async fn test_resolve_zeroThreshold_shouldAcceptAnyTransliteratedMatch() {
    let catalog = MockCatalog::new().with_match("Brat", Some(1997), "tt0110932", "Quiz Show");
    let resolver = TitleResolver::with_threshold(Arc::new(catalog.clone()), 0.0);

    let outcome = resolver.resolve("Брат", "", Some(1997)).await;

    assert!(matches!(outcome, ResolutionOutcome::ResolvedUncertain { .. }));
}

#[tokio::test]
async fn test_resolve_exactMatchOnFirstTwoAttempts_shouldNeverBeUncertain() {
    // Catalog titles that share nothing with the transliteration still resolve
    // when they agree exactly with the query.
    let catalog = MockCatalog::new().with_match("Ёжик в тумане", None, "tt0073141", "Ёжик в тумане");

    let outcome = resolver(&catalog).resolve("Ёжик в тумане", "Hedgehog in the Fog", None).await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Resolved(CatalogMatch::new("tt0073141", "Ёжик в тумане"))
    );
}

/// Every combination of per-attempt answers terminates within four lookups,
/// and a service error is always the last lookup made.
#[tokio::test]
async fn test_resolve_everyAnswerCombination_shouldTerminateAndStopOnServiceError() {
    #[derive(Clone, Copy, Debug)]
    enum Answer {
        Missing,
        Failure,
        Exact,
        Other,
    }
    let answers = [Answer::Missing, Answer::Failure, Answer::Exact, Answer::Other];
    let queries = [
        (ORIGINAL, Some(1999u16)),
        (PRIMARY, Some(1999)),
        (ORIGINAL, Some(2000)),
        (TRANSLITERATED, Some(1999)),
    ];

    for a in answers {
        for b in answers {
            for c in answers {
                for d in answers {
                    let combo = [a, b, c, d];
                    let mut catalog = MockCatalog::new();
                    for (answer, (title, year)) in combo.iter().zip(queries.iter()) {
                        catalog = match answer {
                            Answer::Missing => catalog,
                            Answer::Failure => catalog.with_error(title, *year, service_error()),
                            Answer::Exact => catalog.with_match(title, *year, "tt1", title),
                            Answer::Other => catalog.with_match(title, *year, "tt2", "Unrelated Picture"),
                        };
                    }

                    let outcome = resolver(&catalog).resolve(PRIMARY, ORIGINAL, Some(1999)).await;
                    let calls = catalog.call_count();

                    assert!((1..=4).contains(&calls), "{:?}: {} calls", combo, calls);

                    let first_failure = combo.iter().position(|x| matches!(x, Answer::Failure));
                    if let ResolutionOutcome::ServiceError(_) = outcome {
                        assert_eq!(Some(calls - 1), first_failure, "{:?}", combo);
                    }
                    if matches!(combo[0], Answer::Exact) {
                        assert!(matches!(outcome, ResolutionOutcome::Resolved(_)), "{:?}", combo);
                        assert_eq!(calls, 1);
                    }
                    if matches!(combo[0], Answer::Failure) {
                        assert!(matches!(outcome, ResolutionOutcome::ServiceError(_)), "{:?}", combo);
                    }
                }
            }
        }
    }
}
