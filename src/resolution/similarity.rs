/*!
 * Title similarity scoring.
 *
 * Jaro similarity over Unicode scalar values. Comparison is case-sensitive and
 * does not fold diacritics: catalog titles are compared as the catalog spells them.
 */

/// Default score a transliterated match must reach to be accepted
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Similarity between two titles in `[0.0, 1.0]`.
///
/// Two empty strings are identical (1.0); an empty string never resembles a
/// non-empty one (0.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    // Fixed argument order keeps the score symmetric
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    strsim::jaro(a, b).clamp(0.0, 1.0)
}

/// Whether either candidate title scores at least `threshold` against `found`
pub fn any_similar(found: &str, candidates: &[&str], threshold: f64) -> bool {
    candidates
        .iter()
        .any(|candidate| similarity(candidate, found) >= threshold)
}
