//! Fuzzy Matcher
//!
//! Picks the closest candidate to a query using the Sørensen–Dice coefficient
//! over character bigrams (whitespace ignored). Scores are in [0, 1], symmetric
//! in their two arguments, and computed case-insensitively.
//!
//! Ties go to the earliest candidate, so callers control tie-breaks through
//! candidate order.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("no candidates to match against")]
    NoCandidates,
}

/// Best candidate for a query
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Position of the candidate in the input slice
    pub index: usize,
    pub candidate: String,
    pub score: f64,
}

/// Similarity of two strings in [0, 1], ignoring case
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(&a.to_lowercase(), &b.to_lowercase())
}

/// Find the candidate most similar to `query`.
pub fn find_best_match<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
) -> Result<MatchResult, MatchError> {
    let query = query.to_lowercase();

    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        let score = strsim::sorensen_dice(&query, &candidate.as_ref().to_lowercase());
        // Strict comparison keeps the first of equal scores
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((idx, score));
        }
    }

    let (index, score) = best.ok_or(MatchError::NoCandidates)?;
    Ok(MatchResult {
        index,
        candidate: candidates[index].as_ref().to_string(),
        score,
    })
}
