//! Batch scoring of one query against many candidate strings.
//!
//! Candidates are scored in parallel with rayon once there are at least
//! [`PARALLEL_THRESHOLD`] of them; smaller batches run sequentially to avoid
//! thread pool overhead.

use crate::algorithms::EqualityMode;
use crate::error::Result;
use crate::metric::{MatchConfig, Metric};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Candidate count at which scoring switches to the rayon thread pool.
pub const PARALLEL_THRESHOLD: usize = 100;

/// A scored candidate from [`find_best_matches`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The matched text
    pub text: String,
    /// Similarity score (0.0-1.0)
    pub score: f64,
    /// Position of the candidate in the input
    pub index: usize,
}

fn score_one(query: &[char], candidate: &str, metric: Metric, mode: EqualityMode) -> Result<f64> {
    let candidate: Vec<char> = candidate.chars().collect();
    metric.similarity(query, &candidate, move |a: &char, b: &char| {
        mode.chars_equal(*a, *b)
    })
}

fn score_all<S>(query: &str, candidates: &[S], metric: Metric, mode: EqualityMode) -> Result<Vec<f64>>
where
    S: AsRef<str> + Sync,
{
    let query: Vec<char> = query.chars().collect();

    if candidates.len() >= PARALLEL_THRESHOLD {
        tracing::debug!(
            candidates = candidates.len(),
            metric = metric.name(),
            "scoring batch in parallel"
        );
        candidates
            .par_iter()
            .map(|c| score_one(&query, c.as_ref(), metric, mode))
            .collect()
    } else {
        candidates
            .iter()
            .map(|c| score_one(&query, c.as_ref(), metric, mode))
            .collect()
    }
}

/// Similarity of `query` to every candidate, in candidate order.
///
/// # Errors
/// The first scoring error, e.g. [`MetricError::LengthMismatch`](crate::MetricError::LengthMismatch)
/// when Hamming is selected and a candidate's length differs from the query's.
///
/// # Example
/// ```
/// use seqdist::algorithms::EqualityMode;
/// use seqdist::batch::batch_similarity;
/// use seqdist::metric::Metric;
///
/// let scores = batch_similarity("abc", &["abc", "abd", "xyz"], Metric::Levenshtein, EqualityMode::Exact).unwrap();
/// assert_eq!(scores[0], 1.0);
/// assert_eq!(scores[2], 0.0);
/// ```
pub fn batch_similarity<S>(
    query: &str,
    candidates: &[S],
    metric: Metric,
    mode: EqualityMode,
) -> Result<Vec<f64>>
where
    S: AsRef<str> + Sync,
{
    score_all(query, candidates, metric, mode)
}

/// Best matches for `query` among `candidates`.
///
/// Candidates scoring below `config.min_similarity` are dropped; the rest are
/// sorted by descending score (ties keep input order) and truncated to
/// `config.limit`.
///
/// # Errors
/// [`MetricError::InvalidParameter`](crate::MetricError::InvalidParameter) for
/// an invalid configuration, otherwise the first scoring error.
pub fn find_best_matches<S>(query: &str, candidates: &[S], config: &MatchConfig) -> Result<Vec<MatchResult>>
where
    S: AsRef<str> + Sync,
{
    config.validate()?;

    let scores = score_all(query, candidates, config.metric, config.equality)?;

    let mut results: Vec<MatchResult> = scores
        .into_iter()
        .zip(candidates)
        .enumerate()
        .filter(|(_, (score, _))| *score >= config.min_similarity)
        .map(|(index, (score, text))| MatchResult {
            text: text.as_ref().to_string(),
            score,
            index,
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
    results.truncate(config.limit);
    Ok(results)
}
