//! Metric selection and matching configuration.
//!
//! [`Metric`] names one of the similarity measures so it can be chosen at
//! runtime (from a string or a serialized config) and dispatched over any
//! element type and equality policy.

use crate::algorithms::{self, Equality, EqualityMode};
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A selectable similarity measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Hamming,
    Levenshtein,
    #[serde(alias = "damerau")]
    DamerauLevenshtein,
    #[serde(alias = "osa")]
    OptimalStringAlignment,
    Lcs,
    #[serde(alias = "lcsubstr")]
    LongestCommonSubstring,
    Jaro,
    #[default]
    JaroWinkler,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Hamming,
        Metric::Levenshtein,
        Metric::DamerauLevenshtein,
        Metric::OptimalStringAlignment,
        Metric::Lcs,
        Metric::LongestCommonSubstring,
        Metric::Jaro,
        Metric::JaroWinkler,
    ];

    /// Canonical name, matching the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::Hamming => "hamming",
            Metric::Levenshtein => "levenshtein",
            Metric::DamerauLevenshtein => "damerau_levenshtein",
            Metric::OptimalStringAlignment => "optimal_string_alignment",
            Metric::Lcs => "lcs",
            Metric::LongestCommonSubstring => "longest_common_substring",
            Metric::Jaro => "jaro",
            Metric::JaroWinkler => "jaro_winkler",
        }
    }

    /// Normalized similarity (0.0 to 1.0) of the selected metric under `eq`.
    ///
    /// # Errors
    /// [`MetricError::LengthMismatch`] for [`Metric::Hamming`] on sequences of
    /// different lengths.
    pub fn similarity<T, E: Equality<T>>(self, source: &[T], target: &[T], eq: E) -> Result<f64> {
        let score = match self {
            Metric::Hamming => algorithms::hamming_similarity_by(source, target, eq)?,
            Metric::Levenshtein => algorithms::levenshtein_similarity_by(source, target, eq),
            Metric::DamerauLevenshtein => {
                algorithms::damerau_levenshtein_similarity_by(source, target, eq)
            }
            Metric::OptimalStringAlignment => {
                algorithms::optimal_string_alignment_similarity_by(source, target, eq)
            }
            Metric::Lcs => algorithms::lcs_similarity_by(source, target, eq),
            Metric::LongestCommonSubstring => {
                algorithms::longest_common_substring_similarity_by(source, target, eq)
            }
            Metric::Jaro => algorithms::jaro_similarity_by(source, target, eq),
            Metric::JaroWinkler => algorithms::jaro_winkler_similarity_by(source, target, eq),
        };
        Ok(score)
    }

    /// Similarity of two strings viewed as `char` sequences.
    ///
    /// # Errors
    /// Same as [`Metric::similarity`].
    ///
    /// # Example
    /// ```
    /// use seqdist::algorithms::EqualityMode;
    /// use seqdist::metric::Metric;
    ///
    /// let score = Metric::Levenshtein
    ///     .similarity_str("Hugo", "hugo", EqualityMode::IgnoreCase)
    ///     .unwrap();
    /// assert_eq!(score, 1.0);
    /// ```
    pub fn similarity_str(self, source: &str, target: &str, mode: EqualityMode) -> Result<f64> {
        let source: Vec<char> = source.chars().collect();
        let target: Vec<char> = target.chars().collect();
        self.similarity(&source, &target, move |a: &char, b: &char| mode.chars_equal(*a, *b))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hamming" => Ok(Metric::Hamming),
            "levenshtein" => Ok(Metric::Levenshtein),
            "damerau_levenshtein" | "damerau" => Ok(Metric::DamerauLevenshtein),
            "optimal_string_alignment" | "osa" => Ok(Metric::OptimalStringAlignment),
            "lcs" => Ok(Metric::Lcs),
            "longest_common_substring" | "lcsubstr" => Ok(Metric::LongestCommonSubstring),
            "jaro" => Ok(Metric::Jaro),
            "jaro_winkler" => Ok(Metric::JaroWinkler),
            _ => Err(MetricError::UnknownMetric(s.to_string())),
        }
    }
}

/// Settings for best-match search and config-driven deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub metric: Metric,
    pub equality: EqualityMode,
    /// Minimum similarity score to include
    pub min_similarity: f64,
    /// Maximum number of results to return
    pub limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            metric: Metric::JaroWinkler,
            equality: EqualityMode::Exact,
            min_similarity: 0.0,
            limit: 10,
        }
    }
}

impl MatchConfig {
    /// # Errors
    /// [`MetricError::InvalidParameter`] when `min_similarity` is not a finite
    /// number in [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        validate_similarity(self.min_similarity, "min_similarity")
    }
}

pub(crate) fn validate_similarity(value: f64, name: &'static str) -> Result<()> {
    if !value.is_finite() {
        return Err(MetricError::InvalidParameter {
            name,
            value,
            reason: "a finite number",
        });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(MetricError::InvalidParameter {
            name,
            value,
            reason: "in range [0.0, 1.0]",
        });
    }
    Ok(())
}
