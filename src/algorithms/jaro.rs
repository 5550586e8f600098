//! Jaro and Jaro-Winkler similarity implementations
//!
//! Excellent for name matching and short sequences.
//! Jaro-Winkler gives extra weight to common prefixes.
//!
//! Every step (windowed matching, transposition counting and the prefix
//! bonus) goes through the equality policy.

use super::{Equality, Exact, Similarity};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Standard Winkler prefix scaling factor.
pub const DEFAULT_PREFIX_WEIGHT: f64 = 0.1;
/// Standard cap on the prefix length that earns the bonus.
pub const DEFAULT_MAX_PREFIX_LENGTH: usize = 4;
/// Largest prefix weight accepted for any prefix length. Longer prefix caps
/// lower the limit to `1.0 / max_prefix_length`.
pub const MAX_PREFIX_WEIGHT: f64 = 0.25;

// ============================================================================
// Public API
// ============================================================================

/// Jaro similarity calculator
///
/// # Complexity
/// - Time: O(m*n) for matching elements
/// - Space: O(m+n) for match flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaro<E = Exact> {
    eq: E,
}

impl Jaro {
    #[must_use]
    pub fn new() -> Self {
        Self { eq: Exact }
    }
}

impl<E> Jaro<E> {
    #[must_use]
    pub fn with_equality(eq: E) -> Self {
        Self { eq }
    }
}

impl<T, E> Similarity<T> for Jaro<E>
where
    E: Equality<T> + Send + Sync,
{
    fn similarity(&self, source: &[T], target: &[T]) -> f64 {
        jaro_impl(source, target, &self.eq)
    }

    fn name(&self) -> &'static str {
        "jaro"
    }
}

/// Configuration for Jaro-Winkler similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaroWinklerConfig {
    /// Prefix weight (typically 0.1, max 0.25)
    pub prefix_weight: f64,
    /// Maximum prefix length to consider (typically 4)
    pub max_prefix_length: usize,
}

impl Default for JaroWinklerConfig {
    fn default() -> Self {
        Self {
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
            max_prefix_length: DEFAULT_MAX_PREFIX_LENGTH,
        }
    }
}

impl JaroWinklerConfig {
    /// Largest prefix weight for which `max_prefix_length * weight <= 1`.
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        if self.max_prefix_length > 4 {
            1.0 / self.max_prefix_length as f64
        } else {
            MAX_PREFIX_WEIGHT
        }
    }

    /// Copy of this configuration with the prefix weight clamped to
    /// [0.0, [`max_weight`](Self::max_weight)].
    #[must_use]
    pub fn clamped(self) -> Self {
        let upper = self.max_weight();
        let prefix_weight = if self.prefix_weight.is_nan() {
            0.0
        } else {
            self.prefix_weight.clamp(0.0, upper)
        };
        if prefix_weight != self.prefix_weight {
            tracing::warn!(
                requested = self.prefix_weight,
                clamped = prefix_weight,
                max_prefix_length = self.max_prefix_length,
                "jaro-winkler prefix_weight clamped to [0.0, {}]",
                upper
            );
        }
        Self {
            prefix_weight,
            max_prefix_length: self.max_prefix_length,
        }
    }
}

/// Jaro-Winkler similarity calculator
///
/// Extends Jaro similarity by giving extra weight to common prefixes.
/// Best for names and short identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JaroWinkler<E = Exact> {
    config: JaroWinklerConfig,
    eq: E,
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> JaroWinkler<E> {
    #[must_use]
    pub fn with_equality(eq: E) -> Self {
        Self {
            config: JaroWinklerConfig::default(),
            eq,
        }
    }

    /// Replace the configuration; the prefix weight is clamped so the score
    /// stays within [0.0, 1.0].
    #[must_use]
    pub fn with_config(mut self, config: JaroWinklerConfig) -> Self {
        self.config = config.clamped();
        self
    }

    #[must_use]
    pub fn with_prefix_weight(self, weight: f64) -> Self {
        let config = JaroWinklerConfig {
            prefix_weight: weight,
            ..self.config
        };
        self.with_config(config)
    }

    /// Cap the prefix length that earns the bonus. A cap above 4 may lower
    /// the prefix weight.
    #[must_use]
    pub fn with_max_prefix_length(self, length: usize) -> Self {
        let config = JaroWinklerConfig {
            max_prefix_length: length,
            ..self.config
        };
        self.with_config(config)
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> JaroWinklerConfig {
        self.config
    }
}

impl<T, E> Similarity<T> for JaroWinkler<E>
where
    E: Equality<T> + Send + Sync,
{
    fn similarity(&self, source: &[T], target: &[T]) -> f64 {
        jaro_winkler_impl(source, target, &self.config, &self.eq)
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

// ============================================================================
// Algorithm
// ============================================================================

fn jaro_impl<T, E: Equality<T> + ?Sized>(source: &[T], target: &[T], eq: &E) -> f64 {
    let m = source.len();
    let n = target.len();

    if m == 0 && n == 0 {
        return 1.0;
    }
    if m == 0 || n == 0 {
        return 0.0;
    }

    // Match window
    let match_distance = (m.max(n) / 2).saturating_sub(1);

    let mut source_matched: SmallVec<[bool; 64]> = smallvec![false; m];
    let mut target_matched: SmallVec<[bool; 64]> = smallvec![false; n];
    let mut matches = 0usize;

    for (i, s) in source.iter().enumerate() {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(n);

        for j in start..end {
            if target_matched[j] || !eq.equals(s, &target[j]) {
                continue;
            }
            source_matched[i] = true;
            target_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Pair the k-th matched source element with the k-th matched target
    // element; both sides hold exactly `matches` flags.
    let matched_targets = target
        .iter()
        .zip(&target_matched)
        .filter_map(|(t, &flag)| flag.then_some(t));
    let half_transpositions = source
        .iter()
        .zip(&source_matched)
        .filter_map(|(s, &flag)| flag.then_some(s))
        .zip(matched_targets)
        .filter(|(s, t)| !eq.equals(s, t))
        .count();

    let matches = matches as f64;
    let transpositions = half_transpositions as f64 / 2.0;

    (matches / m as f64 + matches / n as f64 + (matches - transpositions) / matches) / 3.0
}

fn common_prefix_len<T, E: Equality<T> + ?Sized>(
    source: &[T],
    target: &[T],
    max_prefix_len: usize,
    eq: &E,
) -> usize {
    source
        .iter()
        .zip(target)
        .take(max_prefix_len)
        .take_while(|(s, t)| eq.equals(s, t))
        .count()
}

fn jaro_winkler_impl<T, E: Equality<T> + ?Sized>(
    source: &[T],
    target: &[T],
    config: &JaroWinklerConfig,
    eq: &E,
) -> f64 {
    let jaro_sim = jaro_impl(source, target, eq);

    if jaro_sim == 0.0 {
        return 0.0;
    }

    let prefix_len = common_prefix_len(source, target, config.max_prefix_length, eq);
    // rounding in `1.0 / max_prefix_length` can overshoot by an ulp
    (jaro_sim + (prefix_len as f64 * config.prefix_weight * (1.0 - jaro_sim))).min(1.0)
}

/// Jaro similarity (0.0 to 1.0) under exact equality.
#[inline]
#[must_use]
pub fn jaro_similarity<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    jaro_impl(source, target, &Exact)
}

#[inline]
#[must_use]
pub fn jaro_similarity_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> f64 {
    jaro_impl(source, target, &eq)
}

/// Jaro-Winkler similarity with the standard parameters (`p = 0.1`, prefix
/// capped at 4).
///
/// # Example
/// ```
/// use seqdist::algorithms::jaro_winkler_similarity;
///
/// let a: Vec<char> = "MARTHA".chars().collect();
/// let b: Vec<char> = "MARHTA".chars().collect();
/// assert!((jaro_winkler_similarity(&a, &b) - 0.961).abs() < 0.001);
/// ```
#[inline]
#[must_use]
pub fn jaro_winkler_similarity<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    jaro_winkler_impl(source, target, &JaroWinklerConfig::default(), &Exact)
}

#[inline]
#[must_use]
pub fn jaro_winkler_similarity_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> f64 {
    jaro_winkler_impl(source, target, &JaroWinklerConfig::default(), &eq)
}

/// Jaro-Winkler similarity with custom parameters.
/// The prefix weight is clamped to [0.0, 0.25], and to
/// `1.0 / max_prefix_length` for longer prefix caps, so the result stays in
/// [0.0, 1.0].
#[must_use]
pub fn jaro_winkler_similarity_with<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    config: &JaroWinklerConfig,
    eq: E,
) -> f64 {
    jaro_winkler_impl(source, target, &config.clamped(), &eq)
}

/// Distance version (1.0 - similarity)
#[inline]
#[must_use]
pub fn jaro_winkler_distance<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    1.0 - jaro_winkler_similarity(source, target)
}

#[inline]
#[must_use]
pub fn jaro_winkler_distance_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> f64 {
    1.0 - jaro_winkler_similarity_by(source, target, eq)
}
