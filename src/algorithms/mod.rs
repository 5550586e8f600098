//! Core sequence metrics
//!
//! Each algorithm is implemented as a standalone generic function over
//! `&[T]` (with a `_by` form taking an [`Equality`] policy), plus a
//! calculator type implementing the trait interfaces below.

pub mod damerau;
pub mod equality;
pub mod hamming;
pub mod jaro;
pub mod lcs;
pub mod levenshtein;
pub mod osa;
pub(crate) mod table;

pub use damerau::*;
pub use equality::*;
pub use hamming::*;
pub use jaro::*;
pub use lcs::*;
pub use levenshtein::*;
pub use osa::*;
pub use table::MAX_QUADRATIC_SEQUENCE_LENGTH;

use crate::error::Result;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity<T>: Send + Sync {
    fn similarity(&self, source: &[T], target: &[T]) -> f64;

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Edit distances: an integer distance plus its normalized similarity.
pub trait EditDistance<T>: Similarity<T> {
    fn distance(&self, source: &[T], target: &[T]) -> usize;
}

/// Trait for edit distance algorithms that may fail.
///
/// Some algorithms have constraints (e.g., Hamming requires equal-length
/// sequences), so the distance comes back as a `Result`.
pub trait FallibleEditDistance<T>: Send + Sync {
    fn distance(&self, source: &[T], target: &[T]) -> Result<usize>;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, source: &[T], target: &[T]) -> Result<f64> {
        let dist = self.distance(source, target)?;
        Ok(normalized_similarity(dist, source.len().max(target.len())))
    }

    fn name(&self) -> &'static str;
}

/// `1 - distance / max_len`, with two empty sequences being identical.
#[inline]
#[must_use]
pub fn normalized_similarity(distance: usize, max_len: usize) -> f64 {
    if max_len == 0 {
        1.0
    } else {
        1.0 - (distance as f64 / max_len as f64)
    }
}

/// Implements `Similarity` for an `EditDistance` calculator as the
/// normalized distance.
macro_rules! similarity_from_edit_distance {
    ($calc:ident, $name:literal) => {
        impl<T, E> $crate::algorithms::Similarity<T> for $calc<E>
        where
            E: $crate::algorithms::Equality<T> + Send + Sync,
        {
            fn similarity(&self, source: &[T], target: &[T]) -> f64 {
                let dist = $crate::algorithms::EditDistance::distance(self, source, target);
                $crate::algorithms::normalized_similarity(dist, source.len().max(target.len()))
            }

            fn name(&self) -> &'static str {
                $name
            }
        }
    };
}

pub(crate) use similarity_from_edit_distance;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_similarity() {
        assert_eq!(normalized_similarity(0, 0), 1.0);
        assert_eq!(normalized_similarity(0, 5), 1.0);
        assert_eq!(normalized_similarity(5, 5), 0.0);
        assert!((normalized_similarity(1, 4) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_trait_objects() {
        let chars: Vec<char> = "kitten".chars().collect();
        let other: Vec<char> = "sitting".chars().collect();
        let metrics: Vec<Box<dyn Similarity<char>>> = vec![
            Box::new(Levenshtein::new()),
            Box::new(DamerauLevenshtein::new()),
            Box::new(OptimalStringAlignment::new()),
            Box::new(Lcs::new()),
            Box::new(LongestCommonSubstring::new()),
            Box::new(Jaro::new()),
            Box::new(JaroWinkler::new()),
        ];
        for metric in &metrics {
            let score = metric.similarity(&chars, &other);
            assert!((0.0..=1.0).contains(&score), "{} out of range", metric.name());
            assert_eq!(metric.similarity(&chars, &chars), 1.0, "{}", metric.name());
        }
    }
}
