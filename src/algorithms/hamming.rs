//! Hamming distance implementation
//!
//! Counts positions where elements differ.
//! Only defined for sequences of equal length: unequal lengths are a
//! [`MetricError::LengthMismatch`], never a silent score.
//!
//! If you need Hamming-like behavior on unequal sequences, use
//! [`hamming_padded`], which counts every position past the shorter
//! sequence as a mismatch.
//!
//! # Complexity
//! - Time: O(n) where n is the sequence length
//! - Space: O(1)

use super::{Equality, Exact, FallibleEditDistance};
use crate::error::{MetricError, Result};

/// Hamming distance calculator
///
/// Implements `FallibleEditDistance` because Hamming distance is only
/// defined for sequences of equal length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming<E = Exact> {
    eq: E,
}

impl Hamming {
    #[must_use]
    pub fn new() -> Self {
        Self { eq: Exact }
    }
}

impl<E> Hamming<E> {
    #[must_use]
    pub fn with_equality(eq: E) -> Self {
        Self { eq }
    }
}

impl<T, E> FallibleEditDistance<T> for Hamming<E>
where
    E: Equality<T> + Send + Sync,
{
    fn distance(&self, source: &[T], target: &[T]) -> Result<usize> {
        hamming_impl(source, target, &self.eq)
    }

    fn name(&self) -> &'static str {
        "hamming"
    }
}

fn hamming_impl<T, E: Equality<T> + ?Sized>(source: &[T], target: &[T], eq: &E) -> Result<usize> {
    if source.len() != target.len() {
        return Err(MetricError::LengthMismatch {
            source_len: source.len(),
            target_len: target.len(),
        });
    }

    Ok(source
        .iter()
        .zip(target)
        .filter(|(s, t)| !eq.equals(s, t))
        .count())
}

/// Hamming distance under exact equality.
///
/// # Errors
/// [`MetricError::LengthMismatch`] if the sequences differ in length.
///
/// # Example
/// ```
/// use seqdist::algorithms::hamming;
///
/// let a: Vec<char> = "karolin".chars().collect();
/// let b: Vec<char> = "kathrin".chars().collect();
/// assert_eq!(hamming(&a, &b), Ok(3));
/// assert!(hamming(&a, &b[1..]).is_err());
/// ```
pub fn hamming<T: PartialEq>(source: &[T], target: &[T]) -> Result<usize> {
    hamming_impl(source, target, &Exact)
}

/// Hamming distance under a custom equality policy.
///
/// # Errors
/// [`MetricError::LengthMismatch`] if the sequences differ in length.
pub fn hamming_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> Result<usize> {
    hamming_impl(source, target, &eq)
}

/// Hamming distance over unequal lengths: positions present in only one
/// sequence count as mismatches.
#[must_use]
pub fn hamming_padded<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    hamming_padded_by(source, target, Exact)
}

/// Padded Hamming distance under the given equality policy.
#[must_use]
pub fn hamming_padded_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> usize {
    let overlap = source
        .iter()
        .zip(target)
        .filter(|(s, t)| !eq.equals(s, t))
        .count();
    overlap + source.len().abs_diff(target.len())
}

/// Normalized Hamming similarity (0.0 to 1.0).
///
/// # Errors
/// [`MetricError::LengthMismatch`] if the sequences differ in length.
pub fn hamming_similarity<T: PartialEq>(source: &[T], target: &[T]) -> Result<f64> {
    hamming_similarity_by(source, target, Exact)
}

/// # Errors
/// [`MetricError::LengthMismatch`] if the sequences differ in length.
pub fn hamming_similarity_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> Result<f64> {
    let dist = hamming_impl(source, target, &eq)?;
    Ok(super::normalized_similarity(dist, source.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::IgnoreCase;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_hamming_basic() {
        assert_eq!(hamming::<char>(&[], &[]), Ok(0));
        assert_eq!(hamming(&chars("abc"), &chars("abc")), Ok(0));
        assert_eq!(hamming(&chars("abc"), &chars("axc")), Ok(1));
        assert_eq!(hamming(&chars("karolin"), &chars("kathrin")), Ok(3));
        assert_eq!(hamming(&[1, 0, 1, 1], &[1, 1, 1, 0]), Ok(2));
    }

    #[test]
    fn test_hamming_different_lengths() {
        assert_eq!(
            hamming(&chars("abc"), &chars("ab")),
            Err(MetricError::LengthMismatch {
                source_len: 3,
                target_len: 2
            })
        );
        assert!(hamming(&chars(""), &chars("a")).is_err());
        assert_eq!(hamming_padded(&chars("abc"), &chars("ab")), 1);
        assert_eq!(hamming_padded(&chars("abc"), &chars("xbcde")), 3);
    }

    #[test]
    fn test_hamming_by_policy() {
        assert_eq!(hamming_by(&chars("ABC"), &chars("abd"), IgnoreCase), Ok(1));
        assert_eq!(hamming_padded_by(&chars("AB"), &chars("abc"), IgnoreCase), 1);
    }

    #[test]
    fn test_hamming_similarity() {
        assert_eq!(hamming_similarity::<char>(&[], &[]), Ok(1.0));
        assert_eq!(hamming_similarity(&chars("abcd"), &chars("abxx")), Ok(0.5));
        assert!(hamming_similarity(&chars("abcd"), &chars("abc")).is_err());
    }

    #[test]
    fn test_hamming_struct() {
        let h = Hamming::new();
        assert_eq!(h.distance(&chars("abc"), &chars("xyz")), Ok(3));
        assert!(h.distance(&chars("abc"), &chars("xy")).is_err());
        assert_eq!(FallibleEditDistance::<char>::name(&h), "hamming");

        let ci = Hamming::with_equality(IgnoreCase);
        assert_eq!(ci.similarity(&chars("AbC"), &chars("abc")), Ok(1.0));
    }
}
