//! Damerau-Levenshtein distance implementation
//!
//! Extends Levenshtein with transpositions of adjacent elements.
//! Particularly useful for typo detection where letter swaps are common.
//!
//! This is the unrestricted ("true") distance: a transposed pair may be
//! edited again, so it satisfies the triangle inequality. The restricted
//! variant lives in [`osa`](super::osa).
//!
//! # Sequence Length Limits
//!
//! The algorithm needs the full (m+2)×(n+2) table. [`damerau_levenshtein`]
//! always allocates it; [`damerau_levenshtein_checked`] refuses inputs longer
//! than [`MAX_QUADRATIC_SEQUENCE_LENGTH`](super::MAX_QUADRATIC_SEQUENCE_LENGTH)
//! elements instead.

use super::table::{ensure_quadratic_fits, DpTable, Row};
use super::{similarity_from_edit_distance, EditDistance, Equality, Exact};
use crate::error::Result;
use smallvec::smallvec;

/// Damerau-Levenshtein distance calculator
///
/// # Complexity
/// - Time: O(m*n) where m and n are sequence lengths
/// - Space: O(m*n) for the full matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamerauLevenshtein<E = Exact> {
    eq: E,
}

impl DamerauLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self { eq: Exact }
    }
}

impl<E> DamerauLevenshtein<E> {
    #[must_use]
    pub fn with_equality(eq: E) -> Self {
        Self { eq }
    }
}

impl<T, E> EditDistance<T> for DamerauLevenshtein<E>
where
    E: Equality<T> + Send + Sync,
{
    fn distance(&self, source: &[T], target: &[T]) -> usize {
        damerau_impl(source, target, &self.eq)
    }
}

similarity_from_edit_distance!(DamerauLevenshtein, "damerau_levenshtein");

/// Lowrance-Wagner recurrence over a table shifted by one row and column,
/// with row/column 0 holding the `m + n` sentinel.
///
/// The textbook version keys "last row containing this element" by the
/// element's value. Under an arbitrary equality policy there is no key, so
/// it is tracked per target column instead: `last_row[j]` is the last source
/// row `i'` with `eq(source[i'-1], target[j-1])`.
fn damerau_impl<T, E: Equality<T> + ?Sized>(source: &[T], target: &[T], eq: &E) -> usize {
    let m = source.len();
    let n = target.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let max_dist = m + n;
    let mut d = DpTable::new(m + 2, n + 2);

    d.set(0, 0, max_dist);
    for i in 0..=m {
        d.set(i + 1, 0, max_dist);
        d.set(i + 1, 1, i);
    }
    for j in 0..=n {
        d.set(0, j + 1, max_dist);
        d.set(1, j + 1, j);
    }

    let mut last_row: Row = smallvec![0; n + 1];

    for i in 1..=m {
        // last column in this row whose target element matched source[i-1]
        let mut last_col = 0usize;

        for j in 1..=n {
            let i1 = last_row[j];
            let j1 = last_col;

            let cost = if eq.equals(&source[i - 1], &target[j - 1]) {
                last_col = j;
                last_row[j] = i;
                0
            } else {
                1
            };

            let cell = (d.get(i, j) + cost) // substitution
                .min(d.get(i + 1, j) + 1) // insertion
                .min(d.get(i, j + 1) + 1) // deletion
                .min(d.get(i1, j1) + (i - i1 - 1) + 1 + (j - j1 - 1)); // transposition
            d.set(i + 1, j + 1, cell);
        }
    }

    d.get(m + 1, n + 1)
}

/// Damerau-Levenshtein distance under exact equality.
///
/// # Example
/// ```
/// use seqdist::algorithms::damerau_levenshtein;
///
/// let a: Vec<char> = "CA".chars().collect();
/// let b: Vec<char> = "ABC".chars().collect();
/// assert_eq!(damerau_levenshtein(&a, &b), 2);
/// ```
#[inline]
#[must_use]
pub fn damerau_levenshtein<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    damerau_impl(source, target, &Exact)
}

#[inline]
#[must_use]
pub fn damerau_levenshtein_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> usize {
    damerau_impl(source, target, &eq)
}

/// Damerau-Levenshtein with explicit error handling for long sequences.
///
/// # Errors
/// [`MetricError::SequenceTooLong`](crate::MetricError::SequenceTooLong) if
/// either sequence exceeds the quadratic-memory limit.
///
/// # Example
/// ```
/// use seqdist::algorithms::damerau_levenshtein_checked;
///
/// let a: Vec<char> = "hello".chars().collect();
/// let b: Vec<char> = "hlelo".chars().collect();
/// assert_eq!(damerau_levenshtein_checked(&a, &b), Ok(1));
///
/// let long = vec!['a'; 15_000];
/// assert!(damerau_levenshtein_checked(&long, &b).is_err());
/// ```
pub fn damerau_levenshtein_checked<T: PartialEq>(source: &[T], target: &[T]) -> Result<usize> {
    damerau_levenshtein_checked_by(source, target, Exact)
}

/// # Errors
/// [`MetricError::SequenceTooLong`](crate::MetricError::SequenceTooLong) if
/// either sequence exceeds the quadratic-memory limit.
pub fn damerau_levenshtein_checked_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    eq: E,
) -> Result<usize> {
    ensure_quadratic_fits(source.len(), target.len())?;
    Ok(damerau_impl(source, target, &eq))
}

/// Normalized similarity (0.0 to 1.0) using Damerau-Levenshtein.
#[inline]
#[must_use]
pub fn damerau_levenshtein_similarity<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    damerau_levenshtein_similarity_by(source, target, Exact)
}

#[inline]
#[must_use]
pub fn damerau_levenshtein_similarity_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    eq: E,
) -> f64 {
    let dist = damerau_impl(source, target, &eq);
    super::normalized_similarity(dist, source.len().max(target.len()))
}
