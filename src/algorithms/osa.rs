//! Optimal String Alignment (OSA) distance
//!
//! The restricted Damerau-Levenshtein variant: an adjacent transposition
//! costs one edit, but no substring is edited more than once. That makes it
//! cheaper (three rolling rows instead of a full table) and a pseudo-metric:
//! it does not satisfy the triangle inequality.
//!
//! Example where OSA differs from true Damerau-Levenshtein:
//! `"CA"` -> `"ABC"`: OSA = 3 (sub C->A, sub A->B, ins C),
//! true DL = 2 (transpose CA->AC, ins B).

use super::table::RollingRows3;
use super::{similarity_from_edit_distance, EditDistance, Equality, Exact};

/// OSA distance calculator with optional early termination
///
/// # Complexity
/// - Time: O(m*n)
/// - Space: O(n) using three rolling rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimalStringAlignment<E = Exact> {
    /// Maximum distance for early termination
    pub max_distance: Option<usize>,
    eq: E,
}

impl OptimalStringAlignment {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_distance: None,
            eq: Exact,
        }
    }
}

impl<E> OptimalStringAlignment<E> {
    #[must_use]
    pub fn with_equality(eq: E) -> Self {
        Self {
            max_distance: None,
            eq,
        }
    }

    #[must_use]
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Returns `None` if the distance exceeds the max_distance threshold.
    #[must_use]
    pub fn compute<T>(&self, source: &[T], target: &[T]) -> Option<usize>
    where
        E: Equality<T>,
    {
        osa_impl(source, target, self.max_distance, &self.eq)
    }
}

impl<T, E> EditDistance<T> for OptimalStringAlignment<E>
where
    E: Equality<T> + Send + Sync,
{
    fn distance(&self, source: &[T], target: &[T]) -> usize {
        match self.max_distance {
            Some(max_d) => {
                osa_impl(source, target, Some(max_d), &self.eq).unwrap_or(max_d.saturating_add(1))
            }
            None => osa_impl(source, target, None, &self.eq).unwrap_or(0),
        }
    }
}

similarity_from_edit_distance!(OptimalStringAlignment, "optimal_string_alignment");

/// Levenshtein recurrence plus `D[i][j] = min(D[i][j], D[i-2][j-2] + 1)`
/// when `source[i-1] ~ target[j-2]` and `source[i-2] ~ target[j-1]`.
///
/// Only returns `None` when `max_distance` is set and exceeded.
fn osa_impl<T, E: Equality<T> + ?Sized>(
    source: &[T],
    target: &[T],
    max_distance: Option<usize>,
    eq: &E,
) -> Option<usize> {
    let m = source.len();
    let n = target.len();

    if let Some(max_d) = max_distance {
        if m.abs_diff(n) > max_d {
            return None;
        }
    }
    if m == 0 {
        return Some(n);
    }
    if n == 0 {
        return Some(m);
    }

    let mut rows = RollingRows3::new(n + 1, |j| j);

    for i in 1..=m {
        let (prev2, prev, curr) = rows.split();
        curr[0] = i;
        let mut row_min = i;

        for j in 1..=n {
            let cost = usize::from(!eq.equals(&source[i - 1], &target[j - 1]));

            let mut cell = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution

            if i > 1
                && j > 1
                && eq.equals(&source[i - 1], &target[j - 2])
                && eq.equals(&source[i - 2], &target[j - 1])
            {
                cell = cell.min(prev2[j - 2] + 1); // transposition
            }

            curr[j] = cell;
            row_min = row_min.min(cell);
        }

        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return None;
            }
        }

        rows.advance();
    }

    let result = rows.last()[n];
    match max_distance {
        Some(max_d) if result > max_d => None,
        _ => Some(result),
    }
}

/// Optimal String Alignment distance under exact equality.
///
/// # Example
/// ```
/// use seqdist::algorithms::optimal_string_alignment;
///
/// let a: Vec<char> = "CA".chars().collect();
/// let b: Vec<char> = "ABC".chars().collect();
/// assert_eq!(optimal_string_alignment(&a, &b), 3);
/// ```
#[inline]
#[must_use]
pub fn optimal_string_alignment<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    optimal_string_alignment_by(source, target, Exact)
}

#[inline]
#[must_use]
pub fn optimal_string_alignment_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> usize {
    // unbounded, so always Some
    osa_impl(source, target, None, &eq).unwrap_or(0)
}

/// OSA distance with optional max threshold; `None` when it is exceeded.
#[inline]
#[must_use]
pub fn optimal_string_alignment_bounded<T: PartialEq>(
    source: &[T],
    target: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    osa_impl(source, target, max_distance, &Exact)
}

#[inline]
#[must_use]
pub fn optimal_string_alignment_bounded_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    max_distance: Option<usize>,
    eq: E,
) -> Option<usize> {
    osa_impl(source, target, max_distance, &eq)
}

/// Normalized similarity (0.0 to 1.0) using OSA.
#[inline]
#[must_use]
pub fn optimal_string_alignment_similarity<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    optimal_string_alignment_similarity_by(source, target, Exact)
}

#[inline]
#[must_use]
pub fn optimal_string_alignment_similarity_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    eq: E,
) -> f64 {
    let dist = optimal_string_alignment_by(source, target, eq);
    super::normalized_similarity(dist, source.len().max(target.len()))
}
