//! Levenshtein (edit) distance implementation
//!
//! - Two-row rolling DP under any equality policy
//! - Early termination with max distance threshold
//! - Myers bit-parallel algorithm for exact equality over hashable elements

use super::table::RollingRows;
use super::{similarity_from_edit_distance, EditDistance, Equality, Exact};
use ahash::AHashMap;
use std::hash::Hash;

/// Maximum pattern length for Myers bit-parallel algorithm (64 bits per block)
const MYERS_BLOCK_SIZE: usize = 64;

// ============================================================================
// Dynamic Programming
// ============================================================================

/// Full two-row DP. `D[i][j] = D[i-1][j-1]` on a match, otherwise one more
/// than the cheapest of delete (up), insert (left) and substitute (diagonal).
fn levenshtein_impl<T, E: Equality<T> + ?Sized>(source: &[T], target: &[T], eq: &E) -> usize {
    let m = source.len();
    let n = target.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut rows = RollingRows::new(n + 1, |j| j);

    for (i, s) in source.iter().enumerate() {
        let (prev, curr) = rows.split();
        curr[0] = i + 1;

        for (j, t) in target.iter().enumerate() {
            curr[j + 1] = if eq.equals(s, t) {
                prev[j]
            } else {
                1 + prev[j + 1] // deletion
                    .min(curr[j]) // insertion
                    .min(prev[j]) // substitution
            };
        }

        rows.advance();
    }

    rows.last()[n]
}

/// DP with a max_distance threshold: gives up as soon as a whole row lies
/// above the bound, since row minima never decrease.
fn levenshtein_bounded_impl<T, E: Equality<T> + ?Sized>(
    source: &[T],
    target: &[T],
    max_distance: usize,
    eq: &E,
) -> Option<usize> {
    let m = source.len();
    let n = target.len();

    if m.abs_diff(n) > max_distance {
        return None;
    }
    if m == 0 || n == 0 {
        // the length check above already bounds this
        return Some(m.max(n));
    }

    let mut rows = RollingRows::new(n + 1, |j| j);

    for (i, s) in source.iter().enumerate() {
        let (prev, curr) = rows.split();
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for (j, t) in target.iter().enumerate() {
            let cell = if eq.equals(s, t) {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
            curr[j + 1] = cell;
            row_min = row_min.min(cell);
        }

        if row_min > max_distance {
            return None;
        }

        rows.advance();
    }

    let result = rows.last()[n];
    (result <= max_distance).then_some(result)
}

// ============================================================================
// Myers Bit-Parallel Algorithm
// ============================================================================

/// Myers bit-parallel Levenshtein distance for patterns up to 64 elements.
///
/// Runs in O(n) word operations: the whole DP column is encoded as vertical
/// +1/-1 delta bit vectors.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
fn myers_64<T: Eq + Hash>(pattern: &[T], text: &[T]) -> usize {
    let m = pattern.len();
    debug_assert!(m > 0 && m <= MYERS_BLOCK_SIZE);

    // Peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<&T, u64> = AHashMap::with_capacity(m);
    for (i, c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;
    let mask = 1u64 << (m - 1);

    for tc in text {
        let eq = peq.get(tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let xh = (((eq & vp).wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        // first row is 0,1,2,... so the shifted-in horizontal delta is +1
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    score
}

// ============================================================================
// Public API
// ============================================================================

/// Levenshtein distance calculator with optional early termination
///
/// # Complexity
/// - Time: O(m*n) where m and n are sequence lengths
/// - Space: O(n) using two rolling rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein<E = Exact> {
    /// Maximum distance to compute (for early termination)
    pub max_distance: Option<usize>,
    eq: E,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_distance: None,
            eq: Exact,
        }
    }
}

impl<E> Levenshtein<E> {
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

    /// Compute distance with proper Option semantics.
    /// Returns `None` if distance exceeds max_distance threshold.
    #[must_use]
    pub fn compute<T>(&self, source: &[T], target: &[T]) -> Option<usize>
    where
        E: Equality<T>,
    {
        match self.max_distance {
            Some(max_d) => levenshtein_bounded_impl(source, target, max_d, &self.eq),
            None => Some(levenshtein_impl(source, target, &self.eq)),
        }
    }
}

impl<T, E> EditDistance<T> for Levenshtein<E>
where
    E: Equality<T> + Send + Sync,
{
    fn distance(&self, source: &[T], target: &[T]) -> usize {
        // An exceeded threshold reads as max_distance + 1
        match self.max_distance {
            Some(max_d) => levenshtein_bounded_impl(source, target, max_d, &self.eq)
                .unwrap_or(max_d.saturating_add(1)),
            None => levenshtein_impl(source, target, &self.eq),
        }
    }
}

similarity_from_edit_distance!(Levenshtein, "levenshtein");

/// Levenshtein distance under exact equality.
///
/// # Example
/// ```
/// use seqdist::algorithms::levenshtein;
///
/// let a: Vec<char> = "kitten".chars().collect();
/// let b: Vec<char> = "sitting".chars().collect();
/// assert_eq!(levenshtein(&a, &b), 3);
/// ```
#[inline]
#[must_use]
pub fn levenshtein<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    levenshtein_impl(source, target, &Exact)
}

/// Levenshtein distance under a custom equality policy.
///
/// # Example
/// ```
/// use seqdist::algorithms::{levenshtein_by, IgnoreCase};
///
/// let a: Vec<char> = "Kitten".chars().collect();
/// let b: Vec<char> = "kitten".chars().collect();
/// assert_eq!(levenshtein_by(&a, &b, IgnoreCase), 0);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> usize {
    levenshtein_impl(source, target, &eq)
}

/// Compute Levenshtein distance with optional max threshold.
///
/// Returns `None` if distance exceeds `max_distance` (early termination).
/// Returns `Some(distance)` if distance is within threshold or no threshold set.
///
/// # Example
/// ```
/// use seqdist::algorithms::levenshtein_bounded;
///
/// let a: Vec<char> = "abcdef".chars().collect();
/// let b: Vec<char> = "ghijkl".chars().collect();
/// assert_eq!(levenshtein_bounded(&a, &b, None), Some(6));
/// assert_eq!(levenshtein_bounded(&a, &b, Some(3)), None);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_bounded<T: PartialEq>(
    source: &[T],
    target: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    levenshtein_bounded_by(source, target, max_distance, Exact)
}

/// Bounded Levenshtein distance under the given equality policy.
#[must_use]
pub fn levenshtein_bounded_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    max_distance: Option<usize>,
    eq: E,
) -> Option<usize> {
    match max_distance {
        Some(max_d) => levenshtein_bounded_impl(source, target, max_d, &eq),
        None => Some(levenshtein_impl(source, target, &eq)),
    }
}

/// Levenshtein distance via Myers' bit-vector algorithm.
///
/// Exact equality only, since the pattern masks are keyed by element hash.
/// The shorter sequence is the pattern; when it exceeds 64 elements this
/// falls back to the rolling-row DP.
#[must_use]
pub fn levenshtein_bit_parallel<T: Eq + Hash>(source: &[T], target: &[T]) -> usize {
    let (pattern, text) = if source.len() <= target.len() {
        (source, target)
    } else {
        (target, source)
    };

    if pattern.is_empty() {
        return text.len();
    }
    if pattern.len() > MYERS_BLOCK_SIZE {
        return levenshtein_impl(source, target, &Exact);
    }
    myers_64(pattern, text)
}

/// Normalized similarity (0.0 to 1.0): `1 - distance / max_len`.
#[inline]
#[must_use]
pub fn levenshtein_similarity<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    levenshtein_similarity_by(source, target, Exact)
}

#[inline]
#[must_use]
pub fn levenshtein_similarity_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> f64 {
    let dist = levenshtein_impl(source, target, &eq);
    super::normalized_similarity(dist, source.len().max(target.len()))
}
