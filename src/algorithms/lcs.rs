//! Longest Common Subsequence (LCS) and Longest Common Substring
//!
//! LCS finds the longest subsequence present in both sequences (not
//! necessarily contiguous); the substring variant requires a contiguous run.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(n) for the lengths and for substring extraction,
//!   O(m*n) for subsequence extraction
//!
//! # Sequence Length Limits
//!
//! [`longest_common_subsequence`] needs the full table for backtracking and
//! returns [`MetricError::SequenceTooLong`](crate::MetricError::SequenceTooLong)
//! for inputs longer than 10,000 elements. Use the `_length` functions for
//! a space-efficient computation.

use super::table::{ensure_quadratic_fits, DpTable, RollingRows};
use super::{Equality, Exact, Similarity};
use crate::error::Result;

// ============================================================================
// Longest Common Subsequence
// ============================================================================

/// LCS-based similarity calculator (Dice form, see [`lcs_similarity`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lcs<E = Exact> {
    eq: E,
}

impl Lcs {
    #[must_use]
    pub fn new() -> Self {
        Self { eq: Exact }
    }
}

impl<E> Lcs<E> {
    #[must_use]
    pub fn with_equality(eq: E) -> Self {
        Self { eq }
    }

    #[must_use]
    pub fn length<T>(&self, source: &[T], target: &[T]) -> usize
    where
        E: Equality<T>,
    {
        lcs_length_impl(source, target, &self.eq)
    }
}

impl<T, E> Similarity<T> for Lcs<E>
where
    E: Equality<T> + Send + Sync,
{
    fn similarity(&self, source: &[T], target: &[T]) -> f64 {
        dice(lcs_length_impl(source, target, &self.eq), source.len(), target.len())
    }

    fn name(&self) -> &'static str {
        "lcs"
    }
}

/// `L[i][j] = L[i-1][j-1] + 1` on a match, else `max(L[i-1][j], L[i][j-1])`.
fn lcs_length_impl<T, E: Equality<T> + ?Sized>(source: &[T], target: &[T], eq: &E) -> usize {
    let n = target.len();
    if source.is_empty() || n == 0 {
        return 0;
    }

    let mut rows = RollingRows::new(n + 1, |_| 0);

    for s in source {
        let (prev, curr) = rows.split();
        curr[0] = 0;
        for (j, t) in target.iter().enumerate() {
            curr[j + 1] = if eq.equals(s, t) {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        rows.advance();
    }

    rows.last()[n]
}

/// Length of the Longest Common Subsequence.
///
/// # Example
/// ```
/// use seqdist::algorithms::longest_common_subsequence_length;
///
/// let a: Vec<char> = "AGGTAB".chars().collect();
/// let b: Vec<char> = "GXTXAYB".chars().collect();
/// assert_eq!(longest_common_subsequence_length(&a, &b), 4); // GTAB
/// ```
#[must_use]
pub fn longest_common_subsequence_length<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    lcs_length_impl(source, target, &Exact)
}

#[must_use]
pub fn longest_common_subsequence_length_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    eq: E,
) -> usize {
    lcs_length_impl(source, target, &eq)
}

/// The actual LCS (not just its length), taken from `source`.
///
/// # Errors
/// [`MetricError::SequenceTooLong`](crate::MetricError::SequenceTooLong) when
/// either sequence exceeds the quadratic-memory limit.
pub fn longest_common_subsequence<T: PartialEq + Clone>(source: &[T], target: &[T]) -> Result<Vec<T>> {
    longest_common_subsequence_by(source, target, Exact)
}

/// # Errors
/// [`MetricError::SequenceTooLong`](crate::MetricError::SequenceTooLong) when
/// either sequence exceeds the quadratic-memory limit.
pub fn longest_common_subsequence_by<T: Clone, E: Equality<T>>(
    source: &[T],
    target: &[T],
    eq: E,
) -> Result<Vec<T>> {
    let m = source.len();
    let n = target.len();

    if m == 0 || n == 0 {
        return Ok(Vec::new());
    }
    ensure_quadratic_fits(m, n)?;

    // Full DP table needed for backtracking
    let mut dp = DpTable::new(m + 1, n + 1);
    for i in 1..=m {
        for j in 1..=n {
            let cell = if eq.equals(&source[i - 1], &target[j - 1]) {
                dp.get(i - 1, j - 1) + 1
            } else {
                dp.get(i - 1, j).max(dp.get(i, j - 1))
            };
            dp.set(i, j, cell);
        }
    }

    let mut lcs = Vec::with_capacity(dp.get(m, n));
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if eq.equals(&source[i - 1], &target[j - 1]) {
            lcs.push(source[i - 1].clone());
            i -= 1;
            j -= 1;
        } else if dp.get(i - 1, j) > dp.get(i, j - 1) {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    Ok(lcs)
}

fn dice(common: usize, m: usize, n: usize) -> f64 {
    if m + n == 0 {
        1.0
    } else {
        (2.0 * common as f64) / (m + n) as f64
    }
}

/// LCS-based similarity (0.0 to 1.0): `2 * LCS_length / (m + n)`.
#[must_use]
pub fn lcs_similarity<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    lcs_similarity_by(source, target, Exact)
}

#[must_use]
pub fn lcs_similarity_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> f64 {
    dice(lcs_length_impl(source, target, &eq), source.len(), target.len())
}

/// Alternative similarity using max length as denominator
#[must_use]
pub fn lcs_similarity_max<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    lcs_similarity_max_by(source, target, Exact)
}

#[must_use]
pub fn lcs_similarity_max_by<T, E: Equality<T>>(source: &[T], target: &[T], eq: E) -> f64 {
    let max_len = source.len().max(target.len());
    if max_len == 0 {
        return 1.0;
    }
    lcs_length_impl(source, target, &eq) as f64 / max_len as f64
}

// ============================================================================
// Longest Common Substring
// ============================================================================

/// Similarity from the longest common substring, `length / max_len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestCommonSubstring<E = Exact> {
    eq: E,
}

impl LongestCommonSubstring {
    #[must_use]
    pub fn new() -> Self {
        Self { eq: Exact }
    }
}

impl<E> LongestCommonSubstring<E> {
    #[must_use]
    pub fn with_equality(eq: E) -> Self {
        Self { eq }
    }

    #[must_use]
    pub fn length<T>(&self, source: &[T], target: &[T]) -> usize
    where
        E: Equality<T>,
    {
        substring_impl(source, target, &self.eq).1
    }
}

impl<T, E> Similarity<T> for LongestCommonSubstring<E>
where
    E: Equality<T> + Send + Sync,
{
    fn similarity(&self, source: &[T], target: &[T]) -> f64 {
        let (_, len) = substring_impl(source, target, &self.eq);
        substring_ratio(len, source.len(), target.len())
    }

    fn name(&self) -> &'static str {
        "longest_common_substring"
    }
}

/// `C[i][j] = C[i-1][j-1] + 1` on a match, else 0.
///
/// Returns `(end, length)` of the first longest run in `source`.
fn substring_impl<T, E: Equality<T> + ?Sized>(source: &[T], target: &[T], eq: &E) -> (usize, usize) {
    let n = target.len();
    if source.is_empty() || n == 0 {
        return (0, 0);
    }

    let mut rows = RollingRows::new(n + 1, |_| 0);
    let mut max_len = 0;
    let mut end = 0;

    for (i, s) in source.iter().enumerate() {
        let (prev, curr) = rows.split();
        curr[0] = 0;
        for (j, t) in target.iter().enumerate() {
            if eq.equals(s, t) {
                let run = prev[j] + 1;
                curr[j + 1] = run;
                if run > max_len {
                    max_len = run;
                    end = i + 1;
                }
            } else {
                curr[j + 1] = 0;
            }
        }
        rows.advance();
    }

    (end, max_len)
}

fn substring_ratio(len: usize, m: usize, n: usize) -> f64 {
    let max_len = m.max(n);
    if max_len == 0 {
        1.0
    } else {
        len as f64 / max_len as f64
    }
}

/// Length of the longest contiguous run common to both sequences.
///
/// # Example
/// ```
/// use seqdist::algorithms::longest_common_substring_length;
///
/// let a: Vec<char> = "abcdef".chars().collect();
/// let b: Vec<char> = "zbcdf".chars().collect();
/// assert_eq!(longest_common_substring_length(&a, &b), 3); // bcd
/// ```
#[must_use]
pub fn longest_common_substring_length<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    substring_impl(source, target, &Exact).1
}

#[must_use]
pub fn longest_common_substring_length_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    eq: E,
) -> usize {
    substring_impl(source, target, &eq).1
}

/// The first longest common substring, as a slice of `source`.
#[must_use]
pub fn longest_common_substring<'a, T: PartialEq>(source: &'a [T], target: &[T]) -> &'a [T] {
    longest_common_substring_by(source, target, Exact)
}

#[must_use]
pub fn longest_common_substring_by<'a, T, E: Equality<T>>(
    source: &'a [T],
    target: &[T],
    eq: E,
) -> &'a [T] {
    let (end, len) = substring_impl(source, target, &eq);
    &source[end - len..end]
}

/// Longest-common-substring similarity (0.0 to 1.0): `length / max_len`.
#[must_use]
pub fn longest_common_substring_similarity<T: PartialEq>(source: &[T], target: &[T]) -> f64 {
    longest_common_substring_similarity_by(source, target, Exact)
}

#[must_use]
pub fn longest_common_substring_similarity_by<T, E: Equality<T>>(
    source: &[T],
    target: &[T],
    eq: E,
) -> f64 {
    let (_, len) = substring_impl(source, target, &eq);
    substring_ratio(len, source.len(), target.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::IgnoreCase;
    use crate::error::MetricError;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn text(v: &[char]) -> String {
        v.iter().collect()
    }

    #[test]
    fn test_lcs_length() {
        let lcs = |a: &str, b: &str| longest_common_subsequence_length(&chars(a), &chars(b));
        assert_eq!(lcs("", ""), 0);
        assert_eq!(lcs("abc", ""), 0);
        assert_eq!(lcs("abc", "abc"), 3);
        assert_eq!(lcs("abc", "def"), 0);
        assert_eq!(lcs("ABCDGH", "AEDFHR"), 3); // ADH
        assert_eq!(lcs("AGGTAB", "GXTXAYB"), 4); // GTAB
    }

    #[test]
    fn test_lcs_string() {
        let lcs = |a: &str, b: &str| text(&longest_common_subsequence(&chars(a), &chars(b)).unwrap());
        assert_eq!(lcs("ABCDGH", "AEDFHR"), "ADH");
        assert_eq!(lcs("AGGTAB", "GXTXAYB"), "GTAB");
        assert_eq!(lcs("", "abc"), "");
    }

    #[test]
    fn test_lcs_string_too_long() {
        let long = vec![1u16; 10_001];
        assert!(matches!(
            longest_common_subsequence(&long, &[1, 2]),
            Err(MetricError::SequenceTooLong { .. })
        ));
        // the length-only path has no limit
        assert_eq!(longest_common_subsequence_length(&long, &[1, 2]), 1);
    }

    #[test]
    fn test_lcs_policy() {
        let a = chars("ABC");
        let b = chars("xaybzc");
        assert_eq!(longest_common_subsequence_length(&a, &b), 0);
        assert_eq!(longest_common_subsequence_length_by(&a, &b, IgnoreCase), 3);
        assert_eq!(text(&longest_common_subsequence_by(&a, &b, IgnoreCase).unwrap()), "ABC");
    }

    #[test]
    fn test_lcs_similarity() {
        assert_eq!(lcs_similarity::<char>(&[], &[]), 1.0);
        assert_eq!(lcs_similarity(&chars("abc"), &chars("")), 0.0);
        assert_eq!(lcs_similarity(&chars("abcd"), &chars("abxy")), 0.5);
        assert_eq!(lcs_similarity_max(&chars("ab"), &chars("abcd")), 0.5);
        assert_eq!(lcs_similarity_max(&chars("AB"), &chars("abcd")), 0.0);
        assert_eq!(lcs_similarity_max_by(&chars("AB"), &chars("abcd"), IgnoreCase), 0.5);
        assert_eq!(Lcs::new().length(&chars("ab"), &chars("xaxb")), 2);
    }

    #[test]
    fn test_longest_common_substring() {
        let a = chars("abcdef");
        let b = chars("zbcdf");
        assert_eq!(longest_common_substring_length(&a, &b), 3);
        assert_eq!(text(longest_common_substring(&a, &b)), "bcd");
        assert_eq!(longest_common_substring(&a, &chars("xyz")), &[] as &[char]);
        assert_eq!(longest_common_substring_length::<char>(&[], &[]), 0);
    }

    #[test]
    fn test_substring_first_longest_run() {
        let a = chars("abXcd");
        let b = chars("cdYab");
        assert_eq!(text(longest_common_substring(&a, &b)), "ab");
    }

    #[test]
    fn test_substring_policy_and_similarity() {
        let a = chars("HELLO world");
        let b = chars("hello WORLD");
        assert_eq!(longest_common_substring_length(&a, &b), 1);
        assert_eq!(longest_common_substring_length_by(&a, &b, IgnoreCase), 11);
        assert_eq!(longest_common_substring_similarity_by(&a, &b, IgnoreCase), 1.0);
        assert_eq!(LongestCommonSubstring::with_equality(IgnoreCase).length(&a, &b), 11);
        assert_eq!(longest_common_substring_similarity(&chars("abcd"), &chars("xbcx")), 0.5);
    }
}
