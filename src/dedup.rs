//! Deduplication utilities
//!
//! Groups items whose pairwise similarity reaches a threshold. Matching pairs
//! are merged with union-find, so grouping is transitive: if `a ~ b` and
//! `b ~ c` then `a`, `b` and `c` land in one group even when `a` and `c`
//! score below the threshold.

use crate::algorithms::Similarity;
use crate::error::Result;
use crate::metric::{validate_similarity, MatchConfig};
use ahash::AHashMap;
use rayon::prelude::*;

/// Result from deduplication operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeduplicationResult<T> {
    /// Groups of duplicate items, largest first; members keep input order
    pub groups: Vec<Vec<T>>,
    /// Items that are unique (no duplicates found), in input order
    pub unique: Vec<T>,
    /// Total number of duplicate items found
    pub total_duplicates: usize,
}

impl<T> DeduplicationResult<T> {
    fn empty() -> Self {
        Self {
            groups: vec![],
            unique: vec![],
            total_duplicates: 0,
        }
    }
}

/// Deduplication methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupMethod {
    /// Compare all pairs (O(N^2)). Accurate but slow for large N.
    BruteForce,
    /// Sorted Neighborhood Method (O(N log N)). Fast, good for large N.
    /// Sorts items and compares within a sliding window.
    SortedNeighborhood { window_size: usize },
}

/// Union-Find data structure for efficient clustering
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x != root_y {
            // Union by rank
            match self.rank[root_x].cmp(&self.rank[root_y]) {
                std::cmp::Ordering::Less => {
                    self.parent[root_x] = root_y;
                }
                std::cmp::Ordering::Greater => {
                    self.parent[root_y] = root_x;
                }
                std::cmp::Ordering::Equal => {
                    self.parent[root_y] = root_x;
                    self.rank[root_x] += 1;
                }
            }
        }
    }

    /// Member indices per set, sets ordered by their first member.
    fn get_groups(&mut self) -> Vec<Vec<usize>> {
        let mut slots: AHashMap<usize, usize> = AHashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..self.parent.len() {
            let root = self.find(i);
            let slot = *slots.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(i);
        }

        groups
    }
}

/// Find duplicate items in a list using the given scorer.
///
/// # Arguments
/// * `items` - Items to deduplicate
/// * `scorer` - Computes similarity between two items (0.0 to 1.0)
/// * `min_similarity` - Minimum similarity score to consider items as duplicates (0.0 to 1.0)
/// * `method` - Deduplication method to use
///
/// # Errors
/// [`MetricError::InvalidParameter`](crate::MetricError::InvalidParameter) for
/// a threshold outside [0.0, 1.0], otherwise the first error from `scorer`.
pub fn find_duplicates<T, F>(
    items: &[T],
    scorer: F,
    min_similarity: f64,
    method: DedupMethod,
) -> Result<DeduplicationResult<T>>
where
    T: Ord + Clone + Send + Sync,
    F: Fn(&T, &T) -> Result<f64> + Sync + Send,
{
    validate_similarity(min_similarity, "min_similarity")?;

    if items.is_empty() {
        return Ok(DeduplicationResult::empty());
    }
    if items.len() == 1 {
        return Ok(DeduplicationResult {
            unique: items.to_vec(),
            ..DeduplicationResult::empty()
        });
    }

    let pairs = match method {
        DedupMethod::BruteForce => brute_force_pairs(items, &scorer, min_similarity)?,
        DedupMethod::SortedNeighborhood { window_size } => {
            snm_pairs(items, &scorer, min_similarity, window_size)?
        }
    };

    let mut uf = UnionFind::new(items.len());
    for &(i, j) in &pairs {
        uf.union(i, j);
    }

    let result = collect_groups(items, uf.get_groups());
    tracing::debug!(
        items = items.len(),
        matching_pairs = pairs.len(),
        groups = result.groups.len(),
        duplicates = result.total_duplicates,
        "deduplication finished"
    );
    Ok(result)
}

/// Matching pairs over all `i < j` (O(N^2)).
///
/// Only matches are collected, never the full pair list.
fn brute_force_pairs<T, F>(items: &[T], scorer: &F, min_similarity: f64) -> Result<Vec<(usize, usize)>>
where
    T: Sync,
    F: Fn(&T, &T) -> Result<f64> + Sync,
{
    let n = items.len();
    (0..n)
        .into_par_iter()
        .flat_map(|i| {
            (i + 1..n)
                .into_par_iter()
                .filter_map(move |j| keep_match(scorer(&items[i], &items[j]), min_similarity, i, j))
        })
        .collect()
}

/// Matching pairs within a sliding window over the sorted items (O(N log N)).
fn snm_pairs<T, F>(
    items: &[T],
    scorer: &F,
    min_similarity: f64,
    window_size: usize,
) -> Result<Vec<(usize, usize)>>
where
    T: Ord + Sync,
    F: Fn(&T, &T) -> Result<f64> + Sync,
{
    let n = items.len();

    // Sorting brings similar items (sharing prefixes) close together
    let mut order: Vec<usize> = (0..n).collect();
    order.par_sort_unstable_by(|&a, &b| items[a].cmp(&items[b]).then(a.cmp(&b)));

    let window_size = window_size.max(1);
    let order = &order;

    (0..n)
        .into_par_iter()
        .flat_map(|i| {
            let end = i.saturating_add(1).saturating_add(window_size).min(n);
            (i + 1..end).into_par_iter().filter_map(move |j| {
                let (a, b) = (order[i], order[j]);
                keep_match(scorer(&items[a], &items[b]), min_similarity, a, b)
            })
        })
        .collect()
}

#[inline]
fn keep_match(
    score: Result<f64>,
    min_similarity: f64,
    i: usize,
    j: usize,
) -> Option<Result<(usize, usize)>> {
    match score {
        Ok(s) if s >= min_similarity => Some(Ok((i, j))),
        Ok(_) => None,
        Err(e) => Some(Err(e)),
    }
}

fn collect_groups<T: Clone>(items: &[T], sets: Vec<Vec<usize>>) -> DeduplicationResult<T> {
    let mut groups = Vec::new();
    let mut unique = Vec::new();

    for set in sets {
        if set.len() > 1 {
            groups.push(set.iter().map(|&i| items[i].clone()).collect::<Vec<_>>());
        } else {
            unique.extend(set.iter().map(|&i| items[i].clone()));
        }
    }

    // stable: equal-sized groups keep first-member order
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    let total_duplicates = groups.iter().map(|g| g.len() - 1).sum();

    DeduplicationResult {
        groups,
        unique,
        total_duplicates,
    }
}

/// Find duplicates using a trait-based similarity metric
///
/// # Errors
/// Same as [`find_duplicates`].
pub fn find_duplicates_with_metric<T, M>(
    items: &[Vec<T>],
    metric: &M,
    min_similarity: f64,
    method: DedupMethod,
) -> Result<DeduplicationResult<Vec<T>>>
where
    T: Ord + Clone + Send + Sync,
    M: Similarity<T> + ?Sized,
{
    find_duplicates(items, |a, b| Ok(metric.similarity(a, b)), min_similarity, method)
}

/// Find duplicate strings with the metric, equality mode and threshold of
/// `config` (`limit` is not used).
///
/// # Errors
/// Same as [`find_duplicates`]; with [`Metric::Hamming`](crate::metric::Metric::Hamming)
/// any two items of different length fail with `LengthMismatch`.
///
/// # Example
/// ```
/// use seqdist::dedup::{find_duplicates_with_config, DedupMethod};
/// use seqdist::metric::{MatchConfig, Metric};
/// use seqdist::algorithms::EqualityMode;
///
/// let items = vec!["Hugo".to_string(), "hugo".to_string(), "Maria".to_string()];
/// let config = MatchConfig {
///     metric: Metric::Levenshtein,
///     equality: EqualityMode::IgnoreCase,
///     min_similarity: 0.9,
///     ..MatchConfig::default()
/// };
/// let result = find_duplicates_with_config(&items, &config, DedupMethod::BruteForce).unwrap();
/// assert_eq!(result.groups, vec![vec!["Hugo".to_string(), "hugo".to_string()]]);
/// assert_eq!(result.unique, vec!["Maria".to_string()]);
/// ```
pub fn find_duplicates_with_config<S>(
    items: &[S],
    config: &MatchConfig,
    method: DedupMethod,
) -> Result<DeduplicationResult<S>>
where
    S: AsRef<str> + Ord + Clone + Send + Sync,
{
    let metric = config.metric;
    let mode = config.equality;
    find_duplicates(
        items,
        |a, b| metric.similarity_str(a.as_ref(), b.as_ref(), mode),
        config.min_similarity,
        method,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::jaro::JaroWinkler;
    use crate::algorithms::levenshtein_similarity;
    use crate::error::MetricError;
    use crate::metric::Metric;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn exact(a: &String, b: &String) -> Result<f64> {
        Ok(if a == b { 1.0 } else { 0.0 })
    }

    fn chars(items: &[&str]) -> Vec<Vec<char>> {
        items.iter().map(|s| s.chars().collect()).collect()
    }

    #[test]
    fn test_find_duplicates_empty() {
        let items: Vec<String> = vec![];
        let result = find_duplicates(&items, exact, 0.8, DedupMethod::BruteForce).unwrap();
        assert_eq!(result.groups.len(), 0);
        assert_eq!(result.unique.len(), 0);
        assert_eq!(result.total_duplicates, 0);
    }

    #[test]
    fn test_find_duplicates_single() {
        let items = strings(&["hello"]);
        let result = find_duplicates(&items, exact, 0.8, DedupMethod::BruteForce).unwrap();
        assert_eq!(result.groups.len(), 0);
        assert_eq!(result.unique.len(), 1);
        assert_eq!(result.total_duplicates, 0);
    }

    #[test]
    fn test_find_duplicates_basic() {
        let items = chars(&["hello", "helo", "world", "hello"]);

        let jw = JaroWinkler::new();
        let result =
            find_duplicates_with_metric(&items, &jw, 0.85, DedupMethod::BruteForce).unwrap();

        // "hello", "helo", and "hello" should be grouped
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0], chars(&["hello", "helo", "hello"]));
        assert_eq!(result.unique, chars(&["world"]));
        assert_eq!(result.total_duplicates, 2);
    }

    #[test]
    fn test_find_duplicates_all_unique() {
        let items = chars(&["apple", "banana", "cherry"]);

        let jw = JaroWinkler::new();
        let result = find_duplicates_with_metric(&items, &jw, 0.9, DedupMethod::BruteForce).unwrap();

        assert_eq!(result.groups.len(), 0);
        assert_eq!(result.unique.len(), 3);
        assert_eq!(result.total_duplicates, 0);
    }

    #[test]
    fn test_find_duplicates_all_same() {
        let items = strings(&["test", "test", "test"]);
        let result = find_duplicates(&items, exact, 0.99, DedupMethod::BruteForce).unwrap();

        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].len(), 3);
        assert_eq!(result.unique.len(), 0);
        assert_eq!(result.total_duplicates, 2);
    }

    #[test]
    fn test_groups_are_transitive_and_sorted() {
        // a~b and b~c chain into one group, d~e form a smaller one
        let items = strings(&["d", "a", "b", "e", "c", "z"]);
        let linked = |x: &String, y: &String| -> Result<f64> {
            let pair = [x.as_str(), y.as_str()];
            let hit = matches!(pair, ["a", "b"] | ["b", "a"] | ["b", "c"] | ["c", "b"] | ["d", "e"] | ["e", "d"]);
            Ok(if hit { 1.0 } else { 0.0 })
        };
        let result = find_duplicates(&items, linked, 0.5, DedupMethod::BruteForce).unwrap();
        assert_eq!(result.groups, vec![strings(&["a", "b", "c"]), strings(&["d", "e"])]);
        assert_eq!(result.unique, strings(&["z"]));
        assert_eq!(result.total_duplicates, 3);
    }

    #[test]
    fn test_sorted_neighborhood() {
        let items = strings(&["apple", "zebra", "applf", "mango", "apple"]);
        let scorer = |a: &String, b: &String| -> Result<f64> {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            Ok(levenshtein_similarity(&a, &b))
        };
        let result = find_duplicates(
            &items,
            scorer,
            0.75,
            DedupMethod::SortedNeighborhood { window_size: 2 },
        )
        .unwrap();
        assert_eq!(result.groups, vec![strings(&["apple", "applf", "apple"])]);
        assert_eq!(result.unique, strings(&["zebra", "mango"]));

        // window of one still compares direct neighbours
        let result = find_duplicates(
            &items,
            exact,
            0.99,
            DedupMethod::SortedNeighborhood { window_size: 0 },
        )
        .unwrap();
        assert_eq!(result.total_duplicates, 1);
    }

    #[test]
    fn test_sorted_neighborhood_unbounded_window() {
        let items = strings(&["a", "b", "a"]);
        let result = find_duplicates(
            &items,
            exact,
            0.5,
            DedupMethod::SortedNeighborhood {
                window_size: usize::MAX,
            },
        )
        .unwrap();
        assert_eq!(result.groups, vec![strings(&["a", "a"])]);
        assert_eq!(result.unique, strings(&["b"]));

        // a window covering everything behaves like brute force
        let brute = find_duplicates(&items, exact, 0.5, DedupMethod::BruteForce).unwrap();
        assert_eq!(result, brute);
    }

    #[test]
    fn test_scorer_errors_propagate() {
        let items = strings(&["abc", "abcd"]);
        let config = MatchConfig {
            metric: Metric::Hamming,
            min_similarity: 0.5,
            ..MatchConfig::default()
        };
        let result = find_duplicates_with_config(&items, &config, DedupMethod::BruteForce);
        assert_eq!(
            result,
            Err(MetricError::LengthMismatch {
                source_len: 3,
                target_len: 4
            })
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let items = strings(&["a", "b"]);
        let result = find_duplicates(&items, exact, 1.5, DedupMethod::BruteForce);
        assert!(matches!(result, Err(MetricError::InvalidParameter { .. })));
    }

    #[test]
    fn test_config_equality_mode() {
        let items = strings(&["Se\u{00F1}or", "senor", "SENOR", "other"]);
        let config = MatchConfig {
            metric: Metric::Levenshtein,
            equality: crate::algorithms::EqualityMode::IgnoreCaseAndDiacritics,
            min_similarity: 1.0,
            ..MatchConfig::default()
        };
        let result = find_duplicates_with_config(&items, &config, DedupMethod::BruteForce).unwrap();
        assert_eq!(result.groups, vec![strings(&["Se\u{00F1}or", "senor", "SENOR"])]);
        assert_eq!(result.unique, strings(&["other"]));
    }

    #[test]
    #[ignore]
    fn test_large_input_stress() {
        // 5000 items -> 12.5M pairs; only matches are collected
        let n = 5000;
        let items: Vec<String> = (0..n).map(|i| format!("item_{}", i)).collect();
        let config = MatchConfig {
            metric: Metric::Levenshtein,
            min_similarity: 0.99,
            ..MatchConfig::default()
        };

        let result = find_duplicates_with_config(&items, &config, DedupMethod::BruteForce).unwrap();
        assert_eq!(result.total_duplicates, 0);
    }
}
