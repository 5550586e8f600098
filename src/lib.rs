//! seqdist - Sequence similarity and edit-distance metrics
//!
//! Metrics over arbitrary `&[T]` sequences (characters, bytes, tokens, ...)
//! where element equality is a pluggable policy.
//!
//! # Features
//! - Edit distances: Hamming, Levenshtein, Damerau-Levenshtein, Optimal String Alignment
//! - Alignment measures: longest common subsequence and substring
//! - Jaro and Jaro-Winkler similarity
//! - Equality policies: exact, case-insensitive, diacritic-insensitive, or any closure
//! - Parallel batch scoring and deduplication
//!
//! # Example
//! ```
//! use seqdist::algorithms::{levenshtein, levenshtein_by, IgnoreCase};
//!
//! let a: Vec<char> = "Senor Hugo".chars().collect();
//! let b: Vec<char> = "senor hugo".chars().collect();
//! assert_eq!(levenshtein(&a, &b), 2);
//! assert_eq!(levenshtein_by(&a, &b, IgnoreCase), 0);
//! ```

pub mod algorithms;
pub mod batch;
pub mod dedup;
pub mod error;
pub mod metric;

pub use algorithms::{
    EditDistance, Equality, EqualityMode, Exact, FallibleEditDistance, IgnoreCase,
    IgnoreCaseAndDiacritics, IgnoreDiacritics, Similarity,
};
pub use error::{MetricError, Result};
pub use metric::{MatchConfig, Metric};
