//! Error types shared by all metrics.

use thiserror::Error;

/// Errors surfaced by metric computations and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    /// Hamming distance is only defined for sequences of equal length.
    #[error("length mismatch: source has {source_len} elements, target has {target_len}")]
    LengthMismatch { source_len: usize, target_len: usize },

    /// Input is too long for an algorithm that needs a full O(m*n) table.
    #[error(
        "sequence length exceeds safe limit for O(m*n) algorithm: \
         source_len={source_len}, target_len={target_len}, max={max_length}"
    )]
    SequenceTooLong {
        source_len: usize,
        target_len: usize,
        max_length: usize,
    },

    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    #[error("{name} must be {reason}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, MetricError>;
