//! Dynamic-programming table bookkeeping shared by the metrics.
//!
//! - [`RollingRows`]: previous + current row, for recurrences that only look
//!   one row up (Levenshtein, LCS, longest common substring).
//! - [`RollingRows3`]: adds the row before that, for the OSA transposition
//!   lookback.
//! - [`DpTable`]: the full matrix, for true Damerau-Levenshtein and LCS
//!   backtracking.

use crate::error::{MetricError, Result};
use smallvec::{smallvec, SmallVec};

/// Maximum sequence length for O(m*n) space algorithms.
pub const MAX_QUADRATIC_SEQUENCE_LENGTH: usize = 10_000;

pub(crate) type Row = SmallVec<[usize; 64]>;

/// Reject inputs whose full table would exceed the quadratic-memory limit.
pub(crate) fn ensure_quadratic_fits(source_len: usize, target_len: usize) -> Result<()> {
    if source_len > MAX_QUADRATIC_SEQUENCE_LENGTH || target_len > MAX_QUADRATIC_SEQUENCE_LENGTH {
        tracing::debug!(
            source_len,
            target_len,
            max_length = MAX_QUADRATIC_SEQUENCE_LENGTH,
            "rejecting input for quadratic-memory table"
        );
        return Err(MetricError::SequenceTooLong {
            source_len,
            target_len,
            max_length: MAX_QUADRATIC_SEQUENCE_LENGTH,
        });
    }
    Ok(())
}

/// Two rows of `width` cells; `prev` is row `i-1`, `curr` is row `i`.
pub(crate) struct RollingRows {
    prev: Row,
    curr: Row,
}

impl RollingRows {
    /// Row 0 is filled with `init(j)`.
    pub(crate) fn new(width: usize, init: impl FnMut(usize) -> usize) -> Self {
        Self {
            prev: (0..width).map(init).collect(),
            curr: smallvec![0; width],
        }
    }

    /// Row `i-1` to read from, row `i` to write into.
    #[inline]
    pub(crate) fn split(&mut self) -> (&[usize], &mut [usize]) {
        (&self.prev, &mut self.curr)
    }

    /// Make the row just written the previous row.
    #[inline]
    pub(crate) fn advance(&mut self) {
        std::mem::swap(&mut self.prev, &mut self.curr);
    }

    /// The most recently completed row.
    #[inline]
    pub(crate) fn last(&self) -> &[usize] {
        &self.prev
    }
}

/// Three rows of `width` cells: rows `i-2`, `i-1` and `i`.
pub(crate) struct RollingRows3 {
    prev2: Row,
    prev: Row,
    curr: Row,
}

impl RollingRows3 {
    /// Row 0 is filled with `init(j)`; the row before it is zeroed and never
    /// read by a transposition check.
    pub(crate) fn new(width: usize, init: impl FnMut(usize) -> usize) -> Self {
        Self {
            prev2: smallvec![0; width],
            prev: (0..width).map(init).collect(),
            curr: smallvec![0; width],
        }
    }

    #[inline]
    pub(crate) fn split(&mut self) -> (&[usize], &[usize], &mut [usize]) {
        (&self.prev2, &self.prev, &mut self.curr)
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        std::mem::swap(&mut self.prev2, &mut self.prev);
        std::mem::swap(&mut self.prev, &mut self.curr);
    }

    #[inline]
    pub(crate) fn last(&self) -> &[usize] {
        &self.prev
    }
}

/// Dense row-major `rows × cols` matrix.
pub(crate) struct DpTable {
    cols: usize,
    cells: Vec<usize>,
}

impl DpTable {
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![0; rows * cols],
        }
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.cols + j] = value;
    }
}
