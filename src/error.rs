//! Error types returned when the input graph passed to [`crate::kwok`] is malformed.

use thiserror::Error;

/// Why a call to [`crate::kwok`] was rejected before any matching work began.
///
/// Every variant here corresponds to a validation check performed in a single
/// pass over `adj` before any mutable matching state is constructed, so a
/// rejected call never leaves partially-applied state behind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KwokError {
    /// `r_size` was smaller than `l_size`; no left vertex could possibly be
    /// left unmatched by choice, since there are fewer right vertices than
    /// lefts to assign them to.
    #[error("r_size ({r_size}) must not be smaller than l_size ({l_size})")]
    RightSmallerThanLeft {
        /// Size of the left partition.
        l_size: usize,
        /// Size of the right partition.
        r_size: usize,
    },
    /// `adj.len()` did not match `l_size`; the adjacency sequence must carry
    /// exactly one entry per left vertex.
    #[error("adjacency list has {adj_len} entries, expected l_size ({l_size})")]
    AdjacencyLengthMismatch {
        /// Expected number of entries (`l_size`).
        l_size: usize,
        /// Actual number of entries in `adj`.
        adj_len: usize,
    },
    /// An edge from `left` referenced a right vertex outside `[0, r_size)`.
    #[error("edge from left vertex {left} references right vertex {right}, outside [0, {r_size})")]
    RightVertexOutOfRange {
        /// The left vertex the offending edge is attached to.
        left: usize,
        /// The out-of-range right vertex id.
        right: usize,
        /// Size of the right partition.
        r_size: usize,
    },
    /// An edge carried a negative weight; the algorithm assumes non-negative
    /// weights throughout (see the crate-level documentation).
    #[error("edge from left vertex {left} to right vertex {right} has a negative weight")]
    NegativeWeight {
        /// The left vertex the offending edge is attached to.
        left: usize,
        /// The right vertex the offending edge is attached to.
        right: usize,
    },
}
