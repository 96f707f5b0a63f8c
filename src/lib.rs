#![deny(missing_docs)]

//! This crate implements a maximum weight bipartite matching engine: given
//! a weighted bipartite graph with left partition `L` and right partition
//! `R` (`|L| <= |R|`) and non-negative edge weights, it computes a matching
//! that maximizes the sum of the weights of its edges.
//!
//! The algorithm is a primal-dual augmenting-path search (Kuhn-Munkres /
//! Hungarian algorithm) with "Kwok" label adjustment: vertex potentials are
//! maintained for both sides, slack is tracked incrementally over the right
//! vertices reachable from the current search frontier, and labels are
//! shifted by the minimum frontier slack whenever the search stalls. A
//! zero-cost "virtual" edge from any zero-label left vertex to a designated
//! unmatched right vertex guarantees that every phase terminates even when
//! no real augmenting path exists yet.
//!
//! This crate does not solve general minimum-cost flow, non-bipartite
//! matching, or matching with floating-point weights that require
//! round-off robustness; it assumes non-negative, integer-like weights
//! throughout and does not support incremental updates after edges change.
//!
//! # Example
//!
//! ```
//! use kwok_matching::kwok;
//!
//! let adj = vec![
//!     vec![(0, 1), (1, 2)],
//!     vec![(0, 2), (1, 1)],
//! ];
//! let matching = kwok(2, 2, &adj).unwrap();
//! assert_eq!(matching.total_weight, 4);
//! assert_eq!(matching.left_pairs, vec![Some(1), Some(0)]);
//! ```

mod error;
mod kwok;

pub use error::KwokError;
pub use kwok::{kwok, Matching};
