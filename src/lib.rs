//! # Subtree Sums via Euler Tour Flattening
//!
//! Maintains a rooted tree of N valued nodes and answers
//! point updates and subtree-sum queries in O(log N).
//!
//! ## Core Technique
//!
//! 1. **Tour flattening**: one depth-first walk stamps each node with
//!    entry/exit times; subtree(u) = timestamps [entry(u), exit(u)]
//! 2. **Indexed aggregation**: a Fenwick tree over timestamp slots, where
//!    slot entry(u) holds u's value
//! 3. **Composition**: subtree sum = range sum over u's interval
//!
//! Build: O(N). Update: O(log N). Query: O(log N).
//!
//! ## Usage Example
//!
//! ```
//! use eulertour::{Topology, TourContext};
//!
//! let topology = Topology::from_edges(5, &[(1, 2), (1, 3), (2, 4), (2, 5)])?;
//! let mut ctx = TourContext::build(topology, 1)?;
//! ctx.initialize(&[10, 20, 30, 40, 50])?;
//!
//! assert_eq!(ctx.query_subtree(2)?, 110);
//! ctx.update(4, 100)?;
//! assert_eq!(ctx.query_subtree(2)?, 170);
//! assert_eq!(ctx.query_subtree(1)?, 210);
//! # Ok::<(), eulertour::TourError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod context; // Orchestration: nodes ↔ slots
pub mod fenwick; // Indexed aggregator
pub mod profile; // Traversal profiling
pub mod shared; // Read/write-locked handle
pub mod topology; // Validated adjacency + text input
pub mod tree; // Euler tour flattening

// Re-exports for convenience
pub use context::{Operation, TourContext};
pub use fenwick::{FenwickError, FenwickTree};
pub use profile::TraversalProfile;
pub use shared::SharedTourContext;
pub use topology::{NodeId, Topology, TopologyError};
pub use tree::{EulerTour, TourInterval, TourViolation};

use thiserror::Error;

/// Configuration parameters for building a tour
#[derive(Debug, Clone)]
pub struct TourConfig {
    /// Root of the walk
    pub root: NodeId,

    /// Record a [`TraversalProfile`] during the walk
    pub profile_traversal: bool,

    /// Re-check tour invariants after flattening
    pub verify_tour: bool,
}

impl TourConfig {
    /// Default configuration rooted at `root`
    pub fn rooted_at(root: NodeId) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            root: 1,
            profile_traversal: false,
            verify_tour: cfg!(debug_assertions),
        }
    }
}

/// Errors surfaced by the orchestration layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    /// Edge list is not a tree spanning all nodes from the root
    #[error("malformed topology: {0}")]
    MalformedTopology(#[from] TopologyError),

    /// Flattened tour failed its invariant check
    #[error("invalid tour: {0}")]
    InvalidTour(#[from] TourViolation),

    /// Node id or timestamp outside `[1, max]`
    #[error("index {index} out of range [1, {max}]")]
    OutOfRangeIndex {
        /// Index that was requested
        index: usize,
        /// Largest valid index (N)
        max: usize,
    },

    /// Update or query before `initialize`
    #[error("update/query issued before initialize")]
    UninitializedAccess,

    /// `initialize` called a second time
    #[error("initialize may only be called once")]
    AlreadyInitialized,

    /// Initial values do not cover every node exactly once
    #[error("expected {expected} initial values, got {actual}")]
    ValueCountMismatch {
        /// N
        expected: usize,
        /// Values supplied
        actual: usize,
    },

    /// A writer panicked while holding the shared lock
    #[error("shared tour context lock poisoned")]
    LockPoisoned,
}

impl From<FenwickError> for TourError {
    fn from(err: FenwickError) -> Self {
        match err {
            FenwickError::IndexOutOfRange { index, len } => {
                TourError::OutOfRangeIndex { index, max: len }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TourConfig::rooted_at(7);
        assert_eq!(config.root, 7);
        assert!(!config.profile_traversal);
        assert_eq!(config.verify_tour, cfg!(debug_assertions));
    }

    #[test]
    fn test_fenwick_error_maps_to_out_of_range() {
        let err: TourError = FenwickError::IndexOutOfRange { index: 9, len: 5 }.into();
        assert_eq!(err, TourError::OutOfRangeIndex { index: 9, max: 5 });
    }
}
