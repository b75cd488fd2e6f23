//! Traversal profiling
//!
//! Tracks explicit-stack depth during the tour walk.
//! Skewed (path-like) trees reach depth N; balanced ones stay near log N.

mod tracker;

pub use tracker::DepthTracker;

/// Detailed traversal profile (if enabled)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TraversalProfile {
    /// Nodes entered by the walk
    pub nodes_visited: usize,

    /// Nodes with no children in the rooted tree
    pub leaves: usize,

    /// Maximum number of frames on the explicit stack
    pub max_stack_depth: usize,
}

impl TraversalProfile {
    /// True when the walk never held more than `bound` frames.
    pub fn within_depth(&self, bound: usize) -> bool {
        self.max_stack_depth <= bound
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Nodes visited: {}\nLeaves: {}\nMax stack depth: {}",
            self.nodes_visited, self.leaves, self.max_stack_depth
        )
    }
}
