//! Euler tour flattening
//!
//! One depth-first walk assigns every node an entry timestamp and an exit
//! timestamp; the subtree of u is exactly the nodes whose entry falls in
//! [entry(u), exit(u)]. Timestamps are a permutation of 1..=N.
//!
//! Tour depends only on topology, root, and neighbour order.

mod interval;
mod traversal;

pub use interval::TourInterval;

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::profile::{DepthTracker, TraversalProfile};
use crate::topology::{NodeId, Topology, TopologyError};
use crate::TourConfig;
use traversal::StackTraversal;

/// Broken tour invariant found by [`EulerTour::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourViolation {
    /// Entry timestamps are not a permutation of 1..=N.
    #[error("timestamp {timestamp} is not owned by exactly one node")]
    NotPermutation {
        /// Offending timestamp.
        timestamp: usize,
    },

    /// A child's interval escapes its parent's.
    #[error("interval of node {node} is not nested in its parent's")]
    BadNesting {
        /// Offending node.
        node: NodeId,
    },
}

/// Entry/exit timestamps for every node of a rooted tree
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct EulerTour {
    /// Root the walk started from
    root: NodeId,

    /// `entry[u]`, slot 0 unused
    entry: Vec<usize>,

    /// `exit[u]`, slot 0 unused
    exit: Vec<usize>,

    /// `order[t]` = node entered at timestamp t, slot 0 unused
    order: Vec<NodeId>,

    /// Walk profile (if enabled)
    profile: Option<TraversalProfile>,
}

impl EulerTour {
    /// Flatten `topology` rooted at `root`.
    pub fn flatten(topology: &Topology, root: NodeId) -> Result<Self, TopologyError> {
        Self::flatten_with_config(topology, &TourConfig::rooted_at(root))
    }

    /// Flatten using the root and profiling switch from `config`.
    pub fn flatten_with_config(
        topology: &Topology,
        config: &TourConfig,
    ) -> Result<Self, TopologyError> {
        let mut tracker = DepthTracker::new(config.profile_traversal);
        let walk = StackTraversal::new(topology).run(config.root, &mut tracker)?;

        debug!(
            nodes = topology.node_count(),
            root = config.root,
            max_depth = tracker.max_depth(),
            "flattened tree"
        );

        Ok(Self {
            root: config.root,
            entry: walk.entry,
            exit: walk.exit,
            order: walk.order,
            profile: tracker.take_profile(),
        })
    }

    /// Number of nodes N
    #[inline]
    pub fn node_count(&self) -> usize {
        self.entry.len() - 1
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    fn has_node(&self, node: NodeId) -> bool {
        node >= 1 && node <= self.node_count()
    }

    /// Entry timestamp of `node`
    pub fn entry(&self, node: NodeId) -> Option<usize> {
        self.has_node(node).then(|| self.entry[node])
    }

    /// Exit timestamp of `node`
    pub fn exit(&self, node: NodeId) -> Option<usize> {
        self.has_node(node).then(|| self.exit[node])
    }

    /// Subtree interval of `node`
    pub fn interval(&self, node: NodeId) -> Option<TourInterval> {
        self.has_node(node)
            .then(|| TourInterval::new(self.entry[node], self.exit[node]))
    }

    /// Node entered at `timestamp` (inverse of [`EulerTour::entry`])
    pub fn node_at(&self, timestamp: usize) -> Option<NodeId> {
        (timestamp >= 1 && timestamp <= self.node_count()).then(|| self.order[timestamp])
    }

    /// Nodes in entry order
    pub fn preorder(&self) -> &[NodeId] {
        &self.order[1..]
    }

    /// Number of nodes in the subtree of `node` (itself included)
    pub fn subtree_size(&self, node: NodeId) -> Option<usize> {
        self.interval(node).map(|iv| iv.len())
    }

    /// True if `descendant` lies in the subtree of `ancestor` (a node is its own ancestor)
    pub fn is_ancestor(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        match (self.interval(ancestor), self.entry(descendant)) {
            (Some(iv), Some(t)) => iv.contains(t),
            _ => false,
        }
    }

    /// Walk profile, when profiling was enabled
    pub fn profile(&self) -> Option<&TraversalProfile> {
        self.profile.as_ref()
    }

    /// Re-check the permutation and nesting invariants.
    ///
    /// O(N). Parents are recovered from `order`: the parent of the node
    /// entered at t is the closest earlier-entered node whose interval covers t.
    pub fn verify(&self) -> Result<(), TourViolation> {
        let n = self.node_count();

        let mut seen = vec![false; n + 1];
        for node in 1..=n {
            let t = self.entry[node];
            if t == 0 || t > n || seen[t] || self.order[t] != node {
                return Err(TourViolation::NotPermutation { timestamp: t });
            }
            seen[t] = true;
            if self.exit[node] < t || self.exit[node] > n {
                return Err(TourViolation::BadNesting { node });
            }
        }

        // Open intervals along the current root path.
        let mut open: Vec<TourInterval> = Vec::new();
        for t in 1..=n {
            let node = self.order[t];
            let current = TourInterval::new(t, self.exit[node]);
            while open.last().is_some_and(|top| top.is_disjoint(&current)) {
                open.pop();
            }
            match open.last() {
                Some(parent) if !parent.encloses(&current) => {
                    return Err(TourViolation::BadNesting { node });
                }
                None if t != 1 => return Err(TourViolation::BadNesting { node }),
                _ => {}
            }
            open.push(current);
        }

        Ok(())
    }

    /// One `Node i: [entry, exit]` line per node, ordered by id.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EulerTour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in 1..=self.node_count() {
            writeln!(
                f,
                "Node {}: {}",
                node,
                TourInterval::new(self.entry[node], self.exit[node])
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_tour() -> EulerTour {
        let topo = Topology::from_edges(5, &[(1, 2), (1, 3), (2, 4), (2, 5)]).unwrap();
        EulerTour::flatten(&topo, 1).unwrap()
    }

    #[test]
    fn test_reference_intervals() {
        let tour = reference_tour();
        assert_eq!(tour.interval(1), Some(TourInterval::new(1, 5)));
        assert_eq!(tour.interval(2), Some(TourInterval::new(2, 4)));
        assert_eq!(tour.interval(3), Some(TourInterval::new(5, 5)));
        assert_eq!(tour.interval(4), Some(TourInterval::new(3, 3)));
        assert_eq!(tour.interval(5), Some(TourInterval::new(4, 4)));
        assert_eq!(tour.interval(0), None);
        assert_eq!(tour.interval(6), None);
    }

    #[test]
    fn test_inverse_lookup() {
        let tour = reference_tour();
        assert_eq!(tour.preorder(), &[1, 2, 4, 5, 3]);
        for node in 1..=5 {
            assert_eq!(tour.node_at(tour.entry(node).unwrap()), Some(node));
        }
        assert_eq!(tour.node_at(0), None);
        assert_eq!(tour.node_at(6), None);
    }

    #[test]
    fn test_ancestry() {
        let tour = reference_tour();
        assert!(tour.is_ancestor(1, 5));
        assert!(tour.is_ancestor(2, 4));
        assert!(tour.is_ancestor(3, 3));
        assert!(!tour.is_ancestor(2, 3));
        assert!(!tour.is_ancestor(4, 2));
        assert!(!tour.is_ancestor(9, 1));
        assert_eq!(tour.subtree_size(2), Some(3));
        assert_eq!(tour.subtree_size(1), Some(5));
    }

    #[test]
    fn test_verify_accepts_walk_output() {
        let tour = reference_tour();
        assert_eq!(tour.verify(), Ok(()));
    }

    #[test]
    fn test_verify_rejects_tampered_tour() {
        let mut tour = reference_tour();
        tour.exit[4] = 5;
        assert_eq!(tour.verify(), Err(TourViolation::BadNesting { node: 4 }));

        let mut tour = reference_tour();
        tour.entry[3] = 2;
        assert!(matches!(
            tour.verify(),
            Err(TourViolation::NotPermutation { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_escaping_child() {
        // Node 5 claims [4, 5], leaking past node 2's [2, 4].
        let mut tour = reference_tour();
        tour.exit[5] = 5;
        assert_eq!(tour.verify(), Err(TourViolation::BadNesting { node: 5 }));
    }

    #[test]
    fn test_render() {
        let tour = reference_tour();
        assert_eq!(tour.render(), format!("{tour}"));
        assert_eq!(
            tour.render(),
            "Node 1: [1, 5]\nNode 2: [2, 4]\nNode 3: [5, 5]\nNode 4: [3, 3]\nNode 5: [4, 4]\n"
        );
    }

    #[test]
    fn test_profile_recorded_when_enabled() {
        let topo = Topology::from_edges(5, &[(1, 2), (1, 3), (2, 4), (2, 5)]).unwrap();
        let config = TourConfig {
            profile_traversal: true,
            ..TourConfig::rooted_at(1)
        };
        let tour = EulerTour::flatten_with_config(&topo, &config).unwrap();
        let profile = tour.profile().unwrap();
        assert_eq!(profile.nodes_visited, 5);
        assert_eq!(profile.leaves, 3);
        assert_eq!(profile.max_stack_depth, 3);
        assert!(profile.within_depth(3));
        assert!(!profile.within_depth(2));

        assert!(reference_tour().profile().is_none());
    }
}
