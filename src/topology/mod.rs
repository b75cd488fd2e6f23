//! Tree topology
//!
//! Undirected adjacency over node ids 1..=N.
//! Checked on construction: N ≥ 1, exactly N-1 edges, endpoints in range,
//! no self-loops. Connectivity and acyclicity are checked by the tour walk
//! (with N-1 edges, one implies the other).

pub mod parse;

use thiserror::Error;

/// Node identifier, 1-based.
pub type NodeId = usize;

/// Reasons an edge list cannot be used as a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// Declared node count was zero.
    #[error("topology must contain at least one node")]
    EmptyTopology,

    /// A tree on N nodes has exactly N-1 edges.
    #[error("expected {expected} edges, found {actual}")]
    EdgeCountMismatch {
        /// N - 1.
        expected: usize,
        /// Edges supplied.
        actual: usize,
    },

    /// Edge endpoint outside `[1, N]`.
    #[error("edge endpoint {node} outside [1, {node_count}]")]
    NodeOutOfRange {
        /// Offending endpoint.
        node: NodeId,
        /// Declared node count.
        node_count: usize,
    },

    /// Edge from a node to itself.
    #[error("self-loop at node {node}")]
    SelfLoop {
        /// Node carrying the loop.
        node: NodeId,
    },

    /// Root outside `[1, N]`.
    #[error("root {root} outside [1, {node_count}]")]
    RootOutOfRange {
        /// Requested root.
        root: NodeId,
        /// Declared node count.
        node_count: usize,
    },

    /// The walk reached an already-visited node that is not its parent.
    #[error("cycle detected through node {node}")]
    Cycle {
        /// Node reached twice.
        node: NodeId,
    },

    /// Some nodes are not reachable from the root.
    #[error("{unreached} node(s) unreachable from root (first: {first})")]
    Disconnected {
        /// Number of unreached nodes.
        unreached: usize,
        /// Smallest unreached node id.
        first: NodeId,
    },
}

/// Fixed tree topology (adjacency lists in insertion order).
#[derive(Debug, Clone)]
pub struct Topology {
    /// `adjacency[u]` lists the neighbours of `u`; slot 0 is unused.
    adjacency: Vec<Vec<NodeId>>,

    /// Number of undirected edges.
    num_edges: usize,
}

impl Topology {
    /// Build adjacency for `node_count` nodes from an undirected edge list.
    ///
    /// Neighbour order follows edge order; the tour visits children in it.
    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> Result<Self, TopologyError> {
        if node_count == 0 {
            return Err(TopologyError::EmptyTopology);
        }
        if edges.len() != node_count - 1 {
            return Err(TopologyError::EdgeCountMismatch {
                expected: node_count - 1,
                actual: edges.len(),
            });
        }

        let mut adjacency = vec![Vec::new(); node_count + 1];
        for &(u, v) in edges {
            for node in [u, v] {
                if node == 0 || node > node_count {
                    return Err(TopologyError::NodeOutOfRange { node, node_count });
                }
            }
            if u == v {
                return Err(TopologyError::SelfLoop { node: u });
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }

        Ok(Self {
            adjacency,
            num_edges: edges.len(),
        })
    }

    /// Number of nodes N.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len() - 1
    }

    /// Number of edges (N - 1).
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// True if `node` is a valid id.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node >= 1 && node <= self.node_count()
    }

    /// Neighbours of `node` in insertion order.
    ///
    /// Panics on ids outside `[1, N]`; callers check with [`Topology::contains`].
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node]
    }

    /// Degree of `node`, or `None` for ids outside `[1, N]`.
    pub fn degree(&self, node: NodeId) -> Option<usize> {
        self.contains(node).then(|| self.adjacency[node].len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tree_adjacency() {
        let topo = Topology::from_edges(5, &[(1, 2), (1, 3), (2, 4), (2, 5)]).unwrap();
        assert_eq!(topo.node_count(), 5);
        assert_eq!(topo.num_edges(), 4);
        assert_eq!(topo.neighbors(1), &[2, 3]);
        assert_eq!(topo.neighbors(2), &[1, 4, 5]);
        assert_eq!(topo.degree(5), Some(1));
        assert_eq!(topo.degree(2), Some(3));
        assert_eq!(topo.degree(0), None);
        assert_eq!(topo.degree(6), None);
        assert!(topo.contains(5));
        assert!(!topo.contains(0));
        assert!(!topo.contains(6));
    }

    #[test]
    fn test_single_node() {
        let topo = Topology::from_edges(1, &[]).unwrap();
        assert_eq!(topo.node_count(), 1);
        assert!(topo.neighbors(1).is_empty());
    }

    #[test]
    fn test_rejects_bad_edge_lists() {
        assert_eq!(
            Topology::from_edges(0, &[]).unwrap_err(),
            TopologyError::EmptyTopology
        );
        assert_eq!(
            Topology::from_edges(3, &[(1, 2)]).unwrap_err(),
            TopologyError::EdgeCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            Topology::from_edges(3, &[(1, 2), (2, 4)]).unwrap_err(),
            TopologyError::NodeOutOfRange {
                node: 4,
                node_count: 3
            }
        );
        assert_eq!(
            Topology::from_edges(3, &[(1, 2), (3, 3)]).unwrap_err(),
            TopologyError::SelfLoop { node: 3 }
        );
    }
}
