//! Orchestration layer
//!
//! Wires the tour to the aggregator:
//!   slot entry(u) holds value(u)
//!   update(u, v):     point_update(entry(u), v - value(u))
//!   query_subtree(u): range_sum(entry(u), exit(u))
//!
//! Values are `i32`; deltas and sums are `i64`, so sums over fewer than
//! 2^32 nodes cannot overflow.
//!
//! Lifecycle: build → initialize (once) → any mix of update/query.

use tracing::{debug, trace};

use crate::fenwick::FenwickTree;
use crate::topology::{NodeId, Topology};
use crate::tree::{EulerTour, TourInterval};
use crate::{TourConfig, TourError};

/// One scripted operation against a [`TourContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Set a node's value
    Update {
        /// Target node
        node: NodeId,
        /// New value
        value: i32,
    },
    /// Sum a node's subtree
    Query {
        /// Subtree root
        node: NodeId,
    },
}

/// Values and running sums, present once initialized
#[derive(Debug, Clone)]
struct NodeValues {
    /// `current[u]`, slot 0 unused
    current: Vec<i32>,

    /// Sums over timestamp slots
    sums: FenwickTree<i64>,
}

/// Tree context: topology, tour, and the aggregator over it
#[derive(Debug, Clone)]
pub struct TourContext {
    topology: Topology,
    tour: EulerTour,
    values: Option<NodeValues>,
}

impl TourContext {
    /// Flatten `topology` from `root` with default settings.
    pub fn build(topology: Topology, root: NodeId) -> Result<Self, TourError> {
        Self::build_with_config(topology, &TourConfig::rooted_at(root))
    }

    /// Flatten `topology` as configured.
    pub fn build_with_config(topology: Topology, config: &TourConfig) -> Result<Self, TourError> {
        let tour = EulerTour::flatten_with_config(&topology, config)?;
        if config.verify_tour {
            tour.verify()?;
        }

        debug!(
            nodes = topology.node_count(),
            edges = topology.num_edges(),
            root = config.root,
            "built tour context"
        );

        Ok(Self {
            topology,
            tour,
            values: None,
        })
    }

    /// Load initial values; `values[i]` belongs to node `i + 1`.
    ///
    /// Must be called exactly once, before any update or query.
    pub fn initialize(&mut self, values: &[i32]) -> Result<(), TourError> {
        if self.values.is_some() {
            return Err(TourError::AlreadyInitialized);
        }
        let n = self.node_count();
        if values.len() != n {
            return Err(TourError::ValueCountMismatch {
                expected: n,
                actual: values.len(),
            });
        }

        // Lay values out in timestamp order, then build in O(N).
        let slots: Vec<i64> = self
            .tour
            .preorder()
            .iter()
            .map(|&node| i64::from(values[node - 1]))
            .collect();

        let mut current = Vec::with_capacity(n + 1);
        current.push(0);
        current.extend_from_slice(values);

        self.values = Some(NodeValues {
            current,
            sums: FenwickTree::from_slice(&slots),
        });
        debug!(nodes = n, "initialized node values");
        Ok(())
    }

    /// True once `initialize` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.values.is_some()
    }

    fn checked_interval(&self, node: NodeId) -> Result<TourInterval, TourError> {
        self.tour.interval(node).ok_or(TourError::OutOfRangeIndex {
            index: node,
            max: self.node_count(),
        })
    }

    /// Set `node`'s value to `new_value`.
    pub fn update(&mut self, node: NodeId, new_value: i32) -> Result<(), TourError> {
        let interval = self.checked_interval(node)?;
        let values = self.values.as_mut().ok_or(TourError::UninitializedAccess)?;

        let delta = i64::from(new_value) - i64::from(values.current[node]);
        values.sums.point_update(interval.entry, delta)?;
        values.current[node] = new_value;

        trace!(node, new_value, delta, "updated node");
        Ok(())
    }

    /// Sum of values over `node`'s subtree (itself included).
    pub fn query_subtree(&self, node: NodeId) -> Result<i64, TourError> {
        let interval = self.checked_interval(node)?;
        let values = self.values.as_ref().ok_or(TourError::UninitializedAccess)?;

        let sum = values.sums.range_sum(interval.entry, interval.exit)?;
        trace!(node, %interval, sum, "queried subtree");
        Ok(sum)
    }

    /// Run one scripted operation; queries yield their sum.
    pub fn apply(&mut self, op: Operation) -> Result<Option<i64>, TourError> {
        match op {
            Operation::Update { node, value } => self.update(node, value).map(|()| None),
            Operation::Query { node } => self.query_subtree(node).map(Some),
        }
    }

    /// Current value of `node`.
    pub fn value(&self, node: NodeId) -> Result<i32, TourError> {
        self.checked_interval(node)?;
        let values = self.values.as_ref().ok_or(TourError::UninitializedAccess)?;
        Ok(values.current[node])
    }

    /// Sum over the whole tree.
    pub fn total(&self) -> Result<i64, TourError> {
        self.query_subtree(self.tour.root())
    }

    /// Subtree interval of `node`.
    pub fn interval(&self, node: NodeId) -> Result<TourInterval, TourError> {
        self.checked_interval(node)
    }

    /// Number of nodes N.
    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    /// Root of the tour.
    pub fn root(&self) -> NodeId {
        self.tour.root()
    }

    /// Underlying topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Underlying tour.
    pub fn tour(&self) -> &EulerTour {
        &self.tour
    }
}
