//! Explicit-stack depth-first walk
//!
//! Same visit order as the recursive walk
//!   enter(u): entry[u] = ++timer
//!   for v in adj[u], v != parent: enter(v)
//!   exit[u] = timer
//! but frames live on a heap `Vec`, so path-shaped trees of any depth are fine.
//! Auxiliary memory: O(N) frames + N visited bits.

use bitvec::prelude::*;
use tracing::trace;

use crate::profile::DepthTracker;
use crate::topology::{NodeId, Topology, TopologyError};

/// Sentinel parent for the root (ids start at 1).
const NO_PARENT: NodeId = 0;

/// One level of the walk
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Node being expanded
    node: NodeId,

    /// Node it was entered from
    parent: NodeId,

    /// Position of the next neighbour to examine
    next: usize,

    /// Children entered so far
    children: usize,
}

/// Raw output of one walk. Index 0 of every vector is unused.
#[derive(Debug)]
pub(crate) struct TourWalk {
    pub(crate) entry: Vec<usize>,
    pub(crate) exit: Vec<usize>,
    /// `order[t]` = node whose entry timestamp is `t`
    pub(crate) order: Vec<NodeId>,
}

/// Walk state for a single tour
#[derive(Debug)]
pub(crate) struct StackTraversal<'a> {
    topology: &'a Topology,
    stack: Vec<Frame>,
    visited: BitVec,
    timer: usize,
    walk: TourWalk,
}

impl<'a> StackTraversal<'a> {
    pub(crate) fn new(topology: &'a Topology) -> Self {
        let n = topology.node_count();
        Self {
            topology,
            stack: Vec::new(),
            visited: bitvec![0; n + 1],
            timer: 0,
            walk: TourWalk {
                entry: vec![0; n + 1],
                exit: vec![0; n + 1],
                order: vec![NO_PARENT; n + 1],
            },
        }
    }

    /// Stamp `node` on entry and push its frame.
    fn enter(&mut self, node: NodeId, parent: NodeId, tracker: &mut DepthTracker) {
        self.timer += 1;
        self.walk.entry[node] = self.timer;
        self.walk.order[self.timer] = node;
        self.visited.set(node, true);
        self.stack.push(Frame {
            node,
            parent,
            next: 0,
            children: 0,
        });
        tracker.push_frame();
    }

    /// Run the walk from `root` to completion.
    pub(crate) fn run(
        mut self,
        root: NodeId,
        tracker: &mut DepthTracker,
    ) -> Result<TourWalk, TopologyError> {
        let node_count = self.topology.node_count();
        if !self.topology.contains(root) {
            return Err(TopologyError::RootOutOfRange { root, node_count });
        }

        self.enter(root, NO_PARENT, tracker);

        while let Some(top) = self.stack.last_mut() {
            let neighbors = self.topology.neighbors(top.node);

            if let Some(&next) = neighbors.get(top.next) {
                top.next += 1;
                if next == top.parent {
                    continue;
                }
                top.children += 1;
                let parent = top.node;

                if self.visited[next] {
                    return Err(TopologyError::Cycle { node: next });
                }
                self.enter(next, parent, tracker);
            } else {
                let done = *top;
                self.walk.exit[done.node] = self.timer;
                if done.children == 0 {
                    tracker.record_leaf();
                }
                trace!(
                    node = done.node,
                    entry = self.walk.entry[done.node],
                    exit = self.timer,
                    "closed subtree"
                );
                self.stack.pop();
                tracker.pop_frame();
            }
        }

        if self.timer < node_count {
            let unvisited = &self.visited[1..];
            let unreached = unvisited.count_zeros();
            let first = unvisited.first_zero().map_or(0, |idx| idx + 1);
            return Err(TopologyError::Disconnected { unreached, first });
        }

        Ok(self.walk)
    }
}
