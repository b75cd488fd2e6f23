//! Shared tree builders for integration tests

#![allow(dead_code)]

use eulertour::{NodeId, Topology, TourContext};

/// Reference tree: 1 → {2, 3}, 2 → {4, 5}
pub const REFERENCE_EDGES: [(NodeId, NodeId); 4] = [(1, 2), (1, 3), (2, 4), (2, 5)];

/// Values 10, 20, 30, 40, 50 for nodes 1..=5
pub const REFERENCE_VALUES: [i32; 5] = [10, 20, 30, 40, 50];

/// Initialized context over the reference tree
pub fn reference_context() -> TourContext {
    let topology = Topology::from_edges(5, &REFERENCE_EDGES).expect("reference tree is valid");
    let mut ctx = TourContext::build(topology, 1).expect("reference tree flattens");
    ctx.initialize(&REFERENCE_VALUES).expect("values fit");
    ctx
}

/// Edges of the tree where node `i + 2` hangs off `parents[i]`.
///
/// Each `parents[i]` is reduced into `1..=i + 1`, so any input gives a tree.
pub fn edges_from_parents(parents: &[usize]) -> Vec<(NodeId, NodeId)> {
    parents
        .iter()
        .enumerate()
        .map(|(i, &p)| (p % (i + 1) + 1, i + 2))
        .collect()
}

/// Path 1 - 2 - ... - n
pub fn path_edges(n: usize) -> Vec<(NodeId, NodeId)> {
    (1..n).map(|u| (u, u + 1)).collect()
}

/// Parent of every node when rooted at `root` (`parent[root] == 0`), slot 0 unused.
pub fn naive_parents(n: usize, edges: &[(NodeId, NodeId)], root: NodeId) -> Vec<NodeId> {
    let mut adjacency = vec![Vec::new(); n + 1];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }
    let mut parent = vec![0; n + 1];
    let mut seen = vec![false; n + 1];
    let mut queue = std::collections::VecDeque::from([root]);
    seen[root] = true;
    while let Some(u) = queue.pop_front() {
        for &v in &adjacency[u] {
            if !seen[v] {
                seen[v] = true;
                parent[v] = u;
                queue.push_back(v);
            }
        }
    }
    parent
}

/// True if `a` lies on the path from `d` up to the root (inclusive).
pub fn naive_is_ancestor(parent: &[NodeId], a: NodeId, d: NodeId) -> bool {
    let mut cur = d;
    while cur != 0 {
        if cur == a {
            return true;
        }
        cur = parent[cur];
    }
    false
}

/// Subtree sum computed by walking parent pointers.
pub fn naive_subtree_sum(parent: &[NodeId], values: &[i32], u: NodeId) -> i64 {
    (1..parent.len())
        .filter(|&d| naive_is_ancestor(parent, u, d))
        .map(|d| i64::from(values[d - 1]))
        .sum()
}
