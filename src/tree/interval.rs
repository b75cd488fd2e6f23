//! Timestamp interval of one subtree
//!
//! Interval = [entry, exit] ⊆ [1, N]
//! Nesting: d in subtree(u) ⇔ entry(u) ≤ entry(d) ≤ exit(u)
//! Leaves are unit intervals (entry == exit).

use std::fmt;

/// Subtree interval (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TourInterval {
    /// Entry timestamp (inclusive)
    pub entry: usize,

    /// Exit timestamp (inclusive)
    pub exit: usize,
}

impl TourInterval {
    /// Create interval [entry, exit]
    pub fn new(entry: usize, exit: usize) -> Self {
        debug_assert!(entry <= exit, "entry must not exceed exit");
        Self { entry, exit }
    }

    /// Check if leaf (unit interval)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.entry == self.exit
    }

    /// Number of timestamps covered (= subtree size)
    #[inline]
    pub fn len(&self) -> usize {
        self.exit - self.entry + 1
    }

    /// Check if `timestamp` falls inside
    #[inline]
    pub fn contains(&self, timestamp: usize) -> bool {
        self.entry <= timestamp && timestamp <= self.exit
    }

    /// Check if `other` nests inside (equal intervals nest)
    #[inline]
    pub fn encloses(&self, other: &TourInterval) -> bool {
        self.entry <= other.entry && other.exit <= self.exit
    }

    /// Check if the two intervals share no timestamp
    #[inline]
    pub fn is_disjoint(&self, other: &TourInterval) -> bool {
        self.exit < other.entry || other.exit < self.entry
    }
}

impl fmt::Display for TourInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.entry, self.exit)
    }
}
