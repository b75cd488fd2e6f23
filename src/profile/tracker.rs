//! Stack-depth tracking for the tour walk

use super::TraversalProfile;

/// Tracks frames pushed and popped by the explicit-stack walk
#[derive(Debug)]
pub struct DepthTracker {
    /// Frames currently on the stack
    current: usize,

    /// Maximum seen
    max: usize,

    /// Profile data (if enabled)
    profile: Option<TraversalProfile>,
}

impl DepthTracker {
    /// Create new tracker
    pub fn new(profile_enabled: bool) -> Self {
        Self {
            current: 0,
            max: 0,
            profile: profile_enabled.then(TraversalProfile::default),
        }
    }

    /// Push a frame for a newly entered node
    pub fn push_frame(&mut self) {
        self.current += 1;
        self.max = self.max.max(self.current);

        if let Some(ref mut p) = self.profile {
            p.nodes_visited += 1;
            p.max_stack_depth = self.max;
        }
    }

    /// Pop a finished frame
    pub fn pop_frame(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Record a node that had no children
    pub fn record_leaf(&mut self) {
        if let Some(ref mut p) = self.profile {
            p.leaves += 1;
        }
    }

    /// Frames currently held
    pub fn depth(&self) -> usize {
        self.current
    }

    /// Maximum depth reached
    pub fn max_depth(&self) -> usize {
        self.max
    }

    /// Take profile (leaves the tracker without one)
    pub fn take_profile(&mut self) -> Option<TraversalProfile> {
        self.profile.take()
    }
}
