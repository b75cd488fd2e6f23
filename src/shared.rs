//! Shared access for embedding systems
//!
//! Build and initialize under exclusive ownership, then share.
//! Queries take the read lock and may run in parallel with each other;
//! updates take the write lock, since one Fenwick update touches
//! O(log N) cells a reader must not observe half-written.

use std::sync::{Arc, RwLock};

use crate::context::{Operation, TourContext};
use crate::topology::NodeId;
use crate::TourError;

/// Cloneable, read/write-locked handle to an initialized [`TourContext`]
#[derive(Debug, Clone)]
pub struct SharedTourContext {
    inner: Arc<RwLock<TourContext>>,
}

impl SharedTourContext {
    /// Share an initialized context.
    pub fn new(context: TourContext) -> Result<Self, TourError> {
        if !context.is_initialized() {
            return Err(TourError::UninitializedAccess);
        }
        Ok(Self {
            inner: Arc::new(RwLock::new(context)),
        })
    }

    /// Subtree sum under the read lock.
    pub fn query_subtree(&self, node: NodeId) -> Result<i64, TourError> {
        let guard = self.inner.read().map_err(|_| TourError::LockPoisoned)?;
        guard.query_subtree(node)
    }

    /// Node update under the write lock.
    pub fn update(&self, node: NodeId, new_value: i32) -> Result<(), TourError> {
        let mut guard = self.inner.write().map_err(|_| TourError::LockPoisoned)?;
        guard.update(node, new_value)
    }

    /// Apply an operation, locking only as much as it needs.
    pub fn apply(&self, op: Operation) -> Result<Option<i64>, TourError> {
        match op {
            Operation::Query { node } => self.query_subtree(node).map(Some),
            Operation::Update { node, value } => self.update(node, value).map(|()| None),
        }
    }

    /// Run `f` with read access to the whole context.
    pub fn with_read<R>(&self, f: impl FnOnce(&TourContext) -> R) -> Result<R, TourError> {
        let guard = self.inner.read().map_err(|_| TourError::LockPoisoned)?;
        Ok(f(&guard))
    }
}
