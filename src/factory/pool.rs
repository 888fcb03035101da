//! Builder state pooling.
//!
//! # Responsibilities
//! - Recycle the fragment buffers a builder fills between calls
//! - Guarantee a recycled state never carries data from its previous user
//!
//! # Design Decisions
//! - `acquire` and `release` each take the pool lock once
//! - Reset runs on release *and* on acquire; a state is clean no matter
//!   which path handed it out
//! - The pool is bounded; surplus states are dropped

use std::sync::Mutex;

use crate::model::Columns;
use crate::observability::metrics;
use crate::propagation::Strategy;

/// Mutable fragment collected by a builder for a single call.
#[derive(Debug, Default)]
pub struct BuilderState {
    pub(crate) names: Vec<String>,
    pub(crate) columns: Columns,
    pub(crate) strategy: Strategy,
}

impl BuilderState {
    /// Clear every field while keeping allocations.
    pub fn reset(&mut self) {
        self.names.clear();
        self.columns.clear();
        self.strategy = Strategy::default();
    }

    /// True when no call-specific data is present.
    pub fn is_clean(&self) -> bool {
        self.names.is_empty() && self.columns.is_empty() && self.strategy == Strategy::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

/// A bounded pool of [`BuilderState`]s.
#[derive(Debug)]
pub struct BuilderPool {
    idle: Mutex<Vec<BuilderState>>,
    capacity: usize,
}

impl BuilderPool {
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a pool keeping at most `capacity` idle states.
    pub fn new(capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(capacity.min(Self::DEFAULT_CAPACITY))),
            capacity,
        }
    }

    /// Take a clean state, reusing an idle one if available.
    pub fn acquire(&self) -> BuilderState {
        let reused = self.idle.lock().ok().and_then(|mut idle| idle.pop());
        match reused {
            Some(mut state) => {
                state.reset();
                metrics::record_pool_event("reuse");
                state
            }
            None => {
                metrics::record_pool_event("alloc");
                BuilderState::default()
            }
        }
    }

    /// Reset `state` and make it available to the next `acquire`.
    pub fn release(&self, mut state: BuilderState) {
        state.reset();
        let Ok(mut idle) = self.idle.lock() else {
            return;
        };
        if idle.len() < self.capacity {
            idle.push(state);
            metrics::record_pool_idle(idle.len());
        } else {
            metrics::record_pool_event("drop");
        }
    }

    /// Number of idle states.
    pub fn idle(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BuilderPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
