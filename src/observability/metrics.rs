//! Metrics collection.
//!
//! # Metrics
//! - `scopelog_records_built_total` (counter): records built, by strategy
//! - `scopelog_records_emitted_total` (counter): records sent to a sink, by level
//! - `scopelog_pool_events_total` (counter): builder pool `reuse` / `alloc` / `drop`
//! - `scopelog_pool_idle` (gauge): builder states waiting in a pool
//!
//! # Design Decisions
//! - Only the `metrics` facade is used; the embedding application installs
//!   a recorder (or none, making every call a no-op)

use crate::propagation::Strategy;
use crate::sink::Level;

/// Record a completed build.
pub fn record_built(strategy: Strategy) {
    ::metrics::counter!("scopelog_records_built_total", "strategy" => strategy.as_str()).increment(1);
}

/// Record an entry handed to its sink.
pub fn record_emitted(level: Level) {
    ::metrics::counter!("scopelog_records_emitted_total", "level" => level.as_str()).increment(1);
}

/// Record a pool acquire/release outcome.
pub fn record_pool_event(event: &'static str) {
    ::metrics::counter!("scopelog_pool_events_total", "event" => event).increment(1);
}

/// Record the number of idle builder states.
pub fn record_pool_idle(idle: usize) {
    ::metrics::gauge!("scopelog_pool_idle").set(idle as f64);
}
