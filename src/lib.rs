//! Structured logging context propagation.
//!
//! Accumulates a fingerprint chain and key/value columns as execution flows
//! through nested calls, and attaches both to every record built from the
//! resulting context.

pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod global;
pub mod model;
pub mod observability;
pub mod propagation;
pub mod sink;

pub use config::LogConfig;
pub use context::Context;
pub use error::{Error, Result};
pub use factory::{Builder, EntryMaker, EntrySource, Factory, Record};
pub use global::LocalMethod;
pub use model::{Chain, Column, Columns, Fields};
pub use propagation::{Propagation, Strategy};
pub use sink::{Entry, Level, Sink};
