//! Process-wide entry points.
//!
//! # Data Flow
//! ```text
//! global::init(factory) / global::apply_config(config)
//!     → default.rs (ArcSwap<Factory>, swapped atomically)
//!     → leaf / branch / detach / common / builder use the current factory
//!
//! LocalMethod::Dev.log(..)
//!     → local.rs (dev flag: AtomicBool)
//!     → local tracing factory, or the discarding factory when disabled
//! ```
//!
//! # Design Decisions
//! - A usable default exists before `init` (tracing sink)
//! - Readers load a whole factory; they never observe a half-built one
//! - The dev flag is a plain atomic, readable from any thread

pub mod default;
pub mod local;

pub use default::{
    apply_config, branch, builder, common, detach, factory, init, leaf, set_entry_maker,
};
pub use local::{dev_enabled, set_dev_enabled, LocalMethod};
