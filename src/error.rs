//! Error definitions.

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors raised while constructing a factory.
///
/// Chain, Columns and the propagation engine never fail; only
/// construction and configuration do.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither an entry maker, a prebuilt entry nor a sink was supplied.
    #[error("invalid arguments: an entry maker, prebuilt entry or sink must be given")]
    MissingSink,

    /// The requested source kind is not one the factory understands.
    #[error("invalid arguments: unsupported sink kind `{kind}`")]
    ArgumentTypeMismatch { kind: String },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for scopelog construction.
pub type Result<T> = std::result::Result<T, Error>;
