//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (pool capacity > 0)
//! - Reject blank strings where a value is required
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>
//! - Unknown sink kinds (including `memory`, which is test-only) are left to
//!   the factory, which owns that mapping

use thiserror::Error;

use crate::config::schema::LogConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pool.capacity must be greater than 0")]
    ZeroPoolCapacity,

    #[error("sink.kind must not be blank")]
    BlankSinkKind,

    #[error("logging.filter must not be blank")]
    BlankFilter,
}

/// Check `config`, collecting every error.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.pool.capacity == 0 {
        errors.push(ValidationError::ZeroPoolCapacity);
    }
    if config.sink.kind.as_deref().is_some_and(|kind| kind.trim().is_empty()) {
        errors.push(ValidationError::BlankSinkKind);
    }
    if config.logging.filter.trim().is_empty() {
        errors.push(ValidationError::BlankFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(validate_config(&LogConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = LogConfig::default();
        config.pool.capacity = 0;
        config.sink.kind = Some("  ".into());
        config.logging.filter = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroPoolCapacity,
                ValidationError::BlankSinkKind,
                ValidationError::BlankFilter,
            ]
        );
    }
}
