//! Error types for the load-cell generator.

use thiserror::Error;

/// Result type for sensor operations.
pub type SensorResult<T> = std::result::Result<T, SensorError>;

/// Errors that can occur while configuring the load cell.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SensorError {
    /// A configuration field is non-finite or out of range.
    #[error("invalid load-cell configuration: {field} {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl SensorError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
