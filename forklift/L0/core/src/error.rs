//! Error types for the forklift core.

use forklift_geometry::GeometryError;
use forklift_sensor::SensorError;
use thiserror::Error;

use crate::cargo::CargoId;

/// Result type for forklift operations.
pub type Result<T> = std::result::Result<T, ForkliftError>;

/// Errors raised while configuring or building a simulation.
///
/// Per-tick operations never fail: out-of-range values are clamped and
/// cargo no-ops are reported as [`CargoError`].
#[derive(Debug, Error)]
pub enum ForkliftError {
    /// A part could not be built from the configured dimensions.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The load-cell configuration was rejected.
    #[error("sensor error: {0}")]
    Sensor(#[from] SensorError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ForkliftError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

/// Why a pickup or drop request did nothing.
///
/// These are informational outcomes, not failures of the simulation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CargoError {
    /// Pickup requested while already carrying an item.
    #[error("already carrying cargo {0}")]
    AlreadyCarrying(CargoId),

    /// Pickup requested but no cargo is within reach of the fork.
    #[error("no cargo within reach of the fork")]
    NoCargoInReach,

    /// Drop requested with nothing on the fork.
    #[error("not carrying any cargo")]
    NotCarrying,

    /// Drop requested away from every destination zone.
    #[error("cargo {0} is not over a destination zone")]
    OutsideDestinationZone(CargoId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_errors_convert() {
        let err: ForkliftError = GeometryError::invalid("t_nut", "radius", 0.0).into();
        assert!(matches!(err, ForkliftError::Geometry(_)));
        assert!(err.to_string().contains("t_nut"));
    }

    #[test]
    fn cargo_error_messages() {
        assert_eq!(
            CargoError::AlreadyCarrying(CargoId(3)).to_string(),
            "already carrying cargo #3"
        );
        assert_eq!(CargoError::NotCarrying.to_string(), "not carrying any cargo");
    }
}
