//! Error types for geometry construction.

use thiserror::Error;

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while building primitive geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A primitive or part was requested with a non-positive size or count.
    #[error("invalid geometry for {part}: {parameter} must be positive, got {value}")]
    InvalidGeometry {
        /// The part being built (e.g. `"mecanum_wheel"`).
        part: &'static str,
        /// The offending parameter name.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A cylinder was requested with too few sides to enclose a volume.
    #[error("invalid geometry for {part}: cylinder needs at least 3 sides, got {sides}")]
    TooFewSides {
        /// The part being built.
        part: &'static str,
        /// The rejected side count.
        sides: u32,
    },
}

impl GeometryError {
    /// Creates an [`GeometryError::InvalidGeometry`] error.
    #[must_use]
    pub const fn invalid(part: &'static str, parameter: &'static str, value: f64) -> Self {
        Self::InvalidGeometry {
            part,
            parameter,
            value,
        }
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(
    part: &'static str,
    parameter: &'static str,
    value: f64,
) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(part, parameter, value))
    }
}

/// Checks that a cylinder has enough sides.
pub(crate) fn ensure_sides(part: &'static str, sides: u32) -> GeometryResult<()> {
    if sides >= 3 {
        Ok(())
    } else {
        Err(GeometryError::TooFewSides { part, sides })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_part_and_parameter() {
        let err = GeometryError::invalid("threaded_rod", "length", -1.0);
        let msg = format!("{err}");
        assert!(msg.contains("threaded_rod"));
        assert!(msg.contains("length"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_nan() {
        assert!(ensure_positive("box", "dx", 1.0).is_ok());
        assert!(ensure_positive("box", "dx", 0.0).is_err());
        assert!(ensure_positive("box", "dx", f64::NAN).is_err());
        assert!(ensure_positive("box", "dx", f64::INFINITY).is_err());
    }

    #[test]
    fn ensure_sides_requires_three() {
        assert!(ensure_sides("cylinder", 3).is_ok());
        assert_eq!(
            ensure_sides("cylinder", 2),
            Err(GeometryError::TooFewSides {
                part: "cylinder",
                sides: 2
            })
        );
    }
}
