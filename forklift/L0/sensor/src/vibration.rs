//! Decaying vibration envelope of the fork carriage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vibration state driven by lift motion.
///
/// While the lift moves the envelope is excited to a load-dependent
/// amplitude. Once motion stops the amplitude decays geometrically and
/// snaps to exactly zero the first time it falls below the cutoff.
///
/// # Example
///
/// ```
/// use forklift_sensor::VibrationEnvelope;
///
/// let mut env = VibrationEnvelope::default();
/// env.excite(0.08);
/// env.decay(0.98, 0.001);
/// assert!((env.amplitude() - 0.0784).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VibrationEnvelope {
    active: bool,
    amplitude: f64,
}

impl VibrationEnvelope {
    /// Returns true while the envelope is ringing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Current amplitude (always `>= 0`).
    #[must_use]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Activates the envelope at `amplitude`.
    pub fn excite(&mut self, amplitude: f64) {
        self.active = true;
        self.amplitude = amplitude.max(0.0);
    }

    /// Applies one tick of decay. Does nothing while inactive.
    pub fn decay(&mut self, factor: f64, cutoff: f64) {
        if !self.active {
            return;
        }
        self.amplitude *= factor;
        if self.amplitude < cutoff {
            self.active = false;
            self.amplitude = 0.0;
        }
    }

    /// Returns the cosmetic displacement at `phase` radians.
    #[must_use]
    pub fn offset(&self, phase: f64) -> f64 {
        if self.active {
            self.amplitude * phase.sin()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn decays_geometrically_then_snaps_to_zero() {
        let mut env = VibrationEnvelope::default();
        env.excite(0.08);

        let mut n = 0;
        while env.is_active() {
            env.decay(0.98, 0.001);
            n += 1;
            if env.is_active() {
                assert_relative_eq!(env.amplitude(), 0.08 * 0.98_f64.powi(n), epsilon = 1e-12);
            }
        }
        // First N with 0.08 * 0.98^N < 0.001.
        assert_eq!(n, 217);
        assert!(env.amplitude() == 0.0);
    }

    #[test]
    fn inactive_envelope_has_no_offset() {
        let env = VibrationEnvelope::default();
        assert!(env.offset(1.0).abs() < f64::EPSILON);

        let mut ringing = VibrationEnvelope::default();
        ringing.excite(0.1);
        assert_relative_eq!(ringing.offset(std::f64::consts::FRAC_PI_2), 0.1);
    }

    #[test]
    fn decay_while_idle_is_noop() {
        let mut env = VibrationEnvelope::default();
        env.decay(0.98, 0.001);
        assert_eq!(env, VibrationEnvelope::default());
    }
}
