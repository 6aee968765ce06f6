//! Load-cell generator configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SensorError, SensorResult};

/// Constants of the synthetic load-cell signal.
///
/// # Example
///
/// ```
/// use forklift_sensor::LoadCellConfig;
///
/// let config = LoadCellConfig::default().with_noise_amplitude(0.0).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadCellConfig {
    /// Load (kg) per unit of baseline reading.
    pub weight_divisor: f64,
    /// Half-width of the uniform noise band.
    pub noise_amplitude: f64,
    /// Amplitude of the oscillation added to readings while the lift moves.
    pub movement_gain: f64,
    /// Envelope amplitude with no load.
    pub base_amplitude: f64,
    /// Additional envelope amplitude per kg of load.
    pub weight_gain: f64,
    /// Per-tick multiplier applied to an idle envelope.
    pub decay_factor: f64,
    /// Amplitude below which the envelope switches off.
    pub cutoff: f64,
    /// Phase advance in radians per second of elapsed time.
    pub phase_rate: f64,
    /// Number of readings kept in the rolling history.
    pub history_capacity: usize,
    /// Noise seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for LoadCellConfig {
    fn default() -> Self {
        Self {
            weight_divisor: 10.0,
            noise_amplitude: 0.05,
            movement_gain: 0.2,
            base_amplitude: 0.03,
            weight_gain: 0.01,
            decay_factor: 0.98,
            cutoff: 0.001,
            phase_rate: 10.0,
            history_capacity: 100,
            seed: None,
        }
    }
}

impl LoadCellConfig {
    /// Sets the noise half-width.
    #[must_use]
    pub const fn with_noise_amplitude(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    /// Sets the envelope decay factor.
    #[must_use]
    pub const fn with_decay_factor(mut self, factor: f64) -> Self {
        self.decay_factor = factor;
        self
    }

    /// Sets the history capacity.
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Fixes the noise seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the envelope amplitude for a given load.
    #[must_use]
    pub fn excitation(&self, load: f64) -> f64 {
        self.base_amplitude + self.weight_gain * load
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::InvalidConfig`] for the first field that is
    /// non-finite or outside its range.
    pub fn validate(&self) -> SensorResult<()> {
        let finite = [
            ("weight_divisor", self.weight_divisor),
            ("noise_amplitude", self.noise_amplitude),
            ("movement_gain", self.movement_gain),
            ("base_amplitude", self.base_amplitude),
            ("weight_gain", self.weight_gain),
            ("decay_factor", self.decay_factor),
            ("cutoff", self.cutoff),
            ("phase_rate", self.phase_rate),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SensorError::invalid_config(field, "must be finite"));
            }
        }

        if self.weight_divisor <= 0.0 {
            return Err(SensorError::invalid_config("weight_divisor", "must be positive"));
        }
        for (field, value) in [
            ("noise_amplitude", self.noise_amplitude),
            ("movement_gain", self.movement_gain),
            ("base_amplitude", self.base_amplitude),
            ("weight_gain", self.weight_gain),
        ] {
            if value < 0.0 {
                return Err(SensorError::invalid_config(field, "must be non-negative"));
            }
        }
        if self.decay_factor <= 0.0 || self.decay_factor >= 1.0 {
            return Err(SensorError::invalid_config("decay_factor", "must be in (0, 1)"));
        }
        if self.cutoff <= 0.0 {
            return Err(SensorError::invalid_config("cutoff", "must be positive"));
        }
        if self.history_capacity == 0 {
            return Err(SensorError::invalid_config("history_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(LoadCellConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_fields() {
        let bad = LoadCellConfig::default().with_decay_factor(1.0);
        assert!(matches!(
            bad.validate(),
            Err(SensorError::InvalidConfig { field: "decay_factor", .. })
        ));

        let bad = LoadCellConfig::default().with_noise_amplitude(f64::NAN);
        assert!(bad.validate().is_err());

        let bad = LoadCellConfig::default().with_history_capacity(0);
        assert!(bad.validate().is_err());

        let bad = LoadCellConfig {
            weight_divisor: 0.0,
            ..LoadCellConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn excitation_grows_with_load() {
        let config = LoadCellConfig::default();
        assert!((config.excitation(0.0) - 0.03).abs() < 1e-12);
        assert!((config.excitation(5.0) - 0.08).abs() < 1e-12);
    }
}
