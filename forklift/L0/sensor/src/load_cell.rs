//! Synthetic load-cell signal generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::LoadCellConfig;
use crate::error::SensorResult;
use crate::history::SampleHistory;
use crate::vibration::VibrationEnvelope;

/// Generates one load-cell reading per tick.
///
/// A reading is `load / weight_divisor`, plus uniform noise in
/// `±noise_amplitude`, plus `sin(phase) * movement_gain` while the lift is
/// moving. Lift motion also excites the [`VibrationEnvelope`], which decays
/// once motion stops and drives the cosmetic fork offset.
///
/// # Example
///
/// ```
/// use forklift_sensor::{LoadCell, LoadCellConfig};
///
/// let config = LoadCellConfig::default().with_noise_amplitude(0.0);
/// let mut cell = LoadCell::new(config).unwrap();
///
/// let value = cell.sample(10.0, false, 0.0);
/// assert!((value - 1.0).abs() < 1e-12);
/// assert_eq!(cell.history().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LoadCell {
    config: LoadCellConfig,
    rng: StdRng,
    envelope: VibrationEnvelope,
    history: SampleHistory,
    phase: f64,
}

impl LoadCell {
    /// Creates a generator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SensorError::InvalidConfig`] if the configuration
    /// fails validation.
    pub fn new(config: LoadCellConfig) -> SensorResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            history: SampleHistory::new(config.history_capacity),
            config,
            rng,
            envelope: VibrationEnvelope::default(),
            phase: 0.0,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LoadCellConfig {
        &self.config
    }

    /// Returns the vibration envelope.
    #[must_use]
    pub const fn envelope(&self) -> VibrationEnvelope {
        self.envelope
    }

    /// Returns the rolling history of readings.
    #[must_use]
    pub const fn history(&self) -> &SampleHistory {
        &self.history
    }

    /// Phase (radians) used by the most recent sample.
    #[must_use]
    pub const fn phase(&self) -> f64 {
        self.phase
    }

    /// Cosmetic fork displacement for the most recent sample.
    #[must_use]
    pub fn vibration_offset(&self) -> f64 {
        self.envelope.offset(self.phase)
    }

    /// Produces one reading and appends it to the history.
    ///
    /// `lift_moving` must be true only while a lift action is active and
    /// the fork is strictly inside its travel range.
    pub fn sample(&mut self, load: f64, lift_moving: bool, elapsed_secs: f64) -> f64 {
        self.phase = elapsed_secs * self.config.phase_rate;

        let base = load / self.config.weight_divisor;
        let noise = self.noise();

        let mut movement = 0.0;
        if lift_moving {
            movement = self.phase.sin() * self.config.movement_gain;
            self.envelope.excite(self.config.excitation(load));
        } else if self.envelope.is_active() {
            self.envelope
                .decay(self.config.decay_factor, self.config.cutoff);
            if !self.envelope.is_active() {
                debug!(elapsed_secs, "fork vibration settled");
            }
        }

        let value = base + noise + movement;
        self.history.push(elapsed_secs, value);
        value
    }

    /// Clears the history and silences the envelope.
    pub fn reset(&mut self) {
        self.history.clear();
        self.envelope = VibrationEnvelope::default();
        self.phase = 0.0;
    }

    fn noise(&mut self) -> f64 {
        let amplitude = self.config.noise_amplitude;
        if amplitude > 0.0 {
            self.rng.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quiet() -> LoadCell {
        LoadCell::new(LoadCellConfig::default().with_noise_amplitude(0.0)).unwrap()
    }

    #[test]
    fn baseline_is_load_over_ten() {
        let mut cell = quiet();
        assert_relative_eq!(cell.sample(10.0, false, 3.0), 1.0);
        assert_relative_eq!(cell.sample(5.0, false, 3.1), 0.5);
        assert!(!cell.envelope().is_active());
    }

    #[test]
    fn noisy_samples_stay_in_band() {
        let mut cell = LoadCell::new(LoadCellConfig::default().with_seed(42)).unwrap();
        for i in 0..500 {
            let t = f64::from(i) / 60.0;
            let moving = i % 3 == 0;
            let v = cell.sample(2.0, moving, t);
            assert!(v.is_finite());
            let band = 0.05 + if moving { 0.2 } else { 0.0 };
            assert!((v - 0.2).abs() <= band + 1e-12, "sample {v} outside band");
        }
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let config = LoadCellConfig::default().with_seed(9);
        let mut a = LoadCell::new(config.clone()).unwrap();
        let mut b = LoadCell::new(config).unwrap();
        for i in 0..20 {
            let t = f64::from(i);
            assert_eq!(a.sample(5.0, false, t).to_bits(), b.sample(5.0, false, t).to_bits());
        }
    }

    #[test]
    fn lifting_adds_movement_term_and_excites_envelope() {
        let mut cell = quiet();
        let t = 0.2;
        let v = cell.sample(5.0, true, t);
        assert_relative_eq!(v, 0.5 + (t * 10.0).sin() * 0.2, epsilon = 1e-12);
        assert!(cell.envelope().is_active());
        assert_relative_eq!(cell.envelope().amplitude(), 0.08, epsilon = 1e-12);
        assert_relative_eq!(cell.vibration_offset(), 0.08 * 2.0_f64.sin(), epsilon = 1e-12);
    }

    #[test]
    fn idle_ticks_decay_envelope() {
        let mut cell = quiet();
        cell.sample(5.0, true, 0.0);
        for n in 1..=10 {
            let v = cell.sample(5.0, false, f64::from(n));
            assert_relative_eq!(v, 0.5, epsilon = 1e-12);
            assert_relative_eq!(
                cell.envelope().amplitude(),
                0.08 * 0.98_f64.powi(n),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn history_is_bounded() {
        let mut cell = quiet();
        for i in 0..150 {
            cell.sample(f64::from(i), false, f64::from(i));
        }
        assert_eq!(cell.history().len(), 100);
        assert_eq!(cell.history().oldest().map(|(t, _)| t), Some(50.0));

        cell.reset();
        assert!(cell.history().is_empty());
    }
}
