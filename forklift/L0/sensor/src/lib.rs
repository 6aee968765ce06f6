//! Load-cell signal synthesis for the forklift rig.
//!
//! - [`LoadCell`] - Per-tick reading generator (baseline, noise, lift vibration)
//! - [`LoadCellConfig`] - Signal constants and noise seed
//! - [`VibrationEnvelope`] - Decaying fork vibration driven by lift motion
//! - [`SampleHistory`] - Fixed-capacity FIFO of recent readings
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Example
//!
//! ```
//! use forklift_sensor::{LoadCell, LoadCellConfig};
//!
//! let mut cell = LoadCell::new(LoadCellConfig::default().with_seed(1)).unwrap();
//! for tick in 0..120 {
//!     cell.sample(5.0, tick < 60, f64::from(tick) / 60.0);
//! }
//! assert_eq!(cell.history().len(), 100);
//! assert!(cell.envelope().amplitude() < 0.08);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod history;
mod load_cell;
mod vibration;

pub use config::LoadCellConfig;
pub use error::{SensorError, SensorResult};
pub use history::SampleHistory;
pub use load_cell::LoadCell;
pub use vibration::VibrationEnvelope;
