//! Forklift rig simulation core.
//!
//! This crate owns the forklift's state and advances it one tick at a time:
//!
//! # Simulation
//!
//! - [`Simulation`] - Owns state, load cell, cargo and pre-built geometry
//! - [`SimulationState`] - Pose, wheel steering, lift and vibration
//! - [`ActionSet`] - Logical actions active during a tick
//!
//! # Geometry
//!
//! - [`RigAssembler`] - Flattens the rig into world-space primitives
//! - [`Scene`] - Static arena or warehouse geometry
//! - [`CargoManifest`] - Cargo items, destination zones, pickup and drop
//!
//! # Collaborators
//!
//! - [`RenderBackend`] - Receives draw commands and the overlay
//! - [`InputSource`] - Reports active actions and camera input
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. The Bevy viewer
//! lives in `forklift-bevy`; any other frontend implements the two traits.
//!
//! # Example
//!
//! ```
//! use forklift_core::{Action, ActionSet, ForkliftConfig, Simulation};
//!
//! let mut sim = Simulation::new(ForkliftConfig::warehouse().with_seed(7)).unwrap();
//! let forward: ActionSet = [Action::MoveForward].into_iter().collect();
//! for tick in 0..30 {
//!     sim.step(&forward, f64::from(tick) / 60.0);
//! }
//! // Heading 0 faces −Y.
//! assert!((sim.state().pose.position.y + 3.0).abs() < 1e-9);
//! assert!(!sim.primitives().is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod action;
mod backend;
mod cargo;
mod config;
mod error;
mod overlay;
mod rig;
mod scene;
mod sim;
mod state;
mod warehouse;

pub use action::{Action, ActionSet, LoadPreset};
pub use backend::{DrawCommand, InputFrame, InputSource, RenderBackend, render_frame};
pub use cargo::{CargoId, CargoItem, CargoManifest, DestinationZone, DropOutcome, default_cargo, default_zones};
pub use config::{
    ForkliftConfig, MotionConfig, PickupConfig, RigDimensions, SceneVariant, WarehouseConfig,
};
pub use error::{CargoError, ForkliftError, Result};
pub use overlay::{CONTROLS_LEGEND, Chart, Overlay, OverlayText};
pub use rig::{RigAssembler, RigParts};
pub use scene::Scene;
pub use sim::{Simulation, TickReport};
pub use state::{LiftState, Pose, SimulationState, SteeringMode, WheelState, wrap_degrees};

pub use forklift_geometry as geometry;
pub use forklift_sensor as sensor;
