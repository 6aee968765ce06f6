//! Bevy viewer for the forklift rig simulation.
//!
//! This crate is **Layer 1** - it depends on Bevy and drives the Layer 0
//! `forklift-core` simulation through its collaborator traits.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     forklift-bevy (L1)                       │
//! │  gather_input ──► step_simulation ──► sync_primitives        │
//! │  (FrameInput)      (run_frame)        sync_overlay           │
//! │                        │              follow_forklift        │
//! └────────────────────────┼─────────────────────────────────────┘
//!                          │ InputSource / RenderBackend
//! ┌────────────────────────▼─────────────────────────────────────┐
//! │                   forklift-core (L0)                         │
//! │  Simulation: state, load cell, cargo, rig and scene geometry │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design
//!
//! - The simulation is the source of truth; the viewer never edits state
//! - One `Update` is one tick
//! - Every primitive maps onto a pooled entity with a cached unit mesh
//! - Bevy types stay out of `forklift-core`; conversions live in [`convert`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod camera;
pub mod convert;
pub mod input;
pub mod overlay;
pub mod plugin;
pub mod render;
pub mod resources;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::OrbitCamera;
    pub use crate::input::FrameInput;
    pub use crate::plugin::{ForkliftSet, ForkliftViewerPlugin};
    pub use crate::render::{DrawQueue, PrimitivePool, PrimitiveSlot};
    pub use crate::resources::{ForkliftSim, LastTick};
}
