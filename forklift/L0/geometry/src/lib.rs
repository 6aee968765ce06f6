//! Procedural primitive geometry for the forklift rig.
//!
//! Everything the rig draws is built from two primitive shapes, a box and a
//! capped cylinder, composed under nested rigid transforms:
//!
//! - [`Primitive`] - One shape with a transform, a color and a render pass
//! - [`FrameBuilder`] - Scoped transform stack that emits primitives
//! - [`Part`] - A reusable group of primitives in a local frame
//! - [`parts`] - Parametrized mechanical parts (mecanum wheel, threaded rod,
//!   T-nut, stepper motor, coupler, load cell)
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. The output is a
//! plain list of draw records that any renderer can consume.
//!
//! # Example
//!
//! ```
//! use forklift_geometry::{Axis, FrameBuilder, mecanum_wheel, palette};
//!
//! let wheel = mecanum_wheel(0.3, 0.2, 12, 45.0, palette::BLUE).unwrap();
//!
//! let mut frames = FrameBuilder::new();
//! frames.translate(0.75, -0.95, -0.25);
//! frames.scoped(|f| {
//!     f.rotate_deg(Axis::Y, 90.0).emit_part(&wheel);
//! });
//! assert_eq!(frames.len(), wheel.len());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod color;
mod error;
mod frame;
mod part;
pub mod parts;
mod primitive;

pub use color::{Rgba, palette};
pub use error::{GeometryError, GeometryResult};
pub use frame::{Axis, FrameBuilder, rotation_deg};
pub use part::Part;
pub use parts::{
    ThreadedRod, coupler, cuboid, cylinder, load_cell, mecanum_wheel, stepper_motor, t_nut,
    threaded_rod,
};
pub use primitive::{Primitive, PrimitiveKind, RenderPass};
