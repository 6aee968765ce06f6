//! Kinematic rig assembly.
//!
//! The rig is a chain of local frames:
//!
//! ```text
//! chassis (pose)
//! ├── wheel mount i ─ steering (Z) ─ axle (±90° Y) ─ mecanum wheel
//! └── lift support (front edge, chassis top)
//!     ├── guide poles
//!     └── motor base (chassis bottom)
//!         ├── motor ─ coupler ─ threaded rod      (× 2)
//!         └── carriage (current height + vibration)
//!             ├── T-nuts, fork plate
//!             └── load-cell mount ─ load cell, carried cargo
//! ```
//!
//! The frame functions below are shared by [`RigAssembler::assemble`] and
//! [`RigAssembler::fork_probe`], so the pickup point always matches the
//! drawn load cell.

use forklift_geometry::{
    Axis, FrameBuilder, GeometryResult, Part, Primitive, Rgba, ThreadedRod, coupler, cuboid,
    cylinder, load_cell, mecanum_wheel, palette, stepper_motor, t_nut,
};
use nalgebra::{Isometry3, Point3, Translation3};

use crate::cargo::CargoItem;
use crate::config::{MotionConfig, RigDimensions};
use crate::state::SimulationState;

const CHASSIS_COLOR: Rgba = palette::BLUE;
const ROLLER_COLOR: Rgba = palette::BLUE;
const POLE_SIDES: u32 = 8;
/// Lift support inset from the chassis front edge.
const SUPPORT_INSET: f64 = 0.1;
/// Carriage offset from the rods along local Y.
const CARRIAGE_OFFSET_Y: f64 = 0.1;
/// Load-cell block height and depth.
const LOAD_CELL_HEIGHT: f64 = 0.3;
const LOAD_CELL_DEPTH: f64 = 0.1;
/// Cargo sits this far above the load-cell mount.
const CARGO_LIFT: f64 = 0.1;

/// Axle rotation about local Y for each wheel mount.
const AXLE_DEG: [f64; 4] = [90.0, -90.0, -90.0, 90.0];

/// Rig parts that never change shape, built and validated once.
#[derive(Debug, Clone)]
pub struct RigParts {
    chassis: Part,
    wheels: [Part; 4],
    pole: Part,
    motor: Part,
    coupler: Part,
    rod: ThreadedRod,
    t_nut: Part,
    plate: Part,
    load_cell: Part,
}

impl RigParts {
    /// Builds every fixed part from `dims`.
    ///
    /// # Errors
    ///
    /// Returns the first [`forklift_geometry::GeometryError`] raised by a
    /// part builder.
    pub fn build(dims: &RigDimensions) -> GeometryResult<Self> {
        let rod_distance = dims.rod_distance();
        let s = dims.stepper_size;

        let wheel = |tilt: f64| {
            mecanum_wheel(
                dims.wheel_radius,
                dims.wheel_width,
                dims.roller_count,
                tilt,
                ROLLER_COLOR,
            )
        };
        let [t0, t1, t2, t3] = dims.roller_tilts;

        Ok(Self {
            chassis: cuboid(
                dims.chassis_width,
                dims.chassis_length,
                dims.chassis_height,
                CHASSIS_COLOR,
            )?,
            wheels: [wheel(t0)?, wheel(t1)?, wheel(t2)?, wheel(t3)?],
            pole: cylinder(dims.rod_radius * 0.5, dims.rod_length, POLE_SIDES, palette::GRAY)?,
            motor: stepper_motor(s, palette::BLACK)?,
            coupler: coupler(s / 6.0, s / 2.0, palette::METAL)?,
            rod: ThreadedRod::new(dims.rod_length - dims.carriage_floor(), dims.rod_radius, palette::METAL)?,
            t_nut: t_nut(dims.rod_radius * 2.0, dims.rod_radius * 8.0, palette::BRASS)?,
            plate: cuboid(
                rod_distance * 2.0 + 0.2,
                dims.fork_length,
                dims.fork_thickness,
                palette::ACRYLIC,
            )?,
            load_cell: load_cell(
                rod_distance * 0.8,
                LOAD_CELL_HEIGHT,
                LOAD_CELL_DEPTH,
                palette::METAL,
            )?,
        })
    }
}

/// Lift support frame relative to the chassis.
fn lift_support(dims: &RigDimensions) -> Isometry3<f64> {
    Isometry3::translation(
        0.0,
        -dims.chassis_length / 2.0 + SUPPORT_INSET,
        dims.chassis_height / 2.0,
    )
}

/// Motor base frame relative to the lift support, offset `x` along the rods' axis.
fn motor_base(dims: &RigDimensions, x: f64) -> Isometry3<f64> {
    Isometry3::translation(x, 0.0, -dims.chassis_height / 2.0)
}

/// Carriage frame relative to the motor base.
fn carriage(height: f64) -> Isometry3<f64> {
    Isometry3::translation(0.0, CARRIAGE_OFFSET_Y, height)
}

/// Load-cell mount relative to the carriage.
fn load_cell_mount(dims: &RigDimensions) -> Isometry3<f64> {
    Isometry3::translation(
        0.0,
        dims.fork_length * 0.3,
        dims.rod_radius * 4.0 + dims.fork_thickness,
    )
}

/// Builds rig primitives from simulation state.
///
/// # Example
///
/// ```
/// use forklift_core::{MotionConfig, RigAssembler, RigDimensions, SimulationState};
///
/// let motion = MotionConfig::default();
/// let rig = RigAssembler::new(RigDimensions::default(), motion.clone()).unwrap();
/// let state = SimulationState::new(&motion);
///
/// let a = rig.assemble(&state, None);
/// let b = rig.assemble(&state, None);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), rig.primitive_count(false));
/// ```
#[derive(Debug, Clone)]
pub struct RigAssembler {
    dims: RigDimensions,
    motion: MotionConfig,
    parts: RigParts,
}

impl RigAssembler {
    /// Builds the fixed parts for `dims`.
    ///
    /// # Errors
    ///
    /// Returns a [`forklift_geometry::GeometryError`] for degenerate dimensions.
    pub fn new(dims: RigDimensions, motion: MotionConfig) -> GeometryResult<Self> {
        let parts = RigParts::build(&dims)?;
        Ok(Self { dims, motion, parts })
    }

    /// Rig dimensions.
    #[must_use]
    pub const fn dims(&self) -> &RigDimensions {
        &self.dims
    }

    /// Number of primitives [`Self::assemble`] emits.
    #[must_use]
    pub fn primitive_count(&self, carrying: bool) -> usize {
        let p = &self.parts;
        let wheels: usize = p.wheels.iter().map(Part::len).sum();
        let rod = 1 + forklift_geometry::parts::THREAD_MARKERS as usize;
        p.chassis.len()
            + wheels
            + 2 * p.pole.len()
            + 2 * (p.motor.len() + p.coupler.len() + rod)
            + 2 * p.t_nut.len()
            + p.plate.len()
            + p.load_cell.len()
            + usize::from(carrying)
    }

    /// Carriage height above the motor base for `state`, without vibration.
    #[must_use]
    pub fn carriage_height(&self, state: &SimulationState) -> f64 {
        state.lift.current_height(&self.dims, &self.motion)
    }

    /// World point used for pickup tests: the load-cell mount, ignoring
    /// the cosmetic vibration offset.
    #[must_use]
    pub fn fork_probe(&self, state: &SimulationState) -> Point3<f64> {
        let frame = state.pose.isometry()
            * lift_support(&self.dims)
            * motor_base(&self.dims, 0.0)
            * carriage(self.carriage_height(state))
            * load_cell_mount(&self.dims);
        frame * Point3::origin()
    }

    /// Flattens the rig for `state` into world-space primitives.
    ///
    /// `carried` is drawn on the load cell when present.
    #[must_use]
    pub fn assemble(&self, state: &SimulationState, carried: Option<&CargoItem>) -> Vec<Primitive> {
        let dims = &self.dims;
        let parts = &self.parts;
        let rod_distance = dims.rod_distance();
        let sides = [-rod_distance, rod_distance];

        let mut frames = FrameBuilder::with_origin(state.pose.isometry());
        frames.emit_part(&parts.chassis);

        for (i, mount) in dims.wheel_mounts().iter().enumerate() {
            frames.scoped(|f| {
                f.transform(&Isometry3::from(Translation3::from(*mount)))
                    .rotate_deg(Axis::Z, state.wheels.steering_deg[i])
                    .rotate_deg(Axis::Y, AXLE_DEG[i])
                    .emit_part(&parts.wheels[i]);
            });
        }

        frames.scoped(|support| {
            support.transform(&lift_support(dims));

            for x in sides {
                support.scoped(|f| {
                    f.translate(x, 0.0, 0.0).emit_part(&parts.pole);
                });
            }

            for (k, x) in sides.into_iter().enumerate() {
                support.scoped(|f| {
                    let s = dims.stepper_size;
                    f.transform(&motor_base(dims, x)).emit_part(&parts.motor);
                    f.scoped(|c| {
                        c.translate(0.0, 0.0, s * 0.75).emit_part(&parts.coupler);
                    });
                    f.scoped(|r| {
                        r.translate(0.0, 0.0, dims.carriage_floor())
                            .emit_part(&parts.rod.at_phase(state.lift.screw_rotation[k]));
                    });
                });
            }

            support.scoped(|base| {
                let height = self.carriage_height(state) + state.vibration_offset;
                base.transform(&motor_base(dims, 0.0))
                    .transform(&carriage(height));

                for x in sides {
                    base.scoped(|f| {
                        f.translate(x, 0.0, 0.0).emit_part(&parts.t_nut);
                    });
                }
                base.scoped(|f| {
                    f.translate(0.0, 0.0, dims.rod_radius * 4.0)
                        .emit_part(&parts.plate);
                });
                base.scoped(|f| {
                    f.transform(&load_cell_mount(dims)).emit_part(&parts.load_cell);
                    if let Some(item) = carried {
                        f.translate(0.0, 0.0, CARGO_LIFT)
                            .emit_box(item.size, item.color);
                    }
                });
            });
        });

        frames.finish().into_primitives()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::LoadPreset;
    use crate::state::{Pose, SteeringMode, WheelState};
    use approx::assert_relative_eq;
    use forklift_geometry::{PrimitiveKind, RenderPass};
    use nalgebra::Vector3;

    fn rig() -> (RigAssembler, SimulationState) {
        let motion = MotionConfig::default();
        let state = SimulationState::new(&motion);
        (RigAssembler::new(RigDimensions::default(), motion).unwrap(), state)
    }

    #[test]
    fn probe_height_matches_carriage_chain() {
        let (rig, state) = rig();
        let probe = rig.fork_probe(&state);
        // 1.25 * stepper + 4 * rod radius + plate thickness.
        assert_relative_eq!(probe.z, 0.3125 + 0.2 + 0.08, epsilon = 1e-12);
        // Lift support inset + carriage offset + 0.3 of the fork length.
        assert_relative_eq!(probe.y, -1.25 + 0.1 + 0.1 + 0.54, epsilon = 1e-12);
        assert_relative_eq!(probe.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn probe_follows_pose() {
        let (rig, mut state) = rig();
        state.pose = Pose::new(Point3::new(3.0, -2.0, 0.0), 90.0);
        let probe = rig.fork_probe(&state);
        // Heading 90 faces +X; the probe sits 0.51 ahead of the chassis center.
        assert_relative_eq!(probe.x, 3.0 + 0.51, epsilon = 1e-12);
        assert_relative_eq!(probe.y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn probe_ignores_vibration() {
        let (rig, mut state) = rig();
        let still = rig.fork_probe(&state);
        state.vibration_offset = 0.05;
        assert_relative_eq!(rig.fork_probe(&state), still, epsilon = 1e-12);
    }

    #[test]
    fn assembly_is_deterministic_and_counted() {
        let (rig, state) = rig();
        let a = rig.assemble(&state, None);
        assert_eq!(a, rig.assemble(&state, None));
        assert_eq!(a.len(), rig.primitive_count(false));
        // Chassis, 4 × (drum + 12 rollers), 2 poles, 2 × (2 + 3 + 21), 2 × 3, plate, 2.
        assert_eq!(a.len(), 1 + 52 + 2 + 52 + 6 + 1 + 2);
    }

    #[test]
    fn carried_cargo_rides_on_load_cell() {
        let (rig, mut state) = rig();
        state.lift.fork_height = 50.0;
        let item = crate::cargo::default_cargo()[0].clone();
        let prims = rig.assemble(&state, Some(&item));
        assert_eq!(prims.len(), rig.primitive_count(true));

        let cargo = prims.last().unwrap();
        assert_eq!(cargo.color, item.color);
        let probe = rig.fork_probe(&state);
        assert_relative_eq!(cargo.center().z, probe.z + CARGO_LIFT, epsilon = 1e-12);
        assert!(matches!(cargo.kind, PrimitiveKind::Box { .. }));
    }

    #[test]
    fn fork_plate_is_translucent() {
        let (rig, state) = rig();
        let translucent = rig
            .assemble(&state, None)
            .iter()
            .filter(|p| p.pass() == RenderPass::Translucent)
            .count();
        assert_eq!(translucent, 1);
    }

    #[test]
    fn vibration_moves_carriage_only() {
        let (rig, mut state) = rig();
        let still = rig.assemble(&state, None);
        state.vibration_offset = 0.02;
        let shaken = rig.assemble(&state, None);

        let moved = still
            .iter()
            .zip(&shaken)
            .filter(|(a, b)| (a.center().z - b.center().z).abs() > 1e-9)
            .count();
        // T-nuts, plate and load cell.
        assert_eq!(moved, 2 * 3 + 1 + 2);
    }

    #[test]
    fn steering_turns_wheel_axles() {
        let (rig, mut state) = rig();
        let straight = rig.assemble(&state, None);
        state.wheels = WheelState::preset(SteeringMode::RotateLeft);
        state.load_preset = LoadPreset::Heavy;
        let turned = rig.assemble(&state, None);

        // Drum of wheel 0 is the second primitive.
        let axis = |p: &Primitive| p.transform.rotation * Vector3::z();
        assert_relative_eq!(axis(&straight[1]), Vector3::x(), epsilon = 1e-12);
        assert!((axis(&turned[1]) - Vector3::x()).norm() > 0.1);
        assert_relative_eq!(axis(&turned[1]).z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_dimensions_fail_at_build() {
        let dims = RigDimensions {
            wheel_radius: 0.0,
            ..RigDimensions::default()
        };
        assert!(RigAssembler::new(dims, MotionConfig::default()).is_err());
    }
}
