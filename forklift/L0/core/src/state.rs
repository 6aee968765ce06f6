//! Authoritative simulation state.

use forklift_geometry::{Axis, rotation_deg};
use forklift_sensor::VibrationEnvelope;
use nalgebra::{Isometry3, Point3, Translation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::action::{Action, LoadPreset};
use crate::config::{MotionConfig, RigDimensions};

/// Vehicle position and heading.
///
/// Heading is in degrees, kept in `[0, 360)`. At heading `h` the vehicle
/// faces `(sin h, −cos h, 0)`, which is the chassis's local −Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// World position of the chassis center.
    pub position: Point3<f64>,
    /// Heading in degrees.
    pub heading_deg: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            heading_deg: 0.0,
        }
    }
}

impl Pose {
    /// Creates a pose; the heading is wrapped into `[0, 360)`.
    #[must_use]
    pub fn new(position: Point3<f64>, heading_deg: f64) -> Self {
        Self {
            position,
            heading_deg: wrap_degrees(heading_deg),
        }
    }

    /// Unit vector the vehicle faces.
    #[must_use]
    pub fn forward(&self) -> Vector3<f64> {
        let h = self.heading_deg.to_radians();
        Vector3::new(h.sin(), -h.cos(), 0.0)
    }

    /// Unit vector to the vehicle's right.
    #[must_use]
    pub fn right(&self) -> Vector3<f64> {
        let h = self.heading_deg.to_radians();
        Vector3::new(h.cos(), h.sin(), 0.0)
    }

    /// Moves by `delta` in world coordinates.
    pub fn translate(&mut self, delta: Vector3<f64>) {
        self.position += delta;
    }

    /// Turns by `degrees`, wrapping into `[0, 360)`.
    pub fn rotate(&mut self, degrees: f64) {
        self.heading_deg = wrap_degrees(self.heading_deg + degrees);
    }

    /// Chassis frame: translation to the position, then rotation about Z.
    #[must_use]
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.position.coords),
            rotation_deg(Axis::Z, self.heading_deg),
        )
    }
}

/// Wraps an angle into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wheel steering presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SteeringMode {
    /// All wheels straight.
    Straight,
    /// Strafing left.
    StrafeLeft,
    /// Strafing right.
    StrafeRight,
    /// Turning in place, heading increasing.
    RotateLeft,
    /// Turning in place, heading decreasing.
    RotateRight,
}

impl SteeringMode {
    /// Steering angles in wheel-mount order (degrees).
    #[must_use]
    pub const fn angles(self) -> [f64; 4] {
        match self {
            Self::Straight => [0.0, 0.0, 0.0, 0.0],
            Self::StrafeLeft => [15.0, -15.0, -15.0, 15.0],
            Self::StrafeRight => [-15.0, 15.0, 15.0, -15.0],
            Self::RotateLeft => [-20.0, -20.0, 20.0, 20.0],
            Self::RotateRight => [20.0, 20.0, -20.0, -20.0],
        }
    }

    /// Steering mode selected by a movement action.
    #[must_use]
    pub const fn for_action(action: Action) -> Option<Self> {
        match action {
            Action::MoveForward | Action::MoveBack => Some(Self::Straight),
            Action::StrafeLeft => Some(Self::StrafeLeft),
            Action::StrafeRight => Some(Self::StrafeRight),
            Action::RotateLeft => Some(Self::RotateLeft),
            Action::RotateRight => Some(Self::RotateRight),
            _ => None,
        }
    }
}

/// Per-wheel steering angles, derived from the active movement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelState {
    /// Current preset.
    pub mode: SteeringMode,
    /// Steering angle per wheel mount (degrees).
    pub steering_deg: [f64; 4],
}

impl WheelState {
    /// Wheels set to `mode`.
    #[must_use]
    pub const fn preset(mode: SteeringMode) -> Self {
        Self {
            mode,
            steering_deg: mode.angles(),
        }
    }
}

impl Default for WheelState {
    fn default() -> Self {
        Self::preset(SteeringMode::Straight)
    }
}

/// Fork height and lead-screw phases.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LiftState {
    /// Fork height in percent of travel, within the configured range.
    pub fork_height: f64,
    /// Visual rotation of each lead screw (degrees, `[0, 360)`).
    pub screw_rotation: [f64; 2],
}

impl LiftState {
    /// Fork at `fork_height` with both screws at phase 0.
    #[must_use]
    pub const fn at(fork_height: f64) -> Self {
        Self {
            fork_height,
            screw_rotation: [0.0, 0.0],
        }
    }

    /// Moves the fork one tick in `direction` (`1`, `-1` or `0`).
    ///
    /// Height is clamped to the configured range on every call, including
    /// idle ones. The screws turn only when the fork actually moved.
    /// Returns true if the fork moved.
    pub fn drive(&mut self, direction: i8, motion: &MotionConfig) -> bool {
        self.fork_height = self.fork_height.clamp(motion.fork_min, motion.fork_max);
        if direction == 0 {
            return false;
        }
        let step = f64::from(direction.signum());
        let target = (self.fork_height + step * motion.fork_speed)
            .clamp(motion.fork_min, motion.fork_max);
        if (target - self.fork_height).abs() < f64::EPSILON {
            return false;
        }
        self.fork_height = target;
        for screw in &mut self.screw_rotation {
            *screw = wrap_degrees(*screw + step * motion.screw_rotation_speed);
        }
        true
    }

    /// Returns true if the fork is strictly inside its travel range.
    #[must_use]
    pub fn in_travel(&self, motion: &MotionConfig) -> bool {
        self.fork_height > motion.fork_min && self.fork_height < motion.fork_max
    }

    /// Fork position as a fraction of its range.
    #[must_use]
    pub fn travel_fraction(&self, motion: &MotionConfig) -> f64 {
        ((self.fork_height - motion.fork_min) / (motion.fork_max - motion.fork_min)).clamp(0.0, 1.0)
    }

    /// Carriage Z offset above the motor base.
    #[must_use]
    pub fn current_height(&self, rig: &RigDimensions, motion: &MotionConfig) -> f64 {
        rig.carriage_height(self.travel_fraction(motion))
    }
}

/// Everything that changes from tick to tick, except cargo.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationState {
    /// Vehicle pose.
    pub pose: Pose,
    /// Wheel steering.
    pub wheels: WheelState,
    /// Lift position.
    pub lift: LiftState,
    /// Selected manual load.
    pub load_preset: LoadPreset,
    /// Load applied to the load cell on the last tick (kg).
    pub load: f64,
    /// Fork vibration after the last tick.
    pub vibration: VibrationEnvelope,
    /// Cosmetic fork displacement after the last tick.
    pub vibration_offset: f64,
    /// Most recent load-cell reading.
    pub last_sample: f64,
    /// Ticks advanced so far.
    pub tick: u64,
}

impl SimulationState {
    /// Initial state: at the origin, heading 0, fork fully lowered.
    #[must_use]
    pub fn new(motion: &MotionConfig) -> Self {
        Self {
            pose: Pose::default(),
            wheels: WheelState::default(),
            lift: LiftState::at(motion.fork_min),
            load_preset: LoadPreset::default(),
            load: 0.0,
            vibration: VibrationEnvelope::default(),
            vibration_offset: 0.0,
            last_sample: 0.0,
            tick: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn heading_wraps() {
        let mut pose = Pose::new(Point3::origin(), 359.0);
        pose.rotate(2.0);
        assert_relative_eq!(pose.heading_deg, 1.0, epsilon = 1e-12);
        pose.rotate(-3.0);
        assert_relative_eq!(pose.heading_deg, 358.0, epsilon = 1e-12);
        assert_relative_eq!(Pose::new(Point3::origin(), 720.0).heading_deg, 0.0);
        assert!(wrap_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn forward_matches_chassis_minus_y() {
        for heading in [0.0, 30.0, 90.0, 200.0] {
            let pose = Pose::new(Point3::new(1.0, 2.0, 0.0), heading);
            let local_forward = pose.isometry().rotation * -Vector3::y();
            assert_relative_eq!(local_forward, pose.forward(), epsilon = 1e-12);
            let local_right = pose.isometry().rotation * Vector3::x();
            assert_relative_eq!(local_right, pose.right(), epsilon = 1e-12);
        }
    }

    #[test]
    fn steering_presets() {
        assert_eq!(
            SteeringMode::for_action(Action::StrafeLeft).map(SteeringMode::angles),
            Some([15.0, -15.0, -15.0, 15.0])
        );
        assert_eq!(SteeringMode::for_action(Action::LiftUp), None);
        assert_eq!(WheelState::default().steering_deg, [0.0; 4]);
    }

    #[test]
    fn lift_clamps_and_stops_screws_at_limits() {
        let motion = MotionConfig::default();
        let mut lift = LiftState::at(94.5);
        assert!(lift.drive(1, &motion));
        assert_relative_eq!(lift.fork_height, 95.0);
        assert_relative_eq!(lift.screw_rotation[0], 15.0);

        assert!(!lift.drive(1, &motion));
        assert_relative_eq!(lift.fork_height, 95.0);
        assert_relative_eq!(lift.screw_rotation[0], 15.0);

        let mut low = LiftState::at(motion.fork_min);
        assert!(!low.drive(-1, &motion));
        assert!(!low.in_travel(&motion));
        assert!(low.drive(1, &motion));
        assert!(low.in_travel(&motion));
        assert_relative_eq!(low.screw_rotation[1], 15.0);
    }

    #[test]
    fn idle_drive_pulls_height_back_into_range() {
        let motion = MotionConfig::default();
        let mut high = LiftState::at(200.0);
        assert!(!high.drive(0, &motion));
        assert_relative_eq!(high.fork_height, motion.fork_max);
        assert_relative_eq!(high.screw_rotation[0], 0.0);

        let mut low = LiftState::at(-40.0);
        assert!(!low.drive(-1, &motion));
        assert_relative_eq!(low.fork_height, motion.fork_min);
    }

    #[test]
    fn lowering_turns_screws_backwards() {
        let motion = MotionConfig::default();
        let mut lift = LiftState::at(50.0);
        lift.drive(-1, &motion);
        assert_relative_eq!(lift.screw_rotation[0], 345.0);
    }

    #[test]
    fn current_height_is_monotonic() {
        let rig = RigDimensions::default();
        let motion = MotionConfig::default();
        let mut previous = f64::NEG_INFINITY;
        for h in 0..=100 {
            let height = LiftState::at(f64::from(h)).current_height(&rig, &motion);
            assert!(height >= previous);
            previous = height;
        }
        assert_relative_eq!(
            LiftState::at(5.0).current_height(&rig, &motion),
            rig.carriage_floor()
        );
    }
}
