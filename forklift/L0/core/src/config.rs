//! Configuration types for the forklift simulation.
//!
//! Every tunable constant lives here. Each struct has a `Default` matching
//! the stock rig, `#[must_use]` builder methods and a `validate()` that is
//! run once when the simulation is built.

use forklift_sensor::LoadCellConfig;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cargo::{CargoItem, DestinationZone, default_cargo, default_zones};
use crate::error::{ForkliftError, Result};

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ForkliftError::invalid_config(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Physical dimensions of the rig.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigDimensions {
    /// Chassis width (local X).
    pub chassis_width: f64,
    /// Chassis length (local Y).
    pub chassis_length: f64,
    /// Chassis height (local Z).
    pub chassis_height: f64,
    /// Wheel drum radius.
    pub wheel_radius: f64,
    /// Wheel drum width.
    pub wheel_width: f64,
    /// Rollers per wheel.
    pub roller_count: u32,
    /// Roller tilt per wheel, in mount order (degrees).
    pub roller_tilts: [f64; 4],
    /// Lead-screw length, including the motor and coupler.
    pub rod_length: f64,
    /// Lead-screw radius.
    pub rod_radius: f64,
    /// Stepper motor edge length.
    pub stepper_size: f64,
    /// Fork plate length (local Y).
    pub fork_length: f64,
    /// Fork plate thickness.
    pub fork_thickness: f64,
    /// Rod spacing from the centerline as a fraction of chassis width.
    pub rod_spacing: f64,
}

impl Default for RigDimensions {
    fn default() -> Self {
        Self {
            chassis_width: 1.5,
            chassis_length: 2.5,
            chassis_height: 0.5,
            wheel_radius: 0.3,
            wheel_width: 0.2,
            roller_count: 12,
            roller_tilts: [45.0, -45.0, 45.0, -45.0],
            rod_length: 2.0,
            rod_radius: 0.05,
            stepper_size: 0.25,
            fork_length: 1.8,
            fork_thickness: 0.08,
            rod_spacing: 0.3,
        }
    }
}

impl RigDimensions {
    /// Distance of each lead screw from the chassis centerline.
    #[must_use]
    pub fn rod_distance(&self) -> f64 {
        self.chassis_width * self.rod_spacing
    }

    /// Lowest carriage offset: the top of the motor and coupler stack.
    #[must_use]
    pub fn carriage_floor(&self) -> f64 {
        self.stepper_size * 1.25
    }

    /// Carriage travel along the rod, excluding the T-nut height.
    #[must_use]
    pub fn usable_travel(&self) -> f64 {
        self.rod_length - self.carriage_floor() - self.rod_radius * 8.0
    }

    /// Carriage Z offset for a normalized lift position in `[0, 1]`.
    #[must_use]
    pub fn carriage_height(&self, fraction: f64) -> f64 {
        self.carriage_floor() + fraction.clamp(0.0, 1.0) * self.usable_travel()
    }

    /// Wheel mount points in chassis coordinates.
    ///
    /// Mounts 0 and 1 are at the front (local −Y), 2 and 3 at the rear.
    #[must_use]
    pub fn wheel_mounts(&self) -> [Vector3<f64>; 4] {
        let x = self.chassis_width / 2.0;
        let y = self.chassis_length / 2.0 - self.wheel_radius;
        let z = -self.chassis_height / 2.0;
        [
            Vector3::new(-x, -y, z),
            Vector3::new(x, -y, z),
            Vector3::new(x, y, z),
            Vector3::new(-x, y, z),
        ]
    }

    /// Validates the dimensions.
    ///
    /// Part-level checks happen when the parts are built; this catches
    /// combinations that would leave no room for the carriage.
    ///
    /// # Errors
    ///
    /// Returns [`ForkliftError::InvalidConfig`] on a non-positive dimension
    /// or a rod too short for the motor stack.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("chassis_width", self.chassis_width)?;
        ensure_positive("chassis_length", self.chassis_length)?;
        ensure_positive("chassis_height", self.chassis_height)?;
        ensure_positive("rod_length", self.rod_length)?;
        ensure_positive("rod_radius", self.rod_radius)?;
        ensure_positive("stepper_size", self.stepper_size)?;
        ensure_positive("fork_length", self.fork_length)?;
        ensure_positive("fork_thickness", self.fork_thickness)?;
        ensure_positive("rod_spacing", self.rod_spacing)?;
        if self.usable_travel() <= 0.0 {
            return Err(ForkliftError::invalid_config(format!(
                "rod_length {} leaves no carriage travel above the motor stack",
                self.rod_length
            )));
        }
        Ok(())
    }
}

/// Per-tick motion increments and lift limits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Distance moved per tick by a translation action.
    pub linear_speed: f64,
    /// Heading change per tick (degrees).
    pub angular_speed: f64,
    /// Fork height change per tick (percent).
    pub fork_speed: f64,
    /// Lead-screw rotation per tick while the fork moves (degrees).
    pub screw_rotation_speed: f64,
    /// Lowest fork height (percent).
    pub fork_min: f64,
    /// Highest fork height (percent).
    pub fork_max: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            linear_speed: 0.1,
            angular_speed: 2.0,
            fork_speed: 1.0,
            screw_rotation_speed: 15.0,
            fork_min: 5.0,
            fork_max: 95.0,
        }
    }
}

impl MotionConfig {
    /// Sets the linear speed.
    #[must_use]
    pub const fn linear_speed(mut self, speed: f64) -> Self {
        self.linear_speed = speed;
        self
    }

    /// Sets the angular speed.
    #[must_use]
    pub const fn angular_speed(mut self, speed: f64) -> Self {
        self.angular_speed = speed;
        self
    }

    /// Sets the fork speed.
    #[must_use]
    pub const fn fork_speed(mut self, speed: f64) -> Self {
        self.fork_speed = speed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForkliftError::InvalidConfig`] on a non-positive speed or
    /// an empty fork range.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("linear_speed", self.linear_speed)?;
        ensure_positive("angular_speed", self.angular_speed)?;
        ensure_positive("fork_speed", self.fork_speed)?;
        ensure_positive("screw_rotation_speed", self.screw_rotation_speed)?;
        if !(self.fork_min.is_finite() && self.fork_max.is_finite()) || self.fork_min >= self.fork_max
        {
            return Err(ForkliftError::invalid_config(format!(
                "fork range [{}, {}] is empty",
                self.fork_min, self.fork_max
            )));
        }
        Ok(())
    }
}

/// Proximity thresholds for picking up cargo.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickupConfig {
    /// Maximum fork-to-cargo-center distance (exclusive).
    pub reach: f64,
    /// Maximum |fork z − cargo top| (exclusive).
    pub height_tolerance: f64,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            reach: 0.8,
            height_tolerance: 0.3,
        }
    }
}

impl PickupConfig {
    /// Validates the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ForkliftError::InvalidConfig`] if either threshold is not positive.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("reach", self.reach)?;
        ensure_positive("height_tolerance", self.height_tolerance)
    }
}

/// Warehouse layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WarehouseConfig {
    /// Floor extent along X.
    pub width: f64,
    /// Floor extent along Y.
    pub length: f64,
    /// Wall height.
    pub height: f64,
    /// Wall thickness.
    pub wall_thickness: f64,
    /// Shelf rack width.
    pub shelf_width: f64,
    /// Shelf rack depth.
    pub shelf_depth: f64,
    /// Shelf rack height.
    pub shelf_height: f64,
    /// Boards per rack.
    pub shelf_levels: u32,
    /// Chance that a level above the ground holds boxes.
    pub fill_probability: f64,
    /// Decoration seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            length: 40.0,
            height: 10.0,
            wall_thickness: 0.3,
            shelf_width: 5.0,
            shelf_depth: 2.0,
            shelf_height: 5.0,
            shelf_levels: 4,
            fill_probability: 0.7,
            seed: None,
        }
    }
}

impl WarehouseConfig {
    /// Fixes the decoration seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the layout.
    ///
    /// # Errors
    ///
    /// Returns [`ForkliftError::InvalidConfig`] on a non-positive extent,
    /// zero shelf levels or a fill probability outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("width", self.width)?;
        ensure_positive("length", self.length)?;
        ensure_positive("height", self.height)?;
        ensure_positive("wall_thickness", self.wall_thickness)?;
        ensure_positive("shelf_width", self.shelf_width)?;
        ensure_positive("shelf_depth", self.shelf_depth)?;
        ensure_positive("shelf_height", self.shelf_height)?;
        if self.shelf_levels == 0 {
            return Err(ForkliftError::invalid_config("shelf_levels must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(ForkliftError::invalid_config(format!(
                "fill_probability must be in [0, 1], got {}",
                self.fill_probability
            )));
        }
        Ok(())
    }
}

/// Which static scene surrounds the rig.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SceneVariant {
    /// Empty arena with a floor grid.
    Arena,
    /// Warehouse with shelves, cargo and destination zones.
    #[default]
    Warehouse,
}

impl std::fmt::Display for SceneVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arena => f.write_str("arena"),
            Self::Warehouse => f.write_str("warehouse"),
        }
    }
}

/// Complete simulation configuration.
///
/// # Example
///
/// ```
/// use forklift_core::{ForkliftConfig, SceneVariant};
///
/// let config = ForkliftConfig::arena().with_seed(42);
/// assert_eq!(config.variant, SceneVariant::Arena);
/// assert!(config.cargo.is_empty());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForkliftConfig {
    /// Static scene variant.
    pub variant: SceneVariant,
    /// Rig dimensions.
    pub rig: RigDimensions,
    /// Motion increments.
    pub motion: MotionConfig,
    /// Pickup thresholds.
    pub pickup: PickupConfig,
    /// Load-cell signal constants.
    pub load_cell: LoadCellConfig,
    /// Warehouse layout (ignored by the arena).
    pub warehouse: WarehouseConfig,
    /// Initial cargo.
    pub cargo: Vec<CargoItem>,
    /// Destination zones.
    pub zones: Vec<DestinationZone>,
}

impl Default for ForkliftConfig {
    fn default() -> Self {
        Self::warehouse()
    }
}

impl ForkliftConfig {
    /// Warehouse scene with the stock cargo and zones.
    #[must_use]
    pub fn warehouse() -> Self {
        Self {
            variant: SceneVariant::Warehouse,
            rig: RigDimensions::default(),
            motion: MotionConfig::default(),
            pickup: PickupConfig::default(),
            load_cell: LoadCellConfig::default(),
            warehouse: WarehouseConfig::default(),
            cargo: default_cargo(),
            zones: default_zones(),
        }
    }

    /// Empty arena with no cargo or zones.
    #[must_use]
    pub fn arena() -> Self {
        Self {
            variant: SceneVariant::Arena,
            cargo: Vec::new(),
            zones: Vec::new(),
            ..Self::warehouse()
        }
    }

    /// Returns the stock configuration for `variant`.
    #[must_use]
    pub fn for_variant(variant: SceneVariant) -> Self {
        match variant {
            SceneVariant::Arena => Self::arena(),
            SceneVariant::Warehouse => Self::warehouse(),
        }
    }

    /// Seeds both the load-cell noise and the warehouse decoration.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.load_cell.seed = Some(seed);
        self.warehouse.seed = Some(seed);
        self
    }

    /// Sets the rig dimensions.
    #[must_use]
    pub fn rig(mut self, rig: RigDimensions) -> Self {
        self.rig = rig;
        self
    }

    /// Sets the motion configuration.
    #[must_use]
    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Sets the load-cell configuration.
    #[must_use]
    pub fn load_cell(mut self, load_cell: LoadCellConfig) -> Self {
        self.load_cell = load_cell;
        self
    }

    /// Replaces the cargo list.
    #[must_use]
    pub fn cargo(mut self, cargo: Vec<CargoItem>) -> Self {
        self.cargo = cargo;
        self
    }

    /// Replaces the destination zones.
    #[must_use]
    pub fn zones(mut self, zones: Vec<DestinationZone>) -> Self {
        self.zones = zones;
        self
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<()> {
        self.rig.validate()?;
        self.motion.validate()?;
        self.pickup.validate()?;
        self.load_cell.validate()?;
        if self.variant == SceneVariant::Warehouse {
            self.warehouse.validate()?;
        }

        for (i, item) in self.cargo.iter().enumerate() {
            item.validate()?;
            if self.cargo[..i].iter().any(|other| other.id == item.id) {
                return Err(ForkliftError::invalid_config(format!(
                    "duplicate cargo id {}",
                    item.id
                )));
            }
        }
        for zone in &self.zones {
            zone.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_validate() {
        assert!(ForkliftConfig::default().validate().is_ok());
        assert!(ForkliftConfig::arena().validate().is_ok());
    }

    #[test]
    fn carriage_height_spans_usable_travel() {
        let rig = RigDimensions::default();
        assert_relative_eq!(rig.rod_distance(), 0.45, epsilon = 1e-12);
        assert_relative_eq!(rig.carriage_height(0.0), 0.3125, epsilon = 1e-12);
        // Top of the T-nut reaches the top of the rod.
        assert_relative_eq!(
            rig.carriage_height(1.0) + 8.0 * rig.rod_radius,
            rig.rod_length,
            epsilon = 1e-12
        );
        assert_relative_eq!(rig.carriage_height(2.0), rig.carriage_height(1.0));
    }

    #[test]
    fn wheel_mounts_front_then_rear() {
        let mounts = RigDimensions::default().wheel_mounts();
        assert_relative_eq!(mounts[0], Vector3::new(-0.75, -0.95, -0.25), epsilon = 1e-12);
        assert_relative_eq!(mounts[2], Vector3::new(0.75, 0.95, -0.25), epsilon = 1e-12);
    }

    #[test]
    fn short_rod_is_rejected() {
        let rig = RigDimensions {
            rod_length: 0.5,
            ..RigDimensions::default()
        };
        assert!(matches!(rig.validate(), Err(ForkliftError::InvalidConfig(_))));
    }

    #[test]
    fn empty_fork_range_is_rejected() {
        let motion = MotionConfig {
            fork_min: 50.0,
            fork_max: 50.0,
            ..MotionConfig::default()
        };
        assert!(motion.validate().is_err());
    }

    #[test]
    fn bad_load_cell_config_surfaces_as_sensor_error() {
        let config = ForkliftConfig::arena()
            .load_cell(LoadCellConfig::default().with_decay_factor(2.0));
        assert!(matches!(config.validate(), Err(ForkliftError::Sensor(_))));
    }

    #[test]
    fn duplicate_cargo_ids_are_rejected() {
        let mut cargo = default_cargo();
        cargo[1].id = cargo[0].id;
        let config = ForkliftConfig::warehouse().cargo(cargo);
        assert!(config.validate().is_err());
    }

    #[test]
    fn seed_reaches_both_generators() {
        let config = ForkliftConfig::warehouse().with_seed(5);
        assert_eq!(config.load_cell.seed, Some(5));
        assert_eq!(config.warehouse.seed, Some(5));
    }
}
