//! Cargo items, destination zones and the pickup/drop rules.

use std::fmt;

use forklift_geometry::{FrameBuilder, Primitive, Rgba, palette};
use nalgebra::{Point2, Point3, Vector2, Vector3};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::PickupConfig;
use crate::error::{CargoError, ForkliftError, Result};

/// Thickness of a destination-zone marker.
const ZONE_THICKNESS: f64 = 0.02;
/// Height of a zone marker's center above the floor.
const ZONE_ELEVATION: f64 = 0.05;

/// Identifier of a cargo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CargoId(pub u32);

impl fmt::Display for CargoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A box that can be carried on the fork.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CargoItem {
    /// Identifier, unique within a manifest.
    pub id: CargoId,
    /// Center of the item's base.
    pub position: Point3<f64>,
    /// Extents (width, depth, height).
    pub size: Vector3<f64>,
    /// Weight in kilograms.
    pub weight: f64,
    /// Box color.
    pub color: Rgba,
    /// True while on the fork.
    pub carried: bool,
}

impl CargoItem {
    /// Creates an uncarried item resting at `position`.
    #[must_use]
    pub const fn new(
        id: u32,
        position: Point3<f64>,
        size: Vector3<f64>,
        weight: f64,
        color: Rgba,
    ) -> Self {
        Self {
            id: CargoId(id),
            position,
            size,
            weight,
            color,
            carried: false,
        }
    }

    /// Geometric center.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        self.position + Vector3::new(0.0, 0.0, self.size.z / 2.0)
    }

    /// Height of the top face.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.position.z + self.size.z
    }

    /// Validates size and weight.
    ///
    /// # Errors
    ///
    /// Returns [`ForkliftError::InvalidConfig`] on a non-positive extent or
    /// a negative weight.
    pub fn validate(&self) -> Result<()> {
        if !self.size.iter().all(|&s| s.is_finite() && s > 0.0) {
            return Err(ForkliftError::invalid_config(format!(
                "cargo {} has a non-positive size",
                self.id
            )));
        }
        if !(self.weight.is_finite() && self.weight >= 0.0) {
            return Err(ForkliftError::invalid_config(format!(
                "cargo {} has invalid weight {}",
                self.id, self.weight
            )));
        }
        Ok(())
    }
}

/// A floor area where carried cargo may be set down.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DestinationZone {
    /// Center on the floor.
    pub center: Point2<f64>,
    /// Footprint (x extent, y extent).
    pub size: Vector2<f64>,
    /// Marker tint.
    pub color: Rgba,
}

impl DestinationZone {
    /// Creates a zone.
    #[must_use]
    pub const fn new(center: Point2<f64>, size: Vector2<f64>, color: Rgba) -> Self {
        Self {
            center,
            size,
            color,
        }
    }

    /// Returns true if `(x, y)` is strictly inside the axis-aligned footprint.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.center.x).abs() < self.size.x / 2.0 && (y - self.center.y).abs() < self.size.y / 2.0
    }

    /// Validates the footprint.
    ///
    /// # Errors
    ///
    /// Returns [`ForkliftError::InvalidConfig`] on a non-positive footprint.
    pub fn validate(&self) -> Result<()> {
        if self.size.iter().all(|&s| s.is_finite() && s > 0.0) {
            Ok(())
        } else {
            Err(ForkliftError::invalid_config(format!(
                "destination zone at ({}, {}) has a non-positive footprint",
                self.center.x, self.center.y
            )))
        }
    }
}

/// The stock warehouse cargo.
#[must_use]
pub fn default_cargo() -> Vec<CargoItem> {
    vec![
        CargoItem::new(1, Point3::new(5.0, 5.0, 0.0), Vector3::new(1.0, 1.0, 0.5), 2.0, palette::BROWN),
        CargoItem::new(2, Point3::new(-5.0, 8.0, 0.0), Vector3::new(0.8, 1.2, 0.6), 5.0, palette::RED),
        CargoItem::new(3, Point3::new(8.0, -6.0, 0.0), Vector3::new(1.5, 0.8, 0.4), 3.0, palette::BLUE),
        CargoItem::new(4, Point3::new(-7.0, -3.0, 0.0), Vector3::new(1.0, 1.0, 1.0), 5.0, palette::GREEN),
    ]
}

/// The stock destination zones.
#[must_use]
pub fn default_zones() -> Vec<DestinationZone> {
    let footprint = Vector2::new(3.0, 3.0);
    vec![
        DestinationZone::new(Point2::new(10.0, 10.0), footprint, Rgba::new(0.2, 0.8, 0.2, 0.3)),
        DestinationZone::new(Point2::new(-10.0, 10.0), footprint, Rgba::new(0.8, 0.2, 0.2, 0.3)),
        DestinationZone::new(Point2::new(-10.0, -10.0), footprint, Rgba::new(0.2, 0.2, 0.8, 0.3)),
    ]
}

/// A successful drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropOutcome {
    /// The item that was set down.
    pub id: CargoId,
    /// Index of the zone it landed in.
    pub zone: usize,
    /// Where it now rests.
    pub position: Point3<f64>,
}

/// All cargo and destination zones, plus which item is on the fork.
#[derive(Debug, Clone, Default)]
pub struct CargoManifest {
    items: Vec<CargoItem>,
    zones: Vec<DestinationZone>,
}

impl CargoManifest {
    /// Creates a manifest. Items flagged as carried are set down in place,
    /// so the manifest always starts with an empty fork.
    #[must_use]
    pub fn new(mut items: Vec<CargoItem>, zones: Vec<DestinationZone>) -> Self {
        for item in &mut items {
            item.carried = false;
        }
        Self { items, zones }
    }

    /// All items in list order.
    #[must_use]
    pub fn items(&self) -> &[CargoItem] {
        &self.items
    }

    /// Destination zones.
    #[must_use]
    pub fn zones(&self) -> &[DestinationZone] {
        &self.zones
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: CargoId) -> Option<&CargoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The item on the fork, if any.
    #[must_use]
    pub fn carried(&self) -> Option<&CargoItem> {
        self.items.iter().find(|item| item.carried)
    }

    /// Tries to load the first item within reach of `fork`.
    ///
    /// An item is in reach when the fork point is closer than
    /// `pickup.reach` to the item's center and within
    /// `pickup.height_tolerance` of its top face.
    ///
    /// # Errors
    ///
    /// Returns [`CargoError::AlreadyCarrying`] or
    /// [`CargoError::NoCargoInReach`]; neither changes the manifest.
    pub fn try_pickup(
        &mut self,
        fork: &Point3<f64>,
        pickup: &PickupConfig,
    ) -> std::result::Result<CargoId, CargoError> {
        if let Some(item) = self.carried() {
            return Err(CargoError::AlreadyCarrying(item.id));
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| {
                let distance = (fork - item.center()).norm();
                let height_diff = (fork.z - item.top()).abs();
                distance < pickup.reach && height_diff < pickup.height_tolerance
            })
            .ok_or(CargoError::NoCargoInReach)?;

        item.carried = true;
        info!(cargo = %item.id, weight = item.weight, "picked up cargo");
        Ok(item.id)
    }

    /// Sets the carried item down at `(x, y, 0)` if `chassis` is over a zone.
    ///
    /// # Errors
    ///
    /// Returns [`CargoError::NotCarrying`] or
    /// [`CargoError::OutsideDestinationZone`]; neither changes the manifest.
    pub fn try_drop(&mut self, chassis: &Point3<f64>) -> std::result::Result<DropOutcome, CargoError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.carried)
            .ok_or(CargoError::NotCarrying)?;

        let Some(zone) = self
            .zones
            .iter()
            .position(|zone| zone.contains(chassis.x, chassis.y))
        else {
            debug!(cargo = %item.id, x = chassis.x, y = chassis.y, "drop outside every zone");
            return Err(CargoError::OutsideDestinationZone(item.id));
        };

        item.carried = false;
        item.position = Point3::new(chassis.x, chassis.y, 0.0);
        info!(cargo = %item.id, zone, "dropped cargo in destination zone");
        Ok(DropOutcome {
            id: item.id,
            zone,
            position: item.position,
        })
    }

    /// Zone markers and every item resting on the floor.
    ///
    /// The carried item is drawn by the rig instead.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut frames = FrameBuilder::new();
        for zone in &self.zones {
            frames.scoped(|f| {
                f.translate(zone.center.x, zone.center.y, ZONE_ELEVATION).emit_box(
                    Vector3::new(zone.size.x, zone.size.y, ZONE_THICKNESS),
                    zone.color,
                );
            });
        }
        for item in self.items.iter().filter(|item| !item.carried) {
            let center = item.center();
            frames.scoped(|f| {
                f.translate(center.x, center.y, center.z)
                    .emit_box(item.size, item.color);
            });
        }
        frames.finish().into_primitives()
    }
}
