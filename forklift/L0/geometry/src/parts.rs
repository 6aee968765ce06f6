//! Parametrized mechanical parts.
//!
//! Each builder validates its dimensions and returns a [`Part`] in the
//! part's local frame. Cylinders run along local +Z from the part origin;
//! boxes are centered on their frame.
//!
//! | Part | Origin |
//! |------|--------|
//! | [`mecanum_wheel`] | center of the inner drum face, axle along +Z |
//! | [`ThreadedRod`] | bottom of the rod |
//! | [`t_nut`] | bottom of the nut body |
//! | [`stepper_motor`] | center of the motor body |
//! | [`coupler`] | bottom of the coupler |
//! | [`load_cell`] | center of the load-cell body |

use nalgebra::Vector3;

use crate::error::{GeometryError, GeometryResult, ensure_positive, ensure_sides};
use crate::{Axis, FrameBuilder, Part, Rgba, palette};

/// Number of marker segments drawn along a threaded rod.
pub const THREAD_MARKERS: u32 = 20;

/// Twist between consecutive thread markers, in degrees.
pub const THREAD_TWIST_DEG: f64 = 18.0;

/// Sides used for the wheel drum.
const DRUM_SIDES: u32 = 20;
/// Sides used for small round details (rollers, markers, nuts).
const DETAIL_SIDES: u32 = 8;
/// Sides used for shafts, rods and couplers.
const SHAFT_SIDES: u32 = 12;

/// Builds a box centered on the part origin.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if any extent is not positive.
pub fn cuboid(dx: f64, dy: f64, dz: f64, color: Rgba) -> GeometryResult<Part> {
    ensure_positive("box", "dx", dx)?;
    ensure_positive("box", "dy", dy)?;
    ensure_positive("box", "dz", dz)?;
    let mut frames = FrameBuilder::new();
    frames.emit_box(Vector3::new(dx, dy, dz), color);
    Ok(frames.finish())
}

/// Builds a cylinder capped at both ends, running along +Z.
///
/// # Errors
///
/// Returns an error if `radius` or `length` is not positive or `sides < 3`.
pub fn cylinder(radius: f64, length: f64, sides: u32, color: Rgba) -> GeometryResult<Part> {
    ensure_positive("cylinder", "radius", radius)?;
    ensure_positive("cylinder", "length", length)?;
    ensure_sides("cylinder", sides)?;
    let mut frames = FrameBuilder::new();
    frames.emit_cylinder(radius, length, sides, color);
    Ok(frames.finish())
}

/// Builds a mecanum wheel: a black drum with `roller_count` angled rollers.
///
/// Rollers sit on the drum rim at `360 / roller_count` spacing, halfway
/// across the drum width. Each roller is tilted by `roller_tilt_deg` about
/// the drum axis and then laid across the drum surface.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if `radius`, `width` or
/// `roller_count` is not positive.
///
/// # Example
///
/// ```
/// use forklift_geometry::{mecanum_wheel, palette};
///
/// let wheel = mecanum_wheel(0.3, 0.2, 12, 45.0, palette::BLUE).unwrap();
/// assert_eq!(wheel.len(), 13); // drum + 12 rollers
/// assert!(mecanum_wheel(0.3, 0.2, 0, 45.0, palette::BLUE).is_err());
/// ```
pub fn mecanum_wheel(
    radius: f64,
    width: f64,
    roller_count: u32,
    roller_tilt_deg: f64,
    color: Rgba,
) -> GeometryResult<Part> {
    const PART: &str = "mecanum_wheel";
    ensure_positive(PART, "radius", radius)?;
    ensure_positive(PART, "width", width)?;
    if roller_count == 0 {
        return Err(GeometryError::invalid(PART, "roller_count", 0.0));
    }

    let roller_radius = radius * 0.3;
    let roller_length = width * 1.2;
    let spacing = 360.0 / f64::from(roller_count);

    let mut frames = FrameBuilder::new();
    frames.emit_cylinder(radius, width, DRUM_SIDES, palette::BLACK);
    for i in 0..roller_count {
        frames.scoped(|f| {
            f.rotate_deg(Axis::Z, f64::from(i) * spacing)
                .translate(0.0, radius, width / 2.0)
                .rotate_deg(Axis::Z, roller_tilt_deg)
                .rotate_deg(Axis::X, 90.0)
                .emit_cylinder(roller_radius, roller_length, DETAIL_SIDES, color);
        });
    }
    Ok(frames.finish())
}

/// A validated threaded rod whose thread markers can be spun.
///
/// The rod body never changes; only the phase of the helical markers does,
/// so the rod is validated once and re-emitted each frame at a new phase.
///
/// # Example
///
/// ```
/// use forklift_geometry::{ThreadedRod, palette};
///
/// let rod = ThreadedRod::new(1.6875, 0.05, palette::METAL).unwrap();
/// let part = rod.at_phase(15.0);
/// assert_eq!(part.len(), 21); // body + 20 markers
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadedRod {
    length: f64,
    radius: f64,
    color: Rgba,
}

impl ThreadedRod {
    /// Validates the rod dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidGeometry`] if `length` or `radius`
    /// is not positive.
    pub fn new(length: f64, radius: f64, color: Rgba) -> GeometryResult<Self> {
        ensure_positive("threaded_rod", "length", length)?;
        ensure_positive("threaded_rod", "radius", radius)?;
        Ok(Self {
            length,
            radius,
            color,
        })
    }

    /// Rod length.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Rod radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Builds the rod with its markers rotated by `phase_deg`.
    #[must_use]
    pub fn at_phase(&self, phase_deg: f64) -> Part {
        let spacing = self.length / f64::from(THREAD_MARKERS);
        let marker_radius = self.radius * 0.2;

        let mut frames = FrameBuilder::new();
        frames.emit_cylinder(self.radius, self.length, SHAFT_SIDES, self.color);
        for i in 0..THREAD_MARKERS {
            let twist = phase_deg + f64::from(i) * THREAD_TWIST_DEG;
            frames.scoped(|f| {
                f.translate(0.0, 0.0, f64::from(i) * spacing)
                    .rotate_deg(Axis::Z, twist)
                    .translate(self.radius * 0.8, 0.0, 0.0)
                    .emit_cylinder(marker_radius, marker_radius * 2.0, DETAIL_SIDES, palette::BLACK);
            });
        }
        frames.finish()
    }
}

/// Builds a threaded rod with markers at `phase_deg`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if `length` or `radius` is
/// not positive.
pub fn threaded_rod(length: f64, radius: f64, phase_deg: f64, color: Rgba) -> GeometryResult<Part> {
    Ok(ThreadedRod::new(length, radius, color)?.at_phase(phase_deg))
}

/// Builds a flanged T-nut around a rod of `radius`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if `radius` or `height` is
/// not positive.
pub fn t_nut(radius: f64, height: f64, color: Rgba) -> GeometryResult<Part> {
    ensure_positive("t_nut", "radius", radius)?;
    ensure_positive("t_nut", "height", height)?;

    let mut frames = FrameBuilder::new();
    frames.emit_cylinder(radius * 2.0, height, DETAIL_SIDES, color);
    frames.scoped(|f| {
        f.translate(0.0, 0.0, height / 3.0)
            .emit_cylinder(radius * 3.0, height / 3.0, DETAIL_SIDES, color);
    });
    // Bore pokes slightly out of both faces.
    frames.scoped(|f| {
        f.translate(0.0, 0.0, -0.01)
            .emit_cylinder(radius * 0.8, height + 0.02, DETAIL_SIDES, palette::BLACK);
    });
    Ok(frames.finish())
}

/// Builds a stepper motor: a cube body with a shaft on top.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if `size` is not positive.
pub fn stepper_motor(size: f64, color: Rgba) -> GeometryResult<Part> {
    ensure_positive("stepper_motor", "size", size)?;

    let mut frames = FrameBuilder::new();
    frames.emit_box(Vector3::repeat(size), color);
    frames.scoped(|f| {
        f.translate(0.0, 0.0, size / 2.0)
            .emit_cylinder(size / 8.0, size / 2.0, SHAFT_SIDES, palette::METAL);
    });
    Ok(frames.finish())
}

/// Builds a shaft coupler with two clamp rings.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if `radius` or `length` is
/// not positive.
pub fn coupler(radius: f64, length: f64, color: Rgba) -> GeometryResult<Part> {
    ensure_positive("coupler", "radius", radius)?;
    ensure_positive("coupler", "length", length)?;

    let mut frames = FrameBuilder::new();
    frames.emit_cylinder(radius, length, SHAFT_SIDES, color);
    for ring_at in [length / 4.0, length * 3.0 / 4.0] {
        frames.scoped(|f| {
            f.translate(0.0, 0.0, ring_at).emit_cylinder(
                radius * 1.1,
                length / 10.0,
                SHAFT_SIDES,
                palette::BLACK,
            );
        });
    }
    Ok(frames.finish())
}

/// Builds a load-cell block with a strain gauge on its top face.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if any extent is not positive.
pub fn load_cell(width: f64, height: f64, depth: f64, color: Rgba) -> GeometryResult<Part> {
    ensure_positive("load_cell", "width", width)?;
    ensure_positive("load_cell", "height", height)?;
    ensure_positive("load_cell", "depth", depth)?;

    let mut frames = FrameBuilder::new();
    frames.emit_box(Vector3::new(width, height, depth), color);
    frames.scoped(|f| {
        f.translate(0.0, 0.0, depth / 2.0 + 0.01).emit_box(
            Vector3::new(width * 0.7, height * 0.2, 0.01),
            palette::RED,
        );
    });
    Ok(frames.finish())
}
