//! Scoped transform stack for building nested assemblies.
//!
//! [`FrameBuilder`] keeps a current frame and a stack of saved frames.
//! Child frames are opened with [`FrameBuilder::scoped`], which restores
//! the parent frame when the closure returns, so a push can never be left
//! without its matching pop.

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::{Part, Primitive, PrimitiveKind, Rgba};

/// A coordinate axis of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Local X.
    X,
    /// Local Y.
    Y,
    /// Local Z.
    Z,
}

impl Axis {
    /// Returns the unit vector for this axis.
    #[must_use]
    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Self::X => Vector3::x_axis(),
            Self::Y => Vector3::y_axis(),
            Self::Z => Vector3::z_axis(),
        }
    }
}

/// Returns a rotation of `degrees` about `axis`.
#[must_use]
pub fn rotation_deg(axis: Axis, degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&axis.unit(), degrees.to_radians())
}

/// Accumulates primitives under a stack of nested local frames.
///
/// Transforms are right-multiplied onto the current frame, so each call
/// is expressed in the frame produced by the previous calls.
///
/// # Example
///
/// ```
/// use forklift_geometry::{Axis, FrameBuilder, palette};
/// use nalgebra::Vector3;
///
/// let mut frames = FrameBuilder::new();
/// frames.translate(1.0, 0.0, 0.0);
/// frames.scoped(|f| {
///     f.rotate_deg(Axis::Z, 90.0).translate(1.0, 0.0, 0.0);
///     f.emit_box(Vector3::repeat(0.5), palette::RED);
/// });
/// let part = frames.finish();
///
/// let center = part.primitives()[0].center();
/// assert!((center.x - 1.0).abs() < 1e-12);
/// assert!((center.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    current: Isometry3<f64>,
    saved: Vec<Isometry3<f64>>,
    primitives: Vec<Primitive>,
}

impl FrameBuilder {
    /// Creates a builder rooted at the identity frame.
    #[must_use]
    pub fn new() -> Self {
        Self::with_origin(Isometry3::identity())
    }

    /// Creates a builder rooted at `origin`.
    #[must_use]
    pub fn with_origin(origin: Isometry3<f64>) -> Self {
        Self {
            current: origin,
            saved: Vec::new(),
            primitives: Vec::new(),
        }
    }

    /// Returns the current frame.
    #[must_use]
    pub fn current(&self) -> &Isometry3<f64> {
        &self.current
    }

    /// Returns the nesting depth (0 at the root).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Moves the current frame by `(x, y, z)` in its own axes.
    pub fn translate(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.current *= Translation3::new(x, y, z);
        self
    }

    /// Rotates the current frame by `degrees` about one of its own axes.
    pub fn rotate_deg(&mut self, axis: Axis, degrees: f64) -> &mut Self {
        self.current *= rotation_deg(axis, degrees);
        self
    }

    /// Applies an arbitrary local transform to the current frame.
    pub fn transform(&mut self, local: &Isometry3<f64>) -> &mut Self {
        self.current *= local;
        self
    }

    /// Runs `f` inside a child frame and restores the parent afterwards.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.saved.push(self.current);
        let result = f(self);
        if let Some(parent) = self.saved.pop() {
            self.current = parent;
        }
        result
    }

    /// Emits a primitive at the current frame.
    pub fn emit(&mut self, kind: PrimitiveKind, color: Rgba) -> &mut Self {
        self.primitives
            .push(Primitive::new(kind, self.current, color));
        self
    }

    /// Emits a box centered on the current frame.
    pub fn emit_box(&mut self, size: Vector3<f64>, color: Rgba) -> &mut Self {
        self.emit(PrimitiveKind::Box { size }, color)
    }

    /// Emits a cylinder starting at the current frame along local +Z.
    pub fn emit_cylinder(&mut self, radius: f64, length: f64, sides: u32, color: Rgba) -> &mut Self {
        self.emit(
            PrimitiveKind::Cylinder {
                radius,
                length,
                sides,
            },
            color,
        )
    }

    /// Emits every primitive of `part`, re-expressed under the current frame.
    pub fn emit_part(&mut self, part: &Part) -> &mut Self {
        let frame = self.current;
        self.primitives
            .extend(part.primitives().iter().map(|p| p.placed(&frame)));
        self
    }

    /// Returns the number of primitives emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Consumes the builder and returns the emitted primitives as a part.
    #[must_use]
    pub fn finish(self) -> Part {
        Part::from_primitives(self.primitives)
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}
