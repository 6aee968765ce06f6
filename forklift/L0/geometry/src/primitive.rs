//! Primitive draw records.
//!
//! Every part in the rig bottoms out in two primitive shapes: an
//! axis-aligned box centered on its frame origin, and a capped cylinder
//! that starts at its frame origin and extends along local +Z.

use nalgebra::{Isometry3, Matrix4, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Rgba;

/// The shape of a primitive, with its extents.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrimitiveKind {
    /// Box centered on the frame origin with full extents `size`.
    Box {
        /// Full extents along local X, Y, Z.
        size: Vector3<f64>,
    },
    /// Cylinder capped at both ends, from `z = 0` to `z = length`.
    Cylinder {
        /// Radius.
        radius: f64,
        /// Length along local +Z.
        length: f64,
        /// Tessellation hint for the renderer.
        sides: u32,
    },
}

impl PrimitiveKind {
    /// Returns the short name of the shape.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
        }
    }

    /// Returns the local matrix mapping the unit shape onto this primitive.
    ///
    /// The unit box spans `[-0.5, 0.5]^3`; the unit cylinder has radius 1
    /// and spans `z ∈ [0, 1]`.
    #[must_use]
    pub fn extent_matrix(&self) -> Matrix4<f64> {
        match *self {
            Self::Box { size } => Matrix4::new_nonuniform_scaling(&size),
            Self::Cylinder { radius, length, .. } => {
                Matrix4::new_nonuniform_scaling(&Vector3::new(radius, radius, length))
            }
        }
    }

    /// Returns the local-space center of the shape.
    #[must_use]
    pub fn local_center(&self) -> Point3<f64> {
        match *self {
            Self::Box { .. } => Point3::origin(),
            Self::Cylinder { length, .. } => Point3::new(0.0, 0.0, length * 0.5),
        }
    }
}

/// Depth/blend hint attached to each draw command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RenderPass {
    /// Depth-tested, depth-written, no blending.
    Opaque,
    /// Depth-tested, alpha-blended.
    Translucent,
}

/// A single transformed, colored primitive.
///
/// The transform is relative to whatever frame holds the primitive: local
/// to its part while a part is being built, world space once the rig has
/// been flattened.
///
/// # Example
///
/// ```
/// use forklift_geometry::{Primitive, PrimitiveKind, RenderPass, palette};
/// use nalgebra::{Isometry3, Vector3};
///
/// let slab = Primitive::new(
///     PrimitiveKind::Box { size: Vector3::new(2.0, 1.0, 0.1) },
///     Isometry3::translation(0.0, 0.0, 1.0),
///     palette::ACRYLIC,
/// );
/// assert_eq!(slab.pass(), RenderPass::Translucent);
/// assert!((slab.center().z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Primitive {
    /// Shape and extents.
    pub kind: PrimitiveKind,
    /// Rigid transform of the primitive's frame.
    pub transform: Isometry3<f64>,
    /// Surface color.
    pub color: Rgba,
}

impl Primitive {
    /// Creates a primitive record.
    #[must_use]
    pub const fn new(kind: PrimitiveKind, transform: Isometry3<f64>, color: Rgba) -> Self {
        Self {
            kind,
            transform,
            color,
        }
    }

    /// Returns the render pass implied by the color's alpha.
    #[must_use]
    pub fn pass(&self) -> RenderPass {
        if self.color.is_translucent() {
            RenderPass::Translucent
        } else {
            RenderPass::Opaque
        }
    }

    /// Returns the full 4×4 matrix (rigid transform × extents) that maps
    /// the unit shape into this primitive's frame.
    #[must_use]
    pub fn matrix(&self) -> Matrix4<f64> {
        self.transform.to_homogeneous() * self.kind.extent_matrix()
    }

    /// Returns the center of the shape in the containing frame.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        self.transform * self.kind.local_center()
    }

    /// Returns a copy re-expressed under `parent`.
    #[must_use]
    pub fn placed(&self, parent: &Isometry3<f64>) -> Self {
        Self {
            transform: parent * self.transform,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;
    use approx::assert_relative_eq;
    use nalgebra::{UnitQuaternion, Vector4};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn cylinder_center_is_halfway_up() {
        let p = Primitive::new(
            PrimitiveKind::Cylinder {
                radius: 0.1,
                length: 2.0,
                sides: 12,
            },
            Isometry3::translation(1.0, 0.0, 0.0),
            palette::METAL,
        );
        assert_relative_eq!(p.center(), Point3::new(1.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn matrix_scales_then_transforms() {
        let p = Primitive::new(
            PrimitiveKind::Box {
                size: Vector3::new(2.0, 4.0, 6.0),
            },
            Isometry3::translation(10.0, 0.0, 0.0),
            palette::BLUE,
        );
        let corner = p.matrix() * Vector4::new(0.5, 0.5, 0.5, 1.0);
        assert_relative_eq!(corner, Vector4::new(11.0, 2.0, 3.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn placed_composes_parent_first() {
        let p = Primitive::new(
            PrimitiveKind::Box {
                size: Vector3::repeat(1.0),
            },
            Isometry3::translation(1.0, 0.0, 0.0),
            palette::RED,
        );
        let parent = Isometry3::from_parts(
            nalgebra::Translation3::new(0.0, 0.0, 5.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        let moved = p.placed(&parent);
        assert_relative_eq!(moved.center(), Point3::new(0.0, 1.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn opaque_and_translucent_passes() {
        let kind = PrimitiveKind::Box {
            size: Vector3::repeat(1.0),
        };
        let solid = Primitive::new(kind, Isometry3::identity(), palette::BRASS);
        let glass = Primitive::new(kind, Isometry3::identity(), palette::WINDOW);
        assert_eq!(solid.pass(), RenderPass::Opaque);
        assert_eq!(glass.pass(), RenderPass::Translucent);
        assert_eq!(kind.name(), "box");
    }
}
