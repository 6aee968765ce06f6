//! Type conversions between forklift-core and Bevy types.
//!
//! This module is the only place that knows both nalgebra and Bevy math.
//! The viewer keeps the simulation's Z-up frame; the camera is oriented
//! with +Z as up instead of remapping every transform.

#![allow(clippy::cast_possible_truncation)] // f64 -> f32 is intentional for Bevy

use std::f32::consts::FRAC_PI_2;

use bevy::color::Color;
use bevy::math::{Mat4, Vec3};
use bevy::transform::components::Transform;
use forklift_core::DrawCommand;
use forklift_core::geometry::{PrimitiveKind, Rgba};
use nalgebra::{Matrix4, Point3};

/// Convert a nalgebra Point3 to Bevy Vec3.
#[inline]
#[must_use]
pub fn vec3_from_point(p: &Point3<f64>) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Convert a nalgebra 4×4 matrix to Bevy `Mat4`.
///
/// Both are column-major, so the slices line up.
#[must_use]
pub fn mat4_from_matrix(m: &Matrix4<f64>) -> Mat4 {
    let mut cols = [0.0_f32; 16];
    for (dst, src) in cols.iter_mut().zip(m.as_slice()) {
        *dst = *src as f32;
    }
    Mat4::from_cols_array(&cols)
}

/// Convert a palette color to a Bevy color.
#[inline]
#[must_use]
pub fn color_from_rgba(c: Rgba) -> Color {
    Color::srgba(c.r, c.g, c.b, c.a)
}

/// Maps Bevy's unit cylinder (radius 1, height 1, centered, along +Y) onto
/// the core's unit cylinder (radius 1, `z ∈ [0, 1]`).
#[must_use]
pub fn unit_cylinder_fixup() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5)) * Mat4::from_rotation_x(FRAC_PI_2)
}

/// Transform that places a unit Bevy mesh where the draw command puts its
/// shape.
///
/// Boxes use a unit `Cuboid`; cylinders a unit `Cylinder`. The command
/// matrix is always rotation × translation × axis-aligned scale, so the
/// decomposition is exact.
#[must_use]
pub fn transform_from_command(command: &DrawCommand) -> Transform {
    let world = mat4_from_matrix(&command.world);
    let matrix = match command.kind {
        PrimitiveKind::Box { .. } => world,
        PrimitiveKind::Cylinder { .. } => world * unit_cylinder_fixup(),
    };
    Transform::from_matrix(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::color::Alpha;
    use forklift_core::geometry::{Primitive, palette};
    use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

    #[test]
    fn matrix_translation_lands_in_last_column() {
        let m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        let bevy = mat4_from_matrix(&m);
        assert!((bevy.w_axis.truncate() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn box_transform_carries_size_as_scale() {
        let primitive = Primitive::new(
            PrimitiveKind::Box {
                size: Vector3::new(2.0, 3.0, 4.0),
            },
            Isometry3::translation(1.0, 0.0, 0.5),
            palette::RED,
        );
        let t = transform_from_command(&DrawCommand::from(&primitive));
        assert!((t.scale - Vec3::new(2.0, 3.0, 4.0)).length() < 1e-5);
        assert!((t.translation - Vec3::new(1.0, 0.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn cylinder_spans_origin_to_length() {
        let primitive = Primitive::new(
            PrimitiveKind::Cylinder {
                radius: 0.1,
                length: 2.0,
                sides: 12,
            },
            Isometry3::identity(),
            palette::METAL,
        );
        let t = transform_from_command(&DrawCommand::from(&primitive));
        // Bevy's unit cylinder spans y ∈ [-0.5, 0.5].
        let bottom = t.transform_point(Vec3::new(0.0, -0.5, 0.0));
        let top = t.transform_point(Vec3::new(0.0, 0.5, 0.0));
        let rim = t.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(bottom.length() < 1e-5, "bottom at {bottom:?}");
        assert!((top - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5, "top at {top:?}");
        assert!((rim - Vec3::new(0.1, 0.0, 1.0)).length() < 1e-5, "rim at {rim:?}");
    }

    #[test]
    fn rotated_cylinder_follows_its_frame() {
        // A cylinder laid along +X.
        let iso = Isometry3::from_parts(
            Translation3::new(0.0, 1.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_2),
        );
        let primitive = Primitive::new(
            PrimitiveKind::Cylinder {
                radius: 0.5,
                length: 3.0,
                sides: 20,
            },
            iso,
            palette::BLACK,
        );
        let t = transform_from_command(&DrawCommand::from(&primitive));
        let top = t.transform_point(Vec3::new(0.0, 0.5, 0.0));
        assert!((top - Vec3::new(3.0, 1.0, 0.0)).length() < 1e-4, "top at {top:?}");
    }

    #[test]
    fn translucent_alpha_survives() {
        let color = color_from_rgba(palette::ACRYLIC);
        assert!(color.alpha() < 1.0);
    }
}
