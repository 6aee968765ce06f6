//! Orbit camera that follows the forklift.
//!
//! The scene is Z-up, so azimuth turns about +Z and elevation tilts
//! toward +Z.

use bevy::prelude::*;

/// Orbit camera controller.
///
/// # Controls
///
/// - **Left mouse drag**: Orbit around the forklift
/// - **Scroll wheel**: Zoom in/out
///
/// The target is moved onto the forklift every frame by the viewer plugin.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    /// Target point to orbit around.
    pub target: Vec3,
    /// Height above the chassis origin that the camera looks at.
    pub target_lift: f32,
    /// Distance from target.
    pub distance: f32,
    /// Angle about +Z (radians).
    pub azimuth: f32,
    /// Angle above the ground plane (radians).
    pub elevation: f32,
    /// Orbit speed (radians per pixel).
    pub orbit_speed: f32,
    /// Zoom speed (multiplier per scroll unit).
    pub zoom_speed: f32,
    /// Minimum distance from target.
    pub min_distance: f32,
    /// Maximum distance from target.
    pub max_distance: f32,
    /// Minimum elevation angle (radians).
    pub min_elevation: f32,
    /// Maximum elevation angle (radians).
    pub max_elevation: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            target_lift: 0.5,
            distance: 8.0,
            // Behind the rig at heading 0, which faces −Y.
            azimuth: std::f32::consts::FRAC_PI_2,
            elevation: 0.5,
            orbit_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 1.0,
            max_distance: 60.0,
            min_elevation: 0.05,
            max_elevation: 1.5,
        }
    }
}

impl OrbitCamera {
    /// Create a new orbit camera with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial distance.
    #[must_use]
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self
    }

    /// Set the initial angles.
    #[must_use]
    pub fn with_angles(mut self, azimuth: f32, elevation: f32) -> Self {
        self.azimuth = azimuth;
        self.elevation = elevation.clamp(self.min_elevation, self.max_elevation);
        self
    }

    /// Calculate the camera position from current orbit parameters.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let ground = self.distance * self.elevation.cos();
        let x = ground * self.azimuth.cos();
        let y = ground * self.azimuth.sin();
        let z = self.distance * self.elevation.sin();
        self.target + Vec3::new(x, y, z)
    }

    /// Apply orbit input (mouse delta while dragging).
    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * self.orbit_speed;
        self.elevation += delta.y * self.orbit_speed;
        self.elevation = self.elevation.clamp(self.min_elevation, self.max_elevation);
    }

    /// Apply zoom input (scroll delta).
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Point the camera at `chassis`, raised by `target_lift`.
    pub fn follow(&mut self, chassis: Vec3) {
        self.target = chassis + Vec3::Z * self.target_lift;
    }

    /// Apply this controller's state to a Bevy Transform.
    pub fn apply_to_transform(&self, transform: &mut Transform) {
        transform.translation = self.position();
        transform.look_at(self.target, Vec3::Z);
    }
}

/// Update camera transform from orbit parameters.
pub fn update_orbit_camera(mut cameras: Query<(&OrbitCamera, &mut Transform)>) {
    for (camera, mut transform) in &mut cameras {
        camera.apply_to_transform(&mut transform);
    }
}

/// Spawn the orbit camera.
pub fn spawn_orbit_camera(mut commands: Commands) {
    let camera = OrbitCamera::default();
    let mut transform = Transform::default();
    camera.apply_to_transform(&mut transform);
    commands.spawn((Camera3d::default(), camera, transform));
}
