//! Plugin composition for the forklift viewer.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use forklift_core::Simulation;
use tracing::info;

use crate::camera::{OrbitCamera, spawn_orbit_camera, update_orbit_camera};
use crate::convert::vec3_from_point;
use crate::input::{FrameInput, gather_input};
use crate::overlay::{OverlayPool, sync_overlay};
use crate::render::{DrawQueue, PrimitivePool, sync_primitives};
use crate::resources::{ForkliftSim, LastTick};

/// Viewport assumed when no window exists.
const FALLBACK_VIEWPORT: [f32; 2] = [1024.0, 768.0];

/// System sets of the viewer, run in declaration order during `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ForkliftSet {
    /// Keyboard and mouse to logical actions.
    Input,
    /// One simulation tick and frame submission.
    Step,
    /// Entities, UI and camera follow the submitted frame.
    Sync,
}

/// Forklift viewer plugin.
///
/// Each `Update` reads input, advances the simulation by exactly one tick,
/// and mirrors the submitted frame into pooled entities and UI nodes.
///
/// # Example
///
/// ```no_run
/// use bevy::prelude::*;
/// use forklift_bevy::prelude::*;
/// use forklift_core::{ForkliftConfig, Simulation};
///
/// let sim = Simulation::new(ForkliftConfig::warehouse()).unwrap();
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(ForkliftViewerPlugin::new(sim))
///     .run();
/// ```
pub struct ForkliftViewerPlugin {
    /// Simulation to drive.
    pub simulation: Simulation,
    /// Whether to spawn the orbit camera.
    pub spawn_camera: bool,
    /// Whether to spawn lighting.
    pub spawn_lighting: bool,
}

impl ForkliftViewerPlugin {
    /// Create a plugin with camera and lighting.
    #[must_use]
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            spawn_camera: true,
            spawn_lighting: true,
        }
    }

    /// Create a plugin for headless/testing mode (no camera, no lighting).
    #[must_use]
    pub fn headless(simulation: Simulation) -> Self {
        Self {
            simulation,
            spawn_camera: false,
            spawn_lighting: false,
        }
    }
}

impl Plugin for ForkliftViewerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ForkliftSim::new(self.simulation.clone()))
            .init_resource::<FrameInput>()
            .init_resource::<LastTick>()
            .init_resource::<DrawQueue>()
            .init_resource::<PrimitivePool>()
            .init_resource::<OverlayPool>();

        app.configure_sets(
            Update,
            (ForkliftSet::Input, ForkliftSet::Step, ForkliftSet::Sync).chain(),
        );

        app.add_systems(Update, gather_input.in_set(ForkliftSet::Input))
            .add_systems(Update, step_simulation.in_set(ForkliftSet::Step))
            .add_systems(
                Update,
                (
                    sync_primitives,
                    sync_overlay,
                    (follow_forklift, update_orbit_camera).chain(),
                )
                    .in_set(ForkliftSet::Sync),
            );

        if self.spawn_camera {
            app.add_systems(Startup, spawn_orbit_camera);
        }
        if self.spawn_lighting {
            app.add_systems(Startup, spawn_lighting);
        }
    }
}

/// Advances the simulation one tick and submits the frame.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are passed by value
pub fn step_simulation(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<ForkliftSim>,
    mut input: ResMut<FrameInput>,
    mut queue: ResMut<DrawQueue>,
    mut last: ResMut<LastTick>,
    mut exit: MessageWriter<AppExit>,
) {
    let viewport = windows
        .iter()
        .next()
        .map_or(FALLBACK_VIEWPORT, |w| [w.width(), w.height()]);

    let (frame, report) = sim.simulation_mut().run_frame(
        &mut *input,
        &mut *queue,
        time.elapsed_secs_f64(),
        viewport,
    );

    if let Some(Ok(id)) = report.pickup {
        info!(cargo = %id, "picked up");
    }
    if let Some(Ok(outcome)) = report.drop {
        info!(cargo = %outcome.id, zone = outcome.zone, "delivered");
    }
    if report.quit {
        info!("quit requested");
        exit.write(AppExit::Success);
    }

    last.input = frame;
    last.report = Some(report);
}

/// Applies this tick's mouse input and moves the camera target onto the
/// chassis.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are passed by value
#[allow(clippy::cast_possible_truncation)] // f64 -> f32 is intentional for Bevy
pub fn follow_forklift(
    sim: Res<ForkliftSim>,
    last: Res<LastTick>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let chassis = vec3_from_point(&sim.state().pose.position);
    let orbit = Vec2::new(last.input.orbit.x as f32, last.input.orbit.y as f32);
    let zoom = last.input.zoom as f32;

    for mut camera in &mut cameras {
        if orbit != Vec2::ZERO {
            camera.orbit(orbit);
        }
        if zoom.abs() > 0.001 {
            camera.zoom(zoom);
        }
        camera.follow(chassis);
    }
}

/// Spawn a sun and an ambient fill.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 20.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    // An entity since Bevy 0.18.
    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
}
