//! Per-tick update loop.

use forklift_geometry::Primitive;
use forklift_sensor::LoadCell;
use nalgebra::Point3;
use tracing::{debug, info, warn};

use crate::action::{Action, ActionSet};
use crate::backend::{InputFrame, InputSource, RenderBackend, render_frame};
use crate::cargo::{CargoId, CargoManifest, DropOutcome};
use crate::config::ForkliftConfig;
use crate::error::{CargoError, Result};
use crate::overlay::Overlay;
use crate::rig::RigAssembler;
use crate::scene::Scene;
use crate::state::{SimulationState, SteeringMode, WheelState, wrap_degrees};

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Load-cell reading for this tick.
    pub sample: f64,
    /// True if the fork moved inside its range this tick.
    pub lift_moving: bool,
    /// Outcome of a pickup request, if one was made.
    pub pickup: Option<std::result::Result<CargoId, CargoError>>,
    /// Outcome of a drop request, if one was made.
    pub drop: Option<std::result::Result<DropOutcome, CargoError>>,
    /// True if the input asked to quit.
    pub quit: bool,
}

/// The forklift simulation.
///
/// Owns the state, the load cell, the cargo manifest and the pre-built rig
/// and scene geometry. [`Simulation::step`] advances one tick; nothing in a
/// tick can fail.
///
/// # Example
///
/// ```
/// use forklift_core::{Action, ActionSet, ForkliftConfig, Simulation};
///
/// let mut sim = Simulation::new(ForkliftConfig::arena().with_seed(1)).unwrap();
/// let lift: ActionSet = [Action::LiftUp].into_iter().collect();
/// for tick in 0..10 {
///     sim.step(&lift, f64::from(tick) / 60.0);
/// }
/// assert!((sim.state().lift.fork_height - 15.0).abs() < 1e-9);
/// assert!(sim.state().vibration.is_active());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: ForkliftConfig,
    state: SimulationState,
    load_cell: LoadCell,
    cargo: CargoManifest,
    rig: RigAssembler,
    scene: Scene,
}

impl Simulation {
    /// Validates `config` and builds the rig, scene and load cell.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ForkliftError`] if the configuration is invalid or
    /// a rig part cannot be built.
    pub fn new(config: ForkliftConfig) -> Result<Self> {
        config
            .validate()
            .inspect_err(|error| warn!(%error, "rejected forklift configuration"))?;
        let rig = RigAssembler::new(config.rig.clone(), config.motion.clone())
            .inspect_err(|error| warn!(%error, "rig parts failed to build"))?;
        let load_cell = LoadCell::new(config.load_cell.clone())?;
        let scene = Scene::build(&config);
        let cargo = CargoManifest::new(config.cargo.clone(), config.zones.clone());
        let state = SimulationState::new(&config.motion);
        info!(
            variant = %config.variant,
            cargo = cargo.items().len(),
            zones = cargo.zones().len(),
            "simulation ready"
        );
        Ok(Self {
            config,
            state,
            load_cell,
            cargo,
            rig,
            scene,
        })
    }

    /// Configuration the simulation was built with.
    #[must_use]
    pub const fn config(&self) -> &ForkliftConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable state, for scripted setups.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Load-cell generator and its history.
    #[must_use]
    pub const fn load_cell(&self) -> &LoadCell {
        &self.load_cell
    }

    /// Cargo and destination zones.
    #[must_use]
    pub const fn cargo(&self) -> &CargoManifest {
        &self.cargo
    }

    /// Rig assembler.
    #[must_use]
    pub const fn rig(&self) -> &RigAssembler {
        &self.rig
    }

    /// Static scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// World point used for pickup tests.
    #[must_use]
    pub fn fork_probe(&self) -> Point3<f64> {
        self.rig.fork_probe(&self.state)
    }

    /// Advances one tick.
    ///
    /// Order: drive and turn, lift, load preset, pickup, drop, then one
    /// load-cell sample at `elapsed_secs`.
    pub fn step(&mut self, actions: &ActionSet, elapsed_secs: f64) -> TickReport {
        let pose = &mut self.state.pose;
        pose.heading_deg = wrap_degrees(pose.heading_deg);
        self.drive(actions);

        let motion = &self.config.motion;
        let moved = self.state.lift.drive(actions.lift_direction(), motion);
        let lift_moving = moved && self.state.lift.in_travel(motion);

        if let Some(preset) = actions.load_preset() {
            if preset != self.state.load_preset {
                debug!(?preset, kg = preset.kilograms(), "load preset selected");
            }
            self.state.load_preset = preset;
        }

        let pickup = actions.contains(Action::Pickup).then(|| {
            let probe = self.rig.fork_probe(&self.state);
            let result = self.cargo.try_pickup(&probe, &self.config.pickup);
            if let Err(reason) = &result {
                debug!(%reason, x = probe.x, y = probe.y, z = probe.z, "pickup ignored");
            }
            result
        });

        let drop = actions.contains(Action::Drop).then(|| {
            let result = self.cargo.try_drop(&self.state.pose.position);
            if let Err(CargoError::NotCarrying) = &result {
                debug!("drop ignored: nothing on the fork");
            }
            result
        });

        let load = self
            .cargo
            .carried()
            .map_or_else(|| self.state.load_preset.kilograms(), |item| item.weight);
        let sample = self.load_cell.sample(load, lift_moving, elapsed_secs);

        self.state.load = load;
        self.state.last_sample = sample;
        self.state.vibration = self.load_cell.envelope();
        self.state.vibration_offset = self.load_cell.vibration_offset();
        self.state.tick += 1;

        TickReport {
            sample,
            lift_moving,
            pickup,
            drop,
            quit: actions.contains(Action::Quit),
        }
    }

    fn drive(&mut self, actions: &ActionSet) {
        let motion = &self.config.motion;
        let pose = &mut self.state.pose;

        if actions.contains(Action::MoveForward) {
            pose.translate(pose.forward() * motion.linear_speed);
        }
        if actions.contains(Action::MoveBack) {
            pose.translate(-pose.forward() * motion.linear_speed);
        }
        if actions.contains(Action::StrafeLeft) {
            pose.translate(-pose.right() * motion.linear_speed);
        }
        if actions.contains(Action::StrafeRight) {
            pose.translate(pose.right() * motion.linear_speed);
        }
        if actions.contains(Action::RotateLeft) {
            pose.rotate(motion.angular_speed);
        }
        if actions.contains(Action::RotateRight) {
            pose.rotate(-motion.angular_speed);
        }

        if let Some(mode) = actions
            .dominant_movement()
            .and_then(SteeringMode::for_action)
        {
            self.state.wheels = WheelState::preset(mode);
        }
    }

    /// Every primitive for the current frame: static scene, zones and
    /// resting cargo, then the rig.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut all = self.scene.primitives().to_vec();
        all.extend(self.cargo.primitives());
        all.extend(self.rig.assemble(&self.state, self.cargo.carried()));
        all
    }

    /// Overlay for a `viewport` of `[width, height]` pixels.
    #[must_use]
    pub fn overlay(&self, viewport: [f32; 2]) -> Overlay {
        let carrying = self
            .cargo
            .carried()
            .map(|item| format!("cargo {} ({:.1} kg)", item.id, item.weight));
        Overlay::build(
            &self.state,
            self.load_cell.history(),
            carrying.as_deref(),
            viewport,
        )
    }

    /// Runs one full frame: poll input, step, then render.
    ///
    /// Returns the polled input alongside the report so the frontend can
    /// drive its camera.
    pub fn run_frame<I, B>(
        &mut self,
        input: &mut I,
        backend: &mut B,
        elapsed_secs: f64,
        viewport: [f32; 2],
    ) -> (InputFrame, TickReport)
    where
        I: InputSource + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let frame = input.poll();
        let report = self.step(&frame.actions, elapsed_secs);
        render_frame(backend, &self.primitives(), &self.overlay(viewport));
        (frame, report)
    }
}
