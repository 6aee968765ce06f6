//! Bevy resources wrapping the simulation.

use bevy::prelude::*;
use forklift_core::{InputFrame, Simulation, TickReport};

/// Handle to the forklift simulation.
///
/// The viewer steps it once per frame; everything drawn is derived from it.
#[derive(Resource, Debug, Clone)]
pub struct ForkliftSim(pub Simulation);

impl ForkliftSim {
    /// Wrap a simulation.
    #[must_use]
    pub fn new(simulation: Simulation) -> Self {
        Self(simulation)
    }

    /// Get a reference to the simulation.
    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.0
    }

    /// Get a mutable reference to the simulation.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.0
    }
}

impl std::ops::Deref for ForkliftSim {
    type Target = Simulation;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Input and outcome of the most recent tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct LastTick {
    /// Input the tick consumed.
    pub input: InputFrame,
    /// What the tick did, once one has run.
    pub report: Option<TickReport>,
}
