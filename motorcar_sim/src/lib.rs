// motorcar_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::chassis::ChassisPlugin;
use crate::simulation::plugins::input::DriverInputPlugin;
use crate::simulation::plugins::presentation::PresentationPlugin;
use crate::simulation::plugins::vehicle::VehiclePlugin;

// This prelude is for convenience for other files WITHIN the motorcar_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// Insert a `ScenarioConfig` resource first, then add this one plugin to the app.
pub struct MotorcarSimulationPlugin;

impl Plugin for MotorcarSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Core setup (rng, state, fixed timestep, spawns the car).
            SimulationSetupPlugin,
            // Keyboard and scripted drivers.
            DriverInputPlugin,
            // The per-tick vehicle core.
            VehiclePlugin,
            // The wheel/body solver stand-in.
            ChassisPlugin,
            // Cue and telemetry logging, end of run.
            PresentationPlugin,
        ));
    }
}
