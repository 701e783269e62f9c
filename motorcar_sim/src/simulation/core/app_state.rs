// motorcar_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The scenario is loaded and the car is being spawned.
    #[default]
    SceneBuilding,

    /// The main simulation loop is running.
    Running,

    /// The scenario duration has elapsed. Telemetry is flushed and the app exits.
    Finished,
}

// =========================================================================
// == Main Simulation Sets (The "Data Flow Graph") ==
// =========================================================================

/// One fixed step of the car, in order. Chained in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Keyboard or script writes the driver's input mailbox.
    Input,
    /// `VehicleController::tick`: controls, drivetrain, engine, instruments.
    Vehicle,
    /// The wheel/body solver applies the actuation and advances.
    Physics,
    /// Cue logging, telemetry and the end-of-run check. Runs last.
    Presentation,
}
