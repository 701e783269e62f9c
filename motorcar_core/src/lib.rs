// motorcar_core/src/lib.rs

// Engine-agnostic core of the drivable car: state, controls, drivetrain,
// engine and instrument projection. Hosts drive it through `VehicleController::tick`.
pub mod config;
pub mod controls;
pub mod cues;
pub mod drivetrain;
pub mod engine;
pub mod error;
pub mod fuel;
pub mod input;
pub mod instruments;
pub mod interaction;
pub mod math;
pub mod occupancy;
pub mod prelude;
pub mod state;
pub mod types;
pub mod vehicle;
