// motorcar_sim/src/simulation/core/components.rs

use bevy::prelude::Component;
use motorcar_core::{
    input::InputSnapshot,
    instruments::Instruments,
    types::{ChassisSolver, WheelActuation},
    vehicle::VehicleController,
};

// --- Wrapper Components for Core Types ---

/// The car's whole simulation core, owned by its entity.
#[derive(Component, Debug)]
pub struct Vehicle(pub VehicleController);

/// A Bevy component that wraps a pure `ChassisSolver` trait object.
/// This is the stand-in for the physics engine's wheel colliders.
#[derive(Component, Debug)]
pub struct Chassis(pub Box<dyn ChassisSolver>);

/// A "mailbox" for driver input. The keyboard or the script writes it, the
/// vehicle system reads it once per tick and clears the button edges.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct DriverInput(pub InputSnapshot);

/// The actuation produced by the last vehicle tick, waiting for the solver.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LatestActuation(pub WheelActuation);

/// The last instrument projection, for display and telemetry. Empty until the first tick.
#[derive(Component, Debug, Default, Clone)]
pub struct Dashboard(pub Option<Instruments>);
