// motorcar_sim/src/simulation/core/events.rs

use bevy::prelude::Event;
// Import the pure data types from the core library
use motorcar_core::{
    cues::VehicleCue,
    interaction::{UseTarget, VehicleAction},
};

/// A cue raised by the car during the last tick. Consumed by audio/logging.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleCueEvent(pub VehicleCue);

/// Something outside the cabin input asks the car to do something:
/// the player clicking a part of it, or a scripted action.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleCommand {
    Use { target: UseTarget, secondary: bool },
    Perform(VehicleAction),
}
