// motorcar_core/src/controls/pedals.rs

use crate::{
    config::ChassisConfig,
    cues::{CueBuffer, VehicleCue},
    state::VehicleState,
};

/// The brake path: pedal torque on both axles, overridden at the rear by the handbrake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pedals {
    brake_force: f32,
    rear_brake_share: f32,
    brake_held: bool,
}

impl Pedals {
    pub fn new(config: &ChassisConfig) -> Self {
        Self {
            brake_force: config.brake_force,
            rear_brake_share: config.rear_brake_share,
            brake_held: false,
        }
    }

    pub fn is_brake_held(&self) -> bool {
        self.brake_held
    }

    /// Writes this tick's pedal axes and brake torques into `state`.
    ///
    /// With the handbrake pulled the rear axle always gets the full `brake_force`,
    /// whatever the pedal says.
    pub fn apply(
        &mut self,
        state: &mut VehicleState,
        throttle: f32,
        brake: f32,
        clutch: f32,
        handbrake_pulled: bool,
        cues: &mut CueBuffer,
    ) {
        state.throttle = throttle;
        state.brake = brake;
        state.clutch = clutch;

        state.brake_torque_front = self.brake_force * brake;
        state.brake_torque_rear = if handbrake_pulled {
            self.brake_force
        } else {
            self.brake_force * brake * self.rear_brake_share
        };

        let held = brake > 0.0;
        if held != self.brake_held {
            self.brake_held = held;
            cues.push(if held {
                VehicleCue::BrakeSqueal
            } else {
                VehicleCue::BrakeRelease
            });
        }
    }
}
