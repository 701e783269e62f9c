// motorcar_core/src/state.rs

use crate::config::NEUTRAL_GEAR;

/// The single source of truth for the simulated car.
///
/// Owned by [`crate::vehicle::VehicleController`] and mutated once per tick by the
/// controls, drivetrain and engine, in that order. Everything else reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub engine_active: bool,
    /// Crankshaft speed. Never negative.
    pub motor_rpm: f32,
    /// Wheel speed reflected through the current gear, in crank RPM.
    pub wheel_rpm: f32,
    /// Engine output torque. Zero whenever the engine is off.
    pub current_torque: f32,
    /// Torque written to each front wheel (`current_torque * throttle`).
    pub wheel_motor_torque: f32,
    pub current_gear: usize,
    /// Mirror of the attached tank's fill level, in `[0, 1]`.
    pub fuel_fraction: f32,
    /// Front wheel steer angle in degrees.
    pub steer_angle: f32,
    pub brake_torque_front: f32,
    pub brake_torque_rear: f32,
    pub speed_kmh: f32,

    // --- Pedals as applied this tick ---
    pub throttle: f32,
    pub brake: f32,
    pub clutch: f32,

    /// Seconds of simulated time since the vehicle was built.
    pub elapsed: f32,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            engine_active: false,
            motor_rpm: 0.0,
            wheel_rpm: 0.0,
            current_torque: 0.0,
            wheel_motor_torque: 0.0,
            current_gear: NEUTRAL_GEAR,
            fuel_fraction: 0.0,
            steer_angle: 0.0,
            brake_torque_front: 0.0,
            brake_torque_rear: 0.0,
            speed_kmh: 0.0,
            throttle: 0.0,
            brake: 0.0,
            clutch: 0.0,
            elapsed: 0.0,
        }
    }
}
