// motorcar_core/src/engine.rs

//! The torque-curve engine model.
//!
//! Each tick the engine is in one of three regimes:
//! * **disengaged**: RPM decays toward zero, no torque;
//! * **neutral**: RPM chases a throttle-driven target with a little idle hunting;
//! * **in gear**: RPM chases the wheel speed reflected through the gearbox, lagging
//!   by `motor_inertia`, and torque comes from the curve.
//!
//! While the engine runs it burns fuel from the attached tank and stalls on the
//! first tick it finds the tank empty.

use log::{info, warn};
use rand::Rng;

use crate::{
    config::{EngineConfig, GearTable, NEUTRAL_GEAR},
    fuel::FuelTank,
    math::{blend_factor, inverse_lerp, lerp},
    state::VehicleState,
};

/// Converts the curve's normalized `torque * rpm / 5252` power relation back to torque.
pub const HORSEPOWER_TORQUE_CONSTANT: f32 = 5252.0;

/// Rate used for the motor sound pitch/volume blends.
const AUDIO_BLEND_RATE: f32 = 5.0;

/// Pitch and volume targets for the motor sound source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineAudio {
    pub pitch: f32,
    pub volume: f32,
}

impl Default for EngineAudio {
    fn default() -> Self {
        Self {
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOutput {
    pub motor_rpm: f32,
    pub torque: f32,
    /// The engine was running and shut down this tick because the tank is empty.
    pub stalled: bool,
}

#[derive(Debug, Clone)]
pub struct EngineModel {
    config: EngineConfig,
    gears: GearTable,
    audio: EngineAudio,
}

impl EngineModel {
    pub fn new(config: EngineConfig, gears: GearTable) -> Self {
        Self {
            config,
            gears,
            audio: EngineAudio::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn audio(&self) -> EngineAudio {
        self.audio
    }

    /// Advances the motor by `dt` seconds.
    ///
    /// # Arguments
    /// * `state`: the vehicle state; reads `current_gear`, writes RPM, torque and `engine_active`.
    /// * `throttle`: gas pedal in `[0, 1]`.
    /// * `front_wheel_rpm`: average signed speed of the driven wheels.
    /// * `fuel`: the tank the engine draws from.
    /// * `rng`: source for the idle hunting noise.
    /// * `dt`: elapsed seconds, must be non-negative.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        state: &mut VehicleState,
        throttle: f32,
        front_wheel_rpm: f32,
        fuel: &mut dyn FuelTank,
        rng: &mut R,
        dt: f32,
    ) -> EngineOutput {
        let dt = dt.max(0.0);
        let mut stalled = false;

        if fuel.is_empty() && state.engine_active {
            info!("Fuel tank is empty, engine stalls.");
            state.engine_active = false;
            stalled = true;
        }

        if state.engine_active {
            if state.current_gear == NEUTRAL_GEAR {
                // --- Idle / free revving ---
                let target = self.config.min_rpm.max(self.config.max_rpm * throttle)
                    + self.idle_noise(rng);
                state.motor_rpm = lerp(state.motor_rpm, target, blend_factor(1.0, dt));
                state.current_torque = 0.0;
            } else {
                // --- In gear ---
                let overall = self.gears.overall_ratio(state.current_gear);
                state.wheel_rpm = (front_wheel_rpm * overall).abs();
                let target = self.config.in_gear_floor_rpm().max(state.wheel_rpm);
                state.motor_rpm = lerp(
                    state.motor_rpm,
                    target,
                    blend_factor(self.config.motor_inertia, dt),
                );
                state.current_torque = self.torque_at(state.motor_rpm, state.current_gear);
            }
            state.motor_rpm = state.motor_rpm.max(0.0);

            fuel.draw(self.config.gas_consumption * state.motor_rpm * dt);
            self.blend_audio(state.motor_rpm, dt);
        } else {
            state.motor_rpm = lerp(state.motor_rpm, 0.0, blend_factor(1.0, dt)).max(0.0);
            state.current_torque = 0.0;
        }

        state.fuel_fraction = fuel.fraction();

        EngineOutput {
            motor_rpm: state.motor_rpm,
            torque: state.current_torque,
            stalled,
        }
    }

    /// Output torque at `motor_rpm` in `gear`.
    ///
    /// The curve formula divides by RPM, so it is evaluated no lower than the
    /// in-gear floor (`min_rpm - 100`, at least 1). Anything non-finite reads as zero.
    pub fn torque_at(&self, motor_rpm: f32, gear: usize) -> f32 {
        let floor = self.config.in_gear_floor_rpm().max(1.0);
        let rpm = motor_rpm.max(floor);
        let curve = self.gears.torque_curve.evaluate(rpm / self.config.max_rpm);
        let torque = curve * self.config.motor_force / rpm
            * self.gears.overall_ratio(gear)
            * HORSEPOWER_TORQUE_CONSTANT;

        if torque.is_finite() {
            torque
        } else {
            warn!("Non-finite torque at {rpm} rpm in gear {gear}, using 0.");
            0.0
        }
    }

    /// `motor_rpm` mapped onto `[0, 1]` between idle and redline.
    pub fn normalized_rpm(&self, motor_rpm: f32) -> f32 {
        inverse_lerp(self.config.min_rpm, self.config.max_rpm, motor_rpm)
    }

    fn idle_noise<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let amplitude = self.config.idle_noise_rpm;
        if amplitude <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-amplitude..=amplitude)
    }

    fn blend_audio(&mut self, motor_rpm: f32, dt: f32) {
        let normalized = self.normalized_rpm(motor_rpm);
        let target_pitch = lerp(0.75, 1.5, normalized);
        let target_volume = lerp(0.5, 1.0, normalized);
        let t = blend_factor(AUDIO_BLEND_RATE, dt);
        self.audio.pitch = lerp(self.audio.pitch, target_pitch, t);
        self.audio.volume = lerp(self.audio.volume, target_volume, t);
    }
}
