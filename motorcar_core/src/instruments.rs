// motorcar_core/src/instruments.rs

use crate::{
    config::{CosmeticsConfig, EngineConfig, GearTable, InstrumentConfig},
    controls::{Controls, IndicatorLamps, IndicatorState},
    fuel::FuelTank,
    math::lerp,
    state::VehicleState,
};

// --- Lever poses (degrees) ---
const INDICATOR_LEVER_YAW: f32 = 15.0;
const WIPER_LEVER_YAW: f32 = -15.0;
const HANDBRAKE_LEVER_PITCH: f32 = -20.0;

/// How far each pedal prop is pushed in, in prop-local units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PedalTravel {
    pub gas: f32,
    pub brake: f32,
    pub clutch: f32,
}

/// Boolean light/emissive outputs for the rendering side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LightOutputs {
    /// Headlight beams plus the headlight glass emission.
    pub headlights: bool,
    /// Blue "lights on" icon on the dashboard.
    pub headlight_indicator: bool,
    pub interior_light: bool,
    /// Yellow handbrake icon on the dashboard.
    pub handbrake_indicator: bool,
    pub indicators: IndicatorLamps,
}

/// Everything the dashboard and the cabin props display after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruments {
    // ==== == Gauges == ====
    pub rpm_needle: f32,
    pub speed_needle: f32,
    pub fuel_needle: f32,

    // ==== == Props == ====
    pub steering_wheel_yaw: f32,
    /// Shifter lever euler angles for the current gear.
    pub shifter_angles: [f32; 3],
    pub indicator_lever_yaw: f32,
    pub wiper_lever_yaw: f32,
    pub handbrake_lever_pitch: f32,
    pub wiper_angle: f32,
    pub pedals: PedalTravel,
    /// `[x, y]` offset applied to the motor and steering wheel while the engine runs.
    pub engine_shake: [f32; 2],

    // ==== == Displays == ====
    pub lights: LightOutputs,
    pub gear_label: String,
    pub monitor_text: String,
}

/// Maps the vehicle state onto needles, props and displays.
///
/// Holds only configuration. [`InstrumentProjector::project`] never mutates
/// anything and is meant to run last in the tick, after the engine.
#[derive(Debug, Clone)]
pub struct InstrumentProjector {
    instruments: InstrumentConfig,
    cosmetics: CosmeticsConfig,
    gears: GearTable,
    max_rpm: f32,
}

impl InstrumentProjector {
    pub fn new(
        instruments: InstrumentConfig,
        cosmetics: CosmeticsConfig,
        gears: GearTable,
        engine: &EngineConfig,
    ) -> Self {
        Self {
            instruments,
            cosmetics,
            gears,
            max_rpm: engine.max_rpm,
        }
    }

    pub fn rpm_needle(&self, motor_rpm: f32) -> f32 {
        lerp(0.0, self.instruments.rpm_needle_sweep, motor_rpm / self.max_rpm)
    }

    pub fn speed_needle(&self, speed_kmh: f32) -> f32 {
        let t = (speed_kmh - self.instruments.speed_needle_offset)
            / self.instruments.speed_needle_span;
        lerp(0.0, self.instruments.speed_needle_sweep, t)
    }

    pub fn fuel_needle(&self, fuel_fraction: f32) -> f32 {
        lerp(0.0, self.instruments.fuel_needle_sweep, fuel_fraction)
    }

    pub fn project(
        &self,
        state: &VehicleState,
        controls: &Controls,
        fuel: &dyn FuelTank,
    ) -> Instruments {
        let travel = self.cosmetics.pedal_travel;
        let gear_label = self.gears.label(state.current_gear);

        let engine_shake = if state.engine_active {
            let phase = state.elapsed * self.cosmetics.wiggle_speed;
            [
                phase.sin() * self.cosmetics.wiggle_amount,
                phase.cos() * self.cosmetics.wiggle_amount,
            ]
        } else {
            [0.0, 0.0]
        };

        let indicator_lever_yaw = match controls.indicator.state() {
            IndicatorState::Off => 0.0,
            IndicatorState::Left => -INDICATOR_LEVER_YAW,
            IndicatorState::Right => INDICATOR_LEVER_YAW,
        };

        let monitor_text = format!(
            "{} kmh\n{} rpm\n{} nm\n{}\n{}/{} l",
            floor_int(state.speed_kmh),
            floor_int(state.motor_rpm),
            floor_int(state.current_torque),
            gear_label,
            floor_int(fuel.current_liquid()),
            floor_int(fuel.max_liquid()),
        );

        Instruments {
            rpm_needle: self.rpm_needle(state.motor_rpm),
            speed_needle: self.speed_needle(state.speed_kmh),
            fuel_needle: self.fuel_needle(state.fuel_fraction),

            steering_wheel_yaw: state.steer_angle * self.cosmetics.steering_wheel_ratio,
            shifter_angles: self
                .instruments
                .shifter_angles
                .get(state.current_gear)
                .copied()
                .unwrap_or_default(),
            indicator_lever_yaw,
            wiper_lever_yaw: if controls.wiper.is_on() {
                WIPER_LEVER_YAW
            } else {
                0.0
            },
            handbrake_lever_pitch: if controls.handbrake.is_active() {
                HANDBRAKE_LEVER_PITCH
            } else {
                0.0
            },
            wiper_angle: controls.wiper.angle(),
            pedals: PedalTravel {
                // The gas prop only moves forward.
                gas: travel * state.throttle.max(0.0),
                brake: travel * state.brake,
                clutch: travel * state.clutch,
            },
            engine_shake,

            lights: LightOutputs {
                headlights: controls.headlights.is_active(),
                headlight_indicator: controls.headlights.is_active(),
                interior_light: controls.interior_light.is_active(),
                handbrake_indicator: controls.handbrake.is_active(),
                indicators: controls.indicator.lamps(),
            },
            gear_label,
            monitor_text,
        }
    }
}

fn floor_int(value: f32) -> i64 {
    if value.is_finite() {
        value.floor() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::VehicleConfig, cues::CueBuffer, fuel::FuelCan};
    use approx::assert_abs_diff_eq;

    fn projector() -> InstrumentProjector {
        let config = VehicleConfig::default();
        InstrumentProjector::new(
            config.instruments,
            config.cosmetics,
            config.gears,
            &config.engine,
        )
    }

    #[test]
    fn test_needles_follow_linear_maps() {
        let projector = projector();
        assert_abs_diff_eq!(projector.rpm_needle(0.0), 0.0);
        assert_abs_diff_eq!(projector.rpm_needle(3250.0), -57.5);
        assert_abs_diff_eq!(projector.rpm_needle(13000.0), -115.0);

        assert_abs_diff_eq!(projector.speed_needle(10.0), 0.0);
        assert_abs_diff_eq!(projector.speed_needle(70.0), -133.0);
        assert_abs_diff_eq!(projector.speed_needle(500.0), -266.0);

        assert_abs_diff_eq!(projector.fuel_needle(0.5), -39.0);
    }

    #[test]
    fn test_projection_leaves_state_untouched() {
        let projector = projector();
        let config = VehicleConfig::default();
        let controls = Controls::new(&config);
        let state = VehicleState {
            motor_rpm: 2500.0,
            speed_kmh: 42.0,
            ..VehicleState::default()
        };
        let before = state;

        let _ = projector.project(&state, &controls, &FuelCan::full(50.0));
        assert_eq!(state, before);
    }

    #[test]
    fn test_monitor_text_floors_values() {
        let projector = projector();
        let controls = Controls::new(&VehicleConfig::default());
        let state = VehicleState {
            speed_kmh: 57.9,
            motor_rpm: 3120.6,
            current_torque: 811.2,
            current_gear: 3,
            ..VehicleState::default()
        };
        let fuel = FuelCan::new(12.7, 50.0);

        let instruments = projector.project(&state, &controls, &fuel);
        assert_eq!(instruments.monitor_text, "57 kmh\n3120 rpm\n811 nm\n2\n12/50 l");
        assert_eq!(instruments.gear_label, "2");
        assert_eq!(instruments.shifter_angles, [-8.0, 0.0, 0.0]);
    }

    #[test]
    fn test_props_reflect_controls() {
        let projector = projector();
        let mut controls = Controls::new(&VehicleConfig::default());
        let mut cues = CueBuffer::default();
        controls.toggle_handbrake(0.0, &mut cues);
        controls.toggle_wiper(0.0, &mut cues);
        controls.press_indicator(crate::controls::IndicatorSide::Left, 0.0, &mut cues);

        let state = VehicleState {
            steer_angle: -15.0,
            throttle: 0.5,
            brake: 1.0,
            ..VehicleState::default()
        };
        let instruments = projector.project(&state, &controls, &FuelCan::full(50.0));

        assert_abs_diff_eq!(instruments.steering_wheel_yaw, -120.0);
        assert_abs_diff_eq!(instruments.handbrake_lever_pitch, -20.0);
        assert_abs_diff_eq!(instruments.wiper_lever_yaw, -15.0);
        assert_abs_diff_eq!(instruments.indicator_lever_yaw, -15.0);
        assert_abs_diff_eq!(instruments.pedals.gas, 0.05);
        assert_abs_diff_eq!(instruments.pedals.brake, 0.1);
        assert!(instruments.lights.handbrake_indicator);
        assert!(!instruments.lights.headlights);
        assert_eq!(instruments.engine_shake, [0.0, 0.0]);
    }

    #[test]
    fn test_engine_shake_only_while_running() {
        let projector = projector();
        let controls = Controls::new(&VehicleConfig::default());
        let state = VehicleState {
            engine_active: true,
            elapsed: 0.25,
            ..VehicleState::default()
        };

        let shake = projector.project(&state, &controls, &FuelCan::full(1.0)).engine_shake;
        assert_abs_diff_eq!(shake[0], 8.0_f32.sin() * 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(shake[1], 8.0_f32.cos() * 2.0, epsilon = 1e-5);
    }
}
