// motorcar_core/src/vehicle.rs

//! The root of the car simulation.
//!
//! [`VehicleController`] owns the state, every control, the drivetrain, the engine
//! and the instrument projector, and runs them in a fixed order once per tick:
//!
//! 1. driver input (toggles, shifts, steering) while the player is driving;
//! 2. pedals and the brake path;
//! 3. timers (ignition start, blink, wiper, door poll);
//! 4. the engine;
//! 5. wheel actuation for the external solver;
//! 6. the instrument projection, last.

use log::{debug, info};
use rand::Rng;

use crate::{
    config::VehicleConfig,
    controls::Controls,
    cues::{CueBuffer, VehicleCue},
    drivetrain::Drivetrain,
    engine::{EngineAudio, EngineModel},
    error::ConfigError,
    fuel::FuelTank,
    input::InputSnapshot,
    instruments::{InstrumentProjector, Instruments},
    interaction::{actions_from_presses, UseTarget, VehicleAction},
    occupancy::PlayerBinding,
    state::VehicleState,
    types::{ChassisFeedback, Wheel, WheelActuation},
};

/// Everything one tick hands to the host's collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub actuation: WheelActuation,
    pub instruments: Instruments,
    pub engine_audio: EngineAudio,
    /// Cues raised since the previous tick, including those from use interactions.
    pub cues: Vec<VehicleCue>,
}

// =========================================================================
// == Builder ==
// =========================================================================

/// Collects the collaborators a controller needs and validates them once, at startup.
#[derive(Debug)]
pub struct VehicleControllerBuilder {
    config: VehicleConfig,
    fuel: Option<Box<dyn FuelTank>>,
}

impl VehicleControllerBuilder {
    pub fn new(config: VehicleConfig) -> Self {
        Self { config, fuel: None }
    }

    pub fn with_fuel_tank(mut self, tank: Box<dyn FuelTank>) -> Self {
        self.fuel = Some(tank);
        self
    }

    pub fn build(self) -> Result<VehicleController, ConfigError> {
        self.config.validate()?;
        let fuel = self.fuel.ok_or(ConfigError::MissingFuelTank)?;

        let config = self.config;
        let state = VehicleState {
            fuel_fraction: fuel.fraction(),
            ..VehicleState::default()
        };

        Ok(VehicleController {
            controls: Controls::new(&config),
            drivetrain: Drivetrain::new(config.gears.clone(), config.chassis.max_steer_angle),
            engine: EngineModel::new(config.engine.clone(), config.gears.clone()),
            projector: InstrumentProjector::new(
                config.instruments.clone(),
                config.cosmetics.clone(),
                config.gears.clone(),
                &config.engine,
            ),
            binding: PlayerBinding::default(),
            fuel,
            state,
            cues: CueBuffer::default(),
            config,
        })
    }
}

// =========================================================================
// == Controller ==
// =========================================================================

#[derive(Debug)]
pub struct VehicleController {
    config: VehicleConfig,
    state: VehicleState,
    controls: Controls,
    drivetrain: Drivetrain,
    engine: EngineModel,
    projector: InstrumentProjector,
    binding: PlayerBinding,
    fuel: Box<dyn FuelTank>,
    cues: CueBuffer,
}

impl VehicleController {
    pub fn builder(config: VehicleConfig) -> VehicleControllerBuilder {
        VehicleControllerBuilder::new(config)
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn binding(&self) -> &PlayerBinding {
        &self.binding
    }

    pub fn is_driving(&self) -> bool {
        self.binding.is_driving()
    }

    pub fn fuel(&self) -> &dyn FuelTank {
        self.fuel.as_ref()
    }

    /// Mutable access for refuelling from outside the car.
    pub fn fuel_mut(&mut self) -> &mut dyn FuelTank {
        self.fuel.as_mut()
    }

    // --- Enter / exit ---

    pub fn enter(&mut self) -> bool {
        let entered = self.binding.enter();
        if entered {
            self.cues.push(VehicleCue::PlayerEntered);
        }
        entered
    }

    pub fn exit(&mut self) -> bool {
        let exited = self.binding.exit(self.controls.door.is_open());
        if exited {
            self.cues.push(VehicleCue::PlayerExited);
        }
        exited
    }

    // --- Use interactions ---

    /// The player used `target` with the primary use key.
    pub fn use_primary(&mut self, target: UseTarget) {
        self.perform(target.primary_action());
    }

    /// The player used `target` with the secondary use key. Ignored by targets
    /// that only go one way.
    pub fn use_secondary(&mut self, target: UseTarget) {
        match target.secondary_action() {
            Some(action) => self.perform(action),
            None => debug!("{target:?} has no secondary use."),
        }
    }

    /// Applies one discrete action immediately. Cues are collected for the next tick.
    pub fn perform(&mut self, action: VehicleAction) {
        let now = self.state.elapsed;
        let cues = &mut self.cues;

        match action {
            VehicleAction::Enter => {
                self.enter();
            }
            VehicleAction::Exit => {
                self.exit();
            }
            VehicleAction::Ignition => self.controls.press_ignition(&mut self.state, cues),
            VehicleAction::ShiftUp => {
                self.drivetrain.shift_up(&mut self.state, cues);
            }
            VehicleAction::ShiftDown => {
                self.drivetrain.shift_down(&mut self.state, cues);
            }
            VehicleAction::IndicatorLeft | VehicleAction::IndicatorRight => {
                if let Some(side) = action.indicator_side() {
                    self.controls.press_indicator(side, now, cues);
                }
            }
            VehicleAction::Headlights => self.controls.toggle_headlights(now, cues),
            VehicleAction::InteriorLight => self.controls.toggle_interior_light(now, cues),
            VehicleAction::Handbrake => self.controls.toggle_handbrake(now, cues),
            VehicleAction::Wiper => self.controls.toggle_wiper(now, cues),
            VehicleAction::Door => self.controls.toggle_door(now, cues),
        }
    }

    // --- Tick ---

    /// Runs one simulation step of `dt` seconds.
    ///
    /// `feedback` is what the chassis solver reported after the previous step.
    /// Driver input is only read while the player is driving; otherwise the
    /// pedals read as released and the steering holds its last angle.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        feedback: &ChassisFeedback,
        rng: &mut R,
        dt: f32,
    ) -> TickOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.state.elapsed += dt;
        self.state.speed_kmh = feedback.speed_kmh();

        // 1. Driver input
        let input = input.sanitized();
        let driving = self.binding.is_driving();
        if driving {
            for action in actions_from_presses(&input.presses) {
                self.perform(action);
            }
            self.drivetrain.set_steer(&mut self.state, input.steer);
        }
        let (throttle, brake, clutch) = if driving {
            (input.throttle, input.brake, input.clutch)
        } else {
            (0.0, 0.0, 0.0)
        };

        // 2. Pedals
        self.controls.pedals.apply(
            &mut self.state,
            throttle,
            brake,
            clutch,
            self.controls.handbrake.is_active(),
            &mut self.cues,
        );

        // 3. Timers
        self.controls
            .advance(dt, feedback.door_angle, &mut self.cues);

        // 4. Engine
        let output = self.engine.update(
            &mut self.state,
            throttle,
            feedback.average_front_wheel_rpm(),
            self.fuel.as_mut(),
            rng,
            dt,
        );
        if output.stalled {
            info!("Engine stalled at {:.0} rpm.", output.motor_rpm);
            self.controls.ignition.cancel_startup();
            self.cues.push(VehicleCue::EngineStalled);
        }
        self.state.wheel_motor_torque = self.state.current_torque * throttle;

        // 5. Actuation
        let actuation = self.actuation(feedback);

        // 6. Instruments
        let instruments = self
            .projector
            .project(&self.state, &self.controls, self.fuel.as_ref());

        TickOutput {
            actuation,
            instruments,
            engine_audio: self.engine.audio(),
            cues: self.cues.drain(),
        }
    }

    fn actuation(&self, feedback: &ChassisFeedback) -> WheelActuation {
        let mut actuation = WheelActuation {
            steer_angle: self.state.steer_angle,
            door_hinge: self.controls.door.hinge(),
            visual_poses: feedback.wheel_poses,
            ..WheelActuation::default()
        };
        for wheel in Wheel::ALL {
            let i = wheel.index();
            if wheel.is_front() {
                actuation.motor_torque[i] = self.state.wheel_motor_torque;
                actuation.brake_torque[i] = self.state.brake_torque_front;
            } else {
                actuation.brake_torque[i] = self.state.brake_torque_rear;
            }
        }
        actuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::NEUTRAL_GEAR, controls::IndicatorState, fuel::FuelCan, input::ButtonPresses};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f32 = 0.02;

    fn controller() -> VehicleController {
        VehicleController::builder(VehicleConfig::default())
            .with_fuel_tank(Box::new(FuelCan::full(50.0)))
            .build()
            .expect("default config builds")
    }

    fn press(presses: ButtonPresses) -> InputSnapshot {
        InputSnapshot {
            presses,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn test_build_without_tank_is_config_error() {
        let result = VehicleController::builder(VehicleConfig::default()).build();
        assert!(matches!(result, Err(ConfigError::MissingFuelTank)));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = VehicleConfig::default();
        config.gears.ratios.clear();
        let result = VehicleController::builder(config)
            .with_fuel_tank(Box::new(FuelCan::full(10.0)))
            .build();
        assert!(matches!(result, Err(ConfigError::TooFewGears(0))));
    }

    #[test]
    fn test_input_is_ignored_while_walking() {
        let mut car = controller();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let input = InputSnapshot {
            steer: 1.0,
            throttle: 1.0,
            brake: 1.0,
            presses: ButtonPresses {
                ignition: true,
                ..ButtonPresses::default()
            },
            ..InputSnapshot::default()
        };

        let out = car.tick(&input, &ChassisFeedback::default(), &mut rng, DT);
        assert!(!car.state().engine_active);
        assert_eq!(car.state().steer_angle, 0.0);
        assert_eq!(out.actuation.brake_torque, [0.0; 4]);
        assert!(out.cues.is_empty());
    }

    #[test]
    fn test_enter_start_and_drive_in_first_gear() {
        let mut car = controller();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let feedback = ChassisFeedback::default();

        car.use_primary(UseTarget::Drive);
        let out = car.tick(
            &press(ButtonPresses {
                ignition: true,
                shift_up: true,
                ..ButtonPresses::default()
            }),
            &feedback,
            &mut rng,
            DT,
        );
        assert_eq!(
            out.cues,
            vec![
                VehicleCue::PlayerEntered,
                VehicleCue::EngineStart,
                VehicleCue::ShiftUp
            ]
        );
        assert_eq!(car.state().current_gear, NEUTRAL_GEAR + 1);

        let throttle = InputSnapshot {
            throttle: 1.0,
            steer: -0.5,
            ..InputSnapshot::default()
        };
        let mut last = None;
        for _ in 0..50 {
            last = Some(car.tick(&throttle, &feedback, &mut rng, DT));
        }
        let Some(out) = last else { unreachable!() };

        assert!(car.state().motor_rpm > 0.0);
        assert!(out.actuation.motor_torque[0] > 0.0);
        assert_eq!(out.actuation.motor_torque[0], out.actuation.motor_torque[1]);
        assert_eq!(out.actuation.motor_torque[2], 0.0);
        assert_abs_diff_eq!(out.actuation.steer_angle, -15.0);
        assert_eq!(out.instruments.gear_label, "1");
    }

    #[test]
    fn test_idle_loop_cue_after_start_clip() {
        let mut car = controller();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let feedback = ChassisFeedback::default();
        car.enter();
        car.perform(VehicleAction::Ignition);

        let mut cues = Vec::new();
        for _ in 0..100 {
            cues.extend(car.tick(&InputSnapshot::default(), &feedback, &mut rng, DT).cues);
        }
        let idle = cues.iter().filter(|c| **c == VehicleCue::EngineIdleLoop).count();
        assert_eq!(idle, 1);
    }

    #[test]
    fn test_exit_needs_open_door() {
        let mut car = controller();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let feedback = ChassisFeedback::default();
        car.enter();

        let exit = press(ButtonPresses {
            exit: true,
            ..ButtonPresses::default()
        });
        car.tick(&exit, &feedback, &mut rng, DT);
        assert!(car.is_driving());

        car.use_primary(UseTarget::Door);
        let out = car.tick(&exit, &feedback, &mut rng, DT);
        assert!(!car.is_driving());
        assert!(out.cues.contains(&VehicleCue::DoorOpen));
        assert!(out.cues.contains(&VehicleCue::PlayerExited));
        assert!(car.binding().locomotion_enabled);
    }

    #[test]
    fn test_handbrake_holds_rear_axle_without_driver() {
        let mut car = controller();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        car.use_primary(UseTarget::Handbrake);

        let out = car.tick(
            &InputSnapshot::default(),
            &ChassisFeedback::default(),
            &mut rng,
            DT,
        );
        assert_eq!(out.actuation.brake_torque, [0.0, 0.0, 3000.0, 3000.0]);
        assert_eq!(out.cues, vec![VehicleCue::HandbrakeOn]);
        assert!(out.instruments.lights.handbrake_indicator);
    }

    #[test]
    fn test_secondary_use_routes_shifter_and_indicator() {
        let mut car = controller();
        car.use_secondary(UseTarget::Shifter);
        assert_eq!(car.state().current_gear, NEUTRAL_GEAR - 1);

        car.use_secondary(UseTarget::Indicator);
        assert_eq!(car.controls().indicator.state(), IndicatorState::Right);

        let before = car.controls().wiper;
        car.use_secondary(UseTarget::Wiper);
        assert_eq!(car.controls().wiper, before);
    }

    #[test]
    fn test_running_dry_stalls_once() {
        let mut car = VehicleController::builder(VehicleConfig::default())
            .with_fuel_tank(Box::new(FuelCan::new(0.001, 50.0)))
            .build()
            .expect("valid");
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let feedback = ChassisFeedback::default();
        car.enter();
        car.perform(VehicleAction::Ignition);

        let mut cues = Vec::new();
        for _ in 0..200 {
            cues.extend(car.tick(&InputSnapshot::default(), &feedback, &mut rng, DT).cues);
        }

        assert!(!car.state().engine_active);
        assert_eq!(car.fuel().current_liquid(), 0.0);
        assert_eq!(car.state().fuel_fraction, 0.0);
        assert_eq!(
            cues.iter().filter(|c| **c == VehicleCue::EngineStalled).count(),
            1
        );
        assert_eq!(car.state().current_torque, 0.0);
    }

    #[test]
    fn test_visual_poses_pass_through() {
        let mut car = controller();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut feedback = ChassisFeedback::default();
        feedback.wheel_poses[Wheel::RearRight.index()] =
            nalgebra::Isometry3::translation(1.0, 0.0, -1.5);

        let out = car.tick(&InputSnapshot::default(), &feedback, &mut rng, DT);
        assert_eq!(out.actuation.visual_poses, feedback.wheel_poses);
    }
}
