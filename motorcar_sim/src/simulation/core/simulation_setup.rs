// motorcar_sim/src/simulation/core/simulation_setup.rs

use std::time::Duration;

use motorcar_core::{fuel::FuelCan, vehicle::VehicleController};

use crate::prelude::*;
use crate::simulation::core::components::{
    Chassis, Dashboard, DriverInput, LatestActuation, Vehicle,
};
use crate::simulation::core::events::{VehicleCommand, VehicleCueEvent};
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::plugins::chassis::LongitudinalChassis;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add resources and startup systems.
        if !app.world().contains_resource::<ScenarioConfig>() {
            warn!("No ScenarioConfig inserted before the simulation plugin, using defaults.");
            app.init_resource::<ScenarioConfig>();
        }
        let (seed, tick_rate_hz) = {
            let config = app.world().resource::<ScenarioConfig>();
            (config.simulation.seed, config.simulation.tick_rate_hz)
        };

        // --- 1. Add the Deterministic PRNG Resource ---
        app.insert_resource(SimulationRng::from_seed_or_entropy(seed));

        // --- 2. Initialize State, Events & Fixed Timestep ---
        app.init_state::<AppState>()
            .add_event::<VehicleCueEvent>()
            .add_event::<VehicleCommand>()
            .insert_resource(Time::<Fixed>::from_duration(fixed_timestep(tick_rate_hz)));

        // --- 3. Scene building: spawn the car, then start running ---
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (spawn_vehicle, transition_to_running).chain(),
        );

        // Configure the runtime schedule graph.
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Input,
                SimulationSet::Vehicle,
                SimulationSet::Physics,
                SimulationSet::Presentation,
            )
                .chain() // .chain() enforces the order of the sets
                .run_if(in_state(AppState::Running)),
        );
    }
}

/// Fixed step for `tick_rate_hz`. A rate that is not a positive number falls
/// back to the default rate instead of panicking in `Duration`.
pub fn fixed_timestep(tick_rate_hz: f64) -> Duration {
    if tick_rate_hz.is_finite() && tick_rate_hz > 0.0 {
        Duration::from_secs_f64(1.0 / tick_rate_hz)
    } else {
        let fallback = SimulationSettings::default().tick_rate_hz;
        error!(
            "Invalid tick_rate_hz {}, falling back to {} Hz.",
            tick_rate_hz, fallback
        );
        Duration::from_secs_f64(1.0 / fallback)
    }
}

/// SPAWNING: Builds the vehicle core from the scenario and attaches everything
/// the runtime systems expect on a car entity.
fn spawn_vehicle(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let tank = FuelCan::new(config.fuel.initial, config.fuel.capacity);
    let mut controller = match VehicleController::builder(config.vehicle.clone())
        .with_fuel_tank(Box::new(tank))
        .build()
    {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to build the vehicle: {}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    if config.simulation.start_in_vehicle {
        controller.enter();
    }

    info!(
        "[SPAWN] Vehicle ready: {} gears, {:.1}/{:.1} l of fuel.",
        config.vehicle.gears.gear_count(),
        config.fuel.initial.min(config.fuel.capacity),
        config.fuel.capacity
    );

    commands.spawn((
        Name::new("Car"),
        Vehicle(controller),
        Chassis(Box::new(LongitudinalChassis::new(config.chassis.clone()))),
        DriverInput::default(),
        LatestActuation::default(),
        Dashboard::default(),
    ));
}

/// This simple system runs once at the end of the `OnEnter(SceneBuilding)` chain.
/// Its only job is to move the app into the main `Running` state.
fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("Scene building complete. Transitioning to Running state.");
    next_state.set(AppState::Running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fixed_timestep_follows_tick_rate() {
        assert_abs_diff_eq!(fixed_timestep(50.0).as_secs_f64(), 0.02, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_tick_rate_falls_back_to_default() {
        let default_step = fixed_timestep(SimulationSettings::default().tick_rate_hz);
        assert_eq!(fixed_timestep(0.0), default_step);
        assert_eq!(fixed_timestep(-30.0), default_step);
        assert_eq!(fixed_timestep(f64::NAN), default_step);
        assert_eq!(fixed_timestep(f64::INFINITY), default_step);
    }
}
