// motorcar_sim/src/simulation/plugins/vehicle.rs

use motorcar_core::input::ButtonPresses;

use crate::{
    prelude::*,
    simulation::core::{
        components::{Chassis, Dashboard, DriverInput, LatestActuation, Vehicle},
        events::{VehicleCommand, VehicleCueEvent},
        prng::SimulationRng,
    },
};

// --- THE PLUGIN ---
pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (apply_vehicle_commands, tick_vehicles)
                .chain()
                .in_set(SimulationSet::Vehicle),
        );
    }
}

// --- SYSTEMS ---

/// RUNTIME: Routes use clicks and scripted actions into every car.
fn apply_vehicle_commands(
    mut commands: EventReader<VehicleCommand>,
    mut query: Query<&mut Vehicle>,
) {
    for command in commands.read() {
        for mut vehicle in &mut query {
            match *command {
                VehicleCommand::Use {
                    target,
                    secondary: false,
                } => vehicle.0.use_primary(target),
                VehicleCommand::Use {
                    target,
                    secondary: true,
                } => vehicle.0.use_secondary(target),
                VehicleCommand::Perform(action) => vehicle.0.perform(action),
            }
        }
    }
}

/// RUNTIME: One `VehicleController::tick` per car, fed by the input mailbox and
/// the chassis feedback from the previous physics step.
fn tick_vehicles(
    time: Res<Time>,
    mut rng: ResMut<SimulationRng>,
    mut cue_writer: EventWriter<VehicleCueEvent>,
    mut query: Query<(
        &mut Vehicle,
        &mut DriverInput,
        &Chassis,
        &mut LatestActuation,
        &mut Dashboard,
    )>,
) {
    let dt = time.delta_secs();
    for (mut vehicle, mut input, chassis, mut actuation, mut dashboard) in &mut query {
        let feedback = chassis.0.feedback();
        let output = vehicle.0.tick(&input.0, &feedback, &mut rng.0, dt);

        // Button edges are consumed by exactly one tick; axes stay as written.
        input.0.presses = ButtonPresses::default();

        actuation.0 = output.actuation;
        dashboard.0 = Some(output.instruments);
        cue_writer.write_batch(output.cues.into_iter().map(VehicleCueEvent));
    }
}
