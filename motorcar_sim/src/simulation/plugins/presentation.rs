// motorcar_sim/src/simulation/plugins/presentation.rs

//! Stand-ins for the audio and dashboard collaborators: cues and telemetry go
//! to the log. Also ends the run once the scenario duration has elapsed.

use motorcar_core::cues::VehicleCue;

use crate::{
    prelude::*,
    simulation::core::{
        components::{Dashboard, Vehicle},
        events::VehicleCueEvent,
    },
};

/// How often the dashboard monitor is written to the log.
#[derive(Resource)]
pub struct TelemetryTimer(pub Timer);

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

// --- THE PLUGIN ---
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TelemetryTimer>()
            .add_systems(
                FixedUpdate,
                (log_cues, log_telemetry, finish_after_duration)
                    .chain()
                    .in_set(SimulationSet::Presentation),
            )
            .add_systems(OnEnter(AppState::Finished), report_and_exit);
    }
}

/// What the audio collaborator would do with a cue.
pub fn describe_cue(cue: VehicleCue) -> &'static str {
    match cue {
        VehicleCue::EngineStart => "motor: play start clip",
        VehicleCue::EngineIdleLoop => "motor: loop idle clip",
        VehicleCue::EngineStop => "motor: stop loop, play stop clip",
        VehicleCue::EngineStalled => "motor: stalled, out of fuel",
        VehicleCue::InsertKey => "interior: key",
        VehicleCue::ShiftUp => "interior: shift up",
        VehicleCue::ShiftDown => "interior: shift down",
        VehicleCue::LeverPull => "interior: lever pull",
        VehicleCue::LightSwitch => "interior: light switch",
        VehicleCue::HandbrakeOn => "interior: handbrake on",
        VehicleCue::HandbrakeOff => "interior: handbrake off",
        VehicleCue::IndicatorLoopStart => "indicator: start loop",
        VehicleCue::IndicatorLoopStop => "indicator: stop loop",
        VehicleCue::WiperLoopStart => "wiper: start loop",
        VehicleCue::WiperLoopStop => "wiper: stop loop",
        VehicleCue::BrakeSqueal => "brakes: squeal",
        VehicleCue::BrakeRelease => "brakes: stop",
        VehicleCue::DoorOpen => "door: open",
        VehicleCue::DoorClose => "door: close",
        VehicleCue::PlayerEntered => "player: entered the car",
        VehicleCue::PlayerExited => "player: left the car",
    }
}

fn log_cues(time: Res<Time>, mut cues: EventReader<VehicleCueEvent>) {
    for VehicleCueEvent(cue) in cues.read() {
        info!("[{:>7.2}s] {}", time.elapsed_secs(), describe_cue(*cue));
    }
}

fn log_telemetry(
    time: Res<Time>,
    mut timer: ResMut<TelemetryTimer>,
    query: Query<(&Name, &Dashboard)>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    for (name, dashboard) in &query {
        if let Some(instruments) = &dashboard.0 {
            info!(
                "[{:>7.2}s] {} | {}",
                time.elapsed_secs(),
                name,
                instruments.monitor_text.replace('\n', " | ")
            );
        }
    }
}

fn finish_after_duration(
    time: Res<Time>,
    config: Res<ScenarioConfig>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if time.elapsed_secs() >= config.simulation.duration_seconds {
        info!(
            "Scenario duration of {:.1}s reached.",
            config.simulation.duration_seconds
        );
        next_state.set(AppState::Finished);
    }
}

/// Logs the final state of every car and closes the app.
fn report_and_exit(query: Query<(&Name, &Vehicle)>, mut exit: EventWriter<AppExit>) {
    for (name, vehicle) in &query {
        let state = vehicle.0.state();
        info!(
            "{} final: engine {}, gear {}, {:.0} rpm, {:.1} km/h, fuel {:.1}/{:.1} l, driving {}",
            name,
            if state.engine_active { "on" } else { "off" },
            vehicle.0.config().gears.label(state.current_gear),
            state.motor_rpm,
            state.speed_kmh,
            vehicle.0.fuel().current_liquid(),
            vehicle.0.fuel().max_liquid(),
            vehicle.0.is_driving(),
        );
    }
    exit.write(AppExit::Success);
}
