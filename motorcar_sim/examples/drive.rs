// motorcar_sim/examples/drive.rs

//! Drive the car from a scenario file.
//!
//! Windowed runs read the keyboard:
//! * `U` sit in the car, `F` open/close the door, `G` get out (door must be open)
//! * `I` ignition, `X`/`Z` shift up/down, `W`/`S` gas/brake, `A`/`D` steer
//! * `Q`/`E` indicators, `L` headlights, `K` interior light, `V` wiper, `Space` handbrake
//!
//! Headless runs play the scenario's `[[script]]` and log cues and telemetry.
//!
//! To run this example:
//! `cargo run --example drive -- --headless`

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use clap::Parser;

use motorcar_sim::cli::Cli;
use motorcar_sim::simulation::config::load_scenario;
use motorcar_sim::simulation::core::simulation_setup::fixed_timestep;
use motorcar_sim::MotorcarSimulationPlugin;

const LOG_FILTER: &str = "info,wgpu_core=error,wgpu_hal=error,motorcar_sim=debug,motorcar_core=debug";

fn main() -> AppExit {
    let cli = Cli::parse();

    // --- 1. Load Simulation Configuration ---
    println!("Loading scenario from: {}", cli.scenario.display());
    let config = match load_scenario(&cli.scenario) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load scenario '{}': {}", cli.scenario.display(), e);
            return AppExit::error();
        }
    };
    let tick = fixed_timestep(config.simulation.tick_rate_hz);

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    let log_plugin = LogPlugin {
        level: bevy::log::Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };
    if cli.headless {
        app.add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)),
            log_plugin,
            bevy::state::app::StatesPlugin,
        ));
    } else {
        app.add_plugins(DefaultPlugins.set(log_plugin));
    }

    // Insert the loaded configuration as a Bevy resource so all systems can access it.
    app.insert_resource(config).insert_resource(cli);

    // --- 3. Add the Main Motorcar Simulation Plugin ---
    app.add_plugins(MotorcarSimulationPlugin);

    // --- 4. Run the App ---
    println!("Starting Motorcar Simulation...");
    app.run()
}
