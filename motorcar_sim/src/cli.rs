// motorcar_sim/src/cli.rs

use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Motorcar: a drivable first-person car simulation.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the Motorcar simulation library.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/test_drive.toml")]
    pub scenario: PathBuf,

    /// Run the simulation in headless mode (without a graphical window).
    #[arg(long, default_value_t = false)]
    pub headless: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["drive"]);
        assert_eq!(cli.scenario, PathBuf::from("assets/scenarios/test_drive.toml"));
        assert!(!cli.headless);
    }

    #[test]
    fn test_headless_with_custom_scenario() {
        let cli = Cli::parse_from(["drive", "--headless", "-s", "other.toml"]);
        assert!(cli.headless);
        assert_eq!(cli.scenario, PathBuf::from("other.toml"));
    }
}
