// motorcar_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the scenario file that
//! configures a run: the car, its tank, the chassis stand-in and the
//! optional driver script.

pub mod structs;

use std::path::{Path, PathBuf};

use figment::{
    providers::{Format, Toml},
    Figment,
};
use motorcar_core::error::ConfigError;
use thiserror::Error;

pub use structs::{ChassisSettings, FuelSettings, ScenarioConfig, ScriptEntry, SimulationSettings};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error("invalid vehicle configuration: {0}")]
    Vehicle(#[from] ConfigError),

    #[error("invalid [simulation] section: {0}")]
    Simulation(String),
}

/// Reads `path`, checks it and sorts the driver script by time.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioConfig, ScenarioError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ScenarioError::NotFound(path.to_path_buf()));
    }
    from_figment(Figment::new().merge(Toml::file(path)))
}

/// Same as [`load_scenario`] for a scenario held in memory.
pub fn parse_scenario(toml: &str) -> Result<ScenarioConfig, ScenarioError> {
    from_figment(Figment::new().merge(Toml::string(toml)))
}

fn from_figment(figment: Figment) -> Result<ScenarioConfig, ScenarioError> {
    let mut config: ScenarioConfig = figment.extract().map_err(Box::new)?;
    config.validate()?;
    config
        .script
        .sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(config)
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.vehicle.validate()?;

        let sim = &self.simulation;
        if !(sim.duration_seconds.is_finite() && sim.duration_seconds > 0.0) {
            return Err(ScenarioError::Simulation(format!(
                "duration_seconds must be positive, got {}",
                sim.duration_seconds
            )));
        }
        if !(sim.tick_rate_hz.is_finite() && sim.tick_rate_hz > 0.0) {
            return Err(ScenarioError::Simulation(format!(
                "tick_rate_hz must be positive, got {}",
                sim.tick_rate_hz
            )));
        }
        if self.fuel.capacity < 0.0 || self.fuel.initial < 0.0 {
            return Err(ScenarioError::Simulation(
                "fuel capacity and initial level must not be negative".to_string(),
            ));
        }
        if let Some(entry) = self.script.iter().find(|e| !(e.at.is_finite() && e.at >= 0.0)) {
            return Err(ScenarioError::Simulation(format!(
                "script entry time must be a non-negative number, got {}",
                entry.at
            )));
        }
        Ok(())
    }
}
