// motorcar_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use motorcar_core::{
    config::VehicleConfig,
    interaction::{UseTarget, VehicleAction},
};
use serde::Deserialize;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The primary Bevy resource holding all configuration for a simulation run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: SimulationSettings,

    /// The car itself: gears, engine, brakes, cosmetics.
    #[serde(default)]
    pub vehicle: VehicleConfig,

    #[serde(default)]
    pub fuel: FuelSettings,

    /// Parameters of the stand-in wheel/body solver.
    #[serde(default)]
    pub chassis: ChassisSettings,

    // The TOML has `[[script]]`, which becomes a Vec of ScriptEntry structs.
    #[serde(default)]
    pub script: Vec<ScriptEntry>,
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SimulationSettings {
    /// Optional seed for the pseudo-random number generator for determinism.
    #[serde(default)]
    pub seed: Option<u64>,
    /// The app exits after this many simulated seconds.
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f32,
    /// Rate of the fixed simulation step, in Hz.
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: f64,
    /// Put the player in the driver's seat before the first tick.
    #[serde(default)]
    pub start_in_vehicle: bool,
}

fn default_duration_seconds() -> f32 {
    30.0
}

fn default_tick_rate_hz() -> f64 {
    60.0
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            duration_seconds: default_duration_seconds(),
            tick_rate_hz: default_tick_rate_hz(),
            start_in_vehicle: false,
        }
    }
}

/// The car's tank, in litres.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct FuelSettings {
    pub capacity: f32,
    pub initial: f32,
}

impl Default for FuelSettings {
    fn default() -> Self {
        Self {
            capacity: 50.0,
            initial: 50.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ChassisSettings {
    /// Body mass in kg.
    pub mass: f32,
    /// Rolling radius of every wheel in metres.
    pub wheel_radius: f32,
    pub wheelbase: f32,
    pub track_width: f32,
    /// Aerodynamic drag, `F = c * v * |v|`.
    pub drag_coefficient: f32,
    /// Rolling resistance, `F = c * v`.
    pub rolling_resistance: f32,
}

impl Default for ChassisSettings {
    fn default() -> Self {
        Self {
            mass: 1200.0,
            wheel_radius: 0.34,
            wheelbase: 2.6,
            track_width: 1.5,
            drag_coefficient: 0.43,
            rolling_resistance: 12.0,
        }
    }
}

/// One timed driver action for headless runs.
///
/// ```toml
/// [[script]]
/// at = 0.5
/// use = "drive"
///
/// [[script]]
/// at = 1.0
/// action = "ignition"
///
/// [[script]]
/// at = 3.0
/// throttle = 0.8
/// ```
///
/// Axis values hold until a later entry changes them.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScriptEntry {
    /// Simulated time in seconds at which the entry fires.
    pub at: f32,

    /// Use a part of the car, like clicking on it.
    #[serde(default, rename = "use")]
    pub use_target: Option<UseTarget>,
    /// Make `use` the secondary use (right click).
    #[serde(default)]
    pub secondary: bool,

    /// Press a cabin button.
    #[serde(default)]
    pub action: Option<VehicleAction>,

    #[serde(default)]
    pub throttle: Option<f32>,
    #[serde(default)]
    pub brake: Option<f32>,
    #[serde(default)]
    pub clutch: Option<f32>,
    #[serde(default)]
    pub steer: Option<f32>,
}
