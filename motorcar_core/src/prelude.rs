// motorcar_core/src/prelude.rs

// --- Core Abstractions (the seams a host implements) ---
pub use crate::fuel::FuelTank;
pub use crate::types::ChassisSolver;

// --- Core Data Structures ---
pub use crate::cues::{CueBuffer, VehicleCue};
pub use crate::input::{ButtonPresses, InputSnapshot};
pub use crate::state::VehicleState;
pub use crate::types::{ChassisFeedback, HingeCommand, Wheel, WheelActuation, WheelPose};

// --- Configuration & Errors ---
pub use crate::config::{
    ChassisConfig, CosmeticsConfig, DoorConfig, EngineConfig, GearTable, InstrumentConfig,
    TorqueCurve, VehicleConfig,
};
pub use crate::error::ConfigError;

// --- Vehicle ---
pub use crate::controls::{Controls, IndicatorSide, IndicatorState};
pub use crate::engine::{EngineAudio, EngineModel};
pub use crate::fuel::FuelCan;
pub use crate::instruments::{InstrumentProjector, Instruments};
pub use crate::interaction::{UseTarget, VehicleAction};
pub use crate::occupancy::PlayerBinding;
pub use crate::vehicle::{TickOutput, VehicleController, VehicleControllerBuilder};
