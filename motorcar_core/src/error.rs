// motorcar_core/src/error.rs

use thiserror::Error;

/// Everything that can be wrong with a vehicle before it ever ticks.
///
/// Steady-state operation never produces an error: rejected transitions are
/// policy no-ops. These variants are only raised while building a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("gear table needs at least reverse, neutral and one driving gear (got {0} ratios)")]
    TooFewGears(usize),

    #[error("gear ratio at index {index} is not finite: {value}")]
    NonFiniteGearRatio { index: usize, value: f32 },

    #[error("differential ratio must be positive and finite (got {0})")]
    InvalidDifferentialRatio(f32),

    #[error("rpm range is invalid: min_rpm = {min_rpm}, max_rpm = {max_rpm}")]
    InvalidRpmRange { min_rpm: f32, max_rpm: f32 },

    #[error("motor inertia must be positive (got {0})")]
    InvalidMotorInertia(f32),

    #[error("torque curve has no keyframes")]
    EmptyTorqueCurve,

    #[error("torque curve keyframes must be sorted by rpm fraction (key {0} is out of order)")]
    UnsortedTorqueCurve(usize),

    #[error("{field} must be non-negative and finite (got {value})")]
    NegativeParameter { field: &'static str, value: f32 },

    #[error("no fuel tank is attached to the vehicle")]
    MissingFuelTank,
}
