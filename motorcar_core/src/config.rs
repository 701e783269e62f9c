// motorcar_core/src/config.rs

use serde::Deserialize;

use crate::error::ConfigError;

// =========================================================================
// == Top-Level Vehicle Configuration ==
// =========================================================================

/// # VehicleConfig
/// Static, read-only parameters of one car. Loaded once (usually from the
/// `[vehicle]` table of a scenario file) and validated before the controller
/// is built. Every section falls back to a drivable default.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct VehicleConfig {
    #[serde(default)]
    pub gears: GearTable,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub chassis: ChassisConfig,

    #[serde(default)]
    pub cosmetics: CosmeticsConfig,

    #[serde(default)]
    pub door: DoorConfig,

    #[serde(default)]
    pub instruments: InstrumentConfig,
}

impl VehicleConfig {
    /// Checks every invariant the per-tick update relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gears.validate()?;
        self.engine.validate()?;

        non_negative("chassis.brake_force", self.chassis.brake_force)?;
        non_negative("chassis.max_steer_angle", self.chassis.max_steer_angle)?;
        non_negative("chassis.rear_brake_share", self.chassis.rear_brake_share)?;
        non_negative("cosmetics.wiper_speed", self.cosmetics.wiper_speed)?;
        non_negative("cosmetics.wiper_sweep", self.cosmetics.wiper_sweep)?;
        non_negative("cosmetics.blink_interval", self.cosmetics.blink_interval)?;
        non_negative("door.open_angle", self.door.open_angle)?;
        non_negative("door.open_speed", self.door.open_speed)?;
        non_negative("door.close_speed", self.door.close_speed)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeParameter { field, value })
    }
}

// =========================================================================
// == Gear Table & Torque Curve ==
// =========================================================================

/// Index of the reverse gear in every gear table.
pub const REVERSE_GEAR: usize = 0;
/// Index of neutral in every gear table. The engine idles here.
pub const NEUTRAL_GEAR: usize = 1;

/// Ordered gear ratios plus the differential and the engine's torque curve.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GearTable {
    /// `[reverse, neutral, first, second, ...]`. Reverse is usually negative so the
    /// resulting wheel torque pushes backwards.
    #[serde(default = "default_gear_ratios")]
    pub ratios: Vec<f32>,

    #[serde(default = "default_differential_ratio")]
    pub differential_ratio: f32,

    #[serde(default)]
    pub torque_curve: TorqueCurve,
}

impl Default for GearTable {
    fn default() -> Self {
        Self {
            ratios: default_gear_ratios(),
            differential_ratio: default_differential_ratio(),
            torque_curve: TorqueCurve::default(),
        }
    }
}

fn default_gear_ratios() -> Vec<f32> {
    vec![-3.2, 0.0, 3.6, 2.2, 1.5, 1.0]
}

fn default_differential_ratio() -> f32 {
    4.0
}

impl GearTable {
    pub fn gear_count(&self) -> usize {
        self.ratios.len()
    }

    /// Ratio of `gear`, or zero for an index outside the table.
    pub fn ratio(&self, gear: usize) -> f32 {
        self.ratios.get(gear).copied().unwrap_or(0.0)
    }

    /// Combined gear × differential multiplier between wheel and crank.
    pub fn overall_ratio(&self, gear: usize) -> f32 {
        self.ratio(gear) * self.differential_ratio
    }

    /// Display label: `R`, `N`, then `1`, `2`, ... for the driving gears.
    pub fn label(&self, gear: usize) -> String {
        match gear {
            REVERSE_GEAR => "R".to_string(),
            NEUTRAL_GEAR => "N".to_string(),
            n => (n - 1).to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ratios.len() < 3 {
            return Err(ConfigError::TooFewGears(self.ratios.len()));
        }
        for (index, &value) in self.ratios.iter().enumerate() {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteGearRatio { index, value });
            }
        }
        if !(self.differential_ratio.is_finite() && self.differential_ratio > 0.0) {
            return Err(ConfigError::InvalidDifferentialRatio(self.differential_ratio));
        }
        self.torque_curve.validate()
    }
}

/// A keyframed curve from normalized engine RPM (`rpm / max_rpm`) to a torque
/// multiplier. Evaluated with linear interpolation and clamped at both ends.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TorqueCurve {
    /// `[rpm_fraction, multiplier]` pairs, sorted by fraction.
    pub keys: Vec<[f32; 2]>,
}

impl Default for TorqueCurve {
    fn default() -> Self {
        Self {
            keys: vec![
                [0.0, 0.3],
                [0.25, 0.7],
                [0.55, 1.0],
                [0.85, 0.9],
                [1.0, 0.6],
            ],
        }
    }
}

impl TorqueCurve {
    pub fn evaluate(&self, rpm_fraction: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if rpm_fraction <= first[0] {
            return first[1];
        }
        if rpm_fraction >= last[0] {
            return last[1];
        }

        for pair in self.keys.windows(2) {
            let [x0, y0] = pair[0];
            let [x1, y1] = pair[1];
            if rpm_fraction <= x1 {
                let span = x1 - x0;
                if span <= f32::EPSILON {
                    return y1;
                }
                return y0 + (y1 - y0) * (rpm_fraction - x0) / span;
            }
        }
        last[1]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::EmptyTorqueCurve);
        }
        for (i, pair) in self.keys.windows(2).enumerate() {
            if !(pair[1][0] >= pair[0][0]) {
                return Err(ConfigError::UnsortedTorqueCurve(i + 1));
            }
        }
        Ok(())
    }
}

// =========================================================================
// == Engine ==
// =========================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "default_min_rpm")]
    pub min_rpm: f32,
    #[serde(default = "default_max_rpm")]
    pub max_rpm: f32,
    /// Scales the torque curve into wheel torque.
    #[serde(default = "default_motor_force")]
    pub motor_force: f32,
    /// Rate multiplier for RPM tracking in gear. Higher values follow the wheels faster.
    #[serde(default = "default_motor_inertia")]
    pub motor_inertia: f32,
    /// Litres burned per RPM per second while the engine runs.
    #[serde(default = "default_gas_consumption")]
    pub gas_consumption: f32,
    /// Half-width of the idle hunting noise added to the neutral RPM target.
    #[serde(default = "default_idle_noise_rpm")]
    pub idle_noise_rpm: f32,
    /// Length of the starter clip. The idle loop begins once it has played.
    #[serde(default = "default_start_clip_seconds")]
    pub start_clip_seconds: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_rpm: default_min_rpm(),
            max_rpm: default_max_rpm(),
            motor_force: default_motor_force(),
            motor_inertia: default_motor_inertia(),
            gas_consumption: default_gas_consumption(),
            idle_noise_rpm: default_idle_noise_rpm(),
            start_clip_seconds: default_start_clip_seconds(),
        }
    }
}

fn default_min_rpm() -> f32 {
    800.0
}
fn default_max_rpm() -> f32 {
    6500.0
}
fn default_motor_force() -> f32 {
    100.0
}
fn default_motor_inertia() -> f32 {
    2.0
}
fn default_gas_consumption() -> f32 {
    0.0001
}
fn default_idle_noise_rpm() -> f32 {
    50.0
}
fn default_start_clip_seconds() -> f32 {
    1.2
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range_ok = self.min_rpm.is_finite()
            && self.max_rpm.is_finite()
            && self.min_rpm >= 0.0
            && self.max_rpm > self.min_rpm;
        if !range_ok {
            return Err(ConfigError::InvalidRpmRange {
                min_rpm: self.min_rpm,
                max_rpm: self.max_rpm,
            });
        }
        if !(self.motor_inertia.is_finite() && self.motor_inertia > 0.0) {
            return Err(ConfigError::InvalidMotorInertia(self.motor_inertia));
        }
        non_negative("engine.motor_force", self.motor_force)?;
        non_negative("engine.gas_consumption", self.gas_consumption)?;
        non_negative("engine.idle_noise_rpm", self.idle_noise_rpm)?;
        non_negative("engine.start_clip_seconds", self.start_clip_seconds)?;
        Ok(())
    }

    /// Lowest RPM the engine settles at while a driving gear is engaged.
    pub fn in_gear_floor_rpm(&self) -> f32 {
        self.min_rpm - 100.0
    }
}

// =========================================================================
// == Chassis, Cosmetics, Door, Instruments ==
// =========================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ChassisConfig {
    /// Full brake torque per wheel. The handbrake applies exactly this to the rear axle.
    pub brake_force: f32,
    /// Front wheel steer angle at full lock, in degrees.
    pub max_steer_angle: f32,
    /// Fraction of the pedal brake torque routed to the rear wheels.
    pub rear_brake_share: f32,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            brake_force: 3000.0,
            max_steer_angle: 30.0,
            rear_brake_share: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct CosmeticsConfig {
    /// Wiper arm speed in degrees per second.
    pub wiper_speed: f32,
    /// Upper bound of the wiper sweep in degrees.
    pub wiper_sweep: f32,
    /// Seconds between indicator lamp flips.
    pub blink_interval: f32,
    /// Engine shake amplitude applied to the motor and steering wheel props.
    pub wiggle_amount: f32,
    pub wiggle_speed: f32,
    /// Steering-wheel prop rotation per degree of wheel steer.
    pub steering_wheel_ratio: f32,
    /// Pedal prop travel at full input.
    pub pedal_travel: f32,
}

impl Default for CosmeticsConfig {
    fn default() -> Self {
        Self {
            wiper_speed: 64.0,
            wiper_sweep: 100.0,
            blink_interval: 0.35,
            wiggle_amount: 2.0,
            wiggle_speed: 32.0,
            steering_wheel_ratio: 8.0,
            pedal_travel: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct DoorConfig {
    /// How far the door swings open, in degrees.
    pub open_angle: f32,
    pub open_speed: f32,
    pub close_speed: f32,
    /// Hinge motor force requested while the door moves.
    pub motor_force: f32,
    /// The door counts as shut once the hinge is within this many degrees of closed.
    pub closed_tolerance: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            open_angle: 90.0,
            open_speed: 2.0,
            close_speed: 2.0,
            motor_force: 100.0,
            closed_tolerance: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct InstrumentConfig {
    pub rpm_needle_sweep: f32,
    pub speed_needle_sweep: f32,
    /// Speed (km/h) where the speed needle leaves its rest position.
    pub speed_needle_offset: f32,
    /// Speed span (km/h) covered by the full needle sweep.
    pub speed_needle_span: f32,
    pub fuel_needle_sweep: f32,
    /// Shifter lever euler angles per gear index. Gears without an entry rest at zero.
    pub shifter_angles: Vec<[f32; 3]>,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            rpm_needle_sweep: -115.0,
            speed_needle_sweep: -266.0,
            speed_needle_offset: 20.0,
            speed_needle_span: 100.0,
            fuel_needle_sweep: -78.0,
            shifter_angles: vec![
                [8.0, 0.0, 8.0],
                [0.0, 0.0, 0.0],
                [8.0, 0.0, 0.0],
                [-8.0, 0.0, 0.0],
                [8.0, 0.0, -8.0],
                [-8.0, 0.0, -8.0],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(VehicleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_gear_labels() {
        let gears = GearTable::default();
        let labels: Vec<String> = (0..gears.gear_count()).map(|g| gears.label(g)).collect();
        assert_eq!(labels, vec!["R", "N", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_torque_curve_interpolates_and_clamps() {
        let curve = TorqueCurve {
            keys: vec![[0.0, 0.2], [0.5, 1.0], [1.0, 0.5]],
        };
        assert_abs_diff_eq!(curve.evaluate(-1.0), 0.2);
        assert_abs_diff_eq!(curve.evaluate(0.25), 0.6);
        assert_abs_diff_eq!(curve.evaluate(0.75), 0.75);
        assert_abs_diff_eq!(curve.evaluate(4.0), 0.5);
    }

    #[test]
    fn test_rejects_short_gear_table() {
        let mut config = VehicleConfig::default();
        config.gears.ratios = vec![-3.0, 0.0];
        assert_eq!(config.validate(), Err(ConfigError::TooFewGears(2)));
    }

    #[test]
    fn test_rejects_inverted_rpm_range() {
        let mut config = VehicleConfig::default();
        config.engine.min_rpm = 7000.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRpmRange { .. })
        ));
    }

    #[test]
    fn test_rejects_unsorted_curve() {
        let mut config = VehicleConfig::default();
        config.gears.torque_curve.keys = vec![[0.5, 1.0], [0.2, 0.4]];
        assert_eq!(config.validate(), Err(ConfigError::UnsortedTorqueCurve(1)));
    }
}
