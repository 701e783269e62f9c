// motorcar_core/src/types.rs

use nalgebra::Isometry3;
use std::fmt::Debug;

// --- Core Type Aliases ---
pub type WheelPose = Isometry3<f32>;

/// Index into every per-wheel array: front-left, front-right, rear-left, rear-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wheel {
    FrontLeft = 0,
    FrontRight = 1,
    RearLeft = 2,
    RearRight = 3,
}

impl Wheel {
    pub const ALL: [Wheel; 4] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::RearLeft,
        Wheel::RearRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_front(self) -> bool {
        matches!(self, Wheel::FrontLeft | Wheel::FrontRight)
    }
}

// --- Physics Collaborator Data ---

/// What the wheel/body solver reports back each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChassisFeedback {
    /// Signed rotational speed of the two front wheels, in revolutions per minute.
    pub front_wheel_rpm: [f32; 2],
    /// Magnitude of the body's linear velocity, in m/s.
    pub speed_ms: f32,
    /// World-space ground-contact pose of each wheel, indexed by [`Wheel`].
    pub wheel_poses: [WheelPose; 4],
    /// Current driver-door hinge angle in degrees (0 = shut).
    pub door_angle: f32,
}

impl Default for ChassisFeedback {
    fn default() -> Self {
        Self {
            front_wheel_rpm: [0.0; 2],
            speed_ms: 0.0,
            wheel_poses: [WheelPose::identity(); 4],
            door_angle: 0.0,
        }
    }
}

impl ChassisFeedback {
    pub fn average_front_wheel_rpm(&self) -> f32 {
        (self.front_wheel_rpm[0] + self.front_wheel_rpm[1]) / 2.0
    }

    pub fn speed_kmh(&self) -> f32 {
        self.speed_ms * 3.6
    }
}

/// Motor drive and limits requested from the door hinge joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingeCommand {
    /// Allowed hinge range in degrees, `[min, max]`.
    pub limits: [f32; 2],
    /// Motor target velocity in degrees per second. Negative closes the door.
    pub target_velocity: f32,
    pub force: f32,
    pub use_motor: bool,
}

impl Default for HingeCommand {
    fn default() -> Self {
        Self {
            limits: [0.0, 0.0],
            target_velocity: 0.0,
            force: 0.0,
            use_motor: false,
        }
    }
}

/// Everything the core writes to the wheel actuators in one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelActuation {
    pub motor_torque: [f32; 4],
    pub brake_torque: [f32; 4],
    /// Steer angle of both front wheels, in degrees.
    pub steer_angle: f32,
    pub door_hinge: HingeCommand,
    /// Where the visual wheel meshes should be placed (copied from the solver).
    pub visual_poses: [WheelPose; 4],
}

impl Default for WheelActuation {
    fn default() -> Self {
        Self {
            motor_torque: [0.0; 4],
            brake_torque: [0.0; 4],
            steer_angle: 0.0,
            door_hinge: HingeCommand::default(),
            visual_poses: [WheelPose::identity(); 4],
        }
    }
}

// --- Core Trait for the Wheel Solver ---
// The host's physics engine implements this; tests use a stub.
pub trait ChassisSolver: Debug + Send + Sync {
    /// Applies the latest actuation and advances the body by `dt` seconds.
    fn apply(&mut self, actuation: &WheelActuation, dt: f32);

    /// The state the vehicle controller should see on its next tick.
    fn feedback(&self) -> ChassisFeedback;
}
