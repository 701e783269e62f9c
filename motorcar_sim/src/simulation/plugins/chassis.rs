// motorcar_sim/src/simulation/plugins/chassis.rs

//! A small planar stand-in for the physics engine's wheel colliders.
//!
//! The body moves along its heading with one longitudinal speed; yaw follows a
//! kinematic bicycle model. Drive torque on the front wheels pushes, brake
//! torque opposes motion and never reverses it, drag and rolling resistance
//! slow the car down. The driver's door hinge is integrated here too, since
//! the core only commands it.

use std::f32::consts::PI;

use motorcar_core::types::{ChassisFeedback, ChassisSolver, Wheel, WheelActuation, WheelPose};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use crate::{
    prelude::*,
    simulation::core::components::{Chassis, LatestActuation},
};

// --- THE PLUGIN ---
pub struct ChassisPlugin;

impl Plugin for ChassisPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, step_chassis.in_set(SimulationSet::Physics));
    }
}

/// RUNTIME: Applies the latest actuation to every chassis and advances it.
fn step_chassis(time: Res<Time>, mut query: Query<(&mut Chassis, &LatestActuation)>) {
    let dt = time.delta_secs();
    for (mut chassis, actuation) in &mut query {
        chassis.0.apply(&actuation.0, dt);
    }
}

// --- THE SOLVER ---

#[derive(Debug, Clone)]
pub struct LongitudinalChassis {
    params: ChassisSettings,
    /// Signed speed along the heading, m/s.
    speed: f32,
    heading: f32,
    position: Vector3<f32>,
    steer_angle: f32,
    wheel_rpm: f32,
    door_angle: f32,
}

impl LongitudinalChassis {
    pub fn new(params: ChassisSettings) -> Self {
        Self {
            params,
            speed: 0.0,
            heading: 0.0,
            position: Vector3::zeros(),
            steer_angle: 0.0,
            wheel_rpm: 0.0,
            door_angle: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn body_pose(&self) -> Isometry3<f32> {
        Isometry3::from_parts(
            Translation3::from(self.position),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.heading),
        )
    }

    /// Ground-contact pose of one wheel. Front wheels are turned by the steer angle.
    fn wheel_pose(&self, wheel: Wheel) -> WheelPose {
        let half_base = self.params.wheelbase / 2.0;
        let half_track = self.params.track_width / 2.0;
        let (x, y) = match wheel {
            Wheel::FrontLeft => (half_base, half_track),
            Wheel::FrontRight => (half_base, -half_track),
            Wheel::RearLeft => (-half_base, half_track),
            Wheel::RearRight => (-half_base, -half_track),
        };
        let yaw = if wheel.is_front() {
            self.steer_angle.to_radians()
        } else {
            0.0
        };
        let local = Isometry3::from_parts(
            Translation3::new(x, y, -self.params.wheel_radius),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw),
        );
        self.body_pose() * local
    }
}

impl ChassisSolver for LongitudinalChassis {
    fn apply(&mut self, actuation: &WheelActuation, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let p = &self.params;
        let radius = p.wheel_radius.max(1e-3);
        let mass = p.mass.max(1.0);

        // --- Drive and resistance ---
        let drive_force: f32 = actuation.motor_torque.iter().sum::<f32>() / radius;
        let drag = p.drag_coefficient * self.speed * self.speed.abs();
        let rolling = p.rolling_resistance * self.speed;
        self.speed += (drive_force - drag - rolling) / mass * dt;

        // --- Brakes: oppose motion, never push backwards ---
        let brake_force: f32 = actuation.brake_torque.iter().sum::<f32>() / radius;
        let brake_dv = brake_force / mass * dt;
        if self.speed.abs() <= brake_dv {
            self.speed = 0.0;
        } else {
            self.speed -= brake_dv * self.speed.signum();
        }

        // --- Kinematic bicycle yaw ---
        self.steer_angle = actuation.steer_angle;
        let yaw_rate = self.speed / p.wheelbase.max(1e-3) * self.steer_angle.to_radians().tan();
        self.heading += yaw_rate * dt;
        self.position += Vector3::new(self.heading.cos(), self.heading.sin(), 0.0) * self.speed * dt;

        self.wheel_rpm = self.speed / radius * 60.0 / (2.0 * PI);

        // --- Door hinge ---
        let hinge = actuation.door_hinge;
        if hinge.use_motor {
            let next = self.door_angle + hinge.target_velocity * dt;
            // Limits stop the motor's travel; a door already past them swings back freely.
            let upper = hinge.limits[1].max(self.door_angle);
            self.door_angle = next.clamp(hinge.limits[0], upper);
        }
    }

    fn feedback(&self) -> ChassisFeedback {
        ChassisFeedback {
            front_wheel_rpm: [self.wheel_rpm; 2],
            speed_ms: self.speed.abs(),
            wheel_poses: Wheel::ALL.map(|wheel| self.wheel_pose(wheel)),
            door_angle: self.door_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use motorcar_core::types::HingeCommand;

    const DT: f32 = 1.0 / 60.0;

    fn drive(torque: f32) -> WheelActuation {
        WheelActuation {
            motor_torque: [torque, torque, 0.0, 0.0],
            ..WheelActuation::default()
        }
    }

    #[test]
    fn test_drive_torque_accelerates_and_spins_wheels() {
        let mut chassis = LongitudinalChassis::new(ChassisSettings::default());
        for _ in 0..60 {
            chassis.apply(&drive(500.0), DT);
        }
        let feedback = chassis.feedback();
        assert!(chassis.speed() > 0.0);
        assert!(feedback.front_wheel_rpm[0] > 0.0);
        assert_abs_diff_eq!(feedback.speed_ms, chassis.speed());
        assert!(chassis.position().x > 0.0);
    }

    #[test]
    fn test_brakes_stop_without_reversing() {
        let mut chassis = LongitudinalChassis::new(ChassisSettings::default());
        for _ in 0..120 {
            chassis.apply(&drive(800.0), DT);
        }
        let braking = WheelActuation {
            brake_torque: [3000.0; 4],
            ..WheelActuation::default()
        };
        for _ in 0..600 {
            chassis.apply(&braking, DT);
            assert!(chassis.speed() >= 0.0);
        }
        assert_eq!(chassis.speed(), 0.0);
    }

    #[test]
    fn test_steering_turns_heading() {
        let mut chassis = LongitudinalChassis::new(ChassisSettings::default());
        let mut actuation = drive(400.0);
        actuation.steer_angle = 20.0;
        for _ in 0..120 {
            chassis.apply(&actuation, DT);
        }
        assert!(chassis.heading() > 0.0);
    }

    #[test]
    fn test_door_opens_to_limit_and_swings_shut() {
        let mut chassis = LongitudinalChassis::new(ChassisSettings::default());
        let open = WheelActuation {
            door_hinge: HingeCommand {
                limits: [0.0, 90.0],
                target_velocity: 180.0,
                force: 100.0,
                use_motor: true,
            },
            ..WheelActuation::default()
        };
        for _ in 0..60 {
            chassis.apply(&open, DT);
        }
        assert_abs_diff_eq!(chassis.feedback().door_angle, 90.0);

        let close = WheelActuation {
            door_hinge: HingeCommand {
                limits: [0.0, 0.0],
                target_velocity: -180.0,
                force: 100.0,
                use_motor: true,
            },
            ..WheelActuation::default()
        };
        chassis.apply(&close, DT);
        let angle = chassis.feedback().door_angle;
        assert!(angle > 0.0 && angle < 90.0);

        for _ in 0..60 {
            chassis.apply(&close, DT);
        }
        assert_eq!(chassis.feedback().door_angle, 0.0);
    }

    #[test]
    fn test_front_wheel_poses_follow_steering() {
        let mut chassis = LongitudinalChassis::new(ChassisSettings::default());
        let actuation = WheelActuation {
            steer_angle: 30.0,
            ..WheelActuation::default()
        };
        chassis.apply(&actuation, DT);

        let poses = chassis.feedback().wheel_poses;
        let front_yaw = poses[Wheel::FrontLeft.index()].rotation.euler_angles().2;
        let rear_yaw = poses[Wheel::RearLeft.index()].rotation.euler_angles().2;
        assert_abs_diff_eq!(front_yaw, 30.0_f32.to_radians(), epsilon = 1e-5);
        assert_abs_diff_eq!(rear_yaw, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(poses[Wheel::FrontLeft.index()].translation.x, 1.3, epsilon = 1e-5);
    }
}
