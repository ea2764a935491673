//! Joint state of the robot.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// A controllable rotational degree of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    /// Body yaw about the vertical axis.
    RobotYaw,
    /// Head pitch about the lateral axis. Hard-clamped.
    HeadPitch,
    /// Right shoulder swing, used when the shoulder pivot is attached.
    Shoulder,
    /// Gun pitch relative to the arm.
    Gun,
    /// Wheel spin about the lateral axis.
    WheelSpin,
    /// Spin of the decorative cube next to the robot.
    CubeSpin,
}

/// Signed pitch range for the head. Up is negative, down is positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadLimits {
    pub up: f32,
    pub down: f32,
}

impl Default for HeadLimits {
    fn default() -> Self {
        Self {
            up: -40.0,
            down: 20.0,
        }
    }
}

impl HeadLimits {
    pub fn contains(&self, degrees: f32) -> bool {
        (self.up..=self.down).contains(&degrees)
    }
}

/// Every mutable degree of freedom of the robot, in degrees and world units.
///
/// Read once per frame by the evaluator; written only by the input
/// controller and the animation driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotPose {
    pub robot_angle: f32,
    pub head_angle: f32,
    pub shoulder_angle: f32,
    pub gun_angle: f32,
    pub wheel_turn: f32,
    /// World-plane position along X.
    pub position_x: f32,
    /// World-plane position along Z.
    pub position_z: f32,
    pub cube_angle: f32,
}

impl Default for RobotPose {
    fn default() -> Self {
        Self {
            robot_angle: 0.0,
            head_angle: 0.0,
            shoulder_angle: -40.0,
            gun_angle: -25.0,
            wheel_turn: 0.0,
            position_x: 0.0,
            position_z: 0.0,
            cube_angle: 0.0,
        }
    }
}

impl RobotPose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `joint` in degrees.
    pub fn angle(&self, joint: Joint) -> f32 {
        match joint {
            Joint::RobotYaw => self.robot_angle,
            Joint::HeadPitch => self.head_angle,
            Joint::Shoulder => self.shoulder_angle,
            Joint::Gun => self.gun_angle,
            Joint::WheelSpin => self.wheel_turn,
            Joint::CubeSpin => self.cube_angle,
        }
    }

    /// World-space translation of the robot root.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position_x, 0.0, self.position_z)
    }

    /// Unit vector the robot drives along, in the XZ plane.
    pub fn facing(&self) -> Vec3 {
        let rad = self.robot_angle.to_radians();
        Vec3::new(rad.sin(), 0.0, rad.cos())
    }

    /// Turns the body by `delta` degrees, wrapping into `[0, 360)`.
    pub fn turn(&mut self, delta: f32) {
        self.robot_angle = wrap_degrees(self.robot_angle + delta);
    }

    /// Pitches the head by `delta` degrees if the result stays within `limits`.
    ///
    /// Returns `false` and leaves the head untouched otherwise.
    pub fn pitch_head(&mut self, delta: f32, limits: &HeadLimits) -> bool {
        let next = self.head_angle + delta;
        if !limits.contains(next) {
            return false;
        }
        self.head_angle = next;
        true
    }

    /// Moves `distance` units along the current facing and spins the wheel
    /// by `wheel_delta` degrees. Negative values reverse.
    pub fn drive(&mut self, distance: f32, wheel_delta: f32) {
        let step = self.facing() * distance;
        self.position_x += step.x;
        self.position_z += step.z;
        self.wheel_turn = wrap_degrees(self.wheel_turn + wheel_delta);
    }

    /// Wraps yaw, wheel, shoulder and cube angles into `[0, 360)`.
    pub fn wrap_spins(&mut self) {
        self.robot_angle = wrap_degrees(self.robot_angle);
        self.wheel_turn = wrap_degrees(self.wheel_turn);
        self.shoulder_angle = wrap_degrees(self.shoulder_angle);
        self.cube_angle = wrap_degrees(self.cube_angle);
    }

    pub fn swing_shoulder(&mut self, delta: f32) {
        self.shoulder_angle = wrap_degrees(self.shoulder_angle + delta);
    }

    pub fn spin_cube(&mut self, delta: f32) {
        self.cube_angle = wrap_degrees(self.cube_angle + delta);
    }
}
