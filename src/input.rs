//! Keyboard control of the robot pose.
//!
//! Keys map to [`ControlOp`]s through a table, the same way symbols map to
//! operations in an interpreter. Configure it with [`InputController::set_key`]
//! or [`InputController::populate_standard_keys`].

use crate::error::{Error, Result};
use crate::pose::{HeadLimits, RobotPose};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Step sizes and limits for keyboard control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Body yaw per key press, in degrees.
    pub turn_step: f32,
    /// Head pitch per key press, in degrees.
    pub pitch_step: f32,
    /// Distance moved per key press.
    pub drive_step: f32,
    /// Wheel spin per drive step, in degrees.
    pub wheel_step: f32,
    pub head_limits: HeadLimits,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            turn_step: 2.0,
            pitch_step: 2.0,
            drive_step: 2.0,
            wheel_step: 20.0,
            head_limits: HeadLimits::default(),
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.head_limits.up > self.head_limits.down {
            return Err(Error::Config(format!(
                "head limits inverted: up {} > down {}",
                self.head_limits.up, self.head_limits.down
            )));
        }
        Ok(())
    }
}

/// Pose mutations triggered by a key. The `f32` is a direction sign.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlOp {
    /// Yaw the body (`r` / `R`).
    Turn(f32),
    /// Pitch the head, clamped (`a` / `A`).
    Pitch(f32),
    /// Drive along the facing direction (`w` / `s`).
    Drive(f32),
    /// Key has no registered meaning.
    Ignore,
}

/// Maps key presses to pose mutations.
#[derive(Clone, Debug, Default)]
pub struct InputController {
    key_map: HashMap<char, ControlOp>,
    config: ControlConfig,
}

impl InputController {
    /// Creates a controller with an empty key map.
    pub fn new(config: ControlConfig) -> Self {
        Self {
            key_map: HashMap::new(),
            config,
        }
    }

    /// Creates a controller with the standard key bindings.
    pub fn with_standard_keys(config: ControlConfig) -> Self {
        let mut controller = Self::new(config);
        controller.populate_standard_keys();
        controller
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn set_key(&mut self, key: char, op: ControlOp) {
        self.key_map.insert(key, op);
    }

    /// Registers `r`/`R` turn, `a`/`A` head pitch, `w`/`s` drive.
    pub fn populate_standard_keys(&mut self) {
        let mappings = [
            ('r', ControlOp::Turn(1.0)),
            ('R', ControlOp::Turn(-1.0)),
            ('a', ControlOp::Pitch(1.0)),
            ('A', ControlOp::Pitch(-1.0)),
            ('w', ControlOp::Drive(1.0)),
            ('s', ControlOp::Drive(-1.0)),
        ];
        for (key, op) in mappings {
            self.set_key(key, op);
        }
    }

    pub fn op_for(&self, key: char) -> ControlOp {
        self.key_map.get(&key).copied().unwrap_or(ControlOp::Ignore)
    }

    /// Applies `op` to `pose`. Returns whether the pose changed.
    ///
    /// Head pitch is checked against the limits before mutating, so an
    /// out-of-range angle is never stored.
    pub fn apply(&self, op: ControlOp, pose: &mut RobotPose) -> bool {
        let cfg = &self.config;
        match op {
            ControlOp::Turn(s) => {
                pose.turn(s * cfg.turn_step);
                true
            }
            ControlOp::Pitch(s) => {
                let applied = pose.pitch_head(s * cfg.pitch_step, &cfg.head_limits);
                if !applied {
                    tracing::debug!(head_angle = pose.head_angle, "head pitch at limit");
                }
                applied
            }
            ControlOp::Drive(s) => {
                pose.drive(s * cfg.drive_step, s * cfg.wheel_step);
                true
            }
            ControlOp::Ignore => false,
        }
    }

    /// Handles one key press. Returns whether the pose changed.
    pub fn on_key_press(&self, key: char, pose: &mut RobotPose) -> bool {
        let op = self.op_for(key);
        let changed = self.apply(op, pose);
        tracing::debug!(?key, ?op, changed, "key press");
        changed
    }
}
