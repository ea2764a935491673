//! Stack-discipline affine transform accumulator.
//!
//! [`TransformStack`] holds the current transformation matrix (CTM). Every
//! elementary operation right-multiplies the top of the stack, so operations
//! take effect in the local frame established by everything before them:
//! translate to an anchor, rotate about it, then scale a unit primitive.

use crate::error::{Error, Result};
use crate::pose::{Joint, RobotPose};
use glam::{Mat4, Vec3};

/// An angle in degrees, either constant or read from a joint of the pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Angle {
    /// Fixed rotation baked into the rig (e.g. turning a turret to face forward).
    Fixed(f32),
    /// Current value of a controllable degree of freedom.
    Joint(Joint),
}

impl Angle {
    /// Resolves the angle in degrees against the current pose.
    pub fn degrees(self, pose: &RobotPose) -> f32 {
        match self {
            Angle::Fixed(deg) => deg,
            Angle::Joint(joint) => pose.angle(joint),
        }
    }
}

/// A single parent-relative transform step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Move the local origin.
    Translate(Vec3),
    /// Rotate about `axis` through the local origin.
    Rotate { angle: Angle, axis: Vec3 },
    /// Non-uniform scale, normally the last step before a unit primitive.
    Scale(Vec3),
    /// Rotate about `anchor` instead of the local origin.
    ///
    /// Expands to translate(anchor), rotate, translate(-anchor), leaving the
    /// origin where it was so later offsets still compose against the parent.
    Pivot { anchor: Vec3, angle: Angle, axis: Vec3 },
}

/// LIFO stack of 4x4 affine transforms.
///
/// The bottom entry is the base transform (usually the camera view) and is
/// never popped.
#[derive(Clone, Debug)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

impl TransformStack {
    /// Creates a stack whose base transform is `base`.
    pub fn new(base: Mat4) -> Self {
        Self { stack: vec![base] }
    }

    /// The current composed transform.
    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Number of outstanding pushes.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Duplicates the current transform onto the stack.
    pub fn push(&mut self) {
        let top = self.current();
        self.stack.push(top);
    }

    /// Discards the top transform, restoring the one beneath it.
    ///
    /// Popping without a matching push is a programming error: it panics in
    /// debug builds and is logged and ignored in release builds.
    pub fn pop(&mut self) {
        debug_assert!(self.depth() > 0, "transform stack underflow");
        if self.try_pop().is_err() {
            tracing::error!("transform stack underflow, keeping base transform");
        }
    }

    /// Checked variant of [`pop`](Self::pop).
    pub fn try_pop(&mut self) -> Result<()> {
        if self.depth() == 0 {
            return Err(Error::StackUnderflow);
        }
        self.stack.pop();
        Ok(())
    }

    /// Right-multiplies the current transform by `m`.
    pub fn multiply(&mut self, m: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top *= m;
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    /// Rotates by `degrees` about `axis`. The axis need not be normalized.
    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            return;
        }
        self.multiply(Mat4::from_axis_angle(axis, degrees.to_radians()));
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.multiply(Mat4::from_scale(factors));
    }

    /// Rotates about `anchor`: translate there, rotate, translate back.
    pub fn pivot(&mut self, anchor: Vec3, degrees: f32, axis: Vec3) {
        self.translate(anchor);
        self.rotate(degrees, axis);
        self.translate(-anchor);
    }

    /// Applies one transform step, resolving joint angles from `pose`.
    pub fn apply(&mut self, op: &TransformOp, pose: &RobotPose) {
        match *op {
            TransformOp::Translate(offset) => self.translate(offset),
            TransformOp::Rotate { angle, axis } => self.rotate(angle.degrees(pose), axis),
            TransformOp::Scale(factors) => self.scale(factors),
            TransformOp::Pivot { anchor, angle, axis } => {
                self.pivot(anchor, angle.degrees(pose), axis)
            }
        }
    }

    /// Applies a sequence of steps in order.
    pub fn apply_all(&mut self, ops: &[TransformOp], pose: &RobotPose) {
        for op in ops {
            self.apply(op, pose);
        }
    }
}
