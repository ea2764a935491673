//! Pose evaluation: walks the part tree against the transform stack.

use crate::backend::RenderBackend;
use crate::material::MaterialPalette;
use crate::pose::{Joint, RobotPose};
use crate::rig::{PartNode, Rig};
use crate::transform_stack::{Angle, TransformOp, TransformStack};
use glam::Vec3;

/// Evaluates a [`Rig`] for a given pose and submits it to a backend.
pub struct PoseEvaluator<'a> {
    rig: &'a Rig,
    palette: &'a MaterialPalette,
}

impl<'a> PoseEvaluator<'a> {
    pub fn new(rig: &'a Rig, palette: &'a MaterialPalette) -> Self {
        Self { rig, palette }
    }

    /// Draws the whole robot.
    ///
    /// The robot frame is the current transform translated to the pose's
    /// world position and yawed by `robot_angle`. World-fixed parts are drawn
    /// afterwards against the untouched current transform.
    pub fn draw_robot<B: RenderBackend>(
        &self,
        pose: &RobotPose,
        stack: &mut TransformStack,
        backend: &mut B,
    ) {
        let depth = stack.depth();

        stack.push();
        stack.apply_all(&self.root_placement(pose), pose);
        for node in &self.rig.robot {
            self.draw_part(node, pose, stack, backend);
        }
        stack.pop();

        for node in &self.rig.fixed {
            self.draw_part(node, pose, stack, backend);
        }

        debug_assert_eq!(stack.depth(), depth, "robot left the stack unbalanced");
    }

    fn root_placement(&self, pose: &RobotPose) -> [TransformOp; 2] {
        [
            TransformOp::Translate(pose.position()),
            TransformOp::Rotate {
                angle: Angle::Joint(Joint::RobotYaw),
                axis: Vec3::Y,
            },
        ]
    }

    /// Draws one part and its subtree relative to the current transform.
    ///
    /// Children are drawn in the part's origin frame, then the part's own
    /// primitive is drawn under its local shape steps.
    pub fn draw_part<B: RenderBackend>(
        &self,
        node: &PartNode,
        pose: &RobotPose,
        stack: &mut TransformStack,
        backend: &mut B,
    ) {
        let depth = stack.depth();

        stack.push();
        stack.apply_all(&node.placement, pose);
        tracing::trace!(part = %node.id, "drawing part");
        backend.enter_part(node.id, stack.current());

        for child in &node.children {
            self.draw_part(child, pose, stack, backend);
        }

        if let Some(shape) = &node.shape {
            backend.set_material(self.palette.get(node.material));
            stack.push();
            stack.apply_all(&shape.local, pose);
            backend.draw_primitive(&shape.primitive, stack.current());
            stack.pop();
        }

        backend.exit_part(node.id);
        stack.pop();

        debug_assert_eq!(stack.depth(), depth, "part {} unbalanced", node.id);
    }
}
