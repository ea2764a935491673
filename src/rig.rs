//! The robot's part hierarchy as an explicit tree of node descriptors.
//!
//! Each [`PartNode`] carries the parent-relative transform recipe that
//! positions its origin, the children that inherit that frame, and the
//! scaled unit primitive it draws itself. [`Rig::build`] assembles the
//! default tree and re-attaches optional parts from [`RigConfig`].

use crate::material::MaterialClass;
use crate::parts;
use crate::primitive::Primitive;
use crate::proportions::RobotProportions;
use crate::transform_stack::TransformOp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a rigid body part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartId {
    Body,
    LowerBody,
    Stanchion,
    Pedestal,
    Head,
    TurretBase,
    Turret,
    Sensor,
    LeftArm,
    RightArm,
    Gun,
    Wheel,
    LeftCap,
    RightCap,
    Tire,
}

impl PartId {
    pub const ALL: [PartId; 15] = [
        PartId::Body,
        PartId::LowerBody,
        PartId::Stanchion,
        PartId::Pedestal,
        PartId::Head,
        PartId::TurretBase,
        PartId::Turret,
        PartId::Sensor,
        PartId::LeftArm,
        PartId::RightArm,
        PartId::Gun,
        PartId::Wheel,
        PartId::LeftCap,
        PartId::RightCap,
        PartId::Tire,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PartId::Body => "body",
            PartId::LowerBody => "lower_body",
            PartId::Stanchion => "stanchion",
            PartId::Pedestal => "pedestal",
            PartId::Head => "head",
            PartId::TurretBase => "turret_base",
            PartId::Turret => "turret",
            PartId::Sensor => "sensor",
            PartId::LeftArm => "left_arm",
            PartId::RightArm => "right_arm",
            PartId::Gun => "gun",
            PartId::Wheel => "wheel",
            PartId::LeftCap => "left_cap",
            PartId::RightCap => "right_cap",
            PartId::Tire => "tire",
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The primitive a part draws for itself, with the local steps (scale,
/// orientation fix-ups) applied only to that primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct PartShape {
    pub local: Vec<TransformOp>,
    pub primitive: Primitive,
}

/// One node of the part tree.
#[derive(Clone, Debug, PartialEq)]
pub struct PartNode {
    pub id: PartId,
    pub material: MaterialClass,
    /// Parent-relative steps positioning this part's origin. Children
    /// inherit the resulting frame.
    pub placement: Vec<TransformOp>,
    pub children: Vec<PartNode>,
    pub shape: Option<PartShape>,
}

impl PartNode {
    pub fn new(id: PartId, material: MaterialClass) -> Self {
        Self {
            id,
            material,
            placement: Vec::new(),
            children: Vec::new(),
            shape: None,
        }
    }

    pub fn with_placement(mut self, placement: Vec<TransformOp>) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_child(mut self, child: PartNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_shape(mut self, local: Vec<TransformOp>, primitive: Primitive) -> Self {
        self.shape = Some(PartShape { local, primitive });
        self
    }

    /// Depth-first search for `id` in this subtree.
    pub fn find(&self, id: PartId) -> Option<&PartNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(PartNode::count).sum::<usize>()
    }
}

/// Optional parts and joints to attach on top of the default tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Draw the main body block under the robot frame.
    pub body: bool,
    pub left_arm: bool,
    /// Draw the stanchion and pedestal in the world frame, unaffected by
    /// robot movement and yaw.
    pub lower_body: bool,
    /// Attach the gun under the right arm.
    pub gun: bool,
    /// Swing the right arm about its shoulder by the shoulder joint.
    pub shoulder_joint: bool,
}

/// The assembled part tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Rig {
    /// Parts placed in the robot frame (after world translation and yaw).
    pub robot: Vec<PartNode>,
    /// Parts placed directly in the world frame.
    pub fixed: Vec<PartNode>,
}

impl Rig {
    /// Builds the part tree for `proportions`.
    ///
    /// With a default `config` the robot frame holds Head, Right-Arm and
    /// Wheel, in that order, and the world frame is empty.
    pub fn build(proportions: &RobotProportions, config: &RigConfig) -> Self {
        let mut robot = Vec::new();
        if config.body {
            robot.push(parts::body(proportions));
        }
        if config.left_arm {
            robot.push(parts::left_arm(proportions));
        }
        robot.push(parts::head(proportions));

        let mut right_arm = parts::right_arm(proportions, config.shoulder_joint);
        if config.gun {
            right_arm = right_arm.with_child(parts::gun(proportions));
        }
        robot.push(right_arm);
        robot.push(parts::wheel(proportions));

        let mut fixed = Vec::new();
        if config.lower_body {
            fixed.push(parts::lower_body(proportions));
        }

        Self { robot, fixed }
    }

    pub fn find(&self, id: PartId) -> Option<&PartNode> {
        self.robot
            .iter()
            .chain(self.fixed.iter())
            .find_map(|node| node.find(id))
    }

    pub fn part_count(&self) -> usize {
        self.robot
            .iter()
            .chain(self.fixed.iter())
            .map(PartNode::count)
            .sum()
    }
}
