//! Part descriptors, one builder per rigid body part.
//!
//! All offsets are fractions of [`RobotProportions`] and all angles are in
//! degrees. Within a placement, a translation that anchors a pivot always
//! precedes the rotation about it.

use crate::material::MaterialClass;
use crate::pose::Joint;
use crate::primitive::Primitive;
use crate::proportions::RobotProportions;
use crate::rig::{PartId, PartNode};
use crate::transform_stack::{Angle, TransformOp};
use glam::Vec3;

const CYLINDER: Primitive = Primitive::Cylinder {
    base_radius: 1.0,
    top_radius: 1.0,
    height: 1.0,
    slices: 20,
    stacks: 10,
};

fn translate(x: f32, y: f32, z: f32) -> TransformOp {
    TransformOp::Translate(Vec3::new(x, y, z))
}

fn rotate(degrees: f32, axis: Vec3) -> TransformOp {
    TransformOp::Rotate {
        angle: Angle::Fixed(degrees),
        axis,
    }
}

fn joint(joint: Joint, axis: Vec3) -> TransformOp {
    TransformOp::Rotate {
        angle: Angle::Joint(joint),
        axis,
    }
}

fn scale(x: f32, y: f32, z: f32) -> TransformOp {
    TransformOp::Scale(Vec3::new(x, y, z))
}

/// Builds the subtree rooted at `id` in isolation.
///
/// Optional attachments (gun, shoulder joint) are not included; use
/// [`right_arm`] and [`gun`] directly to compose them.
pub fn part(p: &RobotProportions, id: PartId) -> PartNode {
    match id {
        PartId::Body => body(p),
        PartId::LowerBody => lower_body(p),
        PartId::Stanchion => stanchion(p),
        PartId::Pedestal => pedestal(p),
        PartId::Head => head(p),
        PartId::TurretBase => turret_base(p),
        PartId::Turret => turret(p),
        PartId::Sensor => sensor(p),
        PartId::LeftArm => left_arm(p),
        PartId::RightArm => right_arm(p, false),
        PartId::Gun => gun(p),
        PartId::Wheel => wheel(p),
        PartId::LeftCap => left_cap(p),
        PartId::RightCap => right_cap(p),
        PartId::Tire => tire(p),
    }
}

/// Main body block, centred on the robot origin.
pub fn body(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Body, MaterialClass::Body).with_shape(
        vec![scale(p.body_width, p.body_length, p.body_depth)],
        Primitive::UnitCube,
    )
}

/// Fixed stand below the robot: a stanchion on a square pedestal.
pub fn lower_body(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::LowerBody, MaterialClass::LowerBody)
        .with_placement(vec![translate(0.0, -1.5 * p.body_length, 0.0)])
        .with_child(stanchion(p))
        .with_child(pedestal(p))
}

pub fn stanchion(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Stanchion, MaterialClass::LowerBody).with_shape(
        vec![
            scale(p.stanchion_radius, p.stanchion_length, p.stanchion_radius),
            rotate(-90.0, Vec3::X),
        ],
        CYLINDER,
    )
}

pub fn pedestal(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Pedestal, MaterialClass::LowerBody).with_shape(
        vec![
            translate(0.0, -0.25 * p.stanchion_length, 0.0),
            scale(p.base_width, p.base_length, p.base_width),
            rotate(-90.0, Vec3::X),
        ],
        Primitive::UnitCube,
    )
}

/// Head block, pitched by the head joint. Carries the turret and sensor.
pub fn head(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Head, MaterialClass::Body)
        .with_placement(vec![
            translate(-p.arm_width, 0.0, 0.0),
            translate(0.0, 0.5 * p.arm_length - 0.5 * p.head_length, 0.0),
            joint(Joint::HeadPitch, Vec3::X),
        ])
        .with_child(turret_base(p))
        .with_child(sensor(p))
        .with_shape(
            vec![scale(p.head_width, p.head_length, p.head_depth)],
            Primitive::UnitCube,
        )
}

/// Sits on top of the head.
pub fn turret_base(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::TurretBase, MaterialClass::Arm)
        .with_placement(vec![translate(
            0.0,
            0.5 * p.head_length + 0.5 * p.turret_base_length,
            0.0,
        )])
        .with_child(turret(p))
        .with_shape(
            vec![scale(
                p.turret_base_width,
                p.turret_base_length,
                p.turret_base_depth,
            )],
            Primitive::UnitCube,
        )
}

/// Barrel on the turret base, turned to point forward along +Z.
pub fn turret(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Turret, MaterialClass::Arm)
        .with_placement(vec![
            translate(0.0, 0.0, 0.5 * p.turret_length),
            rotate(90.0, Vec3::X),
        ])
        .with_shape(
            vec![scale(p.turret_width, p.turret_length, p.turret_width)],
            Primitive::UnitCube,
        )
}

/// Ring sensor on the front face of the head.
pub fn sensor(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Sensor, MaterialClass::Arm)
        .with_placement(vec![translate(0.0, 0.0, 0.5 * p.head_depth)])
        .with_shape(
            Vec::new(),
            Primitive::Torus {
                inner_radius: p.sensor_inner_radius,
                outer_radius: p.sensor_outer_radius,
                sides: 4,
                rings: 60,
            },
        )
}

pub fn left_arm(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::LeftArm, MaterialClass::Arm)
        .with_placement(vec![translate(
            0.5 * p.body_width + 0.5 * p.arm_width,
            0.0,
            0.0,
        )])
        .with_shape(
            vec![scale(p.arm_width, p.arm_length, p.arm_width)],
            Primitive::UnitCube,
        )
}

/// Right arm, lowered to clear the wheel.
///
/// With `shoulder_joint` the arm first swings about the top of the
/// shoulder by the shoulder joint angle.
pub fn right_arm(p: &RobotProportions, shoulder_joint: bool) -> PartNode {
    let lateral = 0.5 * p.body_width + 0.5 * p.arm_width;
    let mut placement = Vec::new();
    if shoulder_joint {
        placement.push(TransformOp::Pivot {
            anchor: Vec3::new(-lateral, 0.5 * p.arm_length, 0.0),
            angle: Angle::Joint(Joint::Shoulder),
            axis: Vec3::X,
        });
    }
    placement.push(translate(0.0, -0.5 * p.wheel_radius, 0.0));
    placement.push(translate(-lateral, 0.0, 0.0));

    PartNode::new(PartId::RightArm, MaterialClass::Arm)
        .with_placement(placement)
        .with_shape(
            vec![scale(p.arm_width, p.arm_length, p.arm_width)],
            Primitive::UnitCube,
        )
}

/// Gun hanging below the arm, pitched about the arm's lower end.
pub fn gun(p: &RobotProportions) -> PartNode {
    let lateral = 0.5 * p.body_width + 0.5 * p.arm_width;
    PartNode::new(PartId::Gun, MaterialClass::Gun)
        .with_placement(vec![
            TransformOp::Pivot {
                anchor: Vec3::new(-lateral, -0.5 * p.arm_length, 0.0),
                angle: Angle::Joint(Joint::Gun),
                axis: Vec3::X,
            },
            translate(0.0, -(0.5 * p.arm_length + 0.5 * p.gun_length), 0.0),
        ])
        .with_shape(
            vec![scale(p.gun_width, p.gun_length, p.gun_depth)],
            Primitive::UnitCube,
        )
}

/// Drive wheel at the bottom of the body, spun by the wheel joint.
///
/// The cylinder runs along -X from the wheel origin; caps close both ends
/// and the tire cube marks rotation.
pub fn wheel(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Wheel, MaterialClass::Arm)
        .with_placement(vec![
            translate(0.5 * p.body_width, -0.5 * p.body_length, 0.0),
            joint(Joint::WheelSpin, Vec3::X),
        ])
        .with_child(right_cap(p))
        .with_child(left_cap(p))
        .with_child(tire(p))
        .with_shape(
            vec![
                scale(p.wheel_length, p.wheel_radius, p.wheel_radius),
                rotate(-90.0, Vec3::Y),
            ],
            CYLINDER,
        )
}

fn cap(p: &RobotProportions) -> Primitive {
    Primitive::Disk {
        inner_radius: 0.0,
        outer_radius: p.wheel_radius,
        slices: 40,
        loops: 40,
    }
}

/// Cap at the far end of the wheel cylinder, facing -X.
pub fn left_cap(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::LeftCap, MaterialClass::Arm)
        .with_placement(vec![translate(-p.wheel_length, 0.0, 0.0)])
        .with_shape(vec![rotate(-90.0, Vec3::Y)], cap(p))
}

/// Cap at the wheel origin, facing +X.
pub fn right_cap(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::RightCap, MaterialClass::Arm)
        .with_shape(vec![rotate(90.0, Vec3::Y)], cap(p))
}

/// Unit cube displaced off the wheel axis as a tread marker.
pub fn tire(p: &RobotProportions) -> PartNode {
    PartNode::new(PartId::Tire, MaterialClass::Arm)
        .with_placement(vec![translate(
            -(0.5 * p.wheel_length + 0.5),
            0.5 * p.wheel_length + 0.5,
            0.0,
        )])
        .with_shape(Vec::new(), Primitive::UnitCube)
}
