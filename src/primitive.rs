use bevy_heavy::ComputeMassProperties3d;
use bevy_math::primitives::{Cuboid, Cylinder};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Opaque meshes owned by the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshKind {
    /// The flat quad mesh the robot drives over.
    Ground,
    /// The closed cube spinning next to the robot.
    DecorativeCube,
}

/// Shapes the backend knows how to draw against the current transform.
///
/// Sizes are in the primitive's local units; the composed transform carries
/// the part's scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Axis-aligned cube of edge 1 centred on the origin.
    UnitCube,
    /// Capped-open cylinder along +Z, base at the origin.
    Cylinder {
        base_radius: f32,
        top_radius: f32,
        height: f32,
        slices: u32,
        stacks: u32,
    },
    /// Flat disk (or annulus) in the XY plane.
    Disk {
        inner_radius: f32,
        outer_radius: f32,
        slices: u32,
        loops: u32,
    },
    /// Torus around the Z axis. `inner_radius` is the tube radius,
    /// `outer_radius` the ring radius.
    Torus {
        inner_radius: f32,
        outer_radius: f32,
        sides: u32,
        rings: u32,
    },
    Mesh(MeshKind),
}

/// A solid with physical extent, used for mass-property computation.
#[derive(Clone, Copy, Debug)]
pub enum SolidPrimitive {
    Cuboid(Cuboid),
    Cylinder(Cylinder),
}

impl ComputeMassProperties3d for SolidPrimitive {
    fn mass(&self, density: f32) -> f32 {
        match self {
            Self::Cuboid(s) => s.mass(density),
            Self::Cylinder(s) => s.mass(density),
        }
    }

    fn unit_principal_angular_inertia(&self) -> Vec3 {
        match self {
            Self::Cuboid(s) => s.unit_principal_angular_inertia(),
            Self::Cylinder(s) => s.unit_principal_angular_inertia(),
        }
    }

    fn center_of_mass(&self) -> Vec3 {
        match self {
            Self::Cuboid(s) => s.center_of_mass(),
            Self::Cylinder(s) => s.center_of_mass(),
        }
    }
}

/// Length of each local axis after `transform`, i.e. the scale it applies.
fn axis_scale(transform: &Mat4) -> Vec3 {
    Vec3::new(
        transform.x_axis.truncate().length(),
        transform.y_axis.truncate().length(),
        transform.z_axis.truncate().length(),
    )
}

impl Primitive {
    /// The physical solid this primitive occupies under `transform`, with
    /// its centroid in the transform's target frame.
    ///
    /// The result is an approximation for mass purposes:
    ///
    /// - Disks and opaque meshes have no volume and return `None`.
    /// - A torus becomes the cylinder of equal volume: tube radius as its
    ///   radius, ring circumference as its height.
    /// - Radii are scaled by the mean of the transform's X and Y axis scales,
    ///   so a non-uniform XY scale turns an ellipse into a circle of the
    ///   averaged radius. A tapered cylinder uses the mean of its two radii.
    pub fn solid(&self, transform: &Mat4) -> Option<(SolidPrimitive, Vec3)> {
        let scale = axis_scale(transform);
        let radial = 0.5 * (scale.x + scale.y);
        match *self {
            Primitive::UnitCube => Some((
                SolidPrimitive::Cuboid(Cuboid {
                    half_size: scale * 0.5,
                }),
                transform.transform_point3(Vec3::ZERO),
            )),
            Primitive::Cylinder {
                base_radius,
                top_radius,
                height,
                ..
            } => Some((
                SolidPrimitive::Cylinder(Cylinder::new(
                    0.5 * (base_radius + top_radius) * radial,
                    height * scale.z,
                )),
                transform.transform_point3(Vec3::new(0.0, 0.0, 0.5 * height)),
            )),
            Primitive::Torus {
                inner_radius,
                outer_radius,
                ..
            } => Some((
                SolidPrimitive::Cylinder(Cylinder::new(
                    inner_radius * radial,
                    2.0 * PI * outer_radius * radial,
                )),
                transform.transform_point3(Vec3::ZERO),
            )),
            Primitive::Disk { .. } | Primitive::Mesh(_) => None,
        }
    }
}

/// Aggregate mass of a set of drawn solids.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MassProperties {
    pub mass: f32,
    pub center_of_mass: Vec3,
}

impl MassProperties {
    /// Folds one solid of `mass` centred at `centroid` into the aggregate.
    pub fn accumulate(&mut self, mass: f32, centroid: Vec3) {
        let total = self.mass + mass;
        if total <= 0.0 {
            return;
        }
        self.center_of_mass = (self.center_of_mass * self.mass + centroid * mass) / total;
        self.mass = total;
    }
}
