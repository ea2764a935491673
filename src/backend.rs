//! Rendering backend seam.
//!
//! The core never rasterizes. It submits materials and primitives, each
//! paired with the composed transform in effect, to a [`RenderBackend`].
//! [`DrawList`] is a recording backend used for headless evaluation.

use crate::material::Material;
use crate::primitive::{MassProperties, MeshKind, Primitive};
use crate::rig::PartId;
use bevy_heavy::ComputeMassProperties3d as _;
use glam::Mat4;

/// Capabilities consumed from an external renderer.
pub trait RenderBackend {
    /// Material applied to subsequently submitted primitives.
    fn set_material(&mut self, material: &Material);

    fn draw_unit_cube(&mut self, transform: Mat4);

    fn draw_cylinder(
        &mut self,
        transform: Mat4,
        base_radius: f32,
        top_radius: f32,
        height: f32,
        slices: u32,
        stacks: u32,
    );

    fn draw_disk(
        &mut self,
        transform: Mat4,
        inner_radius: f32,
        outer_radius: f32,
        slices: u32,
        loops: u32,
    );

    fn draw_torus(
        &mut self,
        transform: Mat4,
        inner_radius: f32,
        outer_radius: f32,
        sides: u32,
        rings: u32,
    );

    fn draw_mesh(&mut self, transform: Mat4, mesh: MeshKind);

    /// Called once a part's origin frame is established, before its children.
    fn enter_part(&mut self, _part: PartId, _frame: Mat4) {}

    /// Called after a part and all of its children were drawn.
    fn exit_part(&mut self, _part: PartId) {}

    /// Dispatches `primitive` to the matching draw call.
    fn draw_primitive(&mut self, primitive: &Primitive, transform: Mat4) {
        match *primitive {
            Primitive::UnitCube => self.draw_unit_cube(transform),
            Primitive::Cylinder {
                base_radius,
                top_radius,
                height,
                slices,
                stacks,
            } => self.draw_cylinder(transform, base_radius, top_radius, height, slices, stacks),
            Primitive::Disk {
                inner_radius,
                outer_radius,
                slices,
                loops,
            } => self.draw_disk(transform, inner_radius, outer_radius, slices, loops),
            Primitive::Torus {
                inner_radius,
                outer_radius,
                sides,
                rings,
            } => self.draw_torus(transform, inner_radius, outer_radius, sides, rings),
            Primitive::Mesh(mesh) => self.draw_mesh(transform, mesh),
        }
    }
}

/// A recorded primitive submission.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Innermost part being drawn, `None` outside the robot.
    pub part: Option<PartId>,
    /// Material in effect, `None` if none was set yet.
    pub material: Option<Material>,
    pub primitive: Primitive,
    pub transform: Mat4,
}

/// Origin frame of a part, recorded on entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartFrame {
    pub part: PartId,
    pub frame: Mat4,
}

/// Backend that records everything it is asked to draw.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    pub frames: Vec<PartFrame>,
    material: Option<Material>,
    parts: Vec<PartId>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.frames.clear();
        self.material = None;
        self.parts.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands submitted while `part` was the innermost part.
    pub fn for_part(&self, part: PartId) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |cmd| cmd.part == Some(part))
    }

    /// Origin frame of the first occurrence of `part`.
    pub fn frame_of(&self, part: PartId) -> Option<Mat4> {
        self.frames
            .iter()
            .find(|f| f.part == part)
            .map(|f| f.frame)
    }

    /// Total mass and centre of mass of every solid drawn, in the frame of
    /// the transform stack's base.
    ///
    /// Each primitive contributes the solid [`Primitive::solid`] gives it, so
    /// tori count as equal-volume cylinders and disks and meshes weigh nothing.
    pub fn mass_properties(&self, density: f32) -> MassProperties {
        let mut props = MassProperties::default();
        for cmd in &self.commands {
            if let Some((solid, centroid)) = cmd.primitive.solid(&cmd.transform) {
                props.accumulate(solid.mass(density), centroid);
            }
        }
        props
    }

    fn record(&mut self, primitive: Primitive, transform: Mat4) {
        self.commands.push(DrawCommand {
            part: self.parts.last().copied(),
            material: self.material,
            primitive,
            transform,
        });
    }
}

impl RenderBackend for DrawList {
    fn set_material(&mut self, material: &Material) {
        self.material = Some(*material);
    }

    fn draw_unit_cube(&mut self, transform: Mat4) {
        self.record(Primitive::UnitCube, transform);
    }

    fn draw_cylinder(
        &mut self,
        transform: Mat4,
        base_radius: f32,
        top_radius: f32,
        height: f32,
        slices: u32,
        stacks: u32,
    ) {
        self.record(
            Primitive::Cylinder {
                base_radius,
                top_radius,
                height,
                slices,
                stacks,
            },
            transform,
        );
    }

    fn draw_disk(
        &mut self,
        transform: Mat4,
        inner_radius: f32,
        outer_radius: f32,
        slices: u32,
        loops: u32,
    ) {
        self.record(
            Primitive::Disk {
                inner_radius,
                outer_radius,
                slices,
                loops,
            },
            transform,
        );
    }

    fn draw_torus(
        &mut self,
        transform: Mat4,
        inner_radius: f32,
        outer_radius: f32,
        sides: u32,
        rings: u32,
    ) {
        self.record(
            Primitive::Torus {
                inner_radius,
                outer_radius,
                sides,
                rings,
            },
            transform,
        );
    }

    fn draw_mesh(&mut self, transform: Mat4, mesh: MeshKind) {
        self.record(Primitive::Mesh(mesh), transform);
    }

    fn enter_part(&mut self, part: PartId, frame: Mat4) {
        self.parts.push(part);
        self.frames.push(PartFrame { part, frame });
    }

    fn exit_part(&mut self, part: PartId) {
        debug_assert_eq!(self.parts.last(), Some(&part), "unbalanced part exit");
        self.parts.pop();
    }
}
