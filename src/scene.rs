//! Frame-level entry points: key presses, animation ticks and rendering.
//!
//! [`RobotScene`] owns the pose and is the only writer to it. Hosts on a
//! multithreaded platform send [`SceneEvent`]s through a channel and let the
//! scene apply them in order with [`RobotScene::run_pending`].

use crate::animation::{AnimationDriver, CancellationToken};
use crate::backend::{DrawList, RenderBackend};
use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::evaluator::PoseEvaluator;
use crate::input::InputController;
use crate::pose::{Joint, RobotPose};
use crate::primitive::{MassProperties, MeshKind, Primitive};
use crate::proportions::RobotProportions;
use crate::rig::Rig;
use crate::transform_stack::{Angle, TransformOp, TransformStack};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;

/// Viewing and projection parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 6.0, 22.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 60.0,
            near: 0.2,
            far: 40.0,
        }
    }
}

impl Camera {
    pub fn validate(&self) -> Result<()> {
        if self.eye == self.target {
            return Err(Error::Config("camera eye and target coincide".into()));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::Config(format!(
                "camera clip range invalid: near {} far {}",
                self.near, self.far
            )));
        }
        Ok(())
    }

    /// World-to-eye transform. Base of the transform stack each frame.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// An opaque mesh drawn after the robot.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub mesh: MeshKind,
    pub placement: Vec<TransformOp>,
}

impl Decoration {
    /// Cube resting on `anchor`, spinning about it by the cube joint.
    pub fn spin_cube(anchor: Vec3) -> Self {
        Self {
            mesh: MeshKind::DecorativeCube,
            placement: vec![
                TransformOp::Pivot {
                    anchor,
                    angle: Angle::Joint(Joint::CubeSpin),
                    axis: Vec3::Y,
                },
                TransformOp::Translate(anchor),
            ],
        }
    }

    pub fn ground(offset: f32) -> Self {
        Self {
            mesh: MeshKind::Ground,
            placement: vec![TransformOp::Translate(Vec3::new(0.0, offset, 0.0))],
        }
    }
}

/// Coalescing redraw signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedrawRequest {
    pending: bool,
    coalesced: u64,
}

impl RedrawRequest {
    pub fn request(&mut self) {
        if self.pending {
            self.coalesced += 1;
        }
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the signal and the coalesced count, returning whether a
    /// redraw was pending.
    pub fn take(&mut self) -> bool {
        self.coalesced = 0;
        std::mem::take(&mut self.pending)
    }

    /// Requests folded into the currently pending redraw.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

/// Serialized input to the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    KeyPress(char),
    Tick,
    /// Stops the animation driver.
    Stop,
}

impl SceneEvent {
    /// One key press per character of `keys`, then `ticks` ticks, then a stop.
    pub fn script(keys: &str, ticks: u32) -> Vec<SceneEvent> {
        keys.chars()
            .map(SceneEvent::KeyPress)
            .chain(std::iter::repeat_n(SceneEvent::Tick, ticks as usize))
            .chain(std::iter::once(SceneEvent::Stop))
            .collect()
    }
}

/// A robot, its controls, its animation and its surroundings.
pub struct RobotScene {
    config: SceneConfig,
    proportions: RobotProportions,
    rig: Rig,
    pose: RobotPose,
    controller: InputController,
    animation: AnimationDriver,
    decorations: Vec<Decoration>,
    redraw: RedrawRequest,
    frames: u64,
}

impl RobotScene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let proportions = RobotProportions::from_root(config.body)?;
        let rig = Rig::build(&proportions, &config.rig);
        let controller = InputController::with_standard_keys(config.controls.clone());
        let animation = AnimationDriver::new(config.animation.clone());
        let decorations = vec![
            Decoration::spin_cube(config.spin_cube_anchor),
            Decoration::ground(config.ground_offset),
        ];

        tracing::info!(
            parts = rig.part_count(),
            body_width = proportions.body_width,
            body_length = proportions.body_length,
            "robot scene ready"
        );

        let mut redraw = RedrawRequest::default();
        redraw.request();

        Ok(Self {
            config,
            proportions,
            rig,
            pose: RobotPose::default(),
            controller,
            animation,
            decorations,
            redraw,
            frames: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn proportions(&self) -> &RobotProportions {
        &self.proportions
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn pose(&self) -> &RobotPose {
        &self.pose
    }

    /// Replaces the pose wholesale, e.g. to start from a known state.
    ///
    /// A head angle outside the configured limits is rejected and the
    /// current pose kept. Spin angles are wrapped into `[0, 360)`.
    pub fn set_pose(&mut self, mut pose: RobotPose) -> Result<()> {
        let limits = &self.config.controls.head_limits;
        if !limits.contains(pose.head_angle) {
            return Err(Error::Config(format!(
                "head angle {} outside [{}, {}]",
                pose.head_angle, limits.up, limits.down
            )));
        }
        pose.wrap_spins();
        self.pose = pose;
        self.redraw.request();
        Ok(())
    }

    pub fn redraw(&self) -> &RedrawRequest {
        &self.redraw
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    /// Handle that stops the animation from outside the scene.
    pub fn stop_token(&self) -> CancellationToken {
        self.animation.token()
    }

    /// Applies a key press and requests a redraw. Returns whether the pose
    /// changed.
    pub fn on_key_press(&mut self, key: char) -> bool {
        let changed = self.controller.on_key_press(key, &mut self.pose);
        self.redraw.request();
        changed
    }

    /// Runs one animation tick. After the animation is stopped this is a
    /// no-op and no redraw is requested.
    pub fn on_tick(&mut self) -> bool {
        let ran = self.animation.tick(&mut self.pose);
        if ran {
            self.redraw.request();
        }
        ran
    }

    pub fn stop_animation(&mut self) {
        self.animation.stop();
    }

    pub fn handle_event(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::KeyPress(key) => {
                self.on_key_press(key);
            }
            SceneEvent::Tick => {
                self.on_tick();
            }
            SceneEvent::Stop => self.stop_animation(),
        }
    }

    /// Applies every queued event in order, then renders at most one frame
    /// if any of them requested a redraw. Returns whether a frame was drawn.
    pub fn run_pending<B: RenderBackend>(
        &mut self,
        events: &Receiver<SceneEvent>,
        backend: &mut B,
    ) -> bool {
        for event in events.try_iter() {
            self.handle_event(event);
        }
        if !self.redraw.is_pending() {
            return false;
        }
        self.render_frame(backend);
        true
    }

    /// Draws the robot and its surroundings from the camera.
    pub fn render_frame<B: RenderBackend>(&mut self, backend: &mut B) {
        let coalesced = self.redraw.coalesced();
        if coalesced > 0 {
            tracing::debug!(coalesced, "rendering frame");
        }
        self.redraw.take();

        let mut stack = TransformStack::new(self.config.camera.view());
        PoseEvaluator::new(&self.rig, &self.config.materials).draw_robot(
            &self.pose,
            &mut stack,
            backend,
        );

        for decoration in &self.decorations {
            stack.push();
            stack.apply_all(&decoration.placement, &self.pose);
            backend.draw_primitive(&Primitive::Mesh(decoration.mesh), stack.current());
            stack.pop();
        }

        debug_assert_eq!(stack.depth(), 0, "frame left the stack unbalanced");
        self.frames += 1;
    }

    /// Mass and world-space centre of mass of the robot in its current pose.
    pub fn mass_properties(&self) -> MassProperties {
        let mut list = DrawList::new();
        let mut stack = TransformStack::default();
        PoseEvaluator::new(&self.rig, &self.config.materials).draw_robot(
            &self.pose,
            &mut stack,
            &mut list,
        );
        list.mass_properties(self.config.density)
    }
}
