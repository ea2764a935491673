//! Scene configuration.

use crate::animation::AnimationConfig;
use crate::error::{Error, Result};
use crate::input::ControlConfig;
use crate::material::MaterialPalette;
use crate::proportions::BodyDimensions;
use crate::rig::RigConfig;
use crate::scene::Camera;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`RobotScene`](crate::scene::RobotScene).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Root dimensions the robot's proportions derive from.
    pub body: BodyDimensions,
    pub rig: RigConfig,
    pub controls: ControlConfig,
    pub animation: AnimationConfig,
    pub camera: Camera,
    pub materials: MaterialPalette,
    /// Viewport size in pixels.
    pub viewport: (u32, u32),
    /// Point the decorative cube sits on and spins about.
    pub spin_cube_anchor: Vec3,
    /// Vertical offset of the ground mesh.
    pub ground_offset: f32,
    /// Density used for mass properties.
    pub density: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            body: BodyDimensions::default(),
            rig: RigConfig::default(),
            controls: ControlConfig::default(),
            animation: AnimationConfig::default(),
            camera: Camera::default(),
            materials: MaterialPalette::default(),
            viewport: (650, 500),
            spin_cube_anchor: Vec3::new(8.0, 0.0, 3.0),
            ground_offset: -20.0,
            density: 100.0,
        }
    }
}

impl SceneConfig {
    /// Checks every section for consistency.
    pub fn validate(&self) -> Result<()> {
        self.body.validate()?;
        self.controls.validate()?;
        self.animation.validate()?;
        self.camera.validate()?;
        if self.viewport.0 == 0 || self.viewport.1 == 0 {
            return Err(Error::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.0, self.viewport.1
            )));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(Error::Config(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        Ok(())
    }

    pub fn with_rig(mut self, rig: RigConfig) -> Self {
        self.rig = rig;
        self
    }

    pub fn with_body(mut self, body: BodyDimensions) -> Self {
        self.body = body;
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Viewport width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1.max(1) as f32
    }
}
