//! Body proportions.
//!
//! Every dimension of the robot is derived from the three root body
//! dimensions, so rescaling the root rescales the whole model consistently.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root body dimensions every other proportion is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDimensions {
    pub width: f32,
    pub length: f32,
    pub depth: f32,
}

impl Default for BodyDimensions {
    fn default() -> Self {
        Self {
            width: 8.0,
            length: 24.0,
            depth: 8.0,
        }
    }
}

impl BodyDimensions {
    pub fn new(width: f32, length: f32, depth: f32) -> Self {
        Self {
            width,
            length,
            depth,
        }
    }

    /// Checks that every dimension is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("length", self.length),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidDimension { name, value });
            }
        }
        Ok(())
    }
}

/// Derived part dimensions. Immutable once computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BodyDimensions", into = "BodyDimensions")]
pub struct RobotProportions {
    pub body_width: f32,
    pub body_length: f32,
    pub body_depth: f32,

    pub head_width: f32,
    pub head_length: f32,
    pub head_depth: f32,

    /// Tube radius of the sensor torus.
    pub sensor_inner_radius: f32,
    /// Ring radius of the sensor torus.
    pub sensor_outer_radius: f32,

    pub turret_base_width: f32,
    pub turret_base_length: f32,
    pub turret_base_depth: f32,

    pub arm_length: f32,
    pub arm_width: f32,

    pub turret_length: f32,
    pub turret_width: f32,

    pub gun_length: f32,
    pub gun_width: f32,
    pub gun_depth: f32,

    pub stanchion_length: f32,
    pub stanchion_radius: f32,
    pub base_width: f32,
    pub base_length: f32,

    pub wheel_radius: f32,
    pub wheel_length: f32,
}

impl Default for RobotProportions {
    fn default() -> Self {
        Self::derive(BodyDimensions::default())
    }
}

impl RobotProportions {
    /// Derives all proportions from validated root dimensions.
    pub fn from_root(root: BodyDimensions) -> Result<Self> {
        root.validate()?;
        Ok(Self::derive(root))
    }

    fn derive(root: BodyDimensions) -> Self {
        let BodyDimensions {
            width,
            length,
            depth,
        } = root;

        let head_width = 0.7 * width;
        let head_length = 0.4 * width;
        let head_depth = 0.7 * width;
        let arm_length = length / 1.5;
        let arm_width = 0.125 * width;
        let stanchion_length = length;

        Self {
            body_width: width,
            body_length: length,
            body_depth: depth,

            head_width,
            head_length,
            head_depth,

            sensor_inner_radius: head_length * 0.104,
            sensor_outer_radius: head_length * 0.27,

            turret_base_width: head_width / 2.0,
            turret_base_length: head_length / 2.0,
            turret_base_depth: head_depth / 2.0,

            arm_length,
            arm_width,

            turret_length: arm_length / 3.0,
            turret_width: arm_width,

            gun_length: arm_length / 4.0,
            gun_width: arm_width,
            gun_depth: arm_width,

            stanchion_length,
            stanchion_radius: 0.1 * depth,
            base_width: 2.0 * width,
            base_length: 0.25 * stanchion_length,

            wheel_radius: length / 6.0,
            wheel_length: width,
        }
    }

    /// The root dimensions these proportions were derived from.
    pub fn root(&self) -> BodyDimensions {
        BodyDimensions::new(self.body_width, self.body_length, self.body_depth)
    }
}

impl TryFrom<BodyDimensions> for RobotProportions {
    type Error = Error;

    fn try_from(root: BodyDimensions) -> Result<Self> {
        Self::from_root(root)
    }
}

impl From<RobotProportions> for BodyDimensions {
    fn from(proportions: RobotProportions) -> Self {
        proportions.root()
    }
}
