//! # robot-rig
//!
//! An engine-agnostic scene-graph transform engine for a wheeled robot with a
//! pitching head and turret.
//!
//! The robot is described as a fixed tree of parts ([`Rig`]), each carrying a
//! parent-relative transform recipe and a scaled unit primitive. Every frame,
//! [`PoseEvaluator`] walks that tree against a [`TransformStack`], resolving
//! joint angles from the current [`RobotPose`], and submits the composed
//! transforms to any [`RenderBackend`]. Keyboard input ([`InputController`])
//! and a periodic [`AnimationDriver`] mutate the pose in between frames;
//! [`RobotScene`] ties them together behind `on_key_press`, `on_tick` and
//! `render_frame`.

pub mod animation;
pub mod backend;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod logging;
pub mod material;
pub mod parts;
pub mod pose;
pub mod primitive;
pub mod proportions;
pub mod rig;
pub mod scene;
pub mod transform_stack;

pub use animation::*;
pub use backend::*;
pub use config::*;
pub use error::{Error, Result};
pub use evaluator::*;
pub use input::*;
pub use logging::init_logging;
pub use material::*;
pub use pose::*;
pub use primitive::*;
pub use proportions::*;
pub use rig::*;
pub use scene::*;
pub use transform_stack::*;
