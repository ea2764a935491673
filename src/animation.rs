//! Time-based animation of the pose.
//!
//! [`AnimationDriver`] is a repeating task with a fixed period. A host loop
//! either calls [`AnimationDriver::tick`] from its own timer or feeds elapsed
//! wall time to [`AnimationDriver::advance`]. Cancelling its
//! [`CancellationToken`] turns both into no-ops.

use crate::error::{Error, Result};
use crate::pose::RobotPose;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Shared stop signal for the animation loop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Tick period in milliseconds.
    pub period_ms: u64,
    /// Shoulder swing per tick, in degrees.
    pub shoulder_step: f32,
    /// Decorative cube spin per tick, in degrees.
    pub cube_step: f32,
    /// Whether ticks run at all. A disabled driver starts cancelled.
    pub enabled: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            period_ms: 10,
            shoulder_step: 1.0,
            cube_step: 2.0,
            enabled: true,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.period_ms == 0 {
            return Err(Error::Config("animation period must be non-zero".into()));
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Periodic, cancellable pose animation.
#[derive(Debug)]
pub struct AnimationDriver {
    config: AnimationConfig,
    token: CancellationToken,
    /// Elapsed time not yet consumed by whole periods.
    pending: Duration,
    ticks: u64,
}

impl AnimationDriver {
    pub fn new(config: AnimationConfig) -> Self {
        let token = CancellationToken::new();
        if !config.enabled {
            token.cancel();
        }
        Self {
            config,
            token,
            pending: Duration::ZERO,
            ticks: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.config.period()
    }

    /// Handle that stops this driver when cancelled.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn stop(&self) {
        if self.is_running() {
            tracing::info!(ticks = self.ticks, "animation stopped");
        }
        self.token.cancel();
    }

    /// Total ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one tick. Returns `false` without touching the pose once stopped.
    ///
    /// A `true` result means the caller should request a redraw and re-arm
    /// its timer for another [`period`](Self::period).
    pub fn tick(&mut self, pose: &mut RobotPose) -> bool {
        if !self.is_running() {
            return false;
        }
        pose.swing_shoulder(self.config.shoulder_step);
        pose.spin_cube(self.config.cube_step);
        self.ticks += 1;
        true
    }

    /// Runs as many ticks as whole periods fit in the accumulated `elapsed`
    /// time. Returns how many ran.
    pub fn advance(&mut self, elapsed: Duration, pose: &mut RobotPose) -> u32 {
        if !self.is_running() {
            self.pending = Duration::ZERO;
            return 0;
        }
        let period = self.period();
        if period.is_zero() {
            return 0;
        }
        self.pending += elapsed;
        let mut ran = 0;
        while self.pending >= period && self.tick(pose) {
            self.pending -= period;
            ran += 1;
        }
        ran
    }
}
