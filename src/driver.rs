//! The driver trait every concrete focuser implements.
//!
//! This is the strategy object injected into
//! [`FocuserInterface::new`](crate::interface::FocuserInterface::new): the
//! interface owns the capability gating, property surface, and state machine,
//! while the driver performs the actual hardware I/O. Every method has an
//! inert default so a driver only implements what its capability mask
//! declares; an operation invoked despite a missing capability fails
//! deterministically instead of acting.

use anyhow::{bail, Result};
use async_trait::async_trait;
use log::warn;

use crate::motion::{FocusDirection, MotionStatus};

/// Virtual motion operations of a focuser device.
///
/// The host framework serializes dispatch per device, so methods take
/// `&mut self` and no locking is required. A `Busy` return is not a blocking
/// wait: the driver must later report completion through
/// [`FocuserInterface::report_completion`], typically from a timer callback
/// or polling hook owned by the driver itself.
///
/// [`FocuserInterface::report_completion`]: crate::interface::FocuserInterface::report_completion
#[async_trait]
pub trait FocuserDriver: Send {
    /// Set the focuser speed. Only meaningful with variable speed support.
    async fn set_speed(&mut self, speed: i32) -> Result<()> {
        warn!("Focuser does not support variable speed (requested {speed})");
        bail!("variable speed not supported");
    }

    /// Move in a direction at a speed for `duration_ms` milliseconds.
    ///
    /// A duration of 0 means move indefinitely until aborted or externally
    /// halted; the driver must never report `Ok` on its own for such a move.
    async fn move_timed(
        &mut self,
        dir: FocusDirection,
        speed: i32,
        duration_ms: u32,
    ) -> MotionStatus {
        let _ = (dir, speed, duration_ms);
        warn!("Focuser does not support timed motion");
        MotionStatus::Alert
    }

    /// Move to an absolute position in ticks.
    async fn move_absolute(&mut self, target_ticks: u32) -> MotionStatus {
        warn!("Focuser does not support absolute motion (target {target_ticks})");
        MotionStatus::Alert
    }

    /// Move by a tick delta relative to the current position.
    async fn move_relative(&mut self, dir: FocusDirection, delta_ticks: u32) -> MotionStatus {
        let _ = (dir, delta_ticks);
        warn!("Focuser does not support relative motion");
        MotionStatus::Alert
    }

    /// Halt all focuser motion. Must be safe to call whenever motion may be
    /// busy.
    async fn abort(&mut self) -> Result<()> {
        warn!("Focuser does not support aborting motion");
        bail!("abort not supported");
    }
}
