//! A mock focuser driver with scripted replies.
//!
//! Records every call it receives and answers with configurable tri-states,
//! so tests can walk the dispatcher and state machine through synchronous,
//! asynchronous, and faulted motion without hardware.

use anyhow::{bail, Result};
use async_trait::async_trait;
use log::info;

use crate::driver::FocuserDriver;
use crate::motion::{FocusDirection, MotionStatus};

/// One recorded driver invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    SetSpeed(i32),
    MoveTimed {
        dir: FocusDirection,
        speed: i32,
        duration_ms: u32,
    },
    MoveAbsolute(u32),
    MoveRelative {
        dir: FocusDirection,
        delta_ticks: u32,
    },
    Abort,
}

/// Scripted in-memory focuser.
pub struct MockFocuser {
    /// Every call received, in order.
    pub calls: Vec<DriverCall>,
    /// Reply for timed moves.
    pub timed_reply: MotionStatus,
    /// Reply for absolute moves.
    pub abs_reply: MotionStatus,
    /// Reply for relative moves.
    pub rel_reply: MotionStatus,
    /// Whether `set_speed` succeeds.
    pub accept_speed: bool,
    /// Whether `abort` succeeds.
    pub accept_abort: bool,
    /// Simulated encoder position.
    pub position: u32,
}

impl Default for MockFocuser {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFocuser {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            timed_reply: MotionStatus::Ok,
            abs_reply: MotionStatus::Ok,
            rel_reply: MotionStatus::Ok,
            accept_speed: true,
            accept_abort: true,
            position: 0,
        }
    }

    /// Script the reply for all move operations at once.
    pub fn with_move_reply(mut self, reply: MotionStatus) -> Self {
        self.timed_reply = reply;
        self.abs_reply = reply;
        self.rel_reply = reply;
        self
    }

    /// Number of calls matching the given predicate.
    pub fn calls_matching(&self, pred: impl Fn(&DriverCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl FocuserDriver for MockFocuser {
    async fn set_speed(&mut self, speed: i32) -> Result<()> {
        self.calls.push(DriverCall::SetSpeed(speed));
        if self.accept_speed {
            info!("Mock focuser speed set to {speed}");
            Ok(())
        } else {
            bail!("mock focuser rejected speed {speed}")
        }
    }

    async fn move_timed(
        &mut self,
        dir: FocusDirection,
        speed: i32,
        duration_ms: u32,
    ) -> MotionStatus {
        self.calls.push(DriverCall::MoveTimed {
            dir,
            speed,
            duration_ms,
        });
        // An indefinite move can only be ended from outside.
        if duration_ms == 0 {
            return MotionStatus::Busy;
        }
        self.timed_reply
    }

    async fn move_absolute(&mut self, target_ticks: u32) -> MotionStatus {
        self.calls.push(DriverCall::MoveAbsolute(target_ticks));
        if self.abs_reply == MotionStatus::Ok {
            self.position = target_ticks;
        }
        self.abs_reply
    }

    async fn move_relative(&mut self, dir: FocusDirection, delta_ticks: u32) -> MotionStatus {
        self.calls.push(DriverCall::MoveRelative { dir, delta_ticks });
        if self.rel_reply == MotionStatus::Ok {
            self.position = match dir {
                FocusDirection::Inward => self.position.saturating_sub(delta_ticks),
                FocusDirection::Outward => self.position.saturating_add(delta_ticks),
            };
        }
        self.rel_reply
    }

    async fn abort(&mut self) -> Result<()> {
        self.calls.push(DriverCall::Abort);
        if self.accept_abort {
            Ok(())
        } else {
            bail!("mock focuser failed to abort")
        }
    }
}
