//! Motion primitives shared by the dispatcher, state machine, and drivers.
//!
//! The tri-state [`MotionStatus`] is the contract every virtual motion
//! operation honors: `Ok` for synchronous completion, `Busy` for motion that
//! continues asynchronously (the driver reports completion later through
//! [`FocuserInterface::report_completion`]), `Alert` for a rejected or
//! faulted request. [`PropertyState`] is the published per-property flavor of
//! the same machine, with the additional initial `Idle` state.
//!
//! [`FocuserInterface::report_completion`]: crate::interface::FocuserInterface::report_completion

use serde::{Deserialize, Serialize};

/// Direction of focuser travel for relative and timed moves.
///
/// Has no persistent state of its own; the interface caches the last
/// client-selected direction for future timed/relative moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusDirection {
    /// Move the focusing element toward the telescope.
    Inward,
    /// Move the focusing element away from the telescope.
    Outward,
}

impl FocusDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusDirection::Inward => "Inward",
            FocusDirection::Outward => "Outward",
        }
    }
}

/// Tri-state outcome of a motion operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionStatus {
    /// Motion completed synchronously and the device is at the requested
    /// position.
    Ok,
    /// Motion started and continues asynchronously; completion is reported
    /// later, out-of-band, by the concrete driver.
    Busy,
    /// The request was rejected or the hardware faulted.
    Alert,
}

impl MotionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionStatus::Ok => "Ok",
            MotionStatus::Busy => "Busy",
            MotionStatus::Alert => "Alert",
        }
    }
}

/// Published state of a property group.
///
/// Initial state is `Idle`. No state is terminal; every state is
/// re-enterable for the life of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyState {
    /// No operation has targeted this group yet, or motion was halted.
    #[default]
    Idle,
    /// The last operation completed successfully.
    Ok,
    /// Motion is in progress; cached values are not yet authoritative.
    Busy,
    /// The last operation failed.
    Alert,
}

impl PropertyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyState::Idle => "Idle",
            PropertyState::Ok => "Ok",
            PropertyState::Busy => "Busy",
            PropertyState::Alert => "Alert",
        }
    }
}

impl From<MotionStatus> for PropertyState {
    fn from(status: MotionStatus) -> Self {
        match status {
            MotionStatus::Ok => PropertyState::Ok,
            MotionStatus::Busy => PropertyState::Busy,
            MotionStatus::Alert => PropertyState::Alert,
        }
    }
}

/// State of an incoming selector element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(&self) -> bool {
        matches!(self, SwitchState::On)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_state_from_motion_status() {
        assert_eq!(PropertyState::from(MotionStatus::Ok), PropertyState::Ok);
        assert_eq!(PropertyState::from(MotionStatus::Busy), PropertyState::Busy);
        assert_eq!(
            PropertyState::from(MotionStatus::Alert),
            PropertyState::Alert
        );
    }

    #[test]
    fn test_initial_state_is_idle() {
        assert_eq!(PropertyState::default(), PropertyState::Idle);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(MotionStatus::Busy.as_str(), "Busy");
        assert_eq!(PropertyState::Idle.as_str(), "Idle");
        assert_eq!(FocusDirection::Inward.as_str(), "Inward");
    }
}
