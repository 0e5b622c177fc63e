//! Device-level focuser parameters.
//!
//! [`FocuserParams`] shapes the number-property limits once, at
//! `init_properties` time. Loading these values from a file and persisting
//! them is the host application's concern, not this crate's; the struct only
//! carries serde derives so the host can embed it in its own settings tree.

use serde::{Deserialize, Serialize};

/// Limits and initial values used to shape the focuser property surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocuserParams {
    /// Minimum speed value accepted by the hardware.
    pub speed_min: f64,
    /// Maximum speed value accepted by the hardware.
    pub speed_max: f64,
    /// Speed slider step.
    pub speed_step: f64,
    /// Initial speed published before the client changes it.
    pub initial_speed: f64,
    /// Maximum travel in ticks; upper bound for absolute and relative moves.
    pub max_travel: u32,
    /// Absolute position published before the first completion report.
    pub initial_position: u32,
    /// Upper bound of the timed-move duration slot, in milliseconds.
    pub max_timer_ms: u32,
}

impl Default for FocuserParams {
    fn default() -> Self {
        Self {
            speed_min: 0.0,
            speed_max: 255.0,
            speed_step: 10.0,
            initial_speed: 255.0,
            max_travel: 60_000,
            initial_position: 0,
            max_timer_ms: 5_000,
        }
    }
}
