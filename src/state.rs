//! Cached motion state owned by the state machine.
//!
//! The original design kept this state scattered across mutable property
//! vectors; here it is an explicit struct so the property surface reads from
//! motion semantics instead of being them. Dispatch is serialized by the host
//! framework, so the struct is mutated without locking.

use crate::motion::{FocusDirection, PropertyState};

/// Snapshot of everything the motion state machine remembers between
/// dispatches.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusState {
    /// Last known absolute position in ticks. Overwritten on every motion
    /// completion report from the driver; not authoritative while a move is
    /// busy.
    pub position: u32,
    /// Target of the move currently in progress, if any.
    pub target: Option<u32>,
    /// Cached speed value, last accepted by the driver.
    pub speed: f64,
    /// Cached motion-direction selection for future timed/relative moves.
    pub direction: FocusDirection,
    /// Last requested timed-move duration in milliseconds. Restored into the
    /// timer slot after an abort.
    pub last_timer_ms: u32,

    /// Published state of the speed group.
    pub speed_state: PropertyState,
    /// Published state of the timer group.
    pub timer_state: PropertyState,
    /// Published state of the absolute-position group.
    pub abs_state: PropertyState,
    /// Published state of the relative-position group.
    pub rel_state: PropertyState,
    /// Published state of the abort group.
    pub abort_state: PropertyState,
    /// Published state of the direction selector.
    pub motion_state: PropertyState,
}

impl FocusState {
    pub fn new(position: u32, speed: f64) -> Self {
        Self {
            position,
            target: None,
            speed,
            direction: FocusDirection::Inward,
            last_timer_ms: 0,
            speed_state: PropertyState::Idle,
            timer_state: PropertyState::Idle,
            abs_state: PropertyState::Idle,
            rel_state: PropertyState::Idle,
            abort_state: PropertyState::Idle,
            motion_state: PropertyState::Idle,
        }
    }

    /// True while any motion group reports an in-progress move.
    pub fn motion_busy(&self) -> bool {
        self.timer_state == PropertyState::Busy
            || self.abs_state == PropertyState::Busy
            || self.rel_state == PropertyState::Busy
    }

    /// Return every busy motion group to idle (after an abort or an
    /// external halt).
    pub fn halt_motion(&mut self) {
        for state in [
            &mut self.timer_state,
            &mut self.abs_state,
            &mut self.rel_state,
        ] {
            if *state == PropertyState::Busy {
                *state = PropertyState::Idle;
            }
        }
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = FocusState::new(0, 255.0);
        assert!(!state.motion_busy());
        assert_eq!(state.abs_state, PropertyState::Idle);
        assert_eq!(state.direction, FocusDirection::Inward);
    }

    #[test]
    fn test_halt_motion_clears_only_busy_groups() {
        let mut state = FocusState::new(0, 255.0);
        state.abs_state = PropertyState::Busy;
        state.speed_state = PropertyState::Ok;
        state.rel_state = PropertyState::Alert;
        state.target = Some(500);

        state.halt_motion();

        assert_eq!(state.abs_state, PropertyState::Idle);
        assert_eq!(state.rel_state, PropertyState::Alert);
        assert_eq!(state.speed_state, PropertyState::Ok);
        assert_eq!(state.target, None);
        assert!(!state.motion_busy());
    }
}
