//! Capability registry for focuser devices.
//!
//! Each concrete focuser declares exactly once, at construction, which motion
//! modes its hardware supports. Generic client software discovers what a
//! device can do through this mask instead of knowing its concrete type.
//!
//! The mask is immutable after construction by design: it is passed to
//! [`FocuserInterface::new`](crate::interface::FocuserInterface::new) and no
//! setter exists, so the property surface can never drift out of sync with
//! the declared capabilities.

use bitflags::bitflags;

bitflags! {
    /// Motion modes and features a focuser device supports.
    ///
    /// The owning driver asserts truthfully what the hardware supports; the
    /// bits themselves are not validated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FocuserCapability: u32 {
        /// The focuser can move to an absolute position.
        const CAN_ABS_MOVE = 1 << 0;
        /// The focuser can move by a relative tick delta.
        const CAN_REL_MOVE = 1 << 1;
        /// Focuser motion can be aborted.
        const CAN_ABORT = 1 << 2;
        /// The focuser can move at different configurable speeds.
        const HAS_VARIABLE_SPEED = 1 << 3;
    }
}

impl FocuserCapability {
    /// True if the focuser has absolute position encoders.
    pub fn can_abs_move(&self) -> bool {
        self.contains(FocuserCapability::CAN_ABS_MOVE)
    }

    /// True if the focuser has relative position encoders.
    pub fn can_rel_move(&self) -> bool {
        self.contains(FocuserCapability::CAN_REL_MOVE)
    }

    /// True if focuser motion can be aborted.
    pub fn can_abort(&self) -> bool {
        self.contains(FocuserCapability::CAN_ABORT)
    }

    /// True if the focuser has multiple speeds.
    pub fn has_variable_speed(&self) -> bool {
        self.contains(FocuserCapability::HAS_VARIABLE_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_round_trip_all_masks() {
        // Every combination of the four bits must survive construction intact.
        for raw in 0u32..16 {
            let cap = FocuserCapability::from_bits_truncate(raw);
            assert_eq!(cap.bits(), raw);
        }
    }

    #[test]
    fn test_predicates_reflect_bits() {
        for raw in 0u32..16 {
            let cap = FocuserCapability::from_bits_truncate(raw);
            assert_eq!(cap.can_abs_move(), raw & 0b0001 != 0);
            assert_eq!(cap.can_rel_move(), raw & 0b0010 != 0);
            assert_eq!(cap.can_abort(), raw & 0b0100 != 0);
            assert_eq!(cap.has_variable_speed(), raw & 0b1000 != 0);
        }
    }

    #[test]
    fn test_empty_mask_supports_nothing() {
        let cap = FocuserCapability::empty();
        assert!(!cap.can_abs_move());
        assert!(!cap.can_rel_move());
        assert!(!cap.can_abort());
        assert!(!cap.has_variable_speed());
    }
}
