//! Property surface types and the transport seam.
//!
//! A property is a named, typed state slot exposed to external clients:
//! either a vector of numbers or a vector of selector switches. The focuser
//! interface mirrors its internal motion state into these slots; the actual
//! network exposure is performed by an external collaborator behind the
//! [`PropertyTransport`] trait.
//!
//! Canonical slot and member names follow the focuser convention so that
//! generic clients recognize the device without knowing its concrete type.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::motion::PropertyState;

/// Canonical property and member names for the focuser surface.
pub mod names {
    /// Motion-direction selector property (always present).
    pub const FOCUS_MOTION: &str = "FOCUS_MOTION";
    /// Inward selector element of `FOCUS_MOTION`.
    pub const FOCUS_INWARD: &str = "FOCUS_INWARD";
    /// Outward selector element of `FOCUS_MOTION`.
    pub const FOCUS_OUTWARD: &str = "FOCUS_OUTWARD";

    /// Speed number property (requires variable speed).
    pub const FOCUS_SPEED: &str = "FOCUS_SPEED";
    /// Single member of `FOCUS_SPEED`.
    pub const FOCUS_SPEED_VALUE: &str = "FOCUS_SPEED_VALUE";

    /// Timed-move duration property (requires variable speed).
    pub const FOCUS_TIMER: &str = "FOCUS_TIMER";
    /// Single member of `FOCUS_TIMER`, in milliseconds.
    pub const FOCUS_TIMER_VALUE: &str = "FOCUS_TIMER_VALUE";

    /// Absolute position property (requires absolute encoders).
    pub const ABS_FOCUS_POSITION: &str = "ABS_FOCUS_POSITION";
    /// Single member of `ABS_FOCUS_POSITION`, in ticks.
    pub const FOCUS_ABSOLUTE_POSITION: &str = "FOCUS_ABSOLUTE_POSITION";

    /// Relative position property (requires relative encoders).
    pub const REL_FOCUS_POSITION: &str = "REL_FOCUS_POSITION";
    /// Single member of `REL_FOCUS_POSITION`, in ticks.
    pub const FOCUS_RELATIVE_POSITION: &str = "FOCUS_RELATIVE_POSITION";

    /// Abort trigger property (requires abort capability).
    pub const FOCUS_ABORT_MOTION: &str = "FOCUS_ABORT_MOTION";
    /// Single member of `FOCUS_ABORT_MOTION`.
    pub const ABORT: &str = "ABORT";
}

/// One numeric element of a number property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberMember {
    pub name: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

impl NumberMember {
    pub fn new(name: &str, label: &str, min: f64, max: f64, step: f64, value: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            min,
            max,
            step,
            value,
        }
    }
}

/// A named vector of numeric members with a published state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberProperty {
    /// Owning device name.
    pub device: String,
    pub name: String,
    pub label: String,
    /// Group or tab label under which the property is presented.
    pub group: String,
    pub state: PropertyState,
    pub members: Vec<NumberMember>,
}

impl NumberProperty {
    pub fn new(
        device: &str,
        name: &str,
        label: &str,
        group: &str,
        members: Vec<NumberMember>,
    ) -> Self {
        Self {
            device: device.to_string(),
            name: name.to_string(),
            label: label.to_string(),
            group: group.to_string(),
            state: PropertyState::Idle,
            members,
        }
    }

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> Option<&NumberMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Apply incoming values addressed by member name. Unknown member names
    /// are ignored, matching the transport's partial-update semantics.
    pub fn apply(&mut self, values: &[f64], member_names: &[&str]) {
        for (value, name) in values.iter().zip(member_names) {
            if let Some(member) = self.members.iter_mut().find(|m| m.name == *name) {
                member.value = *value;
            }
        }
    }

    /// Value of the first member. The focuser number slots are all
    /// single-member vectors.
    pub fn first_value(&self) -> f64 {
        self.members.first().map(|m| m.value).unwrap_or(0.0)
    }

    /// Set the value of the first member.
    pub fn set_first_value(&mut self, value: f64) {
        if let Some(member) = self.members.first_mut() {
            member.value = value;
        }
    }
}

/// One selector element of a switch property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchMember {
    pub name: String,
    pub label: String,
    pub on: bool,
}

impl SwitchMember {
    pub fn new(name: &str, label: &str, on: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            on,
        }
    }
}

/// A named vector of selector members with a published state.
///
/// The focuser selectors are all one-of-many: at most one member is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchProperty {
    pub device: String,
    pub name: String,
    pub label: String,
    pub group: String,
    pub state: PropertyState,
    pub members: Vec<SwitchMember>,
}

impl SwitchProperty {
    pub fn new(
        device: &str,
        name: &str,
        label: &str,
        group: &str,
        members: Vec<SwitchMember>,
    ) -> Self {
        Self {
            device: device.to_string(),
            name: name.to_string(),
            label: label.to_string(),
            group: group.to_string(),
            state: PropertyState::Idle,
            members,
        }
    }

    /// Name of the member currently on, if any.
    pub fn active_member(&self) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.on)
            .map(|m| m.name.as_str())
    }

    /// Turn exactly the named member on (one-of-many rule).
    pub fn select(&mut self, name: &str) {
        for member in &mut self.members {
            member.on = member.name == name;
        }
    }

    /// Turn every member off (used for momentary triggers).
    pub fn clear(&mut self) {
        for member in &mut self.members {
            member.on = false;
        }
    }
}

/// External collaborator that exposes properties to remote clients.
///
/// The interface calls `define_*` when a device connects, `update_*` after
/// every handled dispatch, and `delete_property` when the device
/// disconnects. Implementations perform the actual wire encoding; the core
/// only defines the semantic contract.
pub trait PropertyTransport {
    /// Publish a new number property to clients.
    fn define_number(&mut self, property: &NumberProperty) -> Result<()>;

    /// Publish a new switch property to clients.
    fn define_switch(&mut self, property: &SwitchProperty) -> Result<()>;

    /// Push updated values/state of an already-defined number property.
    fn update_number(&mut self, property: &NumberProperty) -> Result<()>;

    /// Push updated values/state of an already-defined switch property.
    fn update_switch(&mut self, property: &SwitchProperty) -> Result<()>;

    /// Remove a property from the client-visible surface.
    fn delete_property(&mut self, device: &str, name: &str) -> Result<()>;
}
