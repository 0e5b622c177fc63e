//! Core library for capability-based focuser control.
//!
//! This crate models the control and state-reporting abstraction for a
//! motorized focusing mechanism, whether a standalone focuser or one embedded
//! in a camera or mount driver. It defines the capability model, the
//! motion-command protocol, and the asynchronous-motion state machine that
//! any concrete focuser driver implements; hardware I/O and the network
//! property transport are external collaborators.
//!
//! # Architecture Overview
//!
//! - [`FocuserCapability`]: frozen-at-construction bitmask of supported
//!   motion modes, with named predicates for discovery.
//! - [`FocuserDriver`]: the strategy trait a concrete driver implements;
//!   every operation returns promptly with a tri-state [`MotionStatus`].
//! - [`FocuserInterface`]: capability-gated command dispatcher and motion
//!   state machine, mirroring state into the property surface.
//! - [`property::PropertyTransport`]: seam to the external property system
//!   that actually exposes state to remote clients.
//!
//! # Data Flow
//!
//! ```text
//! client update --> FocuserInterface::process_number / process_switch
//!               --> FocuserDriver operation --> MotionStatus
//!               --> FocusState machine --> PropertyTransport publish
//! ```

pub mod capability;
pub mod config;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod interface;
pub mod motion;
pub mod property;
pub mod state;

pub use capability::FocuserCapability;
pub use config::FocuserParams;
pub use driver::FocuserDriver;
pub use error::{FocusError, FocusResult};
pub use interface::FocuserInterface;
pub use motion::{FocusDirection, MotionStatus, PropertyState, SwitchState};
pub use state::FocusState;
