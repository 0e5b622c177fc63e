//! Custom error types for the focuser control core.
//!
//! This module defines the primary error type, `FocusError`, for the crate.
//! Using the `thiserror` crate, it provides a centralized and consistent way
//! to report the failure classes the core distinguishes:
//!
//! - **`Unsupported`**: a motion operation was requested for a capability the
//!   device does not declare. The dispatcher filters these before they reach
//!   the driver; this variant exists for direct callers of the interface.
//! - **`Transport`**: defining or deleting a property against the external
//!   property transport failed. Surfaced by `update_properties`.
//! - **`Driver`**: the concrete driver reported a hardware fault outside the
//!   tri-state motion protocol (e.g. a rejected speed value).
//! - **`NotInitialized`**: a lifecycle call arrived before `init_properties`.
//!
//! None of these are fatal: every failure is reported through a return value
//! or a published alert state, never through termination.

use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type FocusResult<T> = std::result::Result<T, FocusError>;

/// Error type covering the non-motion failure paths of the core.
#[derive(Error, Debug)]
pub enum FocusError {
    /// Requested operation is not covered by the device capability mask.
    #[error("Operation not supported by this focuser: {0}")]
    Unsupported(&'static str),

    /// Property definition or removal against the transport failed.
    #[error("Property transport error: {0}")]
    Transport(String),

    /// The concrete driver reported a hardware fault.
    #[error("Focuser driver error: {0}")]
    Driver(String),

    /// Lifecycle misuse: properties were used before `init_properties`.
    #[error("Focuser properties have not been initialized")]
    NotInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FocusError::Unsupported("absolute move");
        assert_eq!(
            err.to_string(),
            "Operation not supported by this focuser: absolute move"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = FocusError::Transport("socket closed".to_string());
        assert!(err.to_string().contains("socket closed"));
    }
}
