//! Bundled focuser driver implementations.
//!
//! `MockFocuser` validates the dispatch and state-machine contracts and
//! serves as the reference for concrete driver authors.

pub mod mock;

pub use mock::MockFocuser;
