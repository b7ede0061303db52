//! Testing utilities for task implementations
//!
//! This module provides:
//! - Mock process launchers and scripted streams
//! - Close-call logging for resource-safety assertions
//!
//! The mocks live in the library proper, not behind `cfg(test)`, so that
//! downstream crates can drive their own task implementations with them.

pub mod mocks;

pub use mocks::{MockLaunch, MockLauncher, ScriptedStream, StreamCloseLog};
