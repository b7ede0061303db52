//! Process launching and stream plumbing for command-running tasks
//!
//! This module owns the boundary between tasks and the operating system:
//!
//! - [`ProcessLauncher`] - the capability a task acquires to start commands
//! - [`ProcessStream`] - one captured output stream, read line by line
//! - [`ShellLauncher`] - the production launcher backed by the host shell
//! - [`close_quietly`] - best-effort stream release that never fails

pub mod launcher;

pub use launcher::{close_quietly, LaunchedProcess, ProcessLauncher, ProcessStream, ShellLauncher};
