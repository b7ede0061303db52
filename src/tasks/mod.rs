//! Built-in pipeline tasks
//!
//! Each task here implements [`JobTask`](crate::core::JobTask) and is
//! constructed fresh for every job run. [`CommandExecTask`] is the worked
//! example: it runs a configured shell command once per document and records
//! the command's output on the document.

pub mod exec;


pub use exec::CommandExecTask;
