//! Pipeline task contract and built-in tasks for document migration jobs
//!
//! A migration job pulls documents from a source repository and pushes each
//! one through an ordered chain of tasks before delivery. This crate defines
//! the Rust side of that task contract and ships the worked example task:
//!
//! - [`core`] - the [`JobTask`](crate::core::JobTask) contract, the task
//!   host, documents, form fields, messages, and errors
//! - [`runtime`] - process launching and output stream capture
//! - [`tasks`] - built-in tasks, starting with
//!   [`CommandExecTask`](crate::tasks::CommandExecTask)
//! - [`testing`] - mock launchers and scripted streams for task tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use docflow_tasks::core::{FieldMap, JobTask, MemoryDocument, TaskStatus};
//! use docflow_tasks::tasks::CommandExecTask;
//!
//! #[tokio::main]
//! async fn main() -> docflow_tasks::core::Result<()> {
//!     let mut task = CommandExecTask::new();
//!
//!     let mut fields = FieldMap::new();
//!     fields.insert("commandField".to_string(), "pwd".to_string());
//!     if let Some(message) = task.validate_form_fields(&fields) {
//!         eprintln!("configuration rejected: {}", message);
//!         return Ok(());
//!     }
//!
//!     task.init(fields)?;
//!
//!     let mut document = MemoryDocument::with_generated_id();
//!     assert_eq!(task.process(&mut document).await, TaskStatus::Continue);
//!     println!("{:?}", document.field("sampleTaskInput"));
//!
//!     task.close()?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod runtime;
pub mod tasks;
pub mod testing;

// Re-export commonly used types
pub use crate::core::{
    Document, FieldMap, FormField, JobTask, MemoryDocument, Result, TaskError, TaskHost,
    TaskStatus,
};
pub use crate::runtime::{ProcessLauncher, ShellLauncher};
pub use crate::tasks::CommandExecTask;

/// Version of the task library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
