//! Shared contract between tasks and the hosting pipeline
//!
//! This module provides:
//! - The [`JobTask`] trait and [`TaskStatus`] outcomes
//! - The [`Document`] boundary a task writes to
//! - Form field declarations and the submitted [`FieldMap`]
//! - Message lookup for localized labels
//! - The crate error type

pub mod document;
pub mod error;
pub mod fields;
pub mod messages;
pub mod task;

// Re-export commonly used types
pub use document::{Document, MemoryDocument};
pub use error::{Result, TaskError};
pub use fields::{FieldKind, FieldMap, FormField, FormFieldSet};
pub use messages::{MessageBundle, MessageSource};
pub use task::{JobTask, TaskHost, TaskStatus};
