//! The task execution contract
//!
//! This module defines what a pipeline task must provide:
//! - A declarative configuration surface and its validation
//! - `init`/`close` lifecycle hooks, called once per job
//! - Per-document `process`, returning a status the job runner acts on
//!
//! Tasks compose with a [`TaskHost`] instead of inheriting from a framework
//! base class: the host carries the shared lifecycle state (the validated
//! field map) and the message-bundle wiring.

use crate::core::document::Document;
use crate::core::error::Result;
use crate::core::fields::{FieldMap, FormField};
use crate::core::messages::MessageSource;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of processing one document
///
/// The job runner understands all four outcomes; which ones a given task
/// actually produces is part of that task's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Document processed, hand it to the next task
    Continue,
    /// Document deliberately left untouched by this task
    Skip,
    /// Document failed for this task; the runner's policy decides the job
    Failed,
    /// Stop the whole job run
    Abort,
}

/// A single processing step in a migration job
///
/// Lifecycle per job: `form_fields` and `validate_form_fields` at
/// configuration time, `init` exactly once after validation succeeds,
/// `process` once per document, `close` exactly once at the end. `process`
/// never returns an error across the boundary; failures are reported through
/// [`TaskStatus`] and the log.
#[async_trait]
pub trait JobTask: Send {
    /// Stable task name, used for registration and logging
    fn name(&self) -> &str;

    /// The configurable fields this task offers, in display order
    fn form_fields(&self) -> Vec<FormField>;

    /// Server-side check of submitted values
    ///
    /// Returns a human-readable rejection message when the configuration is
    /// unacceptable, `None` when the job may start.
    fn validate_form_fields(&self, fields: &FieldMap) -> Option<String>;

    /// Capture validated configuration and acquire per-job resources
    fn init(&mut self, fields: FieldMap) -> Result<()>;

    /// Process one document, strictly between `init` and `close`
    async fn process(&mut self, document: &mut dyn Document) -> TaskStatus;

    /// Release per-job resources; failures here reach the job runner
    fn close(&mut self) -> Result<()>;
}

/// Shared host-side state a task composes with
///
/// Replaces framework base-class inheritance: the host owns the task's
/// identity, its message namespace, and the validated field map captured at
/// `init`. Task implementations call [`TaskHost::init`] before deriving any
/// state of their own, and [`TaskHost::close`] during teardown.
pub struct TaskHost {
    name: String,
    message_base: String,
    messages: Arc<dyn MessageSource>,
    fields: Option<FieldMap>,
}

impl TaskHost {
    /// Create a host with the given task name, message namespace, and source
    pub fn new(
        name: impl Into<String>,
        message_base: impl Into<String>,
        messages: Arc<dyn MessageSource>,
    ) -> Self {
        Self {
            name: name.into(),
            message_base: message_base.into(),
            messages,
            fields: None,
        }
    }

    /// The task name this host was created for
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve a message key within the task's namespace
    ///
    /// Lookup misses fall back to the bare key so a missing bundle entry
    /// degrades to a readable label instead of an error.
    pub fn task_message(&self, key: &str) -> String {
        let code = format!("{}.{}", self.message_base, key);
        self.messages
            .message(&code)
            .unwrap_or_else(|| key.to_string())
    }

    /// Store the validated configuration for the duration of the job
    pub fn init(&mut self, fields: FieldMap) {
        self.fields = Some(fields);
    }

    /// The configuration captured at `init`, `None` before then
    pub fn form_field_map(&self) -> Option<&FieldMap> {
        self.fields.as_ref()
    }

    /// Release shared lifecycle state
    pub fn close(&mut self) -> Result<()> {
        self.fields = None;
        Ok(())
    }
}
