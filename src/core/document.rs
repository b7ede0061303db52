//! Document boundary between a task and the host pipeline
//!
//! Documents are created and owned by the pipeline; a task only ever sees
//! them by mutable reference for the duration of one `process` call and
//! mutates them by adding named metadata fields.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A document flowing through a migration job
///
/// The contract a task consumes: write named single-valued fields and read
/// the source-repository identifier for logging. Everything else about a
/// document stays on the pipeline's side of the boundary.
pub trait Document: Send {
    /// Set a single-valued metadata field, replacing any prior value
    fn add_single_field(&mut self, name: &str, value: String);

    /// Identifier of the document in its source repository, used for logging
    fn source_repository_id(&self) -> &str;
}

/// In-memory document used by tests and the demo runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryDocument {
    source_repository_id: String,
    fields: HashMap<String, String>,
}

impl MemoryDocument {
    /// Create a document with the given source-repository id
    pub fn new(source_repository_id: impl Into<String>) -> Self {
        Self {
            source_repository_id: source_repository_id.into(),
            fields: HashMap::new(),
        }
    }

    /// Create a document with a random v4 id
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Read a field back, if the task has written it
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All fields written so far
    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

impl Document for MemoryDocument {
    fn add_single_field(&mut self, name: &str, value: String) {
        self.fields.insert(name.to_string(), value);
    }

    fn source_repository_id(&self) -> &str {
        &self.source_repository_id
    }
}
