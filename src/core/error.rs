use thiserror::Error;

/// Error type for task configuration, execution, and teardown failures.
///
/// The taxonomy matches how failures are reported to the host pipeline:
/// configuration errors surface before a job starts, launch and stream-read
/// errors are caught inside `process` and converted to a failed document
/// status, and plain I/O errors escape only from `close`.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to launch command: {0}")]
    Launch(#[source] std::io::Error),

    #[error("failed to read process output: {0}")]
    StreamRead(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a launch error
    pub fn launch(err: std::io::Error) -> Self {
        Self::Launch(err)
    }

    /// Create a stream-read error
    pub fn stream_read(err: std::io::Error) -> Self {
        Self::StreamRead(err)
    }

    /// Check whether this error occurred on the per-document execution path
    ///
    /// Execution errors never cross back into the host's document loop; the
    /// task converts them to a failed status instead.
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Launch(_) | Self::StreamRead(_))
    }
}

/// Convenient result type for task operations
pub type Result<T> = std::result::Result<T, TaskError>;
