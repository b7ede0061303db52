//! Command execution task
//!
//! Runs a user-configured shell command once per document and records what
//! the command printed on the document itself:
//!
//! - stdout lines are joined, without separators, into `sampleTaskInput`
//! - stderr lines are joined the same way into `sampleTaskErr`
//!
//! A run counts as successful once both streams have been read to
//! end-of-stream. The command's exit status is never collected, so a command
//! that fails loudly but prints nothing still yields [`TaskStatus::Continue`].

use crate::core::{
    Document, FieldMap, FormField, FormFieldSet, JobTask, MessageBundle, MessageSource, Result,
    TaskError, TaskHost, TaskStatus,
};
use crate::runtime::{
    close_quietly, LaunchedProcess, ProcessLauncher, ProcessStream, ShellLauncher,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::io;
use std::sync::Arc;
use tracing::error;

/// Document field that receives the command's standard output.
pub const INPUT_FIELD: &str = "sampleTaskInput";
/// Document field that receives the command's standard error.
pub const ERR_FIELD: &str = "sampleTaskErr";
/// Name of the command text field in the configuration form.
pub const COMMAND_FIELD: &str = "commandField";
/// Name of the decorative checkbox in the configuration form.
pub const TEST_CHECK_FIELD: &str = "testCheck";
/// Command substrings rejected by form validation.
pub const DENIED_COMMANDS: &[&str] = &["shutdown"];
/// Command pre-filled in the configuration form.
pub const DEFAULT_COMMAND: &str = "pwd";

/// Task name, also the namespace for its form messages.
pub const TASK_NAME: &str = "sampleTask";

const MESSAGE_PROPERTIES: &str = "\
sampleTask.commandFieldLabel=Command to execute
sampleTask.testMessage=Test checkbox
sampleTask.testMessageDescription=Example checkbox with no effect on execution
";

static MESSAGES: Lazy<Arc<MessageBundle>> =
    Lazy::new(|| Arc::new(MessageBundle::from_properties(MESSAGE_PROPERTIES)));

fn default_messages() -> Arc<dyn MessageSource> {
    Arc::clone(&*MESSAGES) as Arc<dyn MessageSource>
}

/// Pipeline task that executes a configured command for every document
///
/// The command string is handed to the launcher verbatim: no escaping, no
/// argument splitting, no sandboxing, no timeout, and the child's exit
/// status is never consulted. Form validation rejects only a short denylist.
/// This task demonstrates the task contract end to end; treat it as a
/// template rather than production tooling.
///
/// # Examples
///
/// ```rust,no_run
/// use docflow_tasks::core::{FieldMap, JobTask, MemoryDocument, TaskStatus};
/// use docflow_tasks::tasks::CommandExecTask;
///
/// # #[tokio::main]
/// # async fn main() -> docflow_tasks::core::Result<()> {
/// let mut task = CommandExecTask::new();
///
/// let mut fields = FieldMap::new();
/// fields.insert("commandField".to_string(), "echo hello".to_string());
/// assert!(task.validate_form_fields(&fields).is_none());
/// task.init(fields)?;
///
/// let mut document = MemoryDocument::with_generated_id();
/// assert_eq!(task.process(&mut document).await, TaskStatus::Continue);
/// assert_eq!(document.field("sampleTaskInput"), Some("hello"));
///
/// task.close()?;
/// # Ok(())
/// # }
/// ```
pub struct CommandExecTask {
    host: TaskHost,
    // Command captured from job configuration at init time.
    command: Option<String>,
    // Capability acquired at init time unless one was injected.
    launcher: Option<Arc<dyn ProcessLauncher>>,
}

impl CommandExecTask {
    /// Create a task for one job run
    ///
    /// The process launcher is acquired during [`JobTask::init`].
    pub fn new() -> Self {
        Self {
            host: TaskHost::new(TASK_NAME, TASK_NAME, default_messages()),
            command: None,
            launcher: None,
        }
    }

    /// Create a task that launches through the given capability
    ///
    /// Production jobs use [`CommandExecTask::new`]; tests inject scripted
    /// launchers here.
    pub fn with_launcher(launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            host: TaskHost::new(TASK_NAME, TASK_NAME, default_messages()),
            command: None,
            launcher: Some(launcher),
        }
    }

    async fn run(&self, document: &mut dyn Document) -> Result<()> {
        let command = self
            .command
            .as_deref()
            .ok_or_else(|| TaskError::configuration("no command captured; init() must run first"))?;
        let launcher = self
            .launcher
            .as_ref()
            .ok_or_else(|| TaskError::configuration("no process launcher; init() must run first"))?;

        let LaunchedProcess {
            mut stdout,
            mut stderr,
        } = launcher.launch(command).await.map_err(TaskError::launch)?;

        let outcome = record_output(stdout.as_mut(), stderr.as_mut(), document).await;

        // Both streams opened above are released here, on success and
        // failure alike. A close failure never replaces the outcome.
        close_quietly(stdout.as_mut()).await;
        close_quietly(stderr.as_mut()).await;

        outcome
    }
}

impl Default for CommandExecTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobTask for CommandExecTask {
    fn name(&self) -> &str {
        self.host.name()
    }

    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = FormFieldSet::new();
        fields.add_text(
            COMMAND_FIELD,
            self.host.task_message("commandFieldLabel"),
            DEFAULT_COMMAND,
        );
        // The checkbox is completely ignored by execution; it is kept as a
        // worked example of a second field kind.
        fields.add_checkbox(
            TEST_CHECK_FIELD,
            self.host.task_message("testMessage"),
            self.host.task_message("testMessageDescription"),
        );
        fields.into_vec()
    }

    fn validate_form_fields(&self, fields: &FieldMap) -> Option<String> {
        let command = match fields.get(COMMAND_FIELD) {
            Some(command) => command,
            None => return Some(format!("Required field '{}' is missing.", COMMAND_FIELD)),
        };

        for denied in DENIED_COMMANDS {
            // Case-sensitive containment, not whole-word matching.
            if command.contains(denied) {
                return Some(format!(
                    "Invalid command found. '{}' is not allowed.",
                    denied
                ));
            }
        }

        None
    }

    fn init(&mut self, fields: FieldMap) -> Result<()> {
        self.host.init(fields);

        // Capture the command from the stored job configuration.
        let command = self
            .host
            .form_field_map()
            .and_then(|fields| fields.get(COMMAND_FIELD))
            .cloned()
            .ok_or_else(|| {
                TaskError::configuration(format!("required field '{}' is missing", COMMAND_FIELD))
            })?;
        self.command = Some(command);

        // Acquire the process launcher unless a custom one was injected.
        if self.launcher.is_none() {
            self.launcher = Some(Arc::new(ShellLauncher::new()));
        }

        Ok(())
    }

    async fn process(&mut self, document: &mut dyn Document) -> TaskStatus {
        match self.run(document).await {
            Ok(()) => TaskStatus::Continue,
            Err(err) => {
                error!(
                    "task {} could not process document {}: {}",
                    self.host.name(),
                    document.source_repository_id(),
                    err
                );
                // The document is marked failed in the job run report; fields
                // already written stay written.
                TaskStatus::Failed
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.host.close()?;
        // Release the per-job command and launcher; nothing else lingers.
        self.command = None;
        self.launcher = None;
        Ok(())
    }
}

/// Drain stdout, then stderr, writing each onto the document
///
/// Stdout is read fully before stderr is touched. A failure between the two
/// writes leaves the first one in place.
async fn record_output(
    stdout: &mut dyn ProcessStream,
    stderr: &mut dyn ProcessStream,
    document: &mut dyn Document,
) -> Result<()> {
    let output = read_joined(stdout).await.map_err(TaskError::stream_read)?;
    document.add_single_field(INPUT_FIELD, output);

    let errors = read_joined(stderr).await.map_err(TaskError::stream_read)?;
    document.add_single_field(ERR_FIELD, errors);

    Ok(())
}

/// Read a stream to end-of-stream, joining lines without a separator
async fn read_joined(stream: &mut dyn ProcessStream) -> io::Result<String> {
    let mut joined = String::new();
    while let Some(line) = stream.next_line().await? {
        joined.push_str(&line);
    }
    Ok(joined)
}
