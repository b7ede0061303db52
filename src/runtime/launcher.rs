//! Process launching for command-running tasks
//!
//! Tasks never spawn operating-system processes directly. They hold a
//! [`ProcessLauncher`], a narrow capability that turns a command string into
//! a running process reduced to its two output streams. The default
//! implementation is [`ShellLauncher`], which hands the command to the host
//! shell verbatim; test doubles replay scripted streams instead.
//!
//! Whoever launches a process owns its streams and must close them on every
//! path. [`close_quietly`] is the release helper for paths where a close
//! failure must not replace the outcome already decided.

use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::process::Command;
use tracing::debug;

/// One captured output stream of a launched process
///
/// Lines are yielded without their terminators; `Ok(None)` marks
/// end-of-stream. A closed stream also reads as ended.
#[async_trait]
pub trait ProcessStream: Send {
    /// Read the next line, or `None` once the stream has ended.
    async fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Release the stream and any underlying pipe.
    async fn close(&mut self) -> io::Result<()>;
}

/// The two output streams of a freshly launched process
///
/// The process behind the streams is already running and is never waited on.
/// End-of-stream on the pipes is the only completion signal callers observe.
pub struct LaunchedProcess {
    /// Standard output, line by line.
    pub stdout: Box<dyn ProcessStream>,
    /// Standard error, line by line.
    pub stderr: Box<dyn ProcessStream>,
}

impl std::fmt::Debug for LaunchedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchedProcess").finish_non_exhaustive()
    }
}

impl LaunchedProcess {
    /// Assemble a launched process from its two streams
    pub fn new(
        stdout: impl ProcessStream + 'static,
        stderr: impl ProcessStream + 'static,
    ) -> Self {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        }
    }
}

/// Capability to launch an external command and capture its output
///
/// Implementations decide how the command string is interpreted. Callers own
/// both returned streams and must close them when done, whether or not
/// reading succeeded.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Launch `command` and hand back its output streams.
    async fn launch(&self, command: &str) -> io::Result<LaunchedProcess>;
}

/// Launches commands through the host shell
///
/// The command string reaches the shell unmodified: no argument splitting,
/// no quoting, no environment scrubbing. `sh -c` interprets it on Unix and
/// `cmd /C` on Windows, so pipes, redirection, and `&&` chains behave as
/// they would at an interactive prompt.
///
/// The launched child is not killed on drop and its exit status is never
/// collected. A command that exits non-zero is indistinguishable from one
/// that succeeds, except through whatever it wrote to its streams.
///
/// # Examples
///
/// ```rust,no_run
/// use docflow_tasks::runtime::{ProcessLauncher, ShellLauncher};
///
/// # #[tokio::main]
/// # async fn main() -> std::io::Result<()> {
/// let launcher = ShellLauncher::new();
/// let mut process = launcher.launch("echo hello").await?;
/// while let Some(line) = process.stdout.next_line().await? {
///     println!("{}", line);
/// }
/// process.stdout.close().await?;
/// process.stderr.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLauncher;

impl ShellLauncher {
    /// Create a launcher that uses the host shell
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(command);
        cmd
    }
}

#[async_trait]
impl ProcessLauncher for ShellLauncher {
    async fn launch(&self, command: &str) -> io::Result<LaunchedProcess> {
        debug!("launching shell command: {}", command);

        let mut child = Self::shell_command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child.stdout.take().ok_or_else(|| pipe_missing("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| pipe_missing("stderr"))?;

        // The child handle is dropped here without waiting. The runtime reaps
        // the process once it exits; its exit status is never collected.
        Ok(LaunchedProcess::new(
            PipeStream::new(stdout),
            PipeStream::new(stderr),
        ))
    }
}

fn pipe_missing(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("child {} was not captured", name),
    )
}

/// Line reader over one end of a child process pipe
struct PipeStream<R> {
    lines: Option<Lines<BufReader<R>>>,
}

impl<R> PipeStream<R>
where
    R: AsyncRead + Unpin + Send,
{
    fn new(pipe: R) -> Self {
        Self {
            lines: Some(BufReader::new(pipe).lines()),
        }
    }
}

#[async_trait]
impl<R> ProcessStream for PipeStream<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.lines.as_mut() {
            Some(lines) => lines.next_line().await,
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> io::Result<()> {
        // Dropping the reader closes the pipe; there is nothing else to release.
        self.lines = None;
        Ok(())
    }
}

/// Release a stream, logging and discarding any close failure
///
/// Used on paths where the primary outcome has already been decided and a
/// failing release must not overwrite it.
pub async fn close_quietly(stream: &mut dyn ProcessStream) {
    if let Err(err) = stream.close().await {
        debug!("ignoring close failure on process stream: {}", err);
    }
}
