//! Mock implementations for testing
//!
//! This module provides mock stand-ins for the process boundary:
//! - Scripted process streams with injectable read and close failures
//! - A shared close log for resource-safety assertions
//! - A mock launcher with queued per-launch outcomes and failure injection
//!
//! Everything here is deterministic unless a failure rate is configured, so
//! task tests can assert exact field contents and exact stream lifecycles.

use crate::runtime::{LaunchedProcess, ProcessLauncher, ProcessStream};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

/// Shared record of stream close calls
///
/// Every [`ScriptedStream`] wired to a log appends its name on each `close`
/// call, letting tests assert that both streams of a launch were released
/// exactly once, on success and failure paths alike.
#[derive(Debug, Default)]
pub struct StreamCloseLog {
    closed: Mutex<Vec<String>>,
}

impl StreamCloseLog {
    /// Create an empty close log behind an `Arc` for sharing
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record one close call for the named stream
    pub fn record(&self, stream_name: &str) {
        self.closed.lock().push(stream_name.to_string());
    }

    /// Stream names in the order their close calls arrived
    pub fn closed_streams(&self) -> Vec<String> {
        self.closed.lock().clone()
    }

    /// Number of close calls recorded for the named stream
    pub fn close_count(&self, stream_name: &str) -> usize {
        self.closed
            .lock()
            .iter()
            .filter(|name| name.as_str() == stream_name)
            .count()
    }
}

/// A process stream that replays scripted lines
///
/// Yields the queued lines in order, then ends. A read failure can be
/// injected after the queue drains, and a close failure on release.
pub struct ScriptedStream {
    name: String,
    lines: VecDeque<String>,
    read_error: Option<io::ErrorKind>,
    close_error: Option<io::ErrorKind>,
    close_log: Option<Arc<StreamCloseLog>>,
    closed: bool,
}

impl ScriptedStream {
    /// Create a stream that yields `lines` in order, then ends
    pub fn new<I, S>(name: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            lines: lines.into_iter().map(Into::into).collect(),
            read_error: None,
            close_error: None,
            close_log: None,
            closed: false,
        }
    }

    /// Fail every read after the scripted lines are exhausted
    pub fn with_read_error(mut self, kind: io::ErrorKind) -> Self {
        self.read_error = Some(kind);
        self
    }

    /// Fail every close call with the given kind
    pub fn with_close_error(mut self, kind: io::ErrorKind) -> Self {
        self.close_error = Some(kind);
        self
    }

    /// Record close calls in the given log
    pub fn with_close_log(mut self, log: Arc<StreamCloseLog>) -> Self {
        self.close_log = Some(log);
        self
    }
}

#[async_trait]
impl ProcessStream for ScriptedStream {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        if let Some(line) = self.lines.pop_front() {
            return Ok(Some(line));
        }
        match self.read_error {
            Some(kind) => Err(io::Error::new(kind, "mock read failure")),
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> io::Result<()> {
        if let Some(log) = &self.close_log {
            log.record(&self.name);
        }
        self.closed = true;
        match self.close_error {
            Some(kind) => Err(io::Error::new(kind, "mock close failure")),
            None => Ok(()),
        }
    }
}

/// Scripted outcome for one launch call
///
/// The default outcome is a successful launch whose streams end immediately.
#[derive(Debug, Clone, Default)]
pub struct MockLaunch {
    /// Lines yielded on the stdout stream.
    pub stdout_lines: Vec<String>,
    /// Lines yielded on the stderr stream.
    pub stderr_lines: Vec<String>,
    /// Fail the launch itself; no streams are produced.
    pub launch_error: Option<io::ErrorKind>,
    /// Fail stdout reads once the scripted lines are exhausted.
    pub stdout_read_error: Option<io::ErrorKind>,
    /// Fail stderr reads once the scripted lines are exhausted.
    pub stderr_read_error: Option<io::ErrorKind>,
    /// Fail the close call on both streams.
    pub close_error: Option<io::ErrorKind>,
}

impl MockLaunch {
    /// Launch outcome with the given stdout and stderr lines
    pub fn with_output(stdout: &[&str], stderr: &[&str]) -> Self {
        Self {
            stdout_lines: stdout.iter().map(|line| line.to_string()).collect(),
            stderr_lines: stderr.iter().map(|line| line.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Launch outcome that fails before any stream exists
    pub fn failing_launch(kind: io::ErrorKind) -> Self {
        Self {
            launch_error: Some(kind),
            ..Self::default()
        }
    }
}

/// Mock process launcher with queued per-launch outcomes
///
/// Each launch consumes the next queued [`MockLaunch`]; an empty queue
/// produces the default outcome. Launched command strings are recorded
/// verbatim for assertion.
pub struct MockLauncher {
    launches: Mutex<VecDeque<MockLaunch>>,
    commands: Mutex<Vec<String>>,
    close_log: Arc<StreamCloseLog>,
    failure_rate: f64,
}

impl MockLauncher {
    /// Create a mock launcher with an empty outcome queue
    pub fn new() -> Self {
        Self {
            launches: Mutex::new(VecDeque::new()),
            commands: Mutex::new(Vec::new()),
            close_log: StreamCloseLog::new(),
            failure_rate: 0.0,
        }
    }

    /// Queue the outcome for the next launch call
    pub fn queue_launch(&self, launch: MockLaunch) {
        self.launches.lock().push_back(launch);
    }

    /// Set random launch failure rate (0.0 to 1.0)
    pub fn set_failure_rate(&mut self, rate: f64) {
        self.failure_rate = rate.clamp(0.0, 1.0);
    }

    /// The close log shared with every stream this launcher produced
    pub fn close_log(&self) -> Arc<StreamCloseLog> {
        Arc::clone(&self.close_log)
    }

    /// Command strings passed to `launch`, in call order
    pub fn launched_commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }
}

impl Default for MockLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessLauncher for MockLauncher {
    async fn launch(&self, command: &str) -> io::Result<LaunchedProcess> {
        self.commands.lock().push(command.to_string());

        // Simulate random failures
        if self.failure_rate > 0.0 && rand::random::<f64>() < self.failure_rate {
            return Err(io::Error::new(io::ErrorKind::Other, "mock launch failure"));
        }

        let next = self.launches.lock().pop_front().unwrap_or_default();
        if let Some(kind) = next.launch_error {
            return Err(io::Error::new(kind, "mock launch failure"));
        }

        let mut stdout = ScriptedStream::new("stdout", next.stdout_lines)
            .with_close_log(Arc::clone(&self.close_log));
        let mut stderr = ScriptedStream::new("stderr", next.stderr_lines)
            .with_close_log(Arc::clone(&self.close_log));

        if let Some(kind) = next.stdout_read_error {
            stdout = stdout.with_read_error(kind);
        }
        if let Some(kind) = next.stderr_read_error {
            stderr = stderr.with_read_error(kind);
        }
        if let Some(kind) = next.close_error {
            stdout = stdout.with_close_error(kind);
            stderr = stderr.with_close_error(kind);
        }

        Ok(LaunchedProcess::new(stdout, stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_stream_yields_lines_then_ends() {
        let mut stream = ScriptedStream::new("stdout", ["one", "two"]);

        assert_eq!(stream.next_line().await.unwrap(), Some("one".to_string()));
        assert_eq!(stream.next_line().await.unwrap(), Some("two".to_string()));
        assert_eq!(stream.next_line().await.unwrap(), None);
        assert_eq!(stream.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scripted_stream_read_error_after_lines() {
        let mut stream =
            ScriptedStream::new("stdout", ["partial"]).with_read_error(io::ErrorKind::BrokenPipe);

        assert_eq!(
            stream.next_line().await.unwrap(),
            Some("partial".to_string())
        );
        let err = stream.next_line().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[tokio::test]
    async fn test_scripted_stream_records_close() {
        let log = StreamCloseLog::new();
        let mut stream =
            ScriptedStream::new("stderr", Vec::<String>::new()).with_close_log(Arc::clone(&log));

        stream.close().await.unwrap();

        assert_eq!(log.close_count("stderr"), 1);
        assert_eq!(log.closed_streams(), vec!["stderr"]);
        assert_eq!(stream.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scripted_stream_close_error_still_recorded() {
        let log = StreamCloseLog::new();
        let mut stream = ScriptedStream::new("stdout", Vec::<String>::new())
            .with_close_log(Arc::clone(&log))
            .with_close_error(io::ErrorKind::Other);

        assert!(stream.close().await.is_err());
        assert_eq!(log.close_count("stdout"), 1);
    }

    #[tokio::test]
    async fn test_mock_launcher_replays_queued_outcomes_in_order() {
        let launcher = MockLauncher::new();
        launcher.queue_launch(MockLaunch::with_output(&["first"], &[]));
        launcher.queue_launch(MockLaunch::with_output(&["second"], &["warning"]));

        let mut process = launcher.launch("run one").await.unwrap();
        assert_eq!(
            process.stdout.next_line().await.unwrap(),
            Some("first".to_string())
        );

        let mut process = launcher.launch("run two").await.unwrap();
        assert_eq!(
            process.stdout.next_line().await.unwrap(),
            Some("second".to_string())
        );
        assert_eq!(
            process.stderr.next_line().await.unwrap(),
            Some("warning".to_string())
        );

        assert_eq!(launcher.launched_commands(), vec!["run one", "run two"]);
    }

    #[tokio::test]
    async fn test_mock_launcher_default_outcome_is_empty_streams() {
        let launcher = MockLauncher::new();

        let mut process = launcher.launch("anything").await.unwrap();
        assert_eq!(process.stdout.next_line().await.unwrap(), None);
        assert_eq!(process.stderr.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_launcher_launch_failure() {
        let launcher = MockLauncher::new();
        launcher.queue_launch(MockLaunch::failing_launch(io::ErrorKind::NotFound));

        let err = launcher.launch("missing-binary").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_mock_launcher_failure_rate_full() {
        let mut launcher = MockLauncher::new();
        launcher.set_failure_rate(1.0);

        assert!(launcher.launch("any").await.is_err());
    }
}
