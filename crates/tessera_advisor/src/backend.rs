//! The pluggable advisory backend.

use crate::advisor::DEFAULT_TIMEOUT;
use crate::error::AdvisorError;
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Interval between exit checks of a running backend process.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Something that turns a prompt into a free-form text answer.
///
/// Implementations are expected to answer with JSON, possibly wrapped in a
/// markdown code fence. They may block; the [`crate::Advisor`] runs them on a
/// worker thread and abandons them after its timeout.
pub trait AdvisoryBackend {
    /// Returns the backend's answer to `prompt` under the given system instruction.
    fn complete(&self, system: &str, prompt: &str) -> Result<String, AdvisorError>;
}

/// Runs an external command per request.
///
/// The system instruction and the prompt are written to the child's stdin,
/// separated by a blank line; the child's stdout is the answer. A non-zero
/// exit status is a backend failure. A child still running after the
/// backend's timeout is killed and reaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBackend {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessBackend {
    /// Creates a backend that runs `program` with `args` under [`DEFAULT_TIMEOUT`].
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parses a whitespace-separated command line such as `"llm --json"`.
    ///
    /// Returns `None` for a blank command line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    /// Sets how long a child may run before it is killed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the program this backend runs.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns how long a child may run before it is killed.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Waits for `child` until the timeout, killing it once the timeout passes.
    fn wait_or_kill(&self, child: &mut Child) -> Result<ExitStatus, AdvisorError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    tracing::warn!(program = %self.program, "advisory backend timed out; killing it");
                    // The child may exit between the check and the kill.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AdvisorError::Timeout(self.timeout));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AdvisorError::Backend(format!(
                        "'{}' failed: {e}",
                        self.program
                    )));
                }
            }
        }
    }
}

impl AdvisoryBackend for ProcessBackend {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, AdvisorError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AdvisorError::Backend(format!("cannot run '{}': {e}", self.program)))?;

        // Stdin is fed and both outputs drained on their own threads, so a
        // child that answers while still reading never blocks on a full pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = format!("{system}\n\n{prompt}");
            thread::spawn(move || {
                if let Err(e) = stdin.write_all(input.as_bytes()) {
                    tracing::debug!(error = %e, "backend stopped reading its prompt");
                }
            })
        });
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = self.wait_or_kill(&mut child);
        if let Some(writer) = writer {
            let _ = writer.join();
        }
        let stdout = collect(stdout);
        let stderr = collect(stderr);
        let status = status?;

        if !status.success() {
            return Err(AdvisorError::Backend(format!(
                "'{}' exited with {}: {}",
                self.program,
                status,
                stderr.trim()
            )));
        }
        Ok(stdout)
    }
}

/// Reads a child output stream to its end on a separate thread.
fn drain(mut stream: impl Read + Send + 'static) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(e) = stream.read_to_end(&mut buf) {
            tracing::debug!(error = %e, "backend output read failed");
        }
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let bytes = handle.and_then(|h| h.join().ok()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
