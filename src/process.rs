//! Bounded external command execution.
//!
//! Every external process the pipeline owns runs through [`run`], which
//! captures output on reader threads and enforces a wall-clock deadline.
//! A child that outlives its deadline is killed, never leaked.

use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{McpdiffError, Result};

/// A program plus its arguments and optional stdin payload.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Program to execute (resolved via PATH).
    pub program: String,

    /// Arguments passed verbatim; no shell interpretation.
    pub args: Vec<String>,

    /// Payload written to the child's stdin before reading output.
    pub stdin: Option<String>,
}

impl Invocation {
    /// Create an invocation with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Attach a stdin payload.
    pub fn stdin(mut self, payload: impl Into<String>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    /// Build an invocation from a whitespace-separated command line.
    ///
    /// No quoting rules; configuration values like `--analyzer` are plain
    /// program-plus-flags strings. Returns `None` for a blank line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).args(parts.map(str::to_string)))
    }

    /// Render for log messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Result of a completed command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command exited with code 0.
    pub success: bool,
}

/// Outcome of a bounded run.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// The child exited within the deadline.
    Completed(CommandResult),

    /// The deadline expired and the child was killed. Partial output is
    /// discarded.
    TimedOut,
}

/// How often the child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Execute an invocation, enforcing a wall-clock deadline.
///
/// # Errors
///
/// Returns `SpawnFailed` when the program cannot be started and `Io` when
/// waiting on the child fails. Non-zero exits are not errors; they come
/// back as a `Completed` result with `success == false`.
pub fn run(invocation: &Invocation, timeout: Duration) -> Result<ProcessOutcome> {
    let start = Instant::now();

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.stdin(if invocation.stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    let mut child = cmd.spawn().map_err(|e| McpdiffError::SpawnFailed {
        program: invocation.program.clone(),
        message: e.to_string(),
    })?;

    // Writer and reader threads keep all three pipes moving so a chatty
    // child cannot deadlock against a full pipe buffer.
    let writer_handle = invocation.stdin.clone().and_then(|payload| {
        child.stdin.take().map(|mut stdin| {
            thread::spawn(move || {
                // The child may exit before reading everything.
                let _ = stdin.write_all(payload.as_bytes());
            })
        })
    });

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_handle = thread::spawn(move || read_to_string(stdout_pipe));
    let stderr_handle = thread::spawn(move || read_to_string(stderr_pipe));

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if start.elapsed() >= timeout {
            tracing::warn!(
                "'{}' exceeded {}s deadline, killing",
                invocation.display(),
                timeout.as_secs()
            );
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout_handle.join();
            let _ = stderr_handle.join();
            if let Some(handle) = writer_handle {
                let _ = handle.join();
            }
            return Ok(ProcessOutcome::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    };

    let duration = start.elapsed();
    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    if let Some(handle) = writer_handle {
        let _ = handle.join();
    }

    Ok(ProcessOutcome::Completed(CommandResult {
        exit_code: status.code(),
        stdout,
        stderr,
        duration,
        success: status.success(),
    }))
}

fn read_to_string<R: Read>(pipe: Option<R>) -> String {
    let mut output = String::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_string(&mut output);
    }
    output
}
