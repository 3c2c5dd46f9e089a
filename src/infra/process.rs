//! External process execution
//!
//! Toolchain calls go through the [`ProcessRunner`] trait so the release
//! engine can be driven without spawning real processes.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A fully described command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute
    pub program: String,
    /// Arguments in order
    pub args: Vec<String>,
    /// Environment variables removed from the child's environment
    pub env_remove: Vec<String>,
    /// Working directory of the child
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation of `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env_remove: Vec::new(),
            current_dir: None,
        }
    }

    /// Append an argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Remove an environment variable for the child
    #[must_use]
    pub fn env_remove(mut self, key: impl Into<String>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Command line as it would be typed in a shell, for messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Exit status of a finished process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    code: Option<i32>,
}

impl ToolStatus {
    /// Status with an explicit exit code
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status of a process killed by a signal
    pub fn terminated() -> Self {
        Self { code: None }
    }

    /// Successful status
    pub fn success() -> Self {
        Self::from_code(0)
    }

    /// Whether the process exited with code zero
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code, if the process exited normally
    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {code}"),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Capability to run an external command to completion
pub trait ProcessRunner {
    /// Run the invocation, blocking until it exits
    fn run(&mut self, invocation: &Invocation) -> io::Result<ToolStatus>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &mut R {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ToolStatus> {
        (**self).run(invocation)
    }
}

/// Runs commands with `std::process`, inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner {
    /// Send child stdout to our stderr, keeping stdout for a report
    stdout_to_stderr: bool,
}

impl SystemRunner {
    /// Runner inheriting stdio
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect child stdout to stderr
    #[must_use]
    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        for key in &invocation.env_remove {
            cmd.env_remove(key);
        }
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }
        if self.stdout_to_stderr {
            cmd.stdout(Stdio::from(io::stderr()));
        }
        cmd
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ToolStatus> {
        let mut cmd = self.command(invocation);

        tracing::debug!("Running: {invocation}");
        let status = cmd.status()?;
        tracing::debug!("'{invocation}' finished with {status}");
        Ok(status.into())
    }
}
