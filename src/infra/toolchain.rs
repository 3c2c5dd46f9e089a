//! Toolchain invocation
//!
//! Builds the `idf.py` verb invocations used for a release build and turns
//! their exit status into typed errors.

use std::path::{Path, PathBuf};

use super::process::{Invocation, ProcessRunner};
use crate::error::{ToolPhase, ToolchainError};

/// ESP-IDF front-end wrapper
#[derive(Debug, Clone)]
pub struct IdfToolchain {
    /// Front-end command (`idf.py` unless overridden)
    command: String,
    /// Environment variable pinning the target
    target_env: String,
    /// Define carrying the build variant name
    board_define: String,
    /// Project root, the working directory of every call
    project_dir: PathBuf,
}

impl IdfToolchain {
    /// Create a new toolchain wrapper
    pub fn new(
        command: impl Into<String>,
        target_env: impl Into<String>,
        board_define: impl Into<String>,
        project_dir: &Path,
    ) -> Self {
        Self {
            command: command.into(),
            target_env: target_env.into(),
            board_define: board_define.into(),
            project_dir: project_dir.to_path_buf(),
        }
    }

    /// Front-end command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the front-end command can be found
    pub fn is_available(&self) -> bool {
        which::which_in(&self.command, std::env::var_os("PATH"), &self.project_dir).is_ok()
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(&self.command).current_dir(&self.project_dir)
    }

    /// `set-target <target>`, with any stale target override cleared
    pub fn set_target(&self, target: &str) -> Invocation {
        self.invocation()
            .env_remove(&self.target_env)
            .arg("set-target")
            .arg(target)
    }

    /// `-D<define>=<name> build`
    pub fn build(&self, board_name: &str) -> Invocation {
        self.invocation()
            .arg(format!("-D{}={board_name}", self.board_define))
            .arg("build")
    }

    /// `merge-bin`
    pub fn merge_bin(&self) -> Invocation {
        self.invocation().arg("merge-bin")
    }
}

/// Run one toolchain step, mapping spawn failures and non-zero exits
pub fn run_step<R: ProcessRunner + ?Sized>(
    runner: &mut R,
    phase: ToolPhase,
    invocation: &Invocation,
) -> Result<(), ToolchainError> {
    let status = runner
        .run(invocation)
        .map_err(|e| ToolchainError::Spawn {
            phase,
            command: invocation.command_line(),
            error: e.to_string(),
        })?;

    if status.is_success() {
        Ok(())
    } else {
        Err(ToolchainError::Failed {
            phase,
            command: invocation.command_line(),
            status: status.to_string(),
        })
    }
}
