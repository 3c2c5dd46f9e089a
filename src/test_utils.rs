//! Test utilities
//!
//! Fixtures and a recording process runner for driving the release engine
//! without a real toolchain.

use std::io;
use std::path::PathBuf;

use crate::core::matrix::{BuildVariant, TargetDefinition};
use crate::infra::process::{Invocation, ProcessRunner, ToolStatus};

/// Process runner that records invocations instead of spawning them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    /// Every invocation, in call order
    pub calls: Vec<Invocation>,
    /// Verb that exits with status 1
    fail_on: Option<String>,
    /// File written whenever `merge-bin` runs
    merged_binary: Option<PathBuf>,
}

impl RecordingRunner {
    /// Runner where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any invocation whose arguments contain `verb`
    #[must_use]
    pub fn fail_on(mut self, verb: &str) -> Self {
        self.fail_on = Some(verb.to_string());
        self
    }

    /// Write a fake merged image to `path` on every `merge-bin`
    #[must_use]
    pub fn with_merged_binary(mut self, path: PathBuf) -> Self {
        self.merged_binary = Some(path);
        self
    }

    /// Recorded command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.iter().map(Invocation::command_line).collect()
    }

    /// Number of recorded invocations of a verb
    pub fn count(&self, verb: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| call.args.iter().any(|arg| arg == verb))
            .count()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ToolStatus> {
        self.calls.push(invocation.clone());

        if let Some(verb) = &self.fail_on {
            if invocation.args.iter().any(|arg| arg == verb) {
                return Ok(ToolStatus::from_code(1));
            }
        }

        if invocation.args.iter().any(|arg| arg == "merge-bin") {
            if let Some(path) = &self.merged_binary {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, format!("image #{}", self.calls.len()))?;
            }
        }

        Ok(ToolStatus::success())
    }
}

/// Target with the given board type and build names
pub fn sample_target(board_type: &str, builds: &[&str]) -> TargetDefinition {
    TargetDefinition {
        board_type: board_type.to_string(),
        board_config: format!("CONFIG_BOARD_{}", board_type.to_uppercase()),
        target: board_type.to_string(),
        bin_name: "fw".to_string(),
        builds: builds
            .iter()
            .map(|name| BuildVariant {
                name: (*name).to_string(),
                sdkconfig_append: vec![],
            })
            .collect(),
    }
}

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use super::sample_target;
    use crate::core::matrix::{ReleaseConfig, TargetDefinition};

    /// Generate a board type identifier
    pub fn board_type() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{1,10}"
    }

    /// Generate a target with 1..4 correctly prefixed builds
    pub fn target() -> impl Strategy<Value = TargetDefinition> {
        (board_type(), proptest::collection::vec("[a-z0-9]{1,6}", 1..4)).prop_map(
            |(board, suffixes)| {
                let names: Vec<String> = suffixes.iter().map(|s| format!("{board}_{s}")).collect();
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                let mut target = sample_target(&board, &refs);
                target.bin_name = format!("{board}-fw");
                target
            },
        )
    }

    /// Generate a release matrix with unique board types
    pub fn release_config() -> impl Strategy<Value = ReleaseConfig> {
        proptest::collection::vec(target(), 1..5).prop_map(|mut targets| {
            let mut seen = std::collections::HashSet::new();
            targets.retain(|t| seen.insert(t.board_type.clone()));
            ReleaseConfig { targets }
        })
    }
}
