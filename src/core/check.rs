//! Check command logic
//!
//! Validates the release matrix, resolves the project version, verifies the
//! toolchain and reports what a release run would do without running it.

use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

use super::matrix::{ReleaseConfig, Selection};
use super::naming::{release_exists, release_path};
use super::settings::ReleaseSettings;
use super::version::require_version;
use crate::error::ToolchainError;

/// Result of the check operation
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    /// Whether every selected build name carries its board-type prefix
    pub config_valid: bool,
    /// Resolved project version
    pub version: Option<String>,
    /// Whether the toolchain command was found
    pub toolchain_available: bool,
    /// What a release run would do, per selected target
    pub planned: Vec<PlannedTarget>,
    /// Problems that would make a release run fail
    pub errors: Vec<String>,
    /// Suspicious but non-fatal findings
    pub warnings: Vec<String>,
}

/// Planned work for one target
#[derive(Debug, Serialize)]
pub struct PlannedTarget {
    pub board_type: String,
    pub target: String,
    /// Release image path, when the version is known
    pub release_path: Option<PathBuf>,
    /// Release image already present; the target would be skipped
    pub already_released: bool,
    /// Build names in build order
    pub builds: Vec<String>,
}

impl CheckResult {
    /// Check if all validations passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of variants a release run would build
    pub fn pending_builds(&self) -> usize {
        self.planned
            .iter()
            .filter(|t| !t.already_released)
            .map(|t| t.builds.len())
            .sum()
    }
}

/// Check a release run for `selection` without building anything
pub fn check(
    settings: &ReleaseSettings,
    config: &ReleaseConfig,
    selection: &Selection,
) -> CheckResult {
    let mut result = CheckResult {
        config_valid: true,
        ..CheckResult::default()
    };

    match require_version(&settings.version_file) {
        Ok(version) => result.version = Some(version),
        Err(e) => result.errors.push(e.to_string()),
    }

    let mut seen_board_types = HashSet::new();
    let mut seen_bin_names = HashSet::new();
    for target in &config.targets {
        if !seen_board_types.insert(target.board_type.as_str()) {
            result.warnings.push(format!(
                "Board type '{}' is listed more than once",
                target.board_type
            ));
        }
        if !seen_bin_names.insert(target.bin_name.as_str()) {
            result.warnings.push(format!(
                "Binary name '{}' is shared by several targets; their releases overwrite each other",
                target.bin_name
            ));
        }
    }

    for target in config.select(selection) {
        for build in &target.builds {
            if let Err(e) = target.validate_build_name(build) {
                result.config_valid = false;
                result.errors.push(e.to_string());
            }
        }
        if target.builds.is_empty() {
            result
                .warnings
                .push(format!("Board type '{}' has no builds", target.board_type));
        }

        let path = result
            .version
            .as_deref()
            .map(|version| release_path(&settings.releases_dir, &target.bin_name, version));
        let already_released = path.as_deref().is_some_and(release_exists);

        result.planned.push(PlannedTarget {
            board_type: target.board_type.clone(),
            target: target.target.clone(),
            release_path: path,
            already_released,
            builds: target.builds.iter().map(|b| b.name.clone()).collect(),
        });
    }

    let toolchain = settings.toolchain();
    result.toolchain_available = toolchain.is_available();
    if !result.toolchain_available {
        let message = ToolchainError::NotFound {
            command: toolchain.command().to_string(),
        }
        .to_string();
        if result.pending_builds() > 0 {
            result.errors.push(message);
        } else {
            result.warnings.push(message);
        }
    }

    result
}
