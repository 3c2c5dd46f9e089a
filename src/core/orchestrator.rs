//! Release orchestration
//!
//! Walks the selected targets of the release matrix. For each target the
//! project version is resolved and the target-level release path checked;
//! targets that already have a release are skipped, otherwise every build
//! variant is built and published in listed order.

use serde::Serialize;
use std::path::PathBuf;

use super::executor::BuildExecutor;
use super::matrix::{ReleaseConfig, Selection, TargetDefinition};
use super::naming::{release_exists, release_path};
use super::publish::{ArtifactPublisher, PublishedArtifact};
use super::settings::ReleaseSettings;
use super::version::require_version;
use crate::infra::console::{print_info, print_plain, print_warning};
use crate::config::defaults::SEPARATOR_WIDTH;
use crate::error::ReleaseError;
use crate::infra::process::ProcessRunner;
use crate::infra::toolchain::IdfToolchain;

/// Summary of a release run
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    /// Selection the run was started with
    pub selection: String,
    /// Whether any target matched the selection
    pub matched: bool,
    /// Outcome per matched target, in release order
    pub targets: Vec<TargetReport>,
    /// Every board type in the matrix
    pub known_board_types: Vec<String>,
}

impl ReleaseReport {
    /// Number of variants built and published
    pub fn built_count(&self) -> usize {
        self.targets
            .iter()
            .map(|t| match &t.outcome {
                TargetOutcome::Built { artifacts } => artifacts.len(),
                TargetOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    /// Number of targets skipped because their release exists
    pub fn skipped_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.outcome, TargetOutcome::Skipped { .. }))
            .count()
    }
}

/// Outcome for one target
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub board_type: String,
    pub version: String,
    #[serde(flatten)]
    pub outcome: TargetOutcome,
}

/// What happened to a target
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TargetOutcome {
    /// Release already present; nothing ran
    Skipped { path: PathBuf },
    /// Every variant was built and published
    Built { artifacts: Vec<BuiltVariant> },
}

/// One built and published variant
#[derive(Debug, Clone, Serialize)]
pub struct BuiltVariant {
    pub name: String,
    #[serde(flatten)]
    pub artifact: PublishedArtifact,
}

/// Drives release builds across the matrix
pub struct ReleaseOrchestrator<'a, R: ProcessRunner> {
    settings: &'a ReleaseSettings,
    config: &'a ReleaseConfig,
    toolchain: IdfToolchain,
    publisher: ArtifactPublisher,
    runner: R,
}

impl<'a, R: ProcessRunner> ReleaseOrchestrator<'a, R> {
    /// Create an orchestrator running toolchain calls through `runner`
    pub fn new(settings: &'a ReleaseSettings, config: &'a ReleaseConfig, runner: R) -> Self {
        Self {
            settings,
            config,
            toolchain: settings.toolchain(),
            publisher: ArtifactPublisher::new(&settings.merged_binary, &settings.releases_dir),
            runner,
        }
    }

    /// Release every target covered by `selection`
    ///
    /// The first fatal error aborts the whole run. A selection matching no
    /// target is not an error; the report carries `matched == false`.
    pub fn run(&mut self, selection: &Selection) -> Result<ReleaseReport, ReleaseError> {
        let config = self.config;
        let mut targets = Vec::new();

        for target in config.select(selection) {
            targets.push(self.release_target(target)?);
        }

        if targets.is_empty() {
            tracing::info!("No target matches '{selection}'");
        }

        Ok(ReleaseReport {
            selection: selection.to_string(),
            matched: !targets.is_empty(),
            targets,
            known_board_types: config
                .board_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    fn release_target(
        &mut self,
        target: &TargetDefinition,
    ) -> Result<TargetReport, ReleaseError> {
        let version = require_version(&self.settings.version_file)?;
        print_info(&format!("Project Version: {version}"));

        let path = release_path(&self.settings.releases_dir, &target.bin_name, &version);
        if release_exists(&path) {
            print_warning(&format!(
                "Skipping {} because {} already exists",
                target.board_type,
                path.display()
            ));
            return Ok(TargetReport {
                board_type: target.board_type.clone(),
                version,
                outcome: TargetOutcome::Skipped { path },
            });
        }

        let mut artifacts = Vec::with_capacity(target.builds.len());
        for build in &target.builds {
            target.validate_build_name(build)?;

            BuildExecutor::new(
                &mut self.runner,
                &self.toolchain,
                &self.settings.sdkconfig,
                self.settings.overlay,
            )
            .execute(target, build)?;

            let artifact = self.publisher.publish(&target.bin_name, &version)?;
            artifacts.push(BuiltVariant {
                name: build.name.clone(),
                artifact,
            });
            print_plain(&"-".repeat(SEPARATOR_WIDTH));
        }

        Ok(TargetReport {
            board_type: target.board_type.clone(),
            version,
            outcome: TargetOutcome::Built { artifacts },
        })
    }
}
