//! Release command implementation
//!
//! Implements `burner-release <BOARD_TYPE|all>`: build and publish every
//! variant of the selected targets.

use anyhow::{Context, Result};

use crate::cli::output::{is_json, print_detail, print_plain, print_success, print_warning};
use crate::core::matrix::{ReleaseConfig, Selection};
use crate::core::orchestrator::{ReleaseOrchestrator, ReleaseReport};
use crate::core::settings::ReleaseSettings;
use crate::infra::process::SystemRunner;

/// Execute a release run
pub fn execute(settings: &ReleaseSettings, selection: &Selection) -> Result<()> {
    let config = ReleaseConfig::load(&settings.config_path)?;

    tracing::info!(
        "Releasing '{selection}' from {} ({} targets)",
        settings.config_path.display(),
        config.targets.len()
    );

    let runner = SystemRunner::new().stdout_to_stderr(is_json());
    let report = ReleaseOrchestrator::new(settings, &config, runner)
        .run(selection)
        .with_context(|| format!("Release of '{selection}' aborted"))?;

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display_report(&report);
    Ok(())
}

fn display_report(report: &ReleaseReport) {
    if !report.matched {
        print_warning(&format!("Board type not found: {}", report.selection));
        print_plain("Available board types:");
        for board_type in &report.known_board_types {
            print_detail(board_type);
        }
        return;
    }

    print_success(&format!(
        "Release complete: {} built, {} skipped",
        report.built_count(),
        report.skipped_count()
    ));
}
