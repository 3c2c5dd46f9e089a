//! Check command implementation
//!
//! Implements `burner-release --check` to validate the release matrix and
//! show what would be released without building.

use anyhow::{bail, Result};

use crate::cli::output::{
    is_json, print_detail, print_info, print_plain, print_success, print_warning, status,
};
use crate::core::check::{self, CheckResult};
use crate::core::matrix::{ReleaseConfig, Selection};
use crate::core::settings::ReleaseSettings;

/// Execute the check command
pub fn execute(settings: &ReleaseSettings, selection: &Selection) -> Result<()> {
    let config = ReleaseConfig::load(&settings.config_path)?;

    tracing::info!("Checking release matrix: {}", settings.config_path.display());

    let result = check::check(settings, &config, selection);

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_result(settings, &result);
    }

    if !result.is_valid() {
        bail!("Check failed with {} error(s)", result.errors.len());
    }
    Ok(())
}

fn display_result(settings: &ReleaseSettings, result: &CheckResult) {
    match &result.version {
        Some(version) => print_success(&format!("Project version: {version}")),
        None => print_warning("Project version could not be resolved"),
    }

    if result.config_valid {
        print_success("All build names match their board type");
    }

    if result.toolchain_available {
        print_success(&format!("Toolchain '{}' is available", settings.toolchain));
    }

    for error in &result.errors {
        eprintln!("{} {error}", status::ERROR);
    }

    if !result.warnings.is_empty() {
        print_plain("\nWarnings:");
        for warning in &result.warnings {
            print_warning(warning);
        }
    }

    print_plain("\nPlanned releases:");
    if result.planned.is_empty() {
        print_detail("(no matching board type)");
    }
    for planned in &result.planned {
        let destination = planned
            .release_path
            .as_ref()
            .map_or_else(|| "unknown".to_string(), |p| p.display().to_string());
        if planned.already_released {
            print_detail(&format!(
                "{} -> {destination} (exists, skipped)",
                planned.board_type
            ));
        } else {
            print_detail(&format!("{} -> {destination}", planned.board_type));
            for build in &planned.builds {
                print_detail(&format!("  • {build} ({})", planned.target));
            }
        }
    }

    print_info(&format!(
        "{} build(s) pending, overlay mode: {}",
        result.pending_builds(),
        settings.overlay
    ));
}
