//! List command implementation
//!
//! Implements `burner-release --list`.

use anyhow::Result;

use crate::cli::output::{is_json, print_detail, print_plain};
use crate::core::matrix::ReleaseConfig;
use crate::core::settings::ReleaseSettings;

/// Print the board types of the release matrix
pub fn execute(settings: &ReleaseSettings) -> Result<()> {
    let config = ReleaseConfig::load(&settings.config_path)?;

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&config.board_types())?);
        return Ok(());
    }

    print_plain("Available board types:");
    for target in &config.targets {
        print_detail(&format!(
            "{} ({}, {} builds)",
            target.board_type,
            target.target,
            target.builds.len()
        ));
    }

    Ok(())
}
