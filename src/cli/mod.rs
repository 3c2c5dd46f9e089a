//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::core::matrix::Selection;
use crate::core::settings::{OverlayMode, ReleaseSettings, SettingsOverrides};

/// burner-release - build and publish firmware for a release matrix
///
/// Builds every variant of the selected board types with the ESP-IDF
/// toolchain and copies the merged images to `releases/`. Targets whose
/// release image already exists are skipped.
#[derive(Parser, Debug)]
#[command(name = "burner-release")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Board type to release, or `all`
    #[arg(value_name = "BOARD_TYPE", required_unless_present_any = ["list", "check"])]
    pub board: Option<String>,

    /// List the board types in the release matrix
    #[arg(long, conflicts_with = "check")]
    pub list: bool,

    /// Validate and show planned releases without building
    #[arg(long)]
    pub check: bool,

    /// Project directory (toolchain working directory)
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Release matrix file
    #[arg(long, value_name = "FILE", env = "BURNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Settings file (default: burner.toml in the project directory)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Toolchain front-end command
    #[arg(long, value_name = "COMMAND", env = "BURNER_TOOLCHAIN")]
    pub toolchain: Option<String>,

    /// Directory receiving release images
    #[arg(long, value_name = "DIR")]
    pub releases_dir: Option<PathBuf>,

    /// sdkconfig overlay handling between builds: reset or accumulate
    #[arg(long, value_name = "MODE")]
    pub overlay: Option<OverlayMode>,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let overrides = SettingsOverrides {
            settings_file: self.settings,
            config: self.config,
            toolchain: self.toolchain,
            releases_dir: self.releases_dir,
            overlay: self.overlay,
        };
        let settings = ReleaseSettings::load(&self.project_dir, &overrides)
            .context("Failed to load settings")?;

        let selection = self.board.as_deref().map(Selection::parse);

        if self.list {
            commands::list::execute(&settings)
        } else if self.check {
            commands::check::execute(&settings, &selection.unwrap_or(Selection::All))
        } else {
            let selection = selection.context("A board type or 'all' is required")?;
            commands::release::execute(&settings, &selection)
        }
    }
}
