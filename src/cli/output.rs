//! Output formatting
//!
//! Maps the global `--quiet`, `--json` and `-v` flags onto the console mode
//! and the tracing level, and renders the final diagnostic of a failed run.

pub use crate::infra::console::{
    is_json, is_quiet, print_detail, print_info, print_plain, print_success, print_warning,
    status,
};

/// Output configuration from global CLI flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything but errors
    pub quiet: bool,
    /// Machine-readable output
    pub json: bool,
    /// Verbosity level (-v count)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create from CLI flags
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Make this configuration the process-wide one
    pub fn apply_global(self) {
        crate::infra::console::set_mode(self.quiet, self.json);
    }

    /// Default tracing level for this verbosity
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Lines of the final diagnostic: the error, then each distinct cause
pub fn error_lines(error: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("{} {error}", status::ERROR)];
    for cause in error.chain().skip(1) {
        lines.push(format!("  caused by: {cause}"));
    }
    lines
}

/// Print the final diagnostic for a failed run to stderr
pub fn display_error(error: &anyhow::Error) {
    for line in error_lines(error) {
        eprintln!("{line}");
    }
}
