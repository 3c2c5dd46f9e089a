//! Error types for burner-release
//!
//! Domain-specific error types using thiserror.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Release matrix configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file does not exist
    #[error("Release config not found at '{path}'")]
    NotFound { path: PathBuf },

    /// Configuration file exists but could not be read
    #[error("Failed to read release config '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Configuration is not well-formed
    #[error("Failed to parse release config '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Build variant name does not carry its board type as prefix
    #[error("Build name '{name}' must start with board type '{board_type}'")]
    InvalidBuildName { name: String, board_type: String },
}

/// Project version resolution errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Version declaration file could not be read
    #[error("Failed to read version file '{path}': {error}")]
    FileRead { path: PathBuf, error: String },

    /// No usable version declaration found
    #[error("No project version declared in '{path}' (expected a line starting with '{marker}')")]
    MissingVersion { path: PathBuf, marker: String },
}

/// Settings file errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Explicitly requested settings file is missing
    #[error("Settings file not found at '{path}'")]
    NotFound { path: PathBuf },

    /// Settings file could not be read
    #[error("Failed to read settings file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Settings file is not valid TOML
    #[error("Failed to parse settings file '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Unknown overlay mode
    #[error("Unknown sdkconfig overlay mode '{value}' (expected 'reset' or 'accumulate')")]
    InvalidOverlayMode { value: String },
}

/// Toolchain step that was running when a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPhase {
    /// `set-target`
    SetTarget,
    /// `build`
    Build,
    /// `merge-bin`
    MergeBin,
}

impl fmt::Display for ToolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolPhase::SetTarget => write!(f, "set-target"),
            ToolPhase::Build => write!(f, "build"),
            ToolPhase::MergeBin => write!(f, "merge bin"),
        }
    }
}

/// External toolchain errors
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// Toolchain command is not on PATH
    #[error("Toolchain command '{command}' not found. Run the ESP-IDF export script or pass --toolchain")]
    NotFound { command: String },

    /// Toolchain process could not be started
    #[error("{phase} failed: could not run '{command}': {error}")]
    Spawn {
        phase: ToolPhase,
        command: String,
        error: String,
    },

    /// Toolchain exited unsuccessfully
    #[error("{phase} failed: '{command}' exited with {status}")]
    Failed {
        phase: ToolPhase,
        command: String,
        status: String,
    },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to append to file
    #[error("Failed to append to file '{path}': {error}")]
    AppendFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Artifact publishing errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// Toolchain did not leave a merged image behind
    #[error("copy bin failed: merged binary not found at '{path}'")]
    MissingMergedBinary { path: PathBuf },

    /// Copy into the releases directory failed
    #[error("copy bin failed: '{from}' -> '{to}': {error}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Filesystem error while preparing the destination
    #[error("copy bin failed")]
    Filesystem(#[from] FilesystemError),
}

/// Top-level release error type
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Config error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version error
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Toolchain error
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// Publish error
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}
