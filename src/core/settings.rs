//! Release settings
//!
//! Tool settings are layered: built-in defaults, then an optional
//! `burner.toml` in the project directory, then command-line flags (which
//! also pick up the `BURNER_*` environment variables).
//!
//! ```toml
//! [paths]
//! config = "scripts/burner_release_config.json"
//! version_file = "CMakeLists.txt"
//! releases_dir = "releases"
//! merged_binary = "build/merged-binary.bin"
//! sdkconfig = "sdkconfig"
//!
//! [toolchain]
//! command = "idf.py"
//! target_env = "IDF_TARGET"
//! board_define = "BOARD_NAME"
//!
//! [overlay]
//! mode = "reset"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::defaults::{
    DEFAULT_BOARD_DEFINE, DEFAULT_CONFIG_PATH, DEFAULT_MERGED_BINARY, DEFAULT_RELEASES_DIR,
    DEFAULT_SDKCONFIG, DEFAULT_TARGET_ENV, DEFAULT_TOOLCHAIN, DEFAULT_VERSION_FILE, SETTINGS_FILE,
};
use crate::error::SettingsError;
use crate::infra::toolchain::IdfToolchain;

/// How sdkconfig overlays from earlier builds are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// Drop sdkconfig before each build so only the current overlay applies
    #[default]
    Reset,
    /// Keep appending to sdkconfig across builds
    Accumulate,
}

impl FromStr for OverlayMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reset" => Ok(OverlayMode::Reset),
            "accumulate" => Ok(OverlayMode::Accumulate),
            other => Err(SettingsError::InvalidOverlayMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayMode::Reset => write!(f, "reset"),
            OverlayMode::Accumulate => write!(f, "accumulate"),
        }
    }
}

/// Contents of `burner.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// File locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Toolchain invocation
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Overlay handling
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// File locations, relative to the project directory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub config: Option<PathBuf>,
    pub version_file: Option<PathBuf>,
    pub releases_dir: Option<PathBuf>,
    pub merged_binary: Option<PathBuf>,
    pub sdkconfig: Option<PathBuf>,
}

/// Toolchain invocation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolchainConfig {
    pub command: Option<String>,
    pub target_env: Option<String>,
    pub board_define: Option<String>,
}

/// Overlay settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    pub mode: Option<OverlayMode>,
}

impl SettingsFile {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a settings file, returning defaults when it does not exist
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

/// Command-line overrides, highest precedence
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Explicit settings file (must exist)
    pub settings_file: Option<PathBuf>,
    /// Release matrix path
    pub config: Option<PathBuf>,
    /// Toolchain command
    pub toolchain: Option<String>,
    /// Releases directory
    pub releases_dir: Option<PathBuf>,
    /// Overlay mode
    pub overlay: Option<OverlayMode>,
}

/// Effective settings for a release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSettings {
    /// Project root; toolchain working directory
    pub project_dir: PathBuf,
    /// Release matrix
    pub config_path: PathBuf,
    /// Version declaration file
    pub version_file: PathBuf,
    /// Published images
    pub releases_dir: PathBuf,
    /// Output of `merge-bin`
    pub merged_binary: PathBuf,
    /// Toolchain configuration file receiving overlays
    pub sdkconfig: PathBuf,
    /// Toolchain front-end command
    pub toolchain: String,
    /// Target override variable cleared before `set-target`
    pub target_env: String,
    /// Define carrying the build name
    pub board_define: String,
    /// Overlay handling across builds
    pub overlay: OverlayMode,
}

impl ReleaseSettings {
    /// Load settings for a project directory
    pub fn load(project_dir: &Path, overrides: &SettingsOverrides) -> Result<Self, SettingsError> {
        let file = match &overrides.settings_file {
            Some(path) => {
                let path = project_dir.join(path);
                if !path.exists() {
                    return Err(SettingsError::NotFound { path });
                }
                SettingsFile::load_from_path(&path)?
            }
            None => SettingsFile::load_from_path(&project_dir.join(SETTINGS_FILE))?,
        };

        let settings = Self::resolve(project_dir, file, overrides);
        tracing::debug!("Effective settings: {settings:?}");
        Ok(settings)
    }

    /// Merge defaults, a settings file and overrides
    pub fn resolve(project_dir: &Path, file: SettingsFile, overrides: &SettingsOverrides) -> Self {
        let at = |path: PathBuf| project_dir.join(path);
        let paths = file.paths;

        Self {
            project_dir: project_dir.to_path_buf(),
            config_path: at(overrides
                .config
                .clone()
                .or(paths.config)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))),
            version_file: at(paths
                .version_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VERSION_FILE))),
            releases_dir: at(overrides
                .releases_dir
                .clone()
                .or(paths.releases_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RELEASES_DIR))),
            merged_binary: at(paths
                .merged_binary
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MERGED_BINARY))),
            sdkconfig: at(paths
                .sdkconfig
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SDKCONFIG))),
            toolchain: overrides
                .toolchain
                .clone()
                .or(file.toolchain.command)
                .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string()),
            target_env: file
                .toolchain
                .target_env
                .unwrap_or_else(|| DEFAULT_TARGET_ENV.to_string()),
            board_define: file
                .toolchain
                .board_define
                .unwrap_or_else(|| DEFAULT_BOARD_DEFINE.to_string()),
            overlay: overrides.overlay.or(file.overlay.mode).unwrap_or_default(),
        }
    }

    /// Toolchain wrapper configured from these settings
    pub fn toolchain(&self) -> IdfToolchain {
        IdfToolchain::new(
            &self.toolchain,
            &self.target_env,
            &self.board_define,
            &self.project_dir,
        )
    }
}
