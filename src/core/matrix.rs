//! Release matrix handling
//!
//! Parses the JSON release matrix that lists board targets and the build
//! variants produced for each of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::config::defaults::SELECT_ALL;
use crate::error::ConfigError;

/// Complete release matrix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseConfig {
    /// Board targets in release order
    pub targets: Vec<TargetDefinition>,
}

/// One board family and the variants built for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetDefinition {
    /// Board family identifier, also the required prefix of every build name
    pub board_type: String,

    /// Configuration flag enabled for every build of this target
    pub board_config: String,

    /// Chip identifier passed to `set-target`
    pub target: String,

    /// Base name of the published image
    #[serde(rename = "binName")]
    pub bin_name: String,

    /// Build variants in build order
    pub builds: Vec<BuildVariant>,
}

/// A single named build of a target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildVariant {
    /// Build name, passed to the toolchain as the board define
    pub name: String,

    /// Extra sdkconfig lines appended after the board flag
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sdkconfig_append: Vec<String>,
}

/// Which targets a run should release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every target in the matrix
    All,
    /// Targets whose board type matches exactly
    Board(String),
}

impl Selection {
    /// Parse a command-line selection; `all` is the wildcard
    pub fn parse(value: &str) -> Self {
        if value == SELECT_ALL {
            Selection::All
        } else {
            Selection::Board(value.to_string())
        }
    }

    /// Whether a target is covered by this selection
    pub fn matches(&self, target: &TargetDefinition) -> bool {
        match self {
            Selection::All => true,
            Selection::Board(board_type) => target.board_type == *board_type,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{SELECT_ALL}"),
            Selection::Board(board_type) => write!(f, "{board_type}"),
        }
    }
}

impl ReleaseConfig {
    /// Load the release matrix from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config = Self::from_json(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        tracing::debug!(
            "Loaded {} targets from {}",
            config.targets.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse from a JSON string
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Board types in configuration order
    pub fn board_types(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.board_type.as_str()).collect()
    }

    /// Targets covered by a selection, in configuration order
    pub fn select<'a>(
        &'a self,
        selection: &'a Selection,
    ) -> impl Iterator<Item = &'a TargetDefinition> {
        self.targets.iter().filter(move |t| selection.matches(t))
    }

    /// Total number of build variants across all targets
    pub fn build_count(&self) -> usize {
        self.targets.iter().map(|t| t.builds.len()).sum()
    }
}

impl TargetDefinition {
    /// Check that a variant name starts with this target's board type
    pub fn validate_build_name(&self, build: &BuildVariant) -> Result<(), ConfigError> {
        if build.name.starts_with(&self.board_type) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBuildName {
                name: build.name.clone(),
                board_type: self.board_type.clone(),
            })
        }
    }

    /// sdkconfig lines for one variant: the board flag first, then the
    /// variant's own lines in listed order
    pub fn sdkconfig_lines(&self, build: &BuildVariant) -> Vec<String> {
        std::iter::once(format!("{}=y", self.board_config))
            .chain(build.sdkconfig_append.iter().cloned())
            .collect()
    }
}
