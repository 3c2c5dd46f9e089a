//! Project version resolution
//!
//! Reads the firmware version from the `set(PROJECT_VER "x.y.z")` line of
//! the project's CMakeLists.txt.

use regex::Regex;
use std::path::Path;

use crate::config::defaults::VERSION_MARKER;
use crate::error::VersionError;

/// Extract the declared project version from file content
///
/// The first line starting with [`VERSION_MARKER`] that carries a quoted
/// value wins. The value runs from the first double quote to the next one
/// (or the end of the line) and is trimmed. Marker lines without any quote
/// are skipped.
pub fn resolve_version(content: &str) -> Option<String> {
    let quoted = Regex::new(r#""([^"]*)"#).ok()?;

    for (index, line) in content.lines().enumerate() {
        if !line.starts_with(VERSION_MARKER) {
            continue;
        }
        match quoted.captures(line).and_then(|caps| caps.get(1)) {
            Some(value) => return Some(value.as_str().trim().to_string()),
            None => {
                tracing::warn!(
                    "Ignoring version declaration without a quoted value on line {}",
                    index + 1
                );
            }
        }
    }

    None
}

/// Read a version declaration file and resolve the project version
pub fn read_project_version(path: &Path) -> Result<Option<String>, VersionError> {
    let content = std::fs::read_to_string(path).map_err(|e| VersionError::FileRead {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(resolve_version(&content))
}

/// Resolve the project version, treating an absent or empty value as an error
pub fn require_version(path: &Path) -> Result<String, VersionError> {
    match read_project_version(path)? {
        Some(version) if !version.is_empty() => Ok(version),
        _ => Err(VersionError::MissingVersion {
            path: path.to_path_buf(),
            marker: VERSION_MARKER.to_string(),
        }),
    }
}
