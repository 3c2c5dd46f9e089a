//! Filesystem operations
//!
//! Handles file and directory operations.

use std::io::Write;
use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a file if it exists
///
/// Returns whether a file was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool, FilesystemError> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path).map_err(|e| FilesystemError::RemoveFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(true)
}

/// Append lines to a file, creating it if needed
///
/// The block is written as a leading newline, the lines joined with
/// newlines, and a trailing newline, so it never merges with a last line
/// that lacks its terminator.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<(), FilesystemError> {
    let map_err = |e: std::io::Error| FilesystemError::AppendFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(map_err)?;

    let block = format!("\n{}\n", lines.join("\n"));
    file.write_all(block.as_bytes()).map_err(map_err)
}

/// Read a file's raw bytes
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, FilesystemError> {
    std::fs::read(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
