//! Artifact publishing
//!
//! Copies the merged firmware image into the releases directory under its
//! versioned release name, replacing any stale file at that path.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use super::naming::release_path;
use crate::infra::console::print_success;
use crate::error::PublishError;
use crate::infra::filesystem;

/// A published release image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedArtifact {
    /// Destination path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex SHA-256 of the image
    pub sha256: String,
}

/// Publishes merged images into the releases directory
#[derive(Debug, Clone)]
pub struct ArtifactPublisher {
    merged_binary: PathBuf,
    releases_dir: PathBuf,
}

impl ArtifactPublisher {
    /// Create a publisher copying `merged_binary` into `releases_dir`
    pub fn new(merged_binary: &Path, releases_dir: &Path) -> Self {
        Self {
            merged_binary: merged_binary.to_path_buf(),
            releases_dir: releases_dir.to_path_buf(),
        }
    }

    /// Copy the merged image to its release path
    pub fn publish(
        &self,
        bin_name: &str,
        version: &str,
    ) -> Result<PublishedArtifact, PublishError> {
        filesystem::create_dir_all(&self.releases_dir)?;

        let destination = release_path(&self.releases_dir, bin_name, version);
        if filesystem::remove_file_if_exists(&destination)? {
            tracing::debug!("Replaced stale {}", destination.display());
        }

        if !self.merged_binary.exists() {
            return Err(PublishError::MissingMergedBinary {
                path: self.merged_binary.clone(),
            });
        }

        let size = std::fs::copy(&self.merged_binary, &destination).map_err(|e| {
            PublishError::Copy {
                from: self.merged_binary.clone(),
                to: destination.clone(),
                error: e.to_string(),
            }
        })?;

        let sha256 = hex::encode(Sha256::digest(filesystem::read_bytes(&destination)?));

        print_success(&format!("copy bin to {} done", destination.display()));
        tracing::info!("Published {} ({size} bytes, sha256 {sha256})", destination.display());

        Ok(PublishedArtifact {
            path: destination,
            size,
            sha256,
        })
    }
}
