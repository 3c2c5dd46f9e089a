//! Release artifact naming
//!
//! Release images are named `{bin_name}_V{version}_0x0.bin`. The `0x0`
//! suffix is the flash offset of the merged image and is expected by the
//! downstream flashing tools.

use std::path::{Path, PathBuf};

use crate::config::defaults::FLASH_OFFSET_SUFFIX;

/// File name of a release image
pub fn release_file_name(bin_name: &str, version: &str) -> String {
    format!("{bin_name}_V{version}_{FLASH_OFFSET_SUFFIX}.bin")
}

/// Path of a release image inside the releases directory
pub fn release_path(releases_dir: &Path, bin_name: &str, version: &str) -> PathBuf {
    releases_dir.join(release_file_name(bin_name, version))
}

/// Whether a release image is already present
pub fn release_exists(path: &Path) -> bool {
    path.exists()
}
