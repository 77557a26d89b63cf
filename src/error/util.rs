//! Utility functions for error handling
//!
//! Precondition checks that turn a missing input into the matching setup error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{HubError, Result};

/// Open a file that must already exist
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `on_missing` - Builds the error reported when the file is absent
///
/// # Returns
/// * `Result<fs::File>` - The opened file or the setup error
pub fn require_file(path: &Path, on_missing: fn(PathBuf) -> HubError) -> Result<fs::File> {
    if !path.is_file() {
        return Err(on_missing(path.to_path_buf()));
    }

    fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => on_missing(path.to_path_buf()),
        _ => HubError::Io(io::Error::new(
            e.kind(),
            format!("Failed to open {}: {e}", path.display()),
        )),
    })
}

/// Check that a directory exists
///
/// # Arguments
/// * `path` - The directory that must exist
/// * `on_missing` - Builds the error reported when it does not
pub fn require_directory(path: &Path, on_missing: fn(PathBuf) -> HubError) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(on_missing(path.to_path_buf()))
    }
}

/// Create a directory (and its parents) if it does not exist yet
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
