//! Output writing

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::AmalgamateError;

/// Write a merged buffer to `path`, creating parent directories
///
/// The whole buffer goes out in a single write; anything less is a
/// `ShortWrite` error.
pub fn write_output(path: &Path, buffer: &[u8]) -> Result<(), AmalgamateError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(dir = %parent.display(), "Creating output directory");
            fs::create_dir_all(parent).map_err(|source| AmalgamateError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut file = File::create(path).map_err(|source| AmalgamateError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let written = file
        .write(buffer)
        .map_err(|source| AmalgamateError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    if written != buffer.len() {
        return Err(AmalgamateError::ShortWrite {
            path: path.to_path_buf(),
            written,
            expected: buffer.len(),
        });
    }

    Ok(())
}
