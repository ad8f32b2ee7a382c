//! Error types for amalgamation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AmalgamateError {
    #[error("No arguments supplied")]
    NoArguments,

    #[error("Flag '{flag}' requires a value")]
    MissingValue { flag: &'static str },

    #[error("No header or source fragments to merge")]
    NoFragments,

    #[error("{group} fragments were supplied without '{flag}'")]
    MissingDestination {
        group: &'static str,
        flag: &'static str,
    },

    #[error("Got {fragments} fragments but {flags} include flags")]
    FlagMismatch { fragments: usize, flags: usize },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Short write to {path}: wrote {written} of {expected} bytes")]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },
}

impl AmalgamateError {
    /// Usage errors are reported together with the usage text
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AmalgamateError::NoArguments
                | AmalgamateError::MissingValue { .. }
                | AmalgamateError::NoFragments
                | AmalgamateError::MissingDestination { .. }
                | AmalgamateError::FlagMismatch { .. }
        )
    }
}
