use std::path::PathBuf;

use thiserror::Error;

/// Error type for mutars-io operations.
#[derive(Error, Debug)]
pub enum MafIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file held nothing but comment lines.
    #[error("No header row found in {0:?}")]
    MissingHeader(PathBuf),

    /// A row of the table couldn't be parsed.
    #[error("Failed to parse table {path:?}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Cache names must be a single plain file name.
    #[error("Invalid cache name: {0:?}")]
    InvalidLogicalName(String),

    /// A local source path doesn't exist.
    #[error("Local source not found: {0}")]
    LocalSourceNotFound(String),

    /// Download of a remote source failed.
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },
}

/// Result type alias for mutars-io operations.
pub type Result<T> = std::result::Result<T, MafIoError>;
