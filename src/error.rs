//! Error types for the extraction pipeline

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Source path does not exist or is not a file
    #[error("Input file not found: {0}")]
    SourceNotFound(PathBuf),

    /// Source exists but could not be opened for reading
    #[error("Input file {path} is not readable: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination could not be created or truncated
    #[error("Output file {path} is not writable: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while streaming
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
