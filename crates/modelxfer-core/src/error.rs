//! Error types for modelxfer

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for modelxfer
#[derive(Error, Debug)]
pub enum XferError {
    /// Model reference matched none of the accepted forms
    #[error("Invalid model reference format: {0}")]
    InvalidReferenceFormat(String),

    /// No manifest at the expected store location
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// Manifest exists but could not be interpreted
    #[error("Malformed manifest: {0}")]
    ManifestMalformed(String),

    /// Archive name has no recognized suffix
    #[error("Unsupported archive format: {0}")]
    UnsupportedArchiveFormat(String),

    /// Producing an archive failed
    #[error("Archive write error: {0}")]
    ArchiveWriteError(String),

    /// Reading or extracting an archive failed
    #[error("Archive read error: {0}")]
    ArchiveReadError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for modelxfer operations
pub type XferResult<T> = Result<T, XferError>;

impl From<serde_json::Error> for XferError {
    fn from(err: serde_json::Error) -> Self {
        XferError::ManifestMalformed(err.to_string())
    }
}

impl From<toml::de::Error> for XferError {
    fn from(err: toml::de::Error) -> Self {
        XferError::Config(err.to_string())
    }
}
