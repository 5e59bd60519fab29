//! Error types for fsmeta-walker
//!
//! This module defines the error hierarchy for a run:
//! - Per-entry metadata failures (recorded in the snapshot, never raised)
//! - Directory listing failures (abort the walk)
//! - Analysis errors (empty datasets)
//! - Persistence errors (output directory, CSV, compression, run log)
//! - Configuration errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors carry the path they concern so the diagnostic is actionable
//! - Preserve error chains for debugging

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a walk-and-analyze run
#[derive(Error, Debug)]
pub enum WalkerError {
    /// A directory could not be enumerated
    #[error("Failed to list directory '{path}': {source}")]
    Listing {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Statistics errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Output file and run log errors
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors outside the categories above
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Classification of a failed metadata fetch for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryErrorKind {
    /// Permission or I/O class failure
    Access,
    /// Any other OS-level failure (dangling entry, name too long, loops)
    System,
}

impl EntryErrorKind {
    /// Classify an error returned by a non-dereferencing stat
    pub fn classify(err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            return EntryErrorKind::Access;
        }

        #[cfg(unix)]
        if err.raw_os_error() == Some(libc::EIO) {
            return EntryErrorKind::Access;
        }

        EntryErrorKind::System
    }

    /// Short label used in logs and CSV-adjacent output
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryErrorKind::Access => "AccessError",
            EntryErrorKind::System => "SystemError",
        }
    }
}

impl fmt::Display for EntryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No record qualified for the requested dimension
    #[error("No eligible entries for {dimension} analysis")]
    EmptyDataset { dimension: &'static str },
}

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistError {
    /// The data directory is not there; it is never created implicitly
    #[error("Output directory '{path}' does not exist")]
    MissingOutputDir { path: PathBuf },

    /// Same root path persisted twice on the same day
    #[error("Output file '{path}' already exists - refusing to overwrite")]
    OutputExists { path: PathBuf },

    /// Failure opening, writing or flushing a file
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CSV encoding or decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Root is missing or not a directory
    #[error("Invalid root directory '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: String },
}

/// Result type alias for WalkerError
pub type Result<T> = std::result::Result<T, WalkerError>;

/// Result type alias for AnalysisError
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for PersistError
pub type PersistResult<T> = std::result::Result<T, PersistError>;
