//! Error types for mcpdiff operations.
//!
//! This module defines [`McpdiffError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Almost every failure mode in the pipeline is absorbed where it is detected
//! and converted into a report shape (skipped validation, execution failure,
//! fallback diff). The only errors that escape to `main` are configuration
//! errors and unexpected I/O problems.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mcpdiff operations.
#[derive(Debug, Error)]
pub enum McpdiffError {
    /// Catalog descriptor exists but could not be parsed.
    #[error("Failed to parse catalog descriptor at {path}: {message}")]
    DescriptorParseError { path: PathBuf, message: String },

    /// An external command could not be spawned.
    #[error("Failed to spawn '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    /// An external command exited with a non-zero status.
    #[error("Command '{program}' failed with exit code {code:?}")]
    CommandFailed { program: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for mcpdiff operations.
pub type Result<T> = std::result::Result<T, McpdiffError>;
