//! Error types for psxe operations.
//!
//! This module defines [`PsxeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PsxeError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PsxeError::Other`) for unexpected errors
//! - Version-parse errors are never swallowed; unrecognized release series
//!   degrade to a best-effort layout instead of erroring (see `layout`)

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for psxe operations.
#[derive(Debug, Error)]
pub enum PsxeError {
    /// Version string is empty or contains no comparable tokens.
    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    /// Install configuration file not found at expected location.
    #[error("Install config not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse install configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Could not determine an installed compiler version.
    #[error("Compiler version detection failed: {message}")]
    VersionDetection { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for psxe operations.
pub type Result<T> = std::result::Result<T, PsxeError>;
