//! Error types for the usc driver.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the driver.
///
/// Lexical errors are not represented here: they are collected as
/// diagnostics and only decide the exit status.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Configuration could not be found, parsed or applied.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A source file could not be read.
    #[error("Failed to read {}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying failure.
        source: std::io::Error,
    },

    /// The worker pool could not be started.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`DriverError`].
pub type Result<T> = std::result::Result<T, DriverError>;
