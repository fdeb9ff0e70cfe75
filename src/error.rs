//! Common error types for ohako

use thiserror::Error;

/// Common result type for ohako operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the record store and configuration layers
#[derive(Error, Debug)]
pub enum Error {
    /// CSV parse or write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Edit/delete position outside the current table
    #[error("Position {position} is out of range (table has {len} rows)")]
    InvalidPosition { position: usize, len: usize },

    /// Persisted file exists but cannot be interpreted as a record table
    #[error("Malformed record file: {0}")]
    MalformedFile(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
