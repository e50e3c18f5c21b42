//! Error types for chain loading

use thiserror::Error;

/// Errors that can occur while reading chain and info files
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format at line {line}: {message}")]
    InvalidFormat { line: u64, message: String },

    #[error("Ragged row at line {line}: expected {expected} columns, got {actual}")]
    RaggedRow {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Chain has {0} columns; need posterior weight, chi-squared and at least one parameter")]
    TooFewColumns(usize),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Result type for chain I/O
pub type ChainResult<T> = Result<T, ChainError>;
