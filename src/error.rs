//! Error types for the I/O layer
//!
//! Lexing and parsing never fail; syntax problems are reported as
//! [`crate::parser::Diagnostic`]s. [`CattyError`] covers everything around
//! them: reading sources, validating paths, and reading or writing the token
//! and diagnostic tables.

use std::path::PathBuf;

/// Errors raised outside the lexer and parser
#[derive(Debug, thiserror::Error)]
pub enum CattyError {
    /// File I/O error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Token or diagnostic table could not be read or written
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Source file does not carry the expected extension
    #[error("Invalid file extension: {}. Only .{} files are allowed.", .path.display(), .expected)]
    InvalidExtension {
        path: PathBuf,
        expected: &'static str,
    },

    /// Source file does not exist
    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Token table held no usable rows
    #[error("No valid tokens found in {}", .0.display())]
    EmptyTokenTable(PathBuf),
}

/// Result type for I/O-layer operations
pub type Result<T> = std::result::Result<T, CattyError>;
