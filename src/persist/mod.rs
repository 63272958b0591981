//! Tabular persistence for tokens and diagnostics
//!
//! Both tables are CSV files with a header row:
//! - [`tokens`]: one row per token (`Line Number`, `Token Value`,
//!   `Token Type`). Reloading a table reproduces the token sequence exactly,
//!   so a persisted table can be parsed later in place of the source.
//! - [`diagnostics`]: one row per syntax error followed by a total, or a
//!   single `No errors found.` row.

pub mod diagnostics;
pub mod tokens;

use crate::error::Result;
use crate::parser::{Diagnostic, Token};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub use diagnostics::write_diagnostics;
pub use tokens::{read_tokens, write_tokens, LoadedTokens};

/// Write a token table to `path`, replacing any existing file
pub fn save_tokens(path: &Path, tokens: &[Token]) -> Result<()> {
    write_tokens(tokens, BufWriter::new(File::create(path)?))
}

/// Read a token table from `path`
pub fn load_tokens(path: &Path) -> Result<LoadedTokens> {
    read_tokens(BufReader::new(File::open(path)?))
}

/// Write a diagnostics table to `path`, replacing any existing file
pub fn save_diagnostics(path: &Path, diagnostics: &[Diagnostic]) -> Result<()> {
    write_diagnostics(diagnostics, BufWriter::new(File::create(path)?))
}
