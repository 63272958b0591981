//! Token table: one CSV row per token
//!
//! ```text
//! Line Number,Token Value,Token Type
//! 1,int,INT_KEY
//! 1,x,IDENTIFIER
//! 1,;,SEMICOLON_DELI
//! ```
//!
//! Token text is written verbatim and quoted by the CSV writer when it
//! contains commas, quotes or line breaks. Reading is lenient: rows that do not
//! have exactly three fields, or whose line number or kind does not parse, are
//! skipped with a warning rather than failing the whole load.

use crate::error::Result;
use crate::parser::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::io;
use tracing::{debug, warn};

/// Column names of the token table, in order
pub const TOKEN_HEADER: [&str; 3] = ["Line Number", "Token Value", "Token Type"];

#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    line: usize,
    text: String,
    kind: TokenKind,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        Self {
            line: token.line,
            text: token.text.clone(),
            kind: token.kind,
        }
    }
}

impl From<TokenRecord> for Token {
    fn from(record: TokenRecord) -> Self {
        Token::new(record.kind, record.text, record.line)
    }
}

/// Tokens recovered from a table, plus how many rows were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTokens {
    pub tokens: Vec<Token>,
    pub skipped_rows: usize,
}

/// Write `tokens` as a token table, header first
pub fn write_tokens<W: io::Write>(tokens: &[Token], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(TOKEN_HEADER)?;
    for token in tokens {
        csv.serialize(TokenRecord::from(token))?;
    }
    csv.flush()?;

    debug!(rows = tokens.len(), "wrote token table");
    Ok(())
}

/// Read a token table. The first row is treated as the header and ignored.
///
/// Only I/O failures are errors; malformed rows are counted in
/// [`LoadedTokens::skipped_rows`].
pub fn read_tokens<R: io::Read>(reader: R) -> Result<LoadedTokens> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut loaded = LoadedTokens::default();
    for result in csv.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("skipping unreadable token row: {e}");
                loaded.skipped_rows += 1;
                continue;
            }
        };

        let row = record.position().map_or(0, |p| p.line());
        if record.len() != TOKEN_HEADER.len() {
            warn!(row, fields = record.len(), "skipping token row with wrong field count");
            loaded.skipped_rows += 1;
            continue;
        }

        // Positional: the header names are not trusted
        match record.deserialize::<TokenRecord>(None) {
            Ok(token) => loaded.tokens.push(token.into()),
            Err(e) => {
                warn!(row, "skipping malformed token row: {e}");
                loaded.skipped_rows += 1;
            }
        }
    }

    debug!(
        rows = loaded.tokens.len(),
        skipped = loaded.skipped_rows,
        "read token table"
    );
    Ok(loaded)
}
