//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! diagnostics, the rule wrapper that turns a failed grammar rule into one
//! [`Diagnostic`] plus resynchronization, and the cursor helpers shared by the
//! grammar modules.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: statement dispatch and the block-bearing constructs
//!   (`main`, `for`, `if`/`else`, `gc`) plus `printf`/`return`
//! - `declarations`: typed declarations, for-loop initializers and names
//! - `expressions`: values, operands, conditions and for-loop updates
//! - `recovery`: panic-mode synchronization
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Grammar rules return [`RuleResult`] and use `?` internally. Only the rule
//! wrapper ([`Parser::run_rule`]) records diagnostics, so each failed statement
//! yields exactly one entry, localized to the line the statement started on.

use super::recovery::Resync;
use super::token::{Token, TokenKind};
use rustc_hash::FxHashSet;
use std::fmt;
use tracing::debug;

/// A syntax error found during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax Error on line {}: {}", self.line, self.message)
    }
}

/// How the parser gets back on track after a rule fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Recovery {
    /// Skip to the end of the current statement
    Statement,
    /// Skip the rest of a for-loop header and its body
    ForHeader,
}

/// Failure of a grammar rule. Never escapes the parser: the rule wrapper turns
/// it into a [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub(crate) struct SyntaxError {
    pub(crate) message: String,
    pub(crate) recovery: Recovery,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recovery: Recovery::Statement,
        }
    }

    pub(crate) fn in_for_header(self) -> Self {
        Self {
            recovery: Recovery::ForHeader,
            ..self
        }
    }
}

pub(crate) type RuleResult = Result<(), SyntaxError>;

/// Result of parsing a complete token sequence
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Every syntax error, in the order found
    pub diagnostics: Vec<Diagnostic>,
    /// Names introduced by declarations. Collected for reference only; nothing
    /// in the parser looks names up.
    pub declared_names: FxHashSet<String>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostics rendered as `Syntax Error on line N: ...` strings
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Parse a token sequence and collect its diagnostics.
pub fn parse(tokens: &[Token]) -> ParseReport {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser over a borrowed token sequence
pub struct Parser<'t> {
    pub(crate) tokens: &'t [Token],
    /// Index of the next unread token; only ever increases
    pub(crate) position: usize,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) declared_names: FxHashSet<String>,
    /// Number of blocks currently open
    pub(crate) depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            diagnostics: Vec::new(),
            declared_names: FxHashSet::default(),
            depth: 0,
        }
    }

    /// Parse the entire program
    pub fn parse_program(mut self) -> ParseReport {
        while !self.is_at_end() {
            let before = self.position;
            // A `}` consumed by recovery at the top level closes nothing
            let _ = self.parse_statement();
            debug_assert!(self.position > before, "statement made no progress");
        }

        debug!(
            errors = self.diagnostics.len(),
            names = self.declared_names.len(),
            "parse finished"
        );

        ParseReport {
            diagnostics: self.diagnostics,
            declared_names: self.declared_names,
        }
    }

    /// Run one statement-level rule. On failure, record a single diagnostic at
    /// the line of the rule's first token and resynchronize.
    pub(crate) fn run_rule(
        &mut self,
        name: &'static str,
        rule: fn(&mut Self) -> RuleResult,
    ) -> Option<Resync> {
        let start = self.position;
        let line = self.line_at(start);
        debug!(rule = name, line, position = start, "rule");

        let err = rule(self).err()?;
        self.report(line, err.message);

        let resync = match err.recovery {
            Recovery::Statement => self.synchronize_statement(start),
            Recovery::ForHeader => self.synchronize_for_header(),
        };
        debug!(rule = name, ?resync, position = self.position, "recovered");
        Some(resync)
    }

    pub(crate) fn report(&mut self, line: usize, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(line, message));
    }

    pub(crate) fn declare(&mut self, name: &str) {
        self.declared_names.insert(name.to_string());
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(crate) fn peek_ahead_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.position + n).map(|t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Line of the token at `index`, or of the last token past the end
    pub(crate) fn line_at(&self, index: usize) -> usize {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    /// Human-readable description of the current token for messages
    pub(crate) fn found(&self) -> String {
        match self.peek() {
            Some(token) => format!("'{}' ({})", token.text, token.kind),
            None => "end of input".to_string(),
        }
    }

    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<&'t Token, SyntaxError> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(SyntaxError::new(format!("{}, found {}", message, self.found())))
    }
}
