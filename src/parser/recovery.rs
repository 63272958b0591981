//! Error recovery for the parser.
//!
//! Panic-mode synchronization: after a rule fails, discard tokens up to a point
//! where parsing can safely resume. Every routine here only moves the cursor
//! forward, and each one either consumes at least one token or stops at a
//! position the failed rule had already moved past, so the statement loops
//! that call them always terminate.

use super::parse::Parser;
use super::token::TokenKind;

/// Where synchronization stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resync {
    /// Consumed a `;`; the next statement starts at the cursor
    StatementEnd,
    /// Consumed a `}`; the enclosing block is closed
    BlockClosed,
    /// Stopped in front of a statement-starting token, left unconsumed
    AtKeyword,
    /// Skipped a balanced `{ ... }` body; the enclosing block is still open
    BodySkipped,
    /// Ran out of tokens
    EndOfInput,
}

impl Parser<'_> {
    /// Statement-level synchronization for a rule that started at `rule_start`.
    ///
    /// Consumes through the next `;` or `}`, or stops before a token that can
    /// start a statement. A statement starter at `rule_start` itself is the
    /// token the failed rule began with, so it is skipped rather than
    /// re-dispatched.
    pub(crate) fn synchronize_statement(&mut self, rule_start: usize) -> Resync {
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return Resync::StatementEnd;
                }
                TokenKind::RBrace => {
                    self.advance();
                    return Resync::BlockClosed;
                }
                k if k.starts_statement() && self.position > rule_start => {
                    return Resync::AtKeyword;
                }
                _ => {
                    self.advance();
                }
            }
        }
        Resync::EndOfInput
    }

    /// For-loop header synchronization.
    ///
    /// Skips to the header's closing `)` (consumed), or up to the body's `{`
    /// if the `)` is missing, then skips the body through its matching `}`.
    pub(crate) fn synchronize_for_header(&mut self) -> Resync {
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::RParen => {
                    self.advance();
                    break;
                }
                TokenKind::LBrace => break,
                _ => {
                    self.advance();
                }
            }
        }
        self.skip_balanced_block()
    }

    /// Skip tokens through the `}` that balances the next `{`.
    ///
    /// Returns [`Resync::BodySkipped`] when that `}` closes a `{` opened
    /// during the skip, and [`Resync::BlockClosed`] when a `}` turns up
    /// before any `{`: that brace belongs to the enclosing block.
    pub(crate) fn skip_balanced_block(&mut self) -> Resync {
        let mut depth = 0usize;
        while let Some(kind) = self.advance().map(|t| t.kind) {
            match kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace if depth == 0 => return Resync::BlockClosed,
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Resync::BodySkipped;
                    }
                }
                _ => {}
            }
        }
        Resync::EndOfInput
    }
}
