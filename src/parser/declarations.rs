//! Declaration parsing implementation
//!
//! This module handles everything that introduces or names a variable:
//!
//! - Typed declarations: `int a, b = 5, c;`
//! - For-loop initializers: `int i = 0` or `i = 0`
//! - Identifier expectations, with a precise message when the token in
//!   identifier position is an invalid identifier, keyword, reserved word or
//!   noise word
//!
//! # Grammar
//!
//! ```text
//! declaration ::= type_keyword identifier [ "=" value ]
//!                 { "," identifier [ "=" value ] } ";"
//! for_init    ::= [ type_keyword ] identifier "=" value
//! ```
//!
//! Every declared name is added to the parser's name set.

use super::parse::{Parser, RuleResult, SyntaxError};
use super::token::{Token, TokenKind};

impl<'t> Parser<'t> {
    /// `type name [= value] {, name [= value]} ;`
    pub(crate) fn parse_declaration(&mut self) -> RuleResult {
        let type_name = self.advance().map(|t| t.text.as_str()).unwrap_or_default();
        let context = format!("after '{type_name}'");

        loop {
            let name = self.expect_identifier(&context)?;
            self.declare(name);

            if self.match_token(TokenKind::Assign) {
                self.parse_value(&format!("after '=' in the declaration of '{name}'"))?;
            }

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::Semicolon, "Expected ';' at the end of the declaration")?;
        Ok(())
    }

    /// `[type] name = value` inside a for-loop header
    pub(crate) fn parse_for_init(&mut self) -> RuleResult {
        let typed = self.peek_kind().is_some_and(TokenKind::is_type_keyword);
        if typed {
            self.advance();
        }

        let name = self.expect_identifier("in the for-loop initialization")?;
        if typed {
            self.declare(name);
        }

        self.expect(
            TokenKind::Assign,
            &format!("Expected '=' after '{name}' in the for-loop initialization"),
        )?;
        self.parse_value("in the for-loop initialization")
    }

    /// Consume a valid identifier and return its name
    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<&'t str, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(token.text.as_str())
            }
            Some(token) if token.kind.is_invalid_identifier() => {
                Err(SyntaxError::new(Self::invalid_identifier_message(token)))
            }
            Some(token) if token.kind.is_keyword() => Err(SyntaxError::new(format!(
                "'{}' is a keyword and cannot be used as an identifier",
                token.text
            ))),
            Some(token) if token.kind.is_reserved() => Err(SyntaxError::new(format!(
                "'{}' is a reserved word and cannot be used as an identifier",
                token.text
            ))),
            Some(token) if token.kind.is_noise() => Err(SyntaxError::new(format!(
                "'{}' is a noise word and cannot be used as an identifier",
                token.text
            ))),
            _ => Err(SyntaxError::new(format!(
                "Expected an identifier {context}, found {}",
                self.found()
            ))),
        }
    }

    /// Explain why an invalid-identifier token was rejected
    pub(crate) fn invalid_identifier_message(token: &Token) -> String {
        let reason = match token.kind {
            TokenKind::DigitLeadInvalid => "identifiers cannot start with a digit",
            TokenKind::UnderscoreInvalid => {
                "identifiers cannot start or end with '_' or contain '__'"
            }
            TokenKind::SpecialCharInvalid => "identifiers cannot contain special characters",
            _ => "not a valid identifier",
        };
        format!("Invalid identifier '{}': {}", token.text, reason)
    }
}
