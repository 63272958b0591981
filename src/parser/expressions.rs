//! Value and condition parsing
//!
//! The language has no general expression grammar. Wherever a value is
//! expected the parser accepts a single literal or name, and conditions are a
//! single comparison between two operands:
//!
//! ```text
//! value        ::= [ "+" | "-" ] number | identifier | char | string | bool
//! operand      ::= value
//! condition    ::= operand rel_op operand
//! if_condition ::= operand ( rel_op | "&&" | "||" ) operand
//! update       ::= identifier ( "++" | "--" | assign_op value )
//! ```
//!
//! Compound conditions such as `a > b && c < d` are rejected.

use super::parse::{Parser, RuleResult, SyntaxError};
use super::token::TokenKind;

impl Parser<'_> {
    /// Parse a single value: a literal, an identifier, or a signed number
    pub(crate) fn parse_value(&mut self, context: &str) -> RuleResult {
        if matches!(
            self.peek_kind(),
            Some(TokenKind::UnaryPlus | TokenKind::UnaryMinus)
        ) {
            self.advance();
            return match self.peek_kind() {
                Some(k) if k.is_numeric_literal() || k == TokenKind::Identifier => {
                    self.advance();
                    Ok(())
                }
                _ => Err(SyntaxError::new(format!(
                    "Expected a number or identifier after the sign {context}, found {}",
                    self.found()
                ))),
            };
        }

        match self.peek() {
            Some(token) if token.kind.is_literal() || token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(())
            }
            Some(token) if token.kind.is_invalid_identifier() => {
                Err(SyntaxError::new(Self::invalid_identifier_message(token)))
            }
            _ => Err(SyntaxError::new(format!(
                "Expected a value {context}, found {}",
                self.found()
            ))),
        }
    }

    /// `operand rel_op operand`
    pub(crate) fn parse_condition(&mut self, context: &str) -> RuleResult {
        self.parse_value(context)?;

        if !self.peek_kind().is_some_and(TokenKind::is_relational) {
            return Err(SyntaxError::new(format!(
                "Expected a relational operator {context}, found {}",
                self.found()
            )));
        }
        self.advance();

        self.parse_value(context)
    }

    /// `operand (rel_op | && | ||) operand`
    pub(crate) fn parse_if_condition(&mut self) -> RuleResult {
        let context = "in the if condition";
        self.parse_value(context)?;

        if !self
            .peek_kind()
            .is_some_and(|k| k.is_relational() || k.is_binary_logical())
        {
            return Err(SyntaxError::new(format!(
                "Expected a relational or logical operator {context}, found {}",
                self.found()
            )));
        }
        self.advance();

        self.parse_value(context)
    }

    /// `name ++`, `name --`, or `name assign_op value`
    pub(crate) fn parse_update(&mut self) -> RuleResult {
        let name = self.expect_identifier("in the for-loop update")?;

        match self.peek_kind() {
            Some(TokenKind::Increment | TokenKind::Decrement) => {
                self.advance();
                Ok(())
            }
            Some(k) if k.is_assignment() => {
                self.advance();
                self.parse_value("in the for-loop update")
            }
            _ => Err(SyntaxError::new(format!(
                "Expected '++', '--' or an assignment after '{name}' in the for-loop update, found {}",
                self.found()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::Parser;
    use crate::parser::token::TokenKind;

    #[test]
    fn test_value_kinds() {
        for source in ["5", "-5", "+2.5", "x", "-x", "'c'", "\"str\"", "\"\"", "FALSE"] {
            let tokens = tokenize(&format!("= {source}"));
            let mut parser = Parser::new(&tokens);
            parser.advance();
            assert!(parser.parse_value("here").is_ok(), "{source}");
            assert!(parser.is_at_end(), "{source}");
        }
    }

    #[test]
    fn test_sign_requires_number() {
        let tokens = tokenize("= -'c'");
        let mut parser = Parser::new(&tokens);
        parser.advance();
        let err = parser.parse_value("here").unwrap_err();
        assert_eq!(
            err.message,
            "Expected a number or identifier after the sign here, found ''c'' (CHAR_LITERAL)"
        );
    }

    #[test]
    fn test_condition() {
        let tokens = tokenize("i < 10");
        let mut parser = Parser::new(&tokens);
        assert!(parser.parse_condition("here").is_ok());
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_condition_rejects_logical_operator() {
        let tokens = tokenize("a && b");
        let mut parser = Parser::new(&tokens);
        let err = parser.parse_condition("in the loop").unwrap_err();
        assert!(err.message.starts_with("Expected a relational operator in the loop"));
    }

    #[test]
    fn test_if_condition_accepts_logical_operator() {
        let tokens = tokenize("a || b");
        let mut parser = Parser::new(&tokens);
        assert!(parser.parse_if_condition().is_ok());
    }

    #[test]
    fn test_update_forms() {
        for source in ["i++", "i--", "i = 0", "i += 2", "i -= step", "i *= 2", "i /= 2", "i %= 3"] {
            let tokens = tokenize(source);
            let mut parser = Parser::new(&tokens);
            assert!(parser.parse_update().is_ok(), "{source}");
            assert!(parser.is_at_end(), "{source}");
        }
    }

    #[test]
    fn test_update_leaves_cursor_at_failure() {
        let tokens = tokenize("i + 1");
        let mut parser = Parser::new(&tokens);
        assert!(parser.parse_update().is_err());
        assert_eq!(parser.peek_kind(), Some(TokenKind::Plus));
    }
}
