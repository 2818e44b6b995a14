//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (blocks, `if`, `fn`, `var`, `return`)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Parsing stops at the first error. There is no recovery and no partial tree.
//! Recursion is bounded by [`MAX_NESTING_DEPTH`], so pathological nesting is
//! reported as [`ParseError::NestingTooDeep`] instead of exhausting the stack.

use crate::parser::ast::*;
use crate::parser::token::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// How many statements, parenthesised expressions and prefix operators may
/// enclose one another. Sized so a parse at the limit fits a 2 MiB thread stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required token was missing. `expected` reads like
    /// "expected ';' after expression".
    #[error("{expected} on line {line}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        line: usize,
    },

    #[error("expected expression, found {found} on line {line}")]
    ExpectedExpression { found: String, line: usize },

    #[error("invalid assignment target on line {line}")]
    InvalidAssignmentTarget { line: usize },

    #[error("invalid parameter name on line {line}")]
    InvalidParameterName { line: usize },

    #[error("nesting too deep on line {line}")]
    NestingTooDeep { line: usize },
}

impl ParseError {
    /// 1-based source line the error is attributed to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::ExpectedExpression { line, .. }
            | ParseError::InvalidAssignmentTarget { line }
            | ParseError::InvalidParameterName { line }
            | ParseError::NestingTooDeep { line } => *line,
        }
    }
}

/// Parse a token sequence into a [`Program`]. Shorthand for
/// `Parser::new(tokens).parse_program()`.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for Blorbo
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) depth: usize,
}

impl Parser {
    /// Take ownership of a token sequence. An `Eof` is appended when the
    /// sequence does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Program -> Stmt* Eof
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let stmt = self.parse_statement().inspect_err(|err| {
                debug!(line = err.line(), error = %err, "parse failed");
            })?;
            program.stmts.push(stmt);
        }

        debug!(statements = program.stmts.len(), "parse complete");
        Ok(program)
    }

    // ===== Helper methods =====

    /// Run `parse` one nesting level deeper, failing once the level would
    /// exceed [`MAX_NESTING_DEPTH`].
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                line: self.current_line(),
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the next token if its kind is any of `kinds`.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.peek().kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_line(&self) -> usize {
        self.peek().line
    }

    /// Consume a token of `kind` and return it, or fail with `message`
    /// attributed to the line of the offending token.
    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &'static str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: message,
                found: self.peek().to_string(),
                line: self.current_line(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::scan;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(scan(source).unwrap())
    }

    fn sexpr(source: &str) -> String {
        parse_source(source).unwrap().to_string()
    }

    #[test]
    fn test_parse_var_declaration() {
        let program = parse_source("var x = 1;").unwrap();

        assert_eq!(program.stmts.len(), 1);
        match &program.stmts[0] {
            Stmt::Var { name, value } => {
                assert_eq!(name.text, "x");
                assert!(matches!(value, Some(Expr::Literal { value }) if value.text == "1"));
            }
            _ => panic!("Expected variable declaration"),
        }
    }

    #[test]
    fn test_parse_var_without_initializer() {
        assert_eq!(sexpr("var x;"), "(var x)\n");
    }

    #[test]
    fn test_parse_function() {
        let program = parse_source("fn add(a, b) { return a + b; }").unwrap();

        assert_eq!(program.stmts.len(), 1);
        match &program.stmts[0] {
            Stmt::Fn { name, params, body } => {
                assert_eq!(name.text, "add");
                let names: Vec<&str> = params.iter().map(|p| p.text.as_str()).collect();
                assert_eq!(names, vec!["a", "b"]);
                assert!(matches!(**body, Stmt::Block { ref body } if body.len() == 1));
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_parse_function_without_params() {
        assert_eq!(sexpr("fn f() {}"), "(fn f () (block))\n");
    }

    #[test]
    fn test_parse_if_else() {
        assert_eq!(
            sexpr("if (x > 0) return 1; else return 0;"),
            "(if (> x 0) (return 1) (return 0))\n"
        );
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        assert_eq!(
            sexpr("if (a) if (b) x; else y;"),
            "(if a (if b x y))\n"
        );
    }

    #[test]
    fn test_reserved_keywords_fall_through_to_expression() {
        let err = parse_source("while (x) {}").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedExpression { line: 1, .. }));
    }

    #[test]
    fn test_parser_accepts_tokens_without_eof() {
        let mut tokens = scan("x;").unwrap();
        tokens.pop();
        let program = parse(tokens).unwrap();
        assert_eq!(program.stmts.len(), 1);
    }

    #[test]
    fn test_empty_program() {
        assert!(parse(Vec::new()).unwrap().stmts.is_empty());
        assert!(parse_source("// nothing here\n").unwrap().stmts.is_empty());
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_source("var x = 1\nvar y;").unwrap_err();
        assert_eq!(err.to_string(), "expected ';' after variable declaration on line 2");
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_nested_blocks_within_limit() {
        let depth = MAX_NESTING_DEPTH;
        let source = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let program = parse_source(&source).unwrap();

        let mut stmt = &program.stmts[0];
        let mut levels = 1;
        while let Stmt::Block { body } = stmt {
            match body.first() {
                Some(inner) => {
                    stmt = inner;
                    levels += 1;
                }
                None => break,
            }
        }
        assert_eq!(levels, depth);
    }

    #[test]
    fn test_deeply_nested_blocks_are_rejected() {
        let source = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
        assert_eq!(
            parse_source(&source).unwrap_err(),
            ParseError::NestingTooDeep { line: 1 }
        );

        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        assert!(matches!(
            parse_source(&source).unwrap_err(),
            ParseError::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn test_nesting_depth_resets_between_statements() {
        let parens = MAX_NESTING_DEPTH - 2;
        let one = format!("{}x{};", "(".repeat(parens), ")".repeat(parens));
        let source = one.repeat(3);
        assert_eq!(parse_source(&source).unwrap().stmts.len(), 3);
    }

    #[test]
    fn test_nesting_error_message() {
        let err = ParseError::NestingTooDeep { line: 7 };
        assert_eq!(err.to_string(), "nesting too deep on line 7");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_source("{ x;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: "expected '}' after block",
                ..
            }
        ));
    }
}
