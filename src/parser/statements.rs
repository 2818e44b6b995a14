//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! Stmt     -> Block | If | Fn | Var | Return | ExprStmt
//! Block    -> "{" Stmt* "}"
//! If       -> "if" "(" Expr ")" Stmt ( "else" Stmt )?
//! Fn       -> "fn" Ident "(" ( Expr ( "," Expr )* )? ")" Stmt
//! Var      -> "var" Ident ( "=" Expr )? ";"
//! Return   -> "return" Expr ";"
//! ExprStmt -> Expr ";"
//! ```
//!
//! `for`, `while` and `struct` have no statement form yet; they fall through
//! to the expression statement, which rejects them.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Token, TokenKind};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_statement_form)
    }

    fn parse_statement_form(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::LeftBrace) {
            return self.parse_block();
        }

        if self.match_token(TokenKind::If) {
            return self.parse_if_statement();
        }

        if self.match_token(TokenKind::Fn) {
            return self.parse_function_declaration();
        }

        if self.match_token(TokenKind::Var) {
            return self.parse_variable_declaration();
        }

        if self.match_token(TokenKind::Return) {
            return self.parse_return_statement();
        }

        self.parse_expression_statement()
    }

    /// Parse block statements after the opening brace
    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let mut body = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            body.push(self.parse_statement()?);
        }

        self.expect_token(TokenKind::RightBrace, "expected '}' after block")?;

        Ok(Stmt::Block { body })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::LeftParen, "expected '(' after 'if'")?;
        let cond = self.parse_expression()?;
        self.expect_token(TokenKind::RightParen, "expected ')' after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    /// Parse function declaration: fn name(params) body
    fn parse_function_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_token(TokenKind::Ident, "expected function name")?;

        self.expect_token(TokenKind::LeftParen, "expected '(' after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_token(TokenKind::RightParen, "expected ')' after parameters")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::Fn { name, params, body })
    }

    /// Parameters are parsed as expressions and must each reduce to a bare
    /// identifier.
    fn parse_parameter_list(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RightParen) {
            return Ok(params);
        }

        loop {
            let line = self.current_line();
            match self.parse_expression()? {
                Expr::Ident { name } => params.push(name),
                _ => return Err(ParseError::InvalidParameterName { line }),
            }

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse variable declaration: var name [= init];
    fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_token(TokenKind::Ident, "expected variable name")?;

        let value = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_token(
            TokenKind::Semicolon,
            "expected ';' after variable declaration",
        )?;

        Ok(Stmt::Var { name, value })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, "expected ';' after return value")?;

        Ok(Stmt::Return { value })
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, "expected ';' after expression")?;

        Ok(Stmt::Expr { value })
    }
}
