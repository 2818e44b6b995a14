//! Expression parsing implementation
//!
//! This module handles parsing of Blorbo expressions using precedence climbing
//! for binary operators and recursive descent for the remaining forms.
//!
//! # Precedence
//!
//! Lowest to highest binding strength:
//!
//! ```text
//! Assign     -> LogicalOr ( "=" Assign )?
//! LogicalOr  -> LogicalAnd ( "or" LogicalAnd )*
//! LogicalAnd -> BitOr ( "and" BitOr )*
//! BitOr      -> BitXor ( "|" BitXor )*
//! BitXor     -> BitAnd ( "^" BitAnd )*
//! BitAnd     -> Equality ( "&" Equality )*
//! Equality   -> Comparison ( ( "==" | "!=" ) Comparison )*
//! Comparison -> BitShift ( ( ">" | ">=" | "<" | "<=" ) BitShift )*
//! BitShift   -> Term ( ( ">>" | "<<" ) Term )*
//! Term       -> Factor ( ( "+" | "-" ) Factor )*
//! Factor     -> Unary ( ( "*" | "/" | "%" ) Unary )*
//! Unary      -> ( "+" | "-" | "!" | "~" ) Unary | Call
//! Call       -> Primary ( "(" ( Expr ( "," Expr )* )? ")" )*
//! Primary    -> Ident | Number | String | "true" | "false" | "null" | "(" Expr ")"
//! ```
//!
//! Binary tiers are left-associative and built by iterative folding.
//! Assignment is right-associative.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

type Operand = fn(&mut Parser) -> Result<Expr, ParseError>;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_assignment)
    }

    /// Parse assignment (right-associative). Only a bare identifier may be
    /// assigned to.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_logical_or()?;

        if self.match_token(TokenKind::Assign) {
            let line = self.previous().line;
            let value = Box::new(self.parse_assignment()?);

            return match expr {
                Expr::Ident { name } => Ok(Expr::Assign { name, value }),
                _ => Err(ParseError::InvalidAssignmentTarget { line }),
            };
        }

        Ok(expr)
    }

    /// Left fold `operand (op operand)*` for one precedence tier.
    fn parse_binary_tier(
        &mut self,
        operators: &[TokenKind],
        operand: Operand,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while self.match_any(operators) {
            let op = self.previous().clone();
            let right = operand(self)?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse logical OR (or)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(&[TokenKind::Or], Self::parse_logical_and)
    }

    /// Parse logical AND (and)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(&[TokenKind::And], Self::parse_bitwise_or)
    }

    /// Parse bitwise OR (|)
    fn parse_bitwise_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(&[TokenKind::BitOr], Self::parse_bitwise_xor)
    }

    /// Parse bitwise XOR (^)
    fn parse_bitwise_xor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(&[TokenKind::BitXor], Self::parse_bitwise_and)
    }

    /// Parse bitwise AND (&)
    fn parse_bitwise_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(&[TokenKind::BitAnd], Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(
            &[TokenKind::Equal, TokenKind::NotEqual],
            Self::parse_comparison,
        )
    }

    /// Parse comparison (> >= < <=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::parse_shift,
        )
    }

    /// Parse bitwise shift (>> <<)
    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(
            &[TokenKind::ShiftRight, TokenKind::ShiftLeft],
            Self::parse_term,
        )
    }

    /// Parse additive (+ -)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(&[TokenKind::Add, TokenKind::Sub], Self::parse_factor)
    }

    /// Parse multiplicative (* / %)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_tier(
            &[TokenKind::Mul, TokenKind::Div, TokenKind::Mod],
            Self::parse_unary,
        )
    }

    /// Parse unary (+ - ! ~)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[
            TokenKind::Add,
            TokenKind::Sub,
            TokenKind::Not,
            TokenKind::BitNot,
        ]) {
            let op = self.previous().clone();
            let right = Box::new(self.nested(Self::parse_unary)?);
            return Ok(Expr::Unary { op, right });
        }

        self.parse_call()
    }

    /// Parse call chains: primary (args)*
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.match_token(TokenKind::LeftParen) {
            let args = self.parse_argument_list()?;
            self.expect_token(TokenKind::RightParen, "expected ')' after arguments")?;

            expr = Expr::Call {
                callee: Box::new(expr),
                args,
            };
        }

        Ok(expr)
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RightParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary (literals, identifiers, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::Ident => {
                let name = self.advance().clone();
                Ok(Expr::Ident { name })
            }
            TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => {
                let value = self.advance().clone();
                Ok(Expr::Literal { value })
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RightParen, "expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(ParseError::ExpectedExpression {
                found: self.peek().to_string(),
                line: self.current_line(),
            }),
        }
    }
}
