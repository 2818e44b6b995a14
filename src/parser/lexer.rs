//! Lexer (tokenizer) for Blorbo source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Line comments are recognised as [`TokenKind::Comment`] and dropped before
//! the stream is returned, so the parser never sees them.
//!
//! Lexical errors do not stop the scan: every unexpected character and
//! unterminated string is recorded and scanning resumes after it, so a single
//! pass reports all of them through [`LexErrors`].

use super::token::{Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("var", TokenKind::Var),
    ("return", TokenKind::Return),
    ("fn", TokenKind::Fn),
    ("struct", TokenKind::Struct),
    ("for", TokenKind::For),
    ("while", TokenKind::While),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("null", TokenKind::Null),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
];

/// A single lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' on line {line}")]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("unterminated string on line {line}")]
    UnterminatedString { line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. } | LexError::UnterminatedString { line } => {
                *line
            }
        }
    }
}

/// Every lexical error found in one scan, in source order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexErrors {
    errors: Vec<LexError>,
}

impl LexErrors {
    fn new(errors: Vec<LexError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LexError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`: a scan only fails when it found at least one error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first(&self) -> &LexError {
        &self.errors[0]
    }
}

impl fmt::Display for LexErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lexer error(s) occurred", self.errors.len())
    }
}

impl std::error::Error for LexErrors {}

impl<'a> IntoIterator for &'a LexErrors {
    type Item = &'a LexError;
    type IntoIter = std::slice::Iter<'a, LexError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Scan a whole source string into tokens. Shorthand for
/// `Lexer::new(source).tokenize()`.
pub fn scan(source: &str) -> Result<Vec<Token>, LexErrors> {
    Lexer::new(source).tokenize()
}

/// Lexer for Blorbo source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    keywords: FxHashMap<&'static str, TokenKind>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            keywords: KEYWORDS.iter().copied().collect(),
        }
    }

    /// Tokenize the entire input.
    ///
    /// On success the sequence ends with exactly one [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexErrors> {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            self.skip_whitespace();

            let line = self.line;
            let Some(ch) = self.advance() else {
                tokens.push(Token::eof(line));
                break;
            };

            match self.next_token(ch, line) {
                Ok(token) if token.kind == TokenKind::Comment => {}
                Ok(token) => tokens.push(token),
                Err(err) => {
                    debug!(line = err.line(), error = %err, "lexical error");
                    errors.push(err);
                }
            }
        }

        if errors.is_empty() {
            trace!(count = tokens.len(), "scan complete");
            Ok(tokens)
        } else {
            debug!(count = errors.len(), "scan failed");
            Err(LexErrors::new(errors))
        }
    }

    /// Build the token starting with `ch`, already consumed on `line`.
    fn next_token(&mut self, ch: char, line: usize) -> Result<Token, LexError> {
        let token = match ch {
            '"' => return self.string_literal(line),
            '0'..='9' => self.number_literal(ch),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '/' if self.peek() == Some('/') => self.line_comment(),

            '=' => self.one_or_two('=', TokenKind::Equal, TokenKind::Assign, line),
            '!' => self.one_or_two('=', TokenKind::NotEqual, TokenKind::Not, line),
            '>' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Token::new(TokenKind::ShiftRight, ">>", line)
                } else {
                    self.one_or_two('=', TokenKind::GreaterEqual, TokenKind::Greater, line)
                }
            }
            '<' => {
                if self.peek() == Some('<') {
                    self.advance();
                    Token::new(TokenKind::ShiftLeft, "<<", line)
                } else {
                    self.one_or_two('=', TokenKind::LessEqual, TokenKind::Less, line)
                }
            }

            '(' => Token::new(TokenKind::LeftParen, "(", line),
            ')' => Token::new(TokenKind::RightParen, ")", line),
            '{' => Token::new(TokenKind::LeftBrace, "{", line),
            '}' => Token::new(TokenKind::RightBrace, "}", line),
            '.' => Token::new(TokenKind::Dot, ".", line),
            ',' => Token::new(TokenKind::Comma, ",", line),
            ';' => Token::new(TokenKind::Semicolon, ";", line),
            '*' => Token::new(TokenKind::Mul, "*", line),
            '/' => Token::new(TokenKind::Div, "/", line),
            '%' => Token::new(TokenKind::Mod, "%", line),
            '+' => Token::new(TokenKind::Add, "+", line),
            '-' => Token::new(TokenKind::Sub, "-", line),
            '&' => Token::new(TokenKind::BitAnd, "&", line),
            '|' => Token::new(TokenKind::BitOr, "|", line),
            '^' => Token::new(TokenKind::BitXor, "^", line),
            '~' => Token::new(TokenKind::BitNot, "~", line),

            _ => return Err(LexError::UnexpectedCharacter { ch, line }),
        };

        Ok(token)
    }

    /// Build `double` if the next character is `second`, else `single`.
    /// The first character has already been consumed.
    fn one_or_two(
        &mut self,
        second: char,
        double: TokenKind,
        single: TokenKind,
        line: usize,
    ) -> Token {
        let first = self.input[self.position - 1];
        if self.peek() == Some(second) {
            self.advance();
            Token::new(double, format!("{first}{second}"), line)
        } else {
            Token::new(single, first.to_string(), line)
        }
    }

    /// Parse string literal. Content is kept verbatim; newlines inside the
    /// string advance the line counter but do not end it.
    fn string_literal(&mut self, start_line: usize) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                return Ok(Token::new(TokenKind::String, string, start_line));
            }
            string.push(ch);
        }

        Err(LexError::UnterminatedString { line: start_line })
    }

    /// Parse numeric literal: digits, optionally `.` and more digits.
    fn number_literal(&mut self, first_digit: char) -> Token {
        let line = self.line;
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        if self.peek() == Some('.') {
            self.advance();
            num_str.push('.');
            self.take_digits(&mut num_str);
        }

        Token::new(TokenKind::Number, num_str, line)
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            buf.push(ch);
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> Token {
        let line = self.line;
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = self
            .keywords
            .get(ident.as_str())
            .copied()
            .unwrap_or(TokenKind::Ident);
        Token::new(kind, ident, line)
    }

    /// Consume a `//` comment up to (not including) the newline.
    fn line_comment(&mut self) -> Token {
        let line = self.line;
        self.advance(); // second '/'

        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        Token::new(TokenKind::Comment, text, line)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character, counting newlines.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
        }

        Some(ch)
    }
}
