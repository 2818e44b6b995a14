//! Token model shared by the lexer and the parser.

use serde::Serialize;
use std::fmt;

/// Every lexical category the lexer can produce.
///
/// `Comment` is produced internally and filtered out before the token
/// sequence leaves the lexer. `Dot`, `For`, `While` and `Struct` are
/// tokenised but not yet consumed by any grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Eof,

    // Delimiters
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Dot,        // .
    Comma,      // ,
    Semicolon,  // ;

    // Arithmetic
    Mul, // *
    Div, // /
    Mod, // %
    Add, // +
    Sub, // -

    // Assignment and comparison
    Assign,       // =
    Equal,        // ==
    Not,          // !
    NotEqual,     // !=
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=

    // Logical
    And, // and
    Or,  // or

    // Bitwise
    BitAnd,     // &
    BitOr,      // |
    BitXor,     // ^
    BitNot,     // ~
    ShiftLeft,  // <<
    ShiftRight, // >>

    // Literals
    Ident,
    Number,
    String,
    Comment,

    // Keywords
    Var,
    Return,
    Fn,
    Struct,
    For,
    While,
    If,
    Else,
    Null,
    True,
    False,
}

impl TokenKind {
    /// User-facing spelling of the kind, used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Mod => "'%'",
            TokenKind::Add => "'+'",
            TokenKind::Sub => "'-'",
            TokenKind::Assign => "'='",
            TokenKind::Equal => "'=='",
            TokenKind::Not => "'!'",
            TokenKind::NotEqual => "'!='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::BitAnd => "'&'",
            TokenKind::BitOr => "'|'",
            TokenKind::BitXor => "'^'",
            TokenKind::BitNot => "'~'",
            TokenKind::ShiftLeft => "'<<'",
            TokenKind::ShiftRight => "'>>'",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Var => "'var'",
            TokenKind::Return => "'return'",
            TokenKind::Fn => "'fn'",
            TokenKind::Struct => "'struct'",
            TokenKind::For => "'for'",
            TokenKind::While => "'while'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Null => "'null'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single lexical unit: its kind, the raw source text it was built from,
/// and the 1-based line on which it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::String => write!(f, "string \"{}\"", self.text),
            kind => f.write_str(kind.describe()),
        }
    }
}
