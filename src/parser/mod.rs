//! Blorbo source code front end
//!
//! This module transforms Blorbo source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds and values
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with the grammar split across
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Supported Language
//!
//! - Statements: blocks, `if`/`else`, `fn` declarations, `var` declarations,
//!   `return`, expression statements
//! - Expressions: assignment, `and`/`or`, bitwise, equality, comparison,
//!   shifts, arithmetic, unary `+ - ! ~`, chained calls, grouping
//! - Literals: numbers (`1`, `2.5`), raw strings, `true`, `false`, `null`
//! - Line comments (`// ...`)
//!
//! `for`, `while`, `struct` and `.` are tokenised and reserved but not yet
//! part of the grammar.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;
