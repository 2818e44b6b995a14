//! # Introduction
//!
//! Blorbo is a small imperative scripting language. This crate is its front
//! end: it turns source text into a syntax tree and nothing more. There is no
//! evaluator, type checker or code generator; the [`parser::ast::Program`] it
//! produces is a plain data product for whatever runs next.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Shell (JSON / s-expression display)
//! ```
//!
//! 1. [`parser`]: tokenises the source ([`scan`]) and builds an AST ([`parse`]).
//! 2. [`shell`]: runs the pipeline for the `blorbo` binary, one script or one
//!    interactive line at a time, and renders the result.
//!
//! Both stages are synchronous and keep no state between calls, so separate
//! sources can be processed concurrently without coordination.
//!
//! ```
//! let tokens = blorbo::scan("var answer = 6 * 7;").unwrap();
//! let program = blorbo::parse(tokens).unwrap();
//! assert_eq!(program.to_string(), "(var answer (* 6 7))\n");
//! ```

pub mod parser;
pub mod shell;

pub use parser::lexer::{scan, LexError, LexErrors};
pub use parser::parse::{parse, ParseError};
