//! Command shell around the front end
//!
//! Runs source text through [`scan`] and [`parse`] and renders the result.
//! Used by the `blorbo` binary in two modes:
//! - file mode: [`run_file`] processes one script
//! - interactive mode: [`run_repl`] processes each input line independently
//!
//! The shell holds no parsing logic of its own.

pub mod config;
mod repl;

pub use config::{Config, Emit};
pub use repl::run_repl;

use crate::parser::lexer::{scan, LexErrors};
use crate::parser::parse::{parse, ParseError};
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Everything that can go wrong while the shell runs a script.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Individual lexical errors are logged; the message stays generic.
    #[error("error: lexer error(s) occurred")]
    Lex(#[source] LexErrors),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("{}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Run one source string through the pipeline and render it according to
/// `config.emit`.
pub fn run_script(source: &str, config: &Config) -> Result<String, ShellError> {
    let tokens = scan(source).map_err(|errors| {
        for err in &errors {
            warn!(line = err.line(), "{err}");
        }
        ShellError::Lex(errors)
    })?;

    match config.emit {
        Emit::Tokens => to_json(&tokens, config.compact),
        Emit::Tree => to_json(&parse(tokens)?, config.compact),
        Emit::Sexpr => Ok(parse(tokens)?.to_string().trim_end().to_string()),
    }
}

/// Read a script from disk and run it.
pub fn run_file(path: &Path, config: &Config) -> Result<String, ShellError> {
    let source = std::fs::read_to_string(path).map_err(|source| ShellError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    run_script(&source, config)
}

/// Write an error message, styled red when colour is enabled.
pub fn report_error<W: Write>(out: &mut W, err: &ShellError, config: &Config) -> io::Result<()> {
    let message = err.to_string();
    if config.color {
        queue!(out, PrintStyledContent(message.red()), Print("\n"))?;
    } else {
        queue!(out, Print(message), Print("\n"))?;
    }
    out.flush()
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String, ShellError> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}
