//! Shell configuration
//!
//! Collected from command-line flags and the environment by the binary.

use clap::ValueEnum;
use crossterm::tty::IsTty;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "BLORBO_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// What the shell prints for a successfully processed script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Emit {
    /// The syntax tree as field-labeled JSON
    #[default]
    Tree,
    /// The syntax tree as s-expressions, one statement per line
    Sexpr,
    /// The token stream as JSON, before parsing
    Tokens,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub emit: Emit,
    /// Single-line JSON instead of indented output.
    pub compact: bool,
    /// Style the prompt and error messages.
    pub color: bool,
}

impl Config {
    /// Colour is used only when stdout is a terminal, `--no-color` was not
    /// given and `NO_COLOR` is unset or empty.
    pub fn detect_color(no_color_flag: bool) -> bool {
        if no_color_flag {
            return false;
        }

        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        !no_color_env && std::io::stdout().is_tty()
    }
}
