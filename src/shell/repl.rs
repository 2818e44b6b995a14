// Interactive read-parse-print loop

use super::{report_error, run_script, Config, ShellError};
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use std::io::{BufRead, Write};
use tracing::debug;

const PROMPT: &str = "> ";

/// Prompt for lines on `input` until it is exhausted, writing each rendered
/// tree or error to `out`. Every line is scanned and parsed on its own; an
/// error is reported and the loop keeps going.
pub fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    config: &Config,
) -> Result<(), ShellError> {
    writeln!(out, "Blorbo {}", env!("CARGO_PKG_VERSION"))?;

    let mut line = String::new();
    loop {
        write_prompt(out, config)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // End of input: finish the prompt line and leave.
            writeln!(out)?;
            debug!("input closed");
            return Ok(());
        }

        match run_script(&line, config) {
            Ok(rendered) => writeln!(out, "{rendered}")?,
            Err(err) => report_error(out, &err, config)?,
        }
    }
}

fn write_prompt<W: Write>(out: &mut W, config: &Config) -> std::io::Result<()> {
    if config.color {
        queue!(out, PrintStyledContent(PROMPT.bold().cyan()))?;
    } else {
        queue!(out, Print(PROMPT))?;
    }
    out.flush()
}
