// Blorbo: parse scripts into syntax trees

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blorbo::shell::config::{DEFAULT_LOG_FILTER, LOG_ENV};
use blorbo::shell::{self, Config, Emit};

/// Parse a Blorbo script and print its syntax tree. Without a script, starts
/// an interactive prompt that parses one line at a time.
#[derive(Parser, Debug)]
#[command(name = "blorbo", version)]
struct Cli {
    /// Script file to parse.
    script: Option<PathBuf>,

    /// What to print for a successfully processed script.
    #[arg(long, value_enum, default_value_t = Emit::Tree)]
    emit: Emit,

    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,

    /// Disable coloured prompt and error output.
    #[arg(long)]
    no_color: bool,
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = Config {
        emit: cli.emit,
        compact: cli.compact,
        color: Config::detect_color(cli.no_color),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.script {
        Some(path) => match shell::run_file(&path, &config) {
            Ok(rendered) => match writeln!(out, "{rendered}") {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("terminal error: {err}");
                    ExitCode::FAILURE
                }
            },
            Err(err) => {
                if let Err(write_err) = shell::report_error(&mut out, &err, &config) {
                    eprintln!("{err} ({write_err})");
                }
                ExitCode::FAILURE
            }
        },
        None => match shell::run_repl(io::stdin().lock(), &mut out, &config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
    }
}
