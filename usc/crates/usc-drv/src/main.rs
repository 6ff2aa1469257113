//! usc - the UniiScript compiler command line.
//!
//! Lexes every given file, prints the token stream and reports lexical
//! errors on stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use usc_drv::{write_tokens, Config, DriverError, OutputFormat, Session, SessionOptions};
use usc_lex::PositionMode;

/// USC - UniiScript Compiler
#[derive(Parser, Debug)]
#[command(name = "usc")]
#[command(author = "UniiScript Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "USC - UniiScript Compiler", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, env = "USC_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, env = "USC_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, env = "USC_NO_COLOR")]
    no_color: bool,

    /// Count lines: a line feed starts a new line at column 1
    #[arg(long)]
    line_column: bool,

    /// Token output format (default: from config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only print diagnostics
    #[arg(short, long)]
    quiet: bool,

    /// Number of files lexed in parallel (default: from config)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    jobs: Option<u32>,

    /// UniiScript source files
    #[arg(required = true, value_name = "FILE.us")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}

/// Initialize the logging system on stderr.
///
/// `RUST_LOG` is honoured unless `verbose` forces `debug`.
fn init_logging(verbose: bool, no_color: bool) -> usc_drv::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| DriverError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&Path>) -> usc_drv::Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Apply command-line overrides on top of the configuration.
fn resolve(cli: &Cli, config: &Config) -> (SessionOptions, OutputFormat) {
    let mut options = SessionOptions::from(config);
    if cli.line_column {
        options.position_mode = PositionMode::LineColumn;
    }
    if let Some(jobs) = cli.jobs {
        options.jobs = jobs as usize;
    }
    let format = cli.format.unwrap_or(config.output.format);
    (options, format)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_deref()).context("could not load configuration")?;
    let (options, format) = resolve(&cli, &config);
    debug!("options: {:?}, format: {:?}", options, format);

    let mut session = Session::new(options);
    session.load_files(&cli.files)?;

    let reports = session.lex()?;
    session.report(&reports);

    if !cli.quiet {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_tokens(&mut out, format, session.sources(), &reports)?;
        out.flush()?;
    }

    for diagnostic in session.render_diagnostics() {
        eprintln!("{}", diagnostic);
    }

    let errors = session.handler().error_count();
    if errors > 0 {
        eprintln!(
            "error: aborting due to {} previous error{}",
            errors,
            if errors == 1 { "" } else { "s" }
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
