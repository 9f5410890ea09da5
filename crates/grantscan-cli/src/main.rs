//! Command line interface for the grantscan proposal scanner.
//!
//! This crate provides the `grantscan` binary on top of the `grantscan`
//! library. It supports:
//! - Scanning proposal files and directories into a CSV or JSON report
//! - Listing page and slide titles
//! - Dumping extracted (optionally condensed) text
//! - Writing a default configuration file to edit
//!
//! # Usage
//!
//! ```bash
//! # Write the default configuration to ~/.config/grantscan/config.toml
//! grantscan init
//!
//! # Scan every proposal under a directory whose name contains "phase1"
//! grantscan scan -d proposals/ -k phase1 -o report.csv
//!
//! # Scan two files, OCR'ing scanned PDFs, into JSON
//! grantscan scan -f a.pdf -f b.pptx --ocr -o report.json
//!
//! # Show slide titles
//! grantscan titles -f deck.pptx
//! ```
//!
//! Pressing Ctrl-C during a scan stops after the current document and still
//! writes the report for everything scanned so far.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  time::Instant,
};

use clap::{builder::ArgAction, Args, Parser, Subcommand, ValueEnum};
use console::style;
use grantscan::{
  discover::{DiscoveredFiles, Discovery},
  error::GrantscanError,
  export::ReportFormat,
  report::ProposalReport,
  Config, Scanner,
};
use tracing::{debug, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Pull budgets, contacts and signatures out of proposal documents")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default
  /// platform-specific config directory, falling back to built-in defaults.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Also write logs to this file
  #[arg(long, global = true, value_name = "PATH")]
  log_file: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// Logs go to stderr so they never mix with report output. With a log file
/// they go there instead, without colors; the returned guard flushes it.
fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true);

  match log_file {
    Some(path) => {
      let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
      let file_name = path
        .file_name()
        .ok_or_else(|| GrantscanError::InvalidPath(format!("'{}' is not a file", path.display())))?;
      std::fs::create_dir_all(directory)?;
      let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
      builder.with_writer(writer).with_ansi(false).init();
      Ok(Some(guard))
    },
    None => {
      builder.with_writer(std::io::stderr).init();
      Ok(None)
    },
  }
}

/// Sets a flag on the first Ctrl-C so a running scan can stop between
/// documents.
fn install_interrupt_handler() -> Arc<AtomicBool> {
  let cancel = Arc::new(AtomicBool::new(false));
  let flag = Arc::clone(&cancel);
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      eprintln!(
        "{} Interrupted, finishing the current document...",
        style(WARNING_PREFIX).yellow()
      );
      flag.store(true, Ordering::SeqCst);
    }
  });
  cancel
}

/// Entry point for the grantscan CLI application
///
/// Parses arguments, sets up logging, loads the configuration and runs the
/// requested command. Errors are printed with the error prefix and exit with
/// status 1.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();

  if let Err(e) = run(cli).await {
    eprintln!("{} {}", style(ERROR_PREFIX).red(), style(&e).red());
    std::process::exit(1);
  }
}

/// Runs the parsed command line.
async fn run(cli: Cli) -> Result<()> {
  let _guard = setup_logging(cli.verbose, cli.log_file.as_deref())?;
  let interaction = Terminal::new(cli.accept_defaults);

  match cli.command {
    Commands::Init => init(&interaction, cli.config.unwrap_or_else(Config::default_path)),
    Commands::Scan(args) => {
      let config = load_config(cli.config.as_deref())?;
      scan(&interaction, config, args, install_interrupt_handler()).await
    },
    Commands::Titles(args) => titles(&interaction, load_config(cli.config.as_deref())?, args).await,
    Commands::Text(args) => text(&interaction, load_config(cli.config.as_deref())?, args).await,
  }
}

/// Loads the configuration named on the command line, or the default one.
fn load_config(path: Option<&Path>) -> Result<Config> {
  let config = Config::load_or_default(path)?;
  trace!("Using configuration: {config:?}");
  Ok(config)
}
