//! Error types for the grantscan command line.

use thiserror::Error;

use super::*;

/// Error type alias used by the CLI.
pub type Result<T> = core::result::Result<T, GrantscanCliError>;

/// Errors that can end a CLI invocation.
#[derive(Error, Debug)]
pub enum GrantscanCliError {
  /// Errors from the scanning library.
  #[error(transparent)]
  Grantscan(#[from] GrantscanError),

  /// Writing output files failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt failed, e.g. because stdin is not a terminal.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),
}
