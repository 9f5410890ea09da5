//! Error types for the grantscan library.
//!
//! A single error enum covers every failure mode of loading and scanning a
//! proposal document:
//! - File system access and path validation
//! - PDF, PPTX (zip + XML) parsing
//! - External OCR tools
//! - Configuration and report serialization
//!
//! # Examples
//!
//! ```
//! use grantscan::{boolean::parse_bool, error::GrantscanError};
//!
//! match parse_bool("maybe") {
//!   Err(GrantscanError::InvalidBoolean(value)) => println!("not a boolean: {value}"),
//!   Err(e) => println!("other error: {e}"),
//!   Ok(value) => println!("parsed {value}"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`grantscan`](crate) crate.
pub type Result<T> = core::result::Result<T, GrantscanError>;

/// Errors that can occur while discovering, loading or scanning documents.
#[derive(Error, Debug)]
pub enum GrantscanError {
  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// PDF parsing and processing errors from the lopdf library.
  ///
  /// Common cases are malformed or truncated files, missing page objects and
  /// encrypted documents.
  #[error(transparent)]
  Lopdf(#[from] lopdf::Error),

  /// The PPTX container could not be read as a zip archive.
  #[error(transparent)]
  Zip(#[from] zip::result::ZipError),

  /// A slide part was not well-formed XML.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be written as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// Writing a CSV report failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// Writing a JSON report failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A pattern used to walk a directory was invalid.
  #[error(transparent)]
  Pattern(#[from] glob::PatternError),

  /// An external OCR tool (`pdftoppm` or `tesseract`) failed or is missing.
  ///
  /// The string carries the tool name and its stderr output.
  #[error("OCR failed: {0}")]
  Ocr(String),

  /// The file type can't be scanned, e.g. a legacy binary `.ppt` deck.
  #[error("Unsupported document format: {0}")]
  UnsupportedFormat(String),

  /// A string couldn't be coerced to a boolean.
  ///
  /// Accepted values are `yes`, `true`, `t`, `y`, `1` and `no`, `false`,
  /// `f`, `n`, `0`, in any case.
  #[error("Boolean value expected, got \"{0}\"")]
  InvalidBoolean(String),

  /// A path given on input does not exist or has the wrong type.
  #[error("Invalid path: {0}")]
  InvalidPath(String),

  /// A configuration value is unusable.
  #[error("{0}")]
  Config(String),

  /// Scanning was interrupted before all documents were processed.
  #[error("Scan interrupted")]
  Interrupted,
}
