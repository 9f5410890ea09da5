//! Proposal document scanning library.
//!
//! `grantscan` pulls the handful of facts reviewers check first out of grant
//! proposal documents:
//!
//! - The total proposed budget, and whether it exceeds the solicitation limit
//! - Points of contact (technical and customer-side)
//! - Digital signatures, both embedded signature dictionaries and the
//!   "Digitally signed by" stamps rendered into the page text
//! - Yes/no certification answers
//! - Whether the required sections (slide or page titles) are present
//!
//! Documents are reduced to pages of trimmed text lines and every extractor
//! works on those lines by proximity to a configured phrase. The phrases and
//! offsets are data in [`Config`], not code.
//!
//! # Getting Started
//!
//! ```no_run
//! use std::sync::atomic::AtomicBool;
//!
//! use grantscan::{export::ReportFormat, prelude::*, Config, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let scanner = Scanner::builder().with_config(Config::default()).with_ocr(false).build();
//!
//!   let files = grantscan::discover::Discovery::new()
//!     .with_directory("proposals")
//!     .run(&scanner.config().files)?;
//!
//!   let cancel = AtomicBool::new(false);
//!   let reports = scanner.scan_all(files.accepted(), &cancel).await;
//!   ReportFormat::Csv.write_path(&reports, "report.csv")?;
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`discover`]: Selecting the files to scan
//! - [`document`]: The page/line model every extractor reads
//! - [`pdf`], [`pptx`], [`ocr`]: Turning files into documents
//! - [`extract`]: The line-proximity extractors
//! - [`report`], [`export`]: Per-document results and CSV/JSON output
//! - [`scanner`]: Ties loading and extraction together

#![warn(missing_docs)]

use std::{
  collections::{BTreeMap, BTreeSet},
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod boolean;
pub mod config;
pub mod discover;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
#[cfg(test)] mod fixtures;
pub mod ocr;
pub mod pdf;
pub mod pptx;
pub mod report;
pub mod scanner;
pub mod text;

pub use config::Config;
pub use scanner::Scanner;

use crate::{boolean::*, document::*, error::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use grantscan::{prelude::*, Scanner};
///
/// async fn example() -> Result<(), GrantscanError> {
///   let document = Scanner::default().load("proposal.pdf").await?;
///   let budget = BudgetExtractor.extract(&document, &Default::default());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    error::GrantscanError,
    extract::{
      BudgetExtractor, CertificationExtractor, ContactExtractor, ContextExtractor, Extractor,
      SectionExtractor, SignatureExtractor,
    },
  };
}
