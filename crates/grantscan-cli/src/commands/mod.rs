use super::*;

pub mod init;
pub mod scan;
pub mod text;
pub mod titles;

pub use init::init;
pub use scan::{scan, ScanArgs};
pub use text::{text, TextArgs};
pub use titles::{titles, TitlesArgs};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Scan proposal documents and write a CSV or JSON report
  Scan(ScanArgs),

  /// Print the title of every page or slide
  Titles(TitlesArgs),

  /// Write the extracted text of each document to a file
  Text(TextArgs),

  /// Write the default configuration file
  Init,
}

/// Which documents to work on. Shared by every command that reads documents.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
  /// A document to read (repeatable)
  #[arg(
    short = 'f',
    long = "file",
    value_name = "FILE",
    required_unless_present = "directories"
  )]
  pub files: Vec<PathBuf>,

  /// A directory to search recursively for documents (repeatable)
  #[arg(short = 'd', long = "directory", value_name = "DIR")]
  pub directories: Vec<PathBuf>,

  /// Only take directory files whose name contains this keyword (repeatable,
  /// case-insensitive; all keywords must match)
  #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
  pub keywords: Vec<String>,

  /// Recognize text in PDFs that have none, using pdftoppm and tesseract
  #[arg(
    long,
    value_name = "BOOL",
    action = ArgAction::Set,
    num_args = 0..=1,
    default_value = "false",
    default_missing_value = "true",
    value_parser = parse_flag
  )]
  pub ocr: bool,
}

impl InputArgs {
  /// Resolves the files and directories to the documents to read.
  pub fn discover<I: UserInteraction>(
    &self,
    interaction: &I,
    config: &Config,
  ) -> Result<DiscoveredFiles> {
    let files = Discovery::new()
      .with_files(self.files.iter().cloned())
      .with_directories(self.directories.iter().cloned())
      .with_keywords(&self.keywords)
      .run(&config.files)?;

    for skipped in files.skipped() {
      interaction.reply(ResponseContent::Info(&format!(
        "Skipping {} (unsupported extension)",
        skipped.display()
      )))?;
    }
    if files.is_empty() {
      interaction.reply(ResponseContent::Warning("No matching documents found"))?;
    }
    debug!("{} documents to read", files.len());
    Ok(files)
  }

  /// A scanner for these inputs.
  pub fn scanner(&self, config: Config) -> Scanner {
    Scanner::builder().with_config(config).with_ocr(self.ocr).build()
  }
}

/// Parses `yes`/`no`-style flag values.
fn parse_flag(value: &str) -> core::result::Result<bool, String> {
  grantscan::boolean::parse_bool(value).map_err(|e| e.to_string())
}
