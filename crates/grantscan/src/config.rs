//! Scanner configuration.
//!
//! Every phrase, offset and threshold the extractors rely on lives here so
//! that a new solicitation's wording can be handled by editing a TOML file.
//! All sections are optional; anything left out keeps its default.
//!
//! ```toml
//! key_phrases = ["DAF CUSTOMER", "TPOC"]
//!
//! [budget]
//! keyphrase = "Total Dollar Amount for this Proposal"
//! max_value = 1250000.0
//!
//! [[certifications]]
//! id = "human_subjects"
//! phrase = "human subjects"
//! offset = 1
//! ```

use super::*;

/// Name of the configuration directory under the platform config dir.
const CONFIG_DIR: &str = "grantscan";
/// Name of the configuration file.
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration for a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Phrases whose surrounding lines are captured verbatim. Matched
  /// case-sensitively.
  pub key_phrases:    Vec<String>,
  /// How many lines around a key phrase are captured.
  pub context:        ContextWindow,
  /// Where to find the total budget and the limit it is checked against.
  pub budget:         BudgetConfig,
  /// Roles whose point of contact is extracted.
  pub contacts:       Vec<ContactRole>,
  /// Yes/no questions answered a fixed number of lines after their phrase.
  pub certifications: Vec<CertificationQuestion>,
  /// Titles that must appear somewhere in the document.
  pub sections:       SectionConfig,
  /// External OCR tools and their settings.
  pub ocr:            OcrConfig,
  /// Thresholds for condensing extracted text.
  pub text:           TextThresholds,
  /// Which files are picked up when walking directories.
  pub files:          FileFilter,
}

/// Number of lines captured around a matching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextWindow {
  /// Lines kept before the matching line.
  pub before: usize,
  /// Lines kept from the matching line onwards (the match included).
  pub after:  usize,
}

/// Budget lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
  /// Label preceding the total amount. Matched case-insensitively.
  pub keyphrase: String,
  /// Largest allowed total in dollars.
  pub max_value: f64,
}

/// A point-of-contact role and the phrase that introduces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRole {
  /// Name used in reports, e.g. `TPOC`.
  pub role:   String,
  /// Phrase searched for in the text, e.g. `DAF CUSTOMER`.
  pub phrase: String,
}

/// A yes/no certification question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationQuestion {
  /// Short identifier, used as the report column suffix.
  pub id:     String,
  /// Phrase identifying the question line. Matched case-insensitively.
  pub phrase: String,
  /// How many lines below the question the answer sits. `0` reads the rest
  /// of the question line.
  #[serde(default = "default_offset")]
  pub offset: usize,
}

fn default_offset() -> usize { 1 }

/// Required section titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
  /// Titles that must appear (case-insensitively) in some page or slide title.
  pub required: Vec<String>,
}

/// OCR tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
  /// Rasterization resolution.
  pub dpi:       u32,
  /// Tesseract language code.
  pub language:  String,
  /// Path or name of the `pdftoppm` executable.
  pub pdftoppm:  PathBuf,
  /// Path or name of the `tesseract` executable.
  pub tesseract: PathBuf,
}

/// Whitespace ratios used to decide whether extracted text is usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextThresholds {
  /// Above this newline ratio the text is discarded outright.
  pub max_newline_ratio:   f64,
  /// Below this space ratio the text is discarded outright.
  pub min_space_ratio:     f64,
  /// Above this newline ratio paragraph breaks are collapsed first.
  pub dense_newline_ratio: f64,
  /// Space ratios outside `[sparse_space_ratio, wide_space_ratio]` also
  /// trigger collapsing.
  pub sparse_space_ratio:  f64,
  /// See `sparse_space_ratio`.
  pub wide_space_ratio:    f64,
  /// After collapsing, a space ratio above this discards the text.
  pub max_space_ratio:     f64,
  /// Condensed text shorter than this is discarded.
  pub min_length:          usize,
}

/// File selection rules for directory walks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFilter {
  /// Accepted extensions, without the dot. Compared case-insensitively.
  pub extensions:    Vec<String>,
  /// File names starting with one of these are ignored.
  pub skip_prefixes: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      key_phrases:    ["DAF CUSTOMER", "DAF End-User", "Digitally signed by", "TPOC"]
        .map(String::from)
        .to_vec(),
      context:        ContextWindow::default(),
      budget:         BudgetConfig::default(),
      contacts:       vec![
        ContactRole { role: "TPOC".into(), phrase: "TPOC".into() },
        ContactRole { role: "DAF Customer".into(), phrase: "DAF CUSTOMER".into() },
        ContactRole { role: "DAF End-User".into(), phrase: "DAF End-User".into() },
      ],
      certifications: vec![
        CertificationQuestion {
          id:     "small_business".into(),
          phrase: "qualify as a small business".into(),
          offset: 1,
        },
        CertificationQuestion {
          id:     "foreign_nationals".into(),
          phrase: "foreign nationals".into(),
          offset: 1,
        },
        CertificationQuestion {
          id:     "human_subjects".into(),
          phrase: "human subjects".into(),
          offset: 1,
        },
        CertificationQuestion {
          id:     "animal_subjects".into(),
          phrase: "vertebrate animals".into(),
          offset: 1,
        },
      ],
      sections:       SectionConfig::default(),
      ocr:            OcrConfig::default(),
      text:           TextThresholds::default(),
      files:          FileFilter::default(),
    }
  }
}

impl Default for ContextWindow {
  fn default() -> Self { Self { before: 2, after: 5 } }
}

impl Default for BudgetConfig {
  fn default() -> Self {
    Self { keyphrase: "Total Dollar Amount for this Proposal".into(), max_value: 1_250_000.0 }
  }
}

impl Default for SectionConfig {
  fn default() -> Self { Self { required: vec!["Method".into(), "Approach".into()] } }
}

impl Default for OcrConfig {
  fn default() -> Self {
    Self {
      dpi:       500,
      language:  "eng".into(),
      pdftoppm:  PathBuf::from("pdftoppm"),
      tesseract: PathBuf::from("tesseract"),
    }
  }
}

impl Default for TextThresholds {
  fn default() -> Self {
    Self {
      max_newline_ratio:   0.3,
      min_space_ratio:     0.005,
      dense_newline_ratio: 0.2,
      sparse_space_ratio:  0.05,
      wide_space_ratio:    0.23,
      max_space_ratio:     0.25,
      min_length:          5000,
    }
  }
}

impl Default for FileFilter {
  fn default() -> Self {
    Self {
      extensions:    vec!["pdf".into(), "ppt".into(), "pptx".into()],
      skip_prefixes: vec!["highlight".into()],
    }
  }
}

impl FileFilter {
  /// Whether a path has one of the accepted extensions.
  pub fn accepts_extension(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(|ext| self.extensions.iter().any(|accepted| accepted.eq_ignore_ascii_case(ext)))
      .unwrap_or(false)
  }

  /// Whether a file name starts with one of the skipped prefixes.
  pub fn is_skipped_name(&self, path: &Path) -> bool {
    let name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    self.skip_prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
  }
}

impl Config {
  /// Returns the default location of the configuration file.
  ///
  /// - On Unix: `~/.config/grantscan/config.toml`
  /// - On macOS: `~/Library/Application Support/grantscan/config.toml`
  /// - On Windows: `%APPDATA%\grantscan\config.toml`
  /// - Fallback: `./grantscan/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(CONFIG_DIR).join(CONFIG_FILE)
  }

  /// Reads and validates a configuration file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads `path` if given, else the file at [`Config::default_path`] if it
  /// exists, else the built-in defaults.
  pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::load(path),
      None => {
        let default_path = Self::default_path();
        if default_path.exists() {
          Self::load(default_path)
        } else {
          trace!("No configuration file found, using defaults");
          Ok(Self::default())
        }
      },
    }
  }

  /// Writes the configuration as TOML, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Checks values that would make extraction meaningless.
  pub fn validate(&self) -> Result<()> {
    if self.context.after == 0 {
      return Err(GrantscanError::Config("context.after must be at least 1".into()));
    }
    if self.budget.keyphrase.trim().is_empty() {
      return Err(GrantscanError::Config("budget.keyphrase must not be empty".into()));
    }
    if !(self.budget.max_value > 0.0) {
      return Err(GrantscanError::Config("budget.max_value must be positive".into()));
    }
    let mut ids = BTreeSet::new();
    for question in &self.certifications {
      if question.phrase.trim().is_empty() {
        return Err(GrantscanError::Config(format!(
          "certification \"{}\" has an empty phrase",
          question.id
        )));
      }
      if !ids.insert(question.id.as_str()) {
        return Err(GrantscanError::Config(format!(
          "certification id \"{}\" is used more than once",
          question.id
        )));
      }
    }
    Ok(())
  }

  /// Replaces the key phrases.
  pub fn with_key_phrases<S: Into<String>>(mut self, phrases: impl IntoIterator<Item = S>) -> Self {
    self.key_phrases = phrases.into_iter().map(Into::into).collect();
    self
  }

  /// Replaces the budget settings.
  pub fn with_budget(mut self, keyphrase: &str, max_value: f64) -> Self {
    self.budget = BudgetConfig { keyphrase: keyphrase.to_string(), max_value };
    self
  }

  /// Replaces the certification questions.
  pub fn with_certifications(mut self, questions: Vec<CertificationQuestion>) -> Self {
    self.certifications = questions;
    self
  }

  /// Replaces the required section titles.
  pub fn with_required_sections<S: Into<String>>(
    mut self,
    sections: impl IntoIterator<Item = S>,
  ) -> Self {
    self.sections.required = sections.into_iter().map(Into::into).collect();
    self
  }

  /// Replaces the OCR settings.
  pub fn with_ocr(mut self, ocr: OcrConfig) -> Self {
    self.ocr = ocr;
    self
  }
}
