//! The page and line model shared by every extractor.
//!
//! Whatever the source format, a document is reduced to numbered pages of
//! trimmed, non-empty text lines. Slides keep their title separately since
//! the title placeholder isn't necessarily the first line.

use super::*;

/// Kind of document, decided by the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
  /// A `.pdf` file.
  Pdf,
  /// A `.pptx` deck.
  Presentation,
  /// A binary `.ppt` deck, which can be discovered but not read.
  LegacyPresentation,
}

impl DocumentKind {
  /// Determines the kind from a path's extension.
  pub fn from_path(path: &Path) -> Result<Self> {
    let extension =
      path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase).unwrap_or_default();
    extension.parse()
  }
}

impl FromStr for DocumentKind {
  type Err = GrantscanError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim_start_matches('.').to_lowercase().as_str() {
      "pdf" => Ok(Self::Pdf),
      "pptx" => Ok(Self::Presentation),
      "ppt" => Ok(Self::LegacyPresentation),
      other => Err(GrantscanError::UnsupportedFormat(format!("extension \"{other}\""))),
    }
  }
}

impl Display for DocumentKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Pdf => write!(f, "pdf"),
      Self::Presentation => write!(f, "pptx"),
      Self::LegacyPresentation => write!(f, "ppt"),
    }
  }
}

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
  /// Text embedded in the file.
  Native,
  /// Text recognized from rendered page images.
  Ocr,
  /// No text could be obtained.
  #[default]
  None,
}

impl Display for TextSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Native => write!(f, "native"),
      Self::Ocr => write!(f, "ocr"),
      Self::None => write!(f, "none"),
    }
  }
}

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
  /// Document title.
  pub title:    Option<String>,
  /// Document author.
  pub author:   Option<String>,
  /// Document subject.
  pub subject:  Option<String>,
  /// Document keywords.
  pub keywords: Option<String>,
}

/// A signature dictionary embedded in a PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedSignature {
  /// The `/Name` entry, usually the signer's common name.
  pub name:      Option<String>,
  /// The `/Reason` entry.
  pub reason:    Option<String>,
  /// The `/M` signing time.
  pub signed_at: Option<DateTime<FixedOffset>>,
}

/// One page of a PDF or one slide of a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
  /// 1-based page or slide number.
  pub number: u32,
  /// Explicit title, when the format has one.
  pub title:  Option<String>,
  /// Trimmed, non-empty lines in reading order.
  pub lines:  Vec<String>,
}

impl Page {
  /// Builds a page from raw text, trimming lines and dropping empty ones.
  pub fn from_text(number: u32, text: &str) -> Self {
    Self { number, title: None, lines: split_lines(text) }
  }

  /// The explicit title if there is one, else the first line.
  pub fn title(&self) -> Option<&str> {
    self.title.as_deref().or_else(|| self.lines.first().map(String::as_str))
  }

  /// Whether the page has no text at all.
  pub fn is_empty(&self) -> bool { self.lines.is_empty() && self.title.is_none() }
}

/// Splits text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
  text.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect()
}

/// A loaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  /// Where the document was read from.
  pub path:                PathBuf,
  /// Format of the source file.
  pub kind:                DocumentKind,
  /// Pages or slides in order.
  pub pages:               Vec<Page>,
  /// Information dictionary (PDF only).
  pub metadata:            Metadata,
  /// Signature dictionaries (PDF only).
  pub embedded_signatures: Vec<EmbeddedSignature>,
  /// How the text was obtained.
  pub text_source:         TextSource,
}

impl Document {
  /// Creates a document with the given pages and no metadata.
  pub fn new(path: impl Into<PathBuf>, kind: DocumentKind, pages: Vec<Page>) -> Self {
    let text_source =
      if pages.iter().all(Page::is_empty) { TextSource::None } else { TextSource::Native };
    Self {
      path: path.into(),
      kind,
      pages,
      metadata: Metadata::default(),
      embedded_signatures: Vec::new(),
      text_source,
    }
  }

  /// Whether any page carries text.
  pub fn has_text(&self) -> bool { !self.pages.iter().all(Page::is_empty) }

  /// All lines with their page number, in reading order.
  pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> {
    self.pages.iter().flat_map(|page| page.lines.iter().map(move |line| (page.number, line.as_str())))
  }

  /// Titles of all pages that have one.
  pub fn titles(&self) -> impl Iterator<Item = (u32, &str)> {
    self.pages.iter().filter_map(|page| page.title().map(|title| (page.number, title)))
  }

  /// The full text with pages separated by blank lines.
  pub fn text(&self) -> String {
    self.pages.iter().map(|page| page.lines.join("\n")).collect::<Vec<_>>().join("\n\n")
  }
}
