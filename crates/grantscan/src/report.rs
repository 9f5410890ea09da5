//! Per-document scan results.

use super::*;
use crate::extract::{
  Budget, BudgetExtractor, CertificationAnswer, CertificationExtractor, Contact, ContactExtractor,
  ContextExtractor, Extractor, KeyPhraseHit, SectionExtractor, SectionReport, Signature,
  SignatureExtractor,
};

/// Everything extracted from one document.
///
/// A document that couldn't be loaded still gets a report, with `error` set
/// and everything else empty, so a batch scan yields one row per file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalReport {
  /// Path of the scanned file.
  pub file:           PathBuf,
  /// Detected format, if the extension was recognized.
  pub kind:           Option<DocumentKind>,
  /// Number of pages or slides.
  pub pages:          usize,
  /// How the text was obtained.
  pub text_source:    TextSource,
  /// Title from the document information dictionary.
  pub title:          Option<String>,
  /// Total budget.
  pub budget:         Option<Budget>,
  /// Points of contact.
  pub contacts:       Vec<Contact>,
  /// Signature stamps and dictionaries.
  pub signatures:     Vec<Signature>,
  /// Certification answers in configuration order.
  pub certifications: Vec<CertificationAnswer>,
  /// Required section check.
  pub sections:       SectionReport,
  /// Context captured around key phrases.
  pub key_phrases:    Vec<KeyPhraseHit>,
  /// Why the document couldn't be scanned.
  pub error:          Option<String>,
}

impl ProposalReport {
  /// Runs every extractor over `document`.
  pub fn from_document(document: &Document, config: &Config) -> Self {
    Self {
      file:           document.path.clone(),
      kind:           Some(document.kind),
      pages:          document.pages.len(),
      text_source:    document.text_source,
      title:          document.metadata.title.clone(),
      budget:         BudgetExtractor.extract(document, config),
      contacts:       ContactExtractor.extract(document, config),
      signatures:     SignatureExtractor.extract(document, config),
      certifications: CertificationExtractor.extract(document, config),
      sections:       SectionExtractor.extract(document, config),
      key_phrases:    ContextExtractor.extract(document, config),
      error:          None,
    }
  }

  /// A report for a document that failed to load.
  pub fn failed(path: &Path, error: &GrantscanError) -> Self {
    Self {
      file:           path.to_path_buf(),
      kind:           DocumentKind::from_path(path).ok(),
      pages:          0,
      text_source:    TextSource::None,
      title:          None,
      budget:         None,
      contacts:       Vec::new(),
      signatures:     Vec::new(),
      certifications: Vec::new(),
      sections:       SectionReport::default(),
      key_phrases:    Vec::new(),
      error:          Some(error.to_string()),
    }
  }

  /// Whether the document was scanned.
  pub fn is_ok(&self) -> bool { self.error.is_none() }

  /// Whether the document was skipped because the scan was interrupted.
  pub fn was_interrupted(&self) -> bool {
    self.error.as_deref() == Some(GrantscanError::Interrupted.to_string().as_str())
  }

  /// Problems a reviewer should look at, in a fixed order.
  pub fn issues(&self) -> Vec<String> {
    if let Some(error) = &self.error {
      return vec![error.clone()];
    }
    if self.text_source == TextSource::None {
      return vec!["no text could be extracted".to_string()];
    }

    let mut issues = Vec::new();
    match &self.budget {
      None => issues.push("budget not found".to_string()),
      Some(budget) if budget.amount.is_none() => {
        issues.push(format!("budget \"{}\" is not a number", budget.raw))
      },
      Some(budget) if budget.exceeds_limit => {
        issues.push(format!("budget {} exceeds the limit", budget.raw))
      },
      Some(_) => {},
    }
    if !self.sections.missing.is_empty() {
      issues.push(format!("missing sections: {}", self.sections.missing.join(", ")));
    }
    let unanswered: Vec<&str> = self
      .certifications
      .iter()
      .filter(|cert| cert.answer.as_bool().is_none())
      .map(|cert| cert.id.as_str())
      .collect();
    if !unanswered.is_empty() {
      issues.push(format!("unanswered certifications: {}", unanswered.join(", ")));
    }
    if self.signatures.is_empty() {
      issues.push("not signed".to_string());
    }
    issues
  }
}
