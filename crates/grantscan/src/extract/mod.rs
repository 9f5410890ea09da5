//! Line-proximity extractors.
//!
//! Each extractor looks for a configured phrase in a document's lines and
//! reads its answer from a fixed position relative to the match: the rest of
//! the same line, the next line, or a small window of lines around it.
//!
//! Extractors never fail. A phrase that isn't found simply yields an empty
//! (or `Missing`) result, since a scan over hundreds of proposals should
//! report gaps rather than stop on them.
//!
//! # Examples
//!
//! ```
//! use grantscan::{
//!   document::{Document, DocumentKind, Page},
//!   extract::{BudgetExtractor, Extractor},
//!   Config,
//! };
//!
//! let page = Page::from_text(1, "Total Dollar Amount for this Proposal\n$1,100,000.00");
//! let document = Document::new("cover.pdf", DocumentKind::Pdf, vec![page]);
//!
//! let budget = BudgetExtractor.extract(&document, &Config::default()).unwrap();
//! assert_eq!(budget.amount, Some(1_100_000.0));
//! assert!(!budget.exceeds_limit);
//! ```

use std::ops::Range;

use super::*;

pub mod budget;
pub mod certification;
pub mod contacts;
pub mod context;
pub mod sections;
pub mod signatures;

pub use budget::{Budget, BudgetExtractor};
pub use certification::{CertificationAnswer, CertificationExtractor};
pub use contacts::{Contact, ContactExtractor};
pub use context::{ContextExtractor, KeyPhraseHit};
pub use sections::{SectionExtractor, SectionReport};
pub use signatures::{Signature, SignatureExtractor, SignatureOrigin};

/// A single piece of information pulled out of a [`Document`].
pub trait Extractor {
  /// What the extractor produces for one document.
  type Output;

  /// Runs the extractor over `document` using the phrases in `config`.
  fn extract(&self, document: &Document, config: &Config) -> Self::Output;
}

/// Finds `phrase` in `line`, returning its byte range.
///
/// Case-insensitive matching folds ASCII only, so the returned range is
/// valid for `line` itself.
pub(crate) fn find_phrase(line: &str, phrase: &str, case_sensitive: bool) -> Option<Range<usize>> {
  if phrase.is_empty() {
    return None;
  }
  let start = if case_sensitive {
    line.find(phrase)?
  } else {
    line.to_ascii_lowercase().find(&phrase.to_ascii_lowercase())?
  };
  Some(start..start + phrase.len())
}

/// The text following a phrase match, with separators trimmed.
pub(crate) fn tail_after<'a>(line: &'a str, range: &Range<usize>) -> &'a str {
  line[range.end..].trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '–' | '?'))
}

/// All lines of the document with their page numbers, as one flat list.
pub(crate) fn flat_lines(document: &Document) -> Vec<(u32, &str)> { document.lines().collect() }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_find_phrase() {
    assert_eq!(find_phrase("DAF CUSTOMER: Col. Smith", "DAF CUSTOMER", true), Some(0..12));
    assert_eq!(find_phrase("daf customer", "DAF CUSTOMER", true), None);
    assert_eq!(find_phrase("The daf customer is", "DAF CUSTOMER", false), Some(4..16));
    assert_eq!(find_phrase("anything", "", false), None);
  }

  #[test]
  fn test_tail_after() {
    let line = "TPOC: Dr. Ada Lovelace";
    let range = find_phrase(line, "TPOC", true).unwrap();
    assert_eq!(tail_after(line, &range), "Dr. Ada Lovelace");

    let line = "Will foreign nationals be involved? Yes";
    let range = find_phrase(line, "be involved", false).unwrap();
    assert_eq!(tail_after(line, &range), "Yes");
  }
}
