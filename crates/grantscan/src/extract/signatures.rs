//! Digital signatures.
//!
//! Signing tools stamp a visible block into the page such as
//!
//! ```text
//! Digitally signed by Ada Lovelace
//! Date: 2021.03.04 10:22:11 -05'00'
//! ```
//!
//! which survives text extraction, and PDFs may additionally carry the
//! signature dictionaries themselves. Both are reported.

use super::*;
use crate::pdf::local_datetime;

/// Phrase that starts a visible signature stamp.
const SIGNED_BY: &str = "Digitally signed by";

lazy_static! {
  static ref STAMP_DATE: Regex = Regex::new(
    r"(\d{4})\.(\d{2})\.(\d{2})\s+(\d{2}):(\d{2}):(\d{2})(?:\s*([+-])(\d{2})['’]?(\d{2})['’]?)?"
  )
  .unwrap();
  static ref REASON: Regex = Regex::new(r"(?i)\breason:\s*(.+)$").unwrap();
  static ref DATE_LABEL: Regex = Regex::new(r"\bDate\b").unwrap();
}

/// Where a signature was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureOrigin {
  /// A "Digitally signed by" stamp in the page text.
  Text,
  /// A signature dictionary in the PDF structure.
  Embedded,
}

/// A signature found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
  /// Signer's name.
  pub signer:    Option<String>,
  /// Signing time, when given.
  pub signed_at: Option<DateTime<FixedOffset>>,
  /// Stated reason for signing.
  pub reason:    Option<String>,
  /// Stamp or dictionary.
  pub origin:    SignatureOrigin,
  /// Page of a text stamp. Embedded signatures have none.
  pub page:      Option<u32>,
}

/// Collects text stamps and embedded signature dictionaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureExtractor;

impl Extractor for SignatureExtractor {
  type Output = Vec<Signature>;

  fn extract(&self, document: &Document, config: &Config) -> Self::Output {
    let mut signatures: Vec<Signature> = Vec::new();
    let mut push = |signature: Signature| {
      let duplicate = signatures.iter().any(|s| {
        s.origin == signature.origin
          && s.signer == signature.signer
          && s.signed_at == signature.signed_at
      });
      if !duplicate {
        signatures.push(signature);
      }
    };

    for page in &document.pages {
      let lines = &page.lines;
      for (i, line) in lines.iter().enumerate() {
        let Some(range) = find_phrase(line, SIGNED_BY, false) else { continue };

        let end = (i + config.context.after.max(1)).min(lines.len());
        let stamp: Vec<&str> = std::iter::once(&line[range.end..])
          .chain(
            lines[i + 1..end]
              .iter()
              .map(String::as_str)
              .take_while(|next| find_phrase(next, SIGNED_BY, false).is_none()),
          )
          .collect();

        let signer = stamp_signer(&stamp);
        let signed_at = stamp.iter().find_map(|l| parse_stamp_date(l));
        let reason = stamp
          .iter()
          .find_map(|l| REASON.captures(l))
          .and_then(|caps| caps.get(1))
          .map(|m| m.as_str().trim().to_string());

        trace!("Signature stamp on page {}: {signer:?}", page.number);
        push(Signature {
          signer,
          signed_at,
          reason,
          origin: SignatureOrigin::Text,
          page: Some(page.number),
        });
      }
    }

    for embedded in &document.embedded_signatures {
      push(Signature {
        signer:    embedded.name.clone(),
        signed_at: embedded.signed_at,
        reason:    embedded.reason.clone(),
        origin:    SignatureOrigin::Embedded,
        page:      None,
      });
    }

    signatures
  }
}

/// The signer is whatever precedes the word `Date` on the stamp line, or the
/// next line when the stamp line ends at the phrase.
fn stamp_signer(stamp: &[&str]) -> Option<String> {
  stamp.iter().take(2).find_map(|&line| {
    let before_date = match DATE_LABEL.find(line) {
      Some(label) => &line[..label.start()],
      None => line,
    };
    let name = before_date.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '-'));
    (!name.is_empty()).then(|| name.to_string())
  })
}

/// Parses a stamp date such as `2021.03.04 10:22:11 -05'00'`.
///
/// Text extraction may turn the apostrophes into `’`, which is accepted too.
pub fn parse_stamp_date(text: &str) -> Option<DateTime<FixedOffset>> {
  let caps = STAMP_DATE.captures(text)?;
  let field = |i: usize| -> Option<u32> { caps.get(i)?.as_str().parse().ok() };

  let offset_seconds = match (caps.get(7), field(8), field(9)) {
    (Some(sign), Some(hours), Some(minutes)) => {
      let seconds = (hours * 3600 + minutes * 60) as i32;
      if sign.as_str() == "-" {
        -seconds
      } else {
        seconds
      }
    },
    _ => 0,
  };

  local_datetime(
    caps.get(1)?.as_str().parse().ok()?,
    [field(2)?, field(3)?, field(4)?, field(5)?, field(6)?],
    offset_seconds,
  )
}
