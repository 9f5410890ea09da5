//! PDF loading: per-page text lines, the information dictionary and any
//! embedded signature dictionaries.

use lopdf::{Dictionary, Object};

use super::*;

lazy_static! {
  /// `D:YYYYMMDDHHmmSSOHH'mm'` with everything after the year optional.
  static ref PDF_DATE: Regex = Regex::new(
    r"^(?:D:)?(\d{4})(\d{2})?(\d{2})?(\d{2})?(\d{2})?(\d{2})?(?:(Z)|([+-])(\d{2})'?(\d{2})?'?)?"
  )
  .unwrap();
}

/// Reads PDFs into [`Document`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfAnalyzer;

impl PdfAnalyzer {
  /// Creates an analyzer.
  pub fn new() -> Self { Self }

  /// Loads and analyzes the PDF at `path`.
  pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
    let path = path.as_ref();
    let doc = lopdf::Document::load(path)?;
    Ok(self.analyze_document(path, &doc))
  }

  /// Analyzes PDF bytes that were already read from `path`.
  pub fn analyze_bytes(&self, path: &Path, bytes: &[u8]) -> Result<Document> {
    let doc = lopdf::Document::load_mem(bytes)?;
    Ok(self.analyze_document(path, &doc))
  }

  fn analyze_document(&self, path: &Path, doc: &lopdf::Document) -> Document {
    let pages = self.extract_pages(doc);
    let mut document = Document::new(path, DocumentKind::Pdf, pages);
    document.metadata = self.extract_metadata(doc);
    document.embedded_signatures = self.extract_signatures(doc);
    debug!(
      "Read {} pages and {} embedded signatures from {}",
      document.pages.len(),
      document.embedded_signatures.len(),
      path.display()
    );
    document
  }

  fn extract_pages(&self, doc: &lopdf::Document) -> Vec<Page> {
    doc
      .get_pages()
      .into_keys()
      .map(|number| match doc.extract_text(&[number]) {
        Ok(text) => Page::from_text(number, &text),
        Err(e) => {
          warn!("Could not extract text from page {number}: {e}");
          Page { number, ..Page::default() }
        },
      })
      .collect()
  }

  fn extract_metadata(&self, doc: &lopdf::Document) -> Metadata {
    let info = doc
      .trailer
      .get(b"Info")
      .ok()
      .and_then(|o| o.as_reference().ok())
      .and_then(|reference| doc.get_object(reference).and_then(Object::as_dict).ok())
      .or_else(|| doc.trailer.get(b"Info").and_then(Object::as_dict).ok());

    let Some(info) = info else {
      trace!("No information dictionary");
      return Metadata::default();
    };

    Metadata {
      title:    get_text_from_dict(info, "Title"),
      author:   get_text_from_dict(info, "Author"),
      subject:  get_text_from_dict(info, "Subject"),
      keywords: get_text_from_dict(info, "Keywords"),
    }
  }

  fn extract_signatures(&self, doc: &lopdf::Document) -> Vec<EmbeddedSignature> {
    doc
      .objects
      .values()
      .filter_map(|object| object.as_dict().ok())
      .filter(|dict| is_signature_dict(dict))
      .map(|dict| EmbeddedSignature {
        name:      get_text_from_dict(dict, "Name"),
        reason:    get_text_from_dict(dict, "Reason"),
        signed_at: get_text_from_dict(dict, "M").as_deref().and_then(parse_pdf_date),
      })
      .collect()
  }
}

fn is_signature_dict(dict: &Dictionary) -> bool {
  let typed = dict.get(b"Type").and_then(Object::as_name).map(|name| name == b"Sig").unwrap_or(false);
  typed || (dict.has(b"ByteRange") && dict.has(b"Contents") && dict.has(b"Filter"))
}

/// Reads a text string entry, decoding UTF-16BE when it carries a BOM.
fn get_text_from_dict(dict: &Dictionary, key: &str) -> Option<String> {
  dict
    .get(key.as_bytes())
    .ok()
    .and_then(|obj| obj.as_str().ok())
    .map(|bytes| {
      if bytes.starts_with(&[0xFE, 0xFF]) {
        let (cow, ..) = encoding_rs::UTF_16BE.decode(&bytes[2..]);
        cow.into_owned()
      } else {
        String::from_utf8_lossy(bytes).into_owned()
      }
    })
    .map(|text| text.trim().to_string())
    .filter(|text| !text.is_empty())
}

/// Parses a PDF date string such as `D:20210304102211-05'00'`.
pub fn parse_pdf_date(raw: &str) -> Option<DateTime<FixedOffset>> {
  let caps = PDF_DATE.captures(raw.trim())?;
  let number = |i: usize, default: u32| -> Option<u32> {
    caps.get(i).map_or(Some(default), |m| m.as_str().parse().ok())
  };

  let year = caps.get(1)?.as_str().parse().ok()?;
  let offset_seconds = match (caps.get(8), caps.get(9)) {
    (Some(sign), Some(hours)) => {
      let hours: i32 = hours.as_str().parse().ok()?;
      let minutes: i32 = caps.get(10).map_or(Some(0), |m| m.as_str().parse().ok())?;
      let seconds = hours * 3600 + minutes * 60;
      if sign.as_str() == "-" {
        -seconds
      } else {
        seconds
      }
    },
    _ => 0,
  };

  local_datetime(
    year,
    [number(2, 1)?, number(3, 1)?, number(4, 0)?, number(5, 0)?, number(6, 0)?],
    offset_seconds,
  )
}

/// Builds a timestamp from `[month, day, hour, minute, second]` at a fixed
/// UTC offset.
pub(crate) fn local_datetime(
  year: i32,
  [month, day, hour, minute, second]: [u32; 5],
  offset_seconds: i32,
) -> Option<DateTime<FixedOffset>> {
  use chrono::{NaiveDate, TimeZone};

  let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
  FixedOffset::east_opt(offset_seconds)?.from_local_datetime(&naive).single()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::PdfFixture;

  #[traced_test]
  #[test]
  fn test_pdf_analysis() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("proposal.pdf");
    PdfFixture::new()
      .page(&["Proposal Cover Sheet", "Total Dollar Amount for this Proposal", "$1,000,000.00"])
      .page(&["Technical Approach"])
      .info("Phase I Proposal", "Acme Robotics")
      .signature("Jane Q. Signer", "D:20210304102211-05'00'")
      .write(&path);

    let document = PdfAnalyzer::new().analyze(&path).unwrap();

    assert_eq!(document.kind, DocumentKind::Pdf);
    assert_eq!(document.text_source, TextSource::Native);
    assert_eq!(document.pages.len(), 2);
    assert_eq!(document.pages[0].number, 1);
    assert_eq!(document.pages[0].lines, vec![
      "Proposal Cover Sheet",
      "Total Dollar Amount for this Proposal",
      "$1,000,000.00"
    ]);
    assert_eq!(document.pages[1].title(), Some("Technical Approach"));

    assert_eq!(document.metadata.title.as_deref(), Some("Phase I Proposal"));
    assert_eq!(document.metadata.author.as_deref(), Some("Acme Robotics"));
    assert_eq!(document.metadata.subject, None);

    assert_eq!(document.embedded_signatures.len(), 1);
    let signature = &document.embedded_signatures[0];
    assert_eq!(signature.name.as_deref(), Some("Jane Q. Signer"));
    assert_eq!(
      signature.signed_at.unwrap().to_rfc3339(),
      "2021-03-04T10:22:11-05:00"
    );
  }

  #[test]
  fn test_utf16_information_strings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("utf16.pdf");
    PdfFixture::new()
      .page(&["Cover"])
      .utf16_info("Résumé of Phase II – Ω", "Zoë Ångström")
      .write(&path);

    let document = PdfAnalyzer::new().analyze(&path).unwrap();
    assert_eq!(document.metadata.title.as_deref(), Some("Résumé of Phase II – Ω"));
    assert_eq!(document.metadata.author.as_deref(), Some("Zoë Ångström"));
  }

  #[test]
  fn test_image_only_pdf_has_no_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scan.pdf");
    PdfFixture::new().page(&[]).write(&path);

    let bytes = std::fs::read(&path).unwrap();
    let document = PdfAnalyzer::new().analyze_bytes(&path, &bytes).unwrap();
    assert_eq!(document.text_source, TextSource::None);
    assert!(!document.has_text());
  }

  #[test]
  fn test_garbage_is_an_error() {
    let result = PdfAnalyzer::new().analyze_bytes(Path::new("bad.pdf"), b"not a pdf at all");
    assert!(matches!(result, Err(GrantscanError::Lopdf(_))));
  }

  #[test]
  fn test_parse_pdf_date() {
    let date = parse_pdf_date("D:20200115093000Z").unwrap();
    assert_eq!(date.to_rfc3339(), "2020-01-15T09:30:00+00:00");

    let date = parse_pdf_date("D:20200115093000+01'30'").unwrap();
    assert_eq!(date.to_rfc3339(), "2020-01-15T09:30:00+01:30");

    let date = parse_pdf_date("D:2019").unwrap();
    assert_eq!(date.to_rfc3339(), "2019-01-01T00:00:00+00:00");

    assert!(parse_pdf_date("yesterday").is_none());
    assert!(parse_pdf_date("D:20201345").is_none());
  }
}
