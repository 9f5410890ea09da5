//! Required section titles.

use super::*;

/// Which required sections a document has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
  /// Required titles found, with the first page whose title contains them.
  pub found:   Vec<(String, u32)>,
  /// Required titles no page or slide title contains.
  pub missing: Vec<String>,
}

impl SectionReport {
  /// Whether every required section was found.
  pub fn is_complete(&self) -> bool { self.missing.is_empty() }
}

/// Checks page and slide titles against the required sections.
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionExtractor;

impl Extractor for SectionExtractor {
  type Output = SectionReport;

  fn extract(&self, document: &Document, config: &Config) -> Self::Output {
    let titles: Vec<(u32, &str)> = document.titles().collect();
    let mut report = SectionReport::default();

    for required in &config.sections.required {
      match titles.iter().find(|(_, title)| find_phrase(title, required, false).is_some()) {
        Some((page, _)) => report.found.push((required.clone(), *page)),
        None => report.missing.push(required.clone()),
      }
    }

    if !report.is_complete() {
      info!("{} is missing sections: {}", document.path.display(), report.missing.join(", "));
    }
    report
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[test]
  fn test_sections_from_slide_titles() {
    let doc = Document::new("deck.pptx", DocumentKind::Presentation, vec![
      Page { number: 1, title: Some("Overview".into()), lines: vec!["Overview".into()] },
      Page { number: 2, title: Some("Technical APPROACH".into()), lines: vec![] },
      Page { number: 3, title: None, lines: vec!["Method of evaluation".into()] },
    ]);
    let report = SectionExtractor.extract(&doc, &Config::default());
    assert_eq!(report.found, vec![("Method".to_string(), 3), ("Approach".to_string(), 2)]);
    assert!(report.is_complete());
  }

  #[traced_test]
  #[test]
  fn test_missing_sections() {
    let doc = Document::new("p.pdf", DocumentKind::Pdf, vec![Page::from_text(1, "Cover Sheet")]);
    let config = Config::default().with_required_sections(["Schedule", "Cover"]);
    let report = SectionExtractor.extract(&doc, &config);
    assert_eq!(report.found, vec![("Cover".to_string(), 1)]);
    assert_eq!(report.missing, vec!["Schedule"]);
    assert!(logs_contain("missing sections: Schedule"));
  }
}
