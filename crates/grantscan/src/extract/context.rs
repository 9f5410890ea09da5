//! Verbatim context around key phrases.

use super::*;

/// A key phrase match together with the lines around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPhraseHit {
  /// The key phrase that matched.
  pub phrase:  String,
  /// Page the match is on.
  pub page:    u32,
  /// 1-based line number within the page.
  pub line:    usize,
  /// The captured window, the matching line included.
  pub context: Vec<String>,
}

/// Captures the configured window of lines around each key phrase.
///
/// Windows don't cross page boundaries. Every matching line gets its own
/// window, so windows of nearby mentions may overlap.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextExtractor;

impl Extractor for ContextExtractor {
  type Output = Vec<KeyPhraseHit>;

  fn extract(&self, document: &Document, config: &Config) -> Self::Output {
    let window = config.context;
    let mut hits = Vec::new();

    for page in &document.pages {
      let lines = &page.lines;
      for (i, line) in lines.iter().enumerate() {
        let Some(phrase) =
          config.key_phrases.iter().find(|phrase| find_phrase(line, phrase, true).is_some())
        else {
          continue;
        };

        let start = i.saturating_sub(window.before);
        let end = (i + window.after.max(1)).min(lines.len());
        trace!("\"{phrase}\" on page {} line {}", page.number, i + 1);
        hits.push(KeyPhraseHit {
          phrase:  phrase.clone(),
          page:    page.number,
          line:    i + 1,
          context: lines[start..end].to_vec(),
        });
      }
    }

    debug!("{} key phrase hits in {}", hits.len(), document.path.display());
    hits
  }
}
