//! Yes/no certification answers.
//!
//! Forms print a question such as "Will any foreign nationals be involved?"
//! and the answer a fixed number of lines below it. The offset is per
//! question and configurable, since it depends on the form's layout.

use super::*;

/// The answer to one certification question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationAnswer {
  /// Question identifier from the configuration.
  pub id:     String,
  /// What was read.
  pub answer: Answer,
  /// Page of the question line, if it was found.
  pub page:   Option<u32>,
}

/// Answers every configured certification question.
#[derive(Debug, Default, Clone, Copy)]
pub struct CertificationExtractor;

impl Extractor for CertificationExtractor {
  type Output = Vec<CertificationAnswer>;

  fn extract(&self, document: &Document, config: &Config) -> Self::Output {
    let lines = flat_lines(document);

    config
      .certifications
      .iter()
      .map(|question| {
        let found = lines.iter().enumerate().find_map(|(i, (page, line))| {
          find_phrase(line, &question.phrase, false).map(|range| (i, *page, range))
        });

        let Some((i, page, range)) = found else {
          debug!("Certification \"{}\" not found in {}", question.id, document.path.display());
          return CertificationAnswer {
            id:     question.id.clone(),
            answer: Answer::Missing,
            page:   None,
          };
        };

        let answer = if question.offset == 0 {
          Answer::from_line(tail_after(lines[i].1, &range))
        } else {
          lines.get(i + question.offset).map_or(Answer::Missing, |(_, line)| Answer::from_line(line))
        };
        trace!("Certification \"{}\": {answer}", question.id);
        CertificationAnswer { id: question.id.clone(), answer, page: Some(page) }
      })
      .collect()
  }
}
