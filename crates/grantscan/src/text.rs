//! Whole-document text cleanup.
//!
//! Extracted text from badly parsed files tends to be either one word per
//! line or one giant run without spaces. [`condense`] uses the newline and
//! space ratios to reject such text and otherwise flattens it into a single
//! whitespace-normalized paragraph.

use super::*;
use crate::config::TextThresholds;

/// Newline and space counts relative to the text length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitespaceRatios {
  /// Share of characters that are `\n`.
  pub newline: f64,
  /// Share of characters that are `' '`.
  pub space:   f64,
}

impl WhitespaceRatios {
  /// Measures `text`. Returns `None` for empty text.
  pub fn of(text: &str) -> Option<Self> {
    let length = text.chars().count();
    if length == 0 {
      return None;
    }
    let newlines = text.chars().filter(|&c| c == '\n').count();
    let spaces = text.chars().filter(|&c| c == ' ').count();
    Some(Self { newline: newlines as f64 / length as f64, space: spaces as f64 / length as f64 })
  }
}

/// Flattens text into one normalized paragraph, or rejects it.
///
/// Returns `None` when the whitespace ratios show the text wasn't parsed
/// properly, or when the result is shorter than `thresholds.min_length`.
pub fn condense(text: &str, thresholds: &TextThresholds) -> Option<String> {
  let ratios = WhitespaceRatios::of(text)?;
  trace!("Whitespace ratios: newline {:.4}, space {:.4}", ratios.newline, ratios.space);

  if ratios.newline > thresholds.max_newline_ratio || ratios.space < thresholds.min_space_ratio {
    debug!("Dropping text: ratios out of range");
    return None;
  }

  let condensed = if ratios.newline > thresholds.dense_newline_ratio
    || ratios.space < thresholds.sparse_space_ratio
    || ratios.space > thresholds.wide_space_ratio
  {
    let collapsed = collapse_whitespace(&text.replace("\n\n", "\t").replace('\n', " ").replace("- ", ""));
    let updated = WhitespaceRatios::of(&collapsed)?;
    trace!("Updated ratios: newline {:.4}, space {:.4}", updated.newline, updated.space);
    if updated.space > thresholds.max_space_ratio {
      debug!("Dropping text: too many spaces after collapsing");
      return None;
    }
    collapsed
  } else {
    collapse_whitespace(&text.replace('\n', " ").replace("- ", "").replace("\\n", " "))
  };

  let length = condensed.chars().count();
  if length < thresholds.min_length {
    debug!("Dropping text: too short ({length} characters)");
    return None;
  }
  Some(condensed.replace("vs.", "versus"))
}

/// Joins hyphenated line breaks and turns the remaining newlines into spaces.
pub fn dehyphenate(text: &str) -> String { text.replace("-\n", "").replace('\n', " ") }

fn collapse_whitespace(text: &str) -> String { text.split_whitespace().collect::<Vec<_>>().join(" ") }
