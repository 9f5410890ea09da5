//! Total proposed budget.
//!
//! The cover sheet prints a label such as "Total Dollar Amount for this
//! Proposal" with the amount either after it on the same line or on the next
//! line. The first occurrence in the document wins.

use super::*;

lazy_static! {
  /// A dollar amount: optional `$`, digits with optional thousands commas and
  /// decimals, and an optional `K`/`M` suffix.
  static ref AMOUNT: Regex =
    Regex::new(r"\$?\s*(\d[\d,]*(?:\.\d+)?)\s*([KkMm])?(?:\b|$)").unwrap();
}

/// The budget found in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
  /// Text the amount was read from.
  pub raw:           String,
  /// Parsed amount in dollars, if the text held a number.
  pub amount:        Option<f64>,
  /// Page the label was found on.
  pub page:          u32,
  /// Whether the amount is above the configured limit.
  pub exceeds_limit: bool,
}

/// Finds the total budget.
#[derive(Debug, Default, Clone, Copy)]
pub struct BudgetExtractor;

impl Extractor for BudgetExtractor {
  type Output = Option<Budget>;

  fn extract(&self, document: &Document, config: &Config) -> Self::Output {
    let lines = flat_lines(document);
    let keyphrase = &config.budget.keyphrase;

    let (index, (page, line), range) = lines.iter().enumerate().find_map(|(index, entry)| {
      find_phrase(entry.1, keyphrase, false).map(|range| (index, *entry, range))
    })?;

    let tail = tail_after(line, &range);
    let raw = if tail.chars().any(|c| c.is_ascii_digit()) {
      tail.to_string()
    } else {
      lines.get(index + 1).map(|(_, next)| next.to_string()).unwrap_or_default()
    };

    let amount = parse_amount(&raw);
    if amount.is_none() {
      warn!("Could not read a budget amount from \"{raw}\" in {}", document.path.display());
    }
    let exceeds_limit = amount.map(|amount| amount > config.budget.max_value).unwrap_or(false);
    if exceeds_limit {
      warn!(
        "Proposed budget {raw} in {} exceeds ${:.2}M!",
        document.path.display(),
        config.budget.max_value / 1_000_000.0
      );
    }

    Some(Budget { raw, amount, page, exceeds_limit })
  }
}

/// Parses the first dollar amount in `text`.
///
/// ```
/// use grantscan::extract::budget::parse_amount;
///
/// assert_eq!(parse_amount("$1,249,999.50"), Some(1_249_999.5));
/// assert_eq!(parse_amount("$1.5M"), Some(1_500_000.0));
/// assert_eq!(parse_amount("TBD"), None);
/// ```
pub fn parse_amount(text: &str) -> Option<f64> {
  let caps = AMOUNT.captures(text)?;
  let value: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
  let multiplier = match caps.get(2).map(|m| m.as_str()) {
    Some("K" | "k") => 1_000.0,
    Some("M" | "m") => 1_000_000.0,
    _ => 1.0,
  };
  Some(value * multiplier)
}
