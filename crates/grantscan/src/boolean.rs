//! Coercing free text to booleans.
//!
//! Command line flags (`--ocr yes`) and certification answers ("Yes", "X No",
//! "☒ Yes") both go through [`parse_bool`], so the two accept the same
//! spellings.

use super::*;

/// Strings accepted as `true`.
const TRUE_VALUES: [&str; 5] = ["yes", "true", "t", "y", "1"];
/// Strings accepted as `false`.
const FALSE_VALUES: [&str; 5] = ["no", "false", "f", "n", "0"];
/// Leading checkbox marks that may precede an answer word.
const CHECK_MARKS: [&str; 6] = ["[x]", "(x)", "x", "☒", "☑", "✓"];

/// Parses a boolean the way command line users spell it.
///
/// # Examples
///
/// ```
/// use grantscan::boolean::parse_bool;
///
/// assert!(parse_bool("Yes").unwrap());
/// assert!(!parse_bool(" 0 ").unwrap());
/// assert!(parse_bool("maybe").is_err());
/// ```
pub fn parse_bool(value: &str) -> Result<bool> {
  let lowered = value.trim().to_lowercase();
  if TRUE_VALUES.contains(&lowered.as_str()) {
    Ok(true)
  } else if FALSE_VALUES.contains(&lowered.as_str()) {
    Ok(false)
  } else {
    Err(GrantscanError::InvalidBoolean(value.to_string()))
  }
}

/// An answer read from a proposal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "answer", content = "text", rename_all = "snake_case")]
pub enum Answer {
  /// The line read as an affirmative.
  Yes,
  /// The line read as a negative.
  No,
  /// A line was found where the answer should be, but it isn't a boolean.
  Unparsed(String),
  /// The question (or the line after it) wasn't found.
  #[default]
  Missing,
}

impl Answer {
  /// Reads an answer from a single line of text.
  ///
  /// Tries, in order: the whole line, the line without trailing punctuation,
  /// the first word, and a word following a checkbox mark. A first word is
  /// only taken when it is spelled out in letters or is the only word, so a
  /// numbered item like "1. Objectives" stays unparsed.
  pub fn from_line(line: &str) -> Self {
    let line = line.trim();
    if line.is_empty() {
      return Self::Missing;
    }

    let stripped = line.trim_end_matches(is_punctuation);
    let mut words = stripped.split_whitespace();
    let raw_first = words.next().unwrap_or_default();
    let first = raw_first.trim_end_matches(is_punctuation);
    let first_is_word = words.clone().next().is_none() || first.chars().all(char::is_alphabetic);

    for candidate in [line, stripped] {
      if let Ok(value) = parse_bool(candidate) {
        return value.into();
      }
    }
    if first_is_word {
      if let Ok(value) = parse_bool(first) {
        return value.into();
      }
    }

    if CHECK_MARKS.contains(&raw_first.to_lowercase().as_str()) {
      if let Some(Ok(value)) = words.next().map(|word| parse_bool(word.trim_end_matches(is_punctuation)))
      {
        return value.into();
      }
    }

    Self::Unparsed(line.to_string())
  }

  /// Whether the answer could be read as a boolean.
  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Yes => Some(true),
      Self::No => Some(false),
      Self::Unparsed(_) | Self::Missing => None,
    }
  }
}

fn is_punctuation(c: char) -> bool { c.is_ascii_punctuation() }

impl From<bool> for Answer {
  fn from(value: bool) -> Self {
    if value {
      Self::Yes
    } else {
      Self::No
    }
  }
}

impl Display for Answer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Yes => write!(f, "yes"),
      Self::No => write!(f, "no"),
      Self::Unparsed(text) => write!(f, "?{text}"),
      Self::Missing => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_bool_spellings() {
    for value in ["yes", "TRUE", "t", "Y", "1", "  yes  "] {
      assert!(parse_bool(value).unwrap(), "{value} should be true");
    }
    for value in ["no", "False", "F", "n", "0"] {
      assert!(!parse_bool(value).unwrap(), "{value} should be false");
    }
  }

  #[test]
  fn test_parse_bool_rejects_other_text() {
    match parse_bool("perhaps") {
      Err(GrantscanError::InvalidBoolean(value)) => assert_eq!(value, "perhaps"),
      other => panic!("unexpected result: {other:?}"),
    }
    assert!(parse_bool("").is_err());
  }

  #[test]
  fn test_answer_from_line() {
    assert_eq!(Answer::from_line("Yes"), Answer::Yes);
    assert_eq!(Answer::from_line("No."), Answer::No);
    assert_eq!(Answer::from_line("No, the firm has not"), Answer::No);
    assert_eq!(Answer::from_line("X Yes"), Answer::Yes);
    assert_eq!(Answer::from_line("[x] no"), Answer::No);
    assert_eq!(Answer::from_line("   "), Answer::Missing);
    assert_eq!(
      Answer::from_line("See attached statement"),
      Answer::Unparsed("See attached statement".to_string())
    );
  }

  #[test]
  fn test_numbered_items_are_not_answers() {
    assert_eq!(
      Answer::from_line("1. Technical Objectives"),
      Answer::Unparsed("1. Technical Objectives".to_string())
    );
    assert_eq!(Answer::from_line("0 exceptions noted"), Answer::Unparsed("0 exceptions noted".to_string()));
    assert_eq!(Answer::from_line("1."), Answer::Yes);
    assert_eq!(Answer::from_line("Y - certified"), Answer::Yes);
  }

  #[test]
  fn test_answer_display() {
    assert_eq!(Answer::Yes.to_string(), "yes");
    assert_eq!(Answer::Missing.to_string(), "");
    assert_eq!(Answer::Unparsed("TBD".into()).to_string(), "?TBD");
    assert_eq!(Answer::No.as_bool(), Some(false));
  }
}
