//! Points of contact.
//!
//! Contact blocks on cover sheets are laid out in a handful of ways:
//!
//! ```text
//! TPOC: Dr. Ada Lovelace          TPOC Information
//! ada@example.com                 Name: Dr. Ada Lovelace
//! (555) 123-4567                  Email: ada@example.com
//! ```
//!
//! The name comes from the text after the role phrase when that holds a
//! name, otherwise from a `Name:` label or the first plain line below it.
//! Email and phone are the first matches of their patterns in the block.

use super::*;

lazy_static! {
  static ref EMAIL: Regex = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
  static ref PHONE: Regex =
    Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap();
  static ref LABEL: Regex = Regex::new(r"^([A-Za-z' ]{1,30}):\s*(.*)$").unwrap();
}

/// Words that introduce a contact block rather than name someone.
const STOPWORDS: [&str; 7] = ["information", "info", "details", "contact", "name", "s", "poc"];

/// A point of contact found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  /// Role from the configuration, e.g. `TPOC`.
  pub role:  String,
  /// Person's name.
  pub name:  Option<String>,
  /// Email address.
  pub email: Option<String>,
  /// Phone number as written.
  pub phone: Option<String>,
  /// Page the role phrase is on.
  pub page:  u32,
}

impl Contact {
  /// Whether nothing beyond the role was found.
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.phone.is_none()
  }
}

/// Extracts one [`Contact`] per role phrase occurrence.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactExtractor;

impl Extractor for ContactExtractor {
  type Output = Vec<Contact>;

  fn extract(&self, document: &Document, config: &Config) -> Self::Output {
    let mut contacts: Vec<Contact> = Vec::new();

    for role in &config.contacts {
      for page in &document.pages {
        let lines = &page.lines;
        for (i, line) in lines.iter().enumerate() {
          let Some(range) = find_phrase(line, &role.phrase, false) else { continue };
          let tail = tail_after(line, &range);

          let end = (i + config.context.after.max(1)).min(lines.len());
          let block: Vec<&str> = lines[i + 1..end]
            .iter()
            .map(String::as_str)
            .take_while(|next| !starts_other_block(next, config))
            .collect();

          let name = candidate_name(tail).or_else(|| block.iter().find_map(|l| candidate_name(l)));
          let email = first_match(&EMAIL, tail, &block);
          let phone = first_match(&PHONE, tail, &block);

          let contact = Contact { role: role.role.clone(), name, email, phone, page: page.number };
          if contact.is_empty() {
            debug!("{} on page {} has no contact details", role.role, page.number);
          }
          if !contacts.iter().any(|c| same_person(c, &contact)) {
            contacts.push(contact);
          }
        }
      }
    }

    contacts
  }
}

/// Whether `line` opens the block of any configured role.
fn starts_other_block(line: &str, config: &Config) -> bool {
  config.contacts.iter().any(|role| find_phrase(line, &role.phrase, false).is_some())
}

fn same_person(a: &Contact, b: &Contact) -> bool {
  a.role == b.role && a.name == b.name && a.email == b.email && a.phone == b.phone
}

fn first_match(pattern: &Regex, tail: &str, block: &[&str]) -> Option<String> {
  std::iter::once(tail)
    .chain(block.iter().copied())
    .find_map(|line| pattern.find(line))
    .map(|m| m.as_str().to_string())
}

/// Reads a name from a line, or `None` if the line holds no name.
///
/// Email addresses and phone numbers are removed first. A `Label: value`
/// line yields its value only when the label is itself a stopword such as
/// `Name`; other labels (`Email:`, `Title:`) are not names.
fn candidate_name(line: &str) -> Option<String> {
  let line = PHONE.replace_all(&EMAIL.replace_all(line, ""), "").into_owned();
  let line = line.trim();

  if let Some(caps) = LABEL.captures(line) {
    let label = caps.get(1).map_or("", |m| m.as_str());
    let value = caps.get(2).map_or("", |m| m.as_str());
    return if only_stopwords(label) { clean_name(value) } else { None };
  }
  clean_name(line)
}

fn clean_name(text: &str) -> Option<String> {
  let name = text.trim_matches(|c: char| {
    c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-' | '–' | '|' | '(' | ')' | '\'')
  });
  if name.is_empty() || only_stopwords(name) {
    None
  } else {
    Some(name.to_string())
  }
}

fn only_stopwords(text: &str) -> bool {
  text
    .split_whitespace()
    .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase())
    .filter(|word| !word.is_empty())
    .all(|word| STOPWORDS.contains(&word.as_str()))
}
