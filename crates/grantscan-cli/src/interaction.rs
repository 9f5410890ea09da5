//! Terminal prompts and styled output.

use dialoguer::Confirm;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Branch character for tree structure
pub static TREE_BRANCH: &str = "├─";
/// Leaf character for tree structure (end of branch)
pub static TREE_LEAF: &str = "└─";

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// The outcome of scanning one document.
  Report(&'a ProposalReport),
  /// Page or slide titles of one document.
  Titles(&'a Path, &'a [(u32, String)]),
  /// A step finished.
  Success(&'a str),
  /// Neutral progress information.
  Info(&'a str),
  /// Something the user should look at.
  Warning(&'a str),
  /// A failure that didn't stop the command.
  Error(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question. Defaults to "no".
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Shows a response.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Interaction through stdout and `dialoguer` prompts.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
  /// Answer "yes" to every prompt without asking.
  accept_defaults: bool,
}

impl Terminal {
  /// Creates a terminal interaction.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      debug!("Accepting \"{message}\" without prompting");
      return Ok(true);
    }
    Ok(Confirm::new().with_prompt(message).default(false).wait_for_newline(true).interact()?)
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Report(report) => print_report(report),
      ResponseContent::Titles(path, titles) => {
        println!("{} {}", style(INFO_PREFIX).cyan(), style(path.display()).bold());
        for (i, (number, title)) in titles.iter().enumerate() {
          let prefix = if i + 1 == titles.len() { TREE_LEAF } else { TREE_BRANCH };
          println!("   {} {:>3}  {}", style(prefix).dim(), style(number).dim(), title);
        }
      },
      ResponseContent::Success(message) => {
        println!("{} {}", style(SUCCESS_PREFIX).green(), message)
      },
      ResponseContent::Info(message) => println!("{} {}", style(INFO_PREFIX).cyan(), message),
      ResponseContent::Warning(message) => {
        println!("{} {}", style(WARNING_PREFIX).yellow(), style(message).yellow())
      },
      ResponseContent::Error(message) => {
        println!("{} {}", style(ERROR_PREFIX).red(), style(message).red())
      },
    }
    Ok(())
  }
}

/// One line per document, followed by its issues as a tree.
fn print_report(report: &ProposalReport) {
  let name = report.file.display();
  if let Some(error) = &report.error {
    println!("{} {} {}", style(ERROR_PREFIX).red(), style(name).bold(), style(error).red());
    return;
  }

  let budget = report.budget.as_ref().map(|budget| budget.raw.as_str()).unwrap_or("no budget");
  let summary = format!(
    "{} pages, {} text, {}, {} contacts, {} signatures",
    report.pages,
    report.text_source,
    budget,
    report.contacts.len(),
    report.signatures.len()
  );

  let issues = report.issues();
  if issues.is_empty() {
    println!("{} {} {}", style(SUCCESS_PREFIX).green(), style(name).bold(), style(summary).dim());
  } else {
    println!("{} {} {}", style(WARNING_PREFIX).yellow(), style(name).bold(), style(summary).dim());
    for (i, issue) in issues.iter().enumerate() {
      let prefix = if i + 1 == issues.len() { TREE_LEAF } else { TREE_BRANCH };
      println!("   {} {}", style(prefix).dim(), style(issue).yellow());
    }
  }
}
