//! Selecting the documents to scan.
//!
//! Explicitly named files only need an accepted extension. Files found by
//! walking a directory must also pass the skip-prefix rule (so earlier
//! `highlighted_*` outputs aren't re-scanned) and, when keywords are given,
//! contain every keyword in their lowercased file name.

use super::*;
use crate::config::FileFilter;

/// Builder for a file discovery run.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
  files:       Vec<PathBuf>,
  directories: Vec<PathBuf>,
  keywords:    Vec<String>,
}

/// Result of a discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
  accepted: BTreeSet<PathBuf>,
  skipped:  Vec<PathBuf>,
}

impl DiscoveredFiles {
  /// Files to scan, de-duplicated and sorted.
  pub fn accepted(&self) -> impl Iterator<Item = &Path> { self.accepted.iter().map(PathBuf::as_path) }

  /// Explicitly named files that were skipped for their extension.
  pub fn skipped(&self) -> &[PathBuf] { &self.skipped }

  /// Number of accepted files.
  pub fn len(&self) -> usize { self.accepted.len() }

  /// Whether nothing was accepted.
  pub fn is_empty(&self) -> bool { self.accepted.is_empty() }
}

impl Discovery {
  /// Creates an empty discovery run.
  pub fn new() -> Self { Self::default() }

  /// Adds a single file.
  pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
    self.files.push(file.into());
    self
  }

  /// Adds several files.
  pub fn with_files<P: Into<PathBuf>>(mut self, files: impl IntoIterator<Item = P>) -> Self {
    self.files.extend(files.into_iter().map(Into::into));
    self
  }

  /// Adds a directory to walk recursively.
  pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
    self.directories.push(directory.into());
    self
  }

  /// Adds several directories.
  pub fn with_directories<P: Into<PathBuf>>(
    mut self,
    directories: impl IntoIterator<Item = P>,
  ) -> Self {
    self.directories.extend(directories.into_iter().map(Into::into));
    self
  }

  /// Restricts directory results to names containing all keywords.
  pub fn with_keywords<S: AsRef<str>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
    self.keywords.extend(keywords.into_iter().map(|keyword| keyword.as_ref().to_lowercase()));
    self
  }

  /// Runs the discovery.
  ///
  /// # Errors
  ///
  /// Returns [`GrantscanError::InvalidPath`] if a named file is not a file or
  /// a named directory is not a directory.
  pub fn run(&self, filter: &FileFilter) -> Result<DiscoveredFiles> {
    let mut found = DiscoveredFiles::default();

    for file in &self.files {
      if !file.is_file() {
        return Err(GrantscanError::InvalidPath(format!("Cannot open file '{}'", file.display())));
      }
      if filter.accepts_extension(file) {
        found.accepted.insert(file.clone());
      } else {
        info!("Skipping {} with unsupported extension", file.display());
        found.skipped.push(file.clone());
      }
    }

    for directory in &self.directories {
      if !directory.is_dir() {
        return Err(GrantscanError::InvalidPath(format!(
          "'{}' is not a valid directory",
          directory.display()
        )));
      }

      let pattern = format!("{}/**/*", glob::Pattern::escape(&directory.to_string_lossy()));
      for entry in glob::glob(&pattern)? {
        let path = match entry {
          Ok(path) => path,
          Err(e) => {
            warn!("Unreadable entry under {}: {e}", directory.display());
            continue;
          },
        };
        if path.is_file()
          && filter.accepts_extension(&path)
          && !filter.is_skipped_name(&path)
          && self.matches_keywords(&path)
        {
          trace!("Discovered {}", path.display());
          found.accepted.insert(path);
        }
      }
    }

    debug!("Discovered {} files ({} skipped)", found.accepted.len(), found.skipped.len());
    Ok(found)
  }

  fn matches_keywords(&self, path: &Path) -> bool {
    let name = path.file_name().map(|name| name.to_string_lossy().to_lowercase()).unwrap_or_default();
    self.keywords.iter().all(|keyword| name.contains(keyword.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
  }

  #[traced_test]
  #[test]
  fn test_directory_walk_filters() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("A/Phase1_Proposal.pdf"));
    touch(&root.join("A/deep/phase1_slides.PPTX"));
    touch(&root.join("A/highlighted_phase1.pdf"));
    touch(&root.join("B/phase1_notes.docx"));
    touch(&root.join("B/budget.pdf"));

    let found = Discovery::new().with_directory(root).run(&FileFilter::default()).unwrap();
    let names: Vec<_> =
      found.accepted().map(|p| p.file_name().unwrap().to_string_lossy().to_string()).collect();
    assert_eq!(names, vec!["Phase1_Proposal.pdf", "phase1_slides.PPTX", "budget.pdf"]);

    let found = Discovery::new()
      .with_directory(root)
      .with_keywords(["PHASE1", "proposal"])
      .run(&FileFilter::default())
      .unwrap();
    assert_eq!(found.len(), 1);
    assert!(found.accepted().next().unwrap().ends_with("Phase1_Proposal.pdf"));
  }

  #[test]
  fn test_explicit_files() {
    let dir = tempdir().unwrap();
    let pdf = dir.path().join("one.pdf");
    let txt = dir.path().join("two.txt");
    touch(&pdf);
    touch(&txt);

    let found = Discovery::new()
      .with_files([&pdf, &txt, &pdf])
      .with_keywords(["unrelated"])
      .run(&FileFilter::default())
      .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.skipped(), &[txt]);
  }

  #[test]
  fn test_invalid_paths() {
    let dir = tempdir().unwrap();
    let missing = Discovery::new().with_file(dir.path().join("nope.pdf")).run(&FileFilter::default());
    assert!(matches!(missing, Err(GrantscanError::InvalidPath(_))));

    let file = dir.path().join("file.pdf");
    touch(&file);
    let not_dir = Discovery::new().with_directory(&file).run(&FileFilter::default());
    assert!(matches!(not_dir, Err(GrantscanError::InvalidPath(_))));
  }
}
