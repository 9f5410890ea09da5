//! OCR fallback for scanned PDFs.
//!
//! Pages are rasterized with `pdftoppm` (poppler-utils) into a temporary
//! directory and each image is passed through `tesseract`. The temporary
//! directory, and every image in it, is removed when recognition finishes,
//! whether it succeeded or not.

use std::process::Output;

use tokio::process::Command;

use super::*;
use crate::config::OcrConfig;

/// Runs the external OCR tools.
#[derive(Debug, Clone)]
pub struct OcrEngine {
  config: OcrConfig,
}

impl OcrEngine {
  /// Creates an engine using the given tool settings.
  pub fn from_config(config: &OcrConfig) -> Self { Self { config: config.clone() } }

  /// Whether both tools can be started.
  pub async fn is_available(&self) -> bool {
    let pdftoppm = Command::new(&self.config.pdftoppm).arg("-v").output().await.is_ok();
    let tesseract = Command::new(&self.config.tesseract).arg("--version").output().await.is_ok();
    if !pdftoppm {
      debug!("{} not found; install poppler-utils for OCR support", self.config.pdftoppm.display());
    }
    if !tesseract {
      debug!("{} not found; install tesseract-ocr for OCR support", self.config.tesseract.display());
    }
    pdftoppm && tesseract
  }

  /// Recognizes the text of every page of the PDF at `path`.
  ///
  /// # Errors
  ///
  /// Returns [`GrantscanError::Ocr`] when `pdftoppm` can't be started, fails,
  /// or renders no pages. A page that `tesseract` fails on is kept empty and
  /// logged rather than failing the document.
  pub async fn recognize(&self, path: &Path) -> Result<Vec<Page>> {
    info!("OCR'ing {} at {} dpi. This could take a minute.", path.display(), self.config.dpi);
    let workdir = tempfile::tempdir()?;
    let prefix = workdir.path().join("page");

    let output = Command::new(&self.config.pdftoppm)
      .arg("-r")
      .arg(self.config.dpi.to_string())
      .arg("-png")
      .arg(path)
      .arg(&prefix)
      .output()
      .await
      .map_err(|e| tool_error(&self.config.pdftoppm, &e.to_string()))?;
    check_status(&self.config.pdftoppm, &output)?;

    let images = rendered_images(workdir.path())?;
    if images.is_empty() {
      return Err(tool_error(&self.config.pdftoppm, "no pages were rendered"));
    }

    let mut pages = Vec::with_capacity(images.len());
    for (number, image) in images {
      let output = Command::new(&self.config.tesseract)
        .arg(&image)
        .arg("stdout")
        .arg("-l")
        .arg(&self.config.language)
        .output()
        .await
        .map_err(|e| tool_error(&self.config.tesseract, &e.to_string()))?;

      if let Err(e) = check_status(&self.config.tesseract, &output) {
        warn!("Page {number} of {}: {e}", path.display());
        pages.push(Page { number, ..Page::default() });
        continue;
      }
      pages.push(Page::from_text(number, &String::from_utf8_lossy(&output.stdout)));
      trace!("Recognized page {number}");
    }

    info!("OCR complete for {}: {} pages", path.display(), pages.len());
    Ok(pages)
  }
}

/// Images written by `pdftoppm`, as `(page number, path)` in page order.
///
/// `pdftoppm` names them `<prefix>-<n>.png`, zero-padding `n` to the width
/// of the page count.
fn rendered_images(dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
  let mut images = Vec::new();
  for entry in std::fs::read_dir(dir)? {
    let path = entry?.path();
    if path.extension().map(|ext| ext == "png").unwrap_or(false) {
      let number = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit('-').next())
        .and_then(|n| n.parse().ok());
      match number {
        Some(number) => images.push((number, path)),
        None => warn!("Unexpected OCR image name {}", path.display()),
      }
    }
  }
  images.sort();
  Ok(images)
}

fn check_status(tool: &Path, output: &Output) -> Result<()> {
  if output.status.success() {
    Ok(())
  } else {
    Err(tool_error(tool, String::from_utf8_lossy(&output.stderr).trim()))
  }
}

fn tool_error(tool: &Path, message: &str) -> GrantscanError {
  GrantscanError::Ocr(format!("{}: {message}", tool.display()))
}
