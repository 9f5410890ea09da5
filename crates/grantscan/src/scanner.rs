//! Loading documents and running the extractors over them.
//!
//! Documents are processed one at a time. A batch is never aborted by a bad
//! file: its error is recorded in that file's [`ProposalReport`] and the scan
//! moves on.

use std::{
  sync::atomic::{AtomicBool, Ordering},
  time::Instant,
};

use super::*;
use crate::{ocr::OcrEngine, pdf::PdfAnalyzer, pptx::PptxAnalyzer, report::ProposalReport};

/// Loads proposal documents and builds their reports.
#[derive(Debug, Clone)]
pub struct Scanner {
  config: Config,
  ocr:    bool,
}

/// Builder for [`Scanner`].
#[derive(Debug, Clone, Default)]
pub struct ScannerBuilder {
  config: Option<Config>,
  ocr:    bool,
}

impl ScannerBuilder {
  /// Uses `config` instead of [`Config::default`].
  pub fn with_config(mut self, config: Config) -> Self {
    self.config = Some(config);
    self
  }

  /// Enables the OCR fallback for PDFs without embedded text.
  pub fn with_ocr(mut self, ocr: bool) -> Self {
    self.ocr = ocr;
    self
  }

  /// Builds the scanner.
  pub fn build(self) -> Scanner { Scanner { config: self.config.unwrap_or_default(), ocr: self.ocr } }
}

impl Default for Scanner {
  fn default() -> Self { Self::builder().build() }
}

impl Scanner {
  /// Starts building a scanner.
  pub fn builder() -> ScannerBuilder { ScannerBuilder::default() }

  /// The configuration in use.
  pub fn config(&self) -> &Config { &self.config }

  /// Whether PDFs without text are sent through OCR.
  pub fn ocr_enabled(&self) -> bool { self.ocr }

  /// Loads a document, falling back to OCR for image-only PDFs when enabled.
  ///
  /// # Errors
  ///
  /// Fails when the file can't be read or parsed, when it is a legacy `.ppt`
  /// deck, or when OCR was needed and failed.
  pub async fn load(&self, path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path)?;
    let bytes = tokio::fs::read(path).await?;

    let document = match kind {
      DocumentKind::Pdf => {
        let mut document = PdfAnalyzer::new().analyze_bytes(path, &bytes)?;
        if !document.has_text() {
          if self.ocr {
            let engine = OcrEngine::from_config(&self.config.ocr);
            document.pages = engine.recognize(path).await?;
            document.text_source =
              if document.has_text() { TextSource::Ocr } else { TextSource::None };
          } else {
            warn!("{} has no extractable text. Try again with --ocr", path.display());
          }
        }
        document
      },
      DocumentKind::Presentation => PptxAnalyzer::new().analyze_bytes(path, &bytes)?,
      DocumentKind::LegacyPresentation => {
        return Err(GrantscanError::UnsupportedFormat(format!(
          "{} is a binary .ppt deck; save it as .pptx to scan it",
          path.display()
        )));
      },
    };

    debug!(
      "Loaded {} ({} pages, {} text)",
      path.display(),
      document.pages.len(),
      document.text_source
    );
    Ok(document)
  }

  /// Loads and scans one document. Load errors end up in the report.
  pub async fn scan(&self, path: impl AsRef<Path>) -> ProposalReport {
    let path = path.as_ref();
    match self.load(path).await {
      Ok(document) => ProposalReport::from_document(&document, &self.config),
      Err(e) => {
        warn!("Failed to scan {}: {e}", path.display());
        ProposalReport::failed(path, &e)
      },
    }
  }

  /// Scans documents in order until done or until `cancel` is set.
  ///
  /// The flag is checked between documents, so the document in progress is
  /// always finished. Documents left unscanned still get a report, failed
  /// with [`GrantscanError::Interrupted`].
  pub async fn scan_all<P: AsRef<Path>>(
    &self,
    paths: impl IntoIterator<Item = P>,
    cancel: &AtomicBool,
  ) -> Vec<ProposalReport> {
    let started = Instant::now();
    let mut reports = Vec::new();
    let mut interrupted = false;

    for path in paths {
      let path = path.as_ref();
      if !interrupted && cancel.load(Ordering::SeqCst) {
        warn!("Scan interrupted after {} documents", reports.len());
        interrupted = true;
      }
      if interrupted {
        reports.push(ProposalReport::failed(path, &GrantscanError::Interrupted));
        continue;
      }
      info!("Scanning {}", path.display());
      reports.push(self.scan(path).await);
    }

    info!("Scanned {} documents in {:.2?}", reports.len(), started.elapsed());
    reports
  }
}
