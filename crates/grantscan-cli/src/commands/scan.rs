//! Module for the "scan" command: documents in, one report out.

use grantscan::ocr::OcrEngine;

use super::*;

/// Default report file name.
const DEFAULT_OUTPUT: &str = "grantscan_report.csv";

/// Report format selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
  /// One flattened row per document
  Csv,
  /// Full reports as a JSON array
  Json,
}

impl From<OutputFormat> for ReportFormat {
  fn from(format: OutputFormat) -> Self {
    match format {
      OutputFormat::Csv => Self::Csv,
      OutputFormat::Json => Self::Json,
    }
  }
}

/// Arguments for [`Commands::Scan`]
#[derive(Args, Clone, Debug)]
pub struct ScanArgs {
  /// Documents to scan
  #[command(flatten)]
  pub input: InputArgs,

  /// Where to write the report
  #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
  pub output: PathBuf,

  /// Report format. Defaults to the output file's extension, else CSV
  #[arg(long, value_enum)]
  pub format: Option<OutputFormat>,
}

/// Function for the [`Commands::Scan`] in the CLI.
pub async fn scan<I: UserInteraction>(
  interaction: &I,
  config: Config,
  args: ScanArgs,
  cancel: Arc<AtomicBool>,
) -> Result<()> {
  let ScanArgs { input, output, format } = args;
  let format = format.map(ReportFormat::from).unwrap_or_else(|| ReportFormat::from_path(&output));

  if output.exists()
    && !interaction.confirm(&format!("{} already exists. Overwrite it?", output.display()))?
  {
    interaction.reply(ResponseContent::Info("Leaving the existing report untouched"))?;
    return Ok(());
  }

  let files = input.discover(interaction, &config)?;
  if files.is_empty() {
    return Ok(());
  }

  if input.ocr && !OcrEngine::from_config(&config.ocr).is_available().await {
    interaction.reply(ResponseContent::Warning(
      "OCR requested but pdftoppm or tesseract was not found. Scanned PDFs will have no text",
    ))?;
  }

  interaction.reply(ResponseContent::Info(&format!("Scanning {} documents", files.len())))?;
  let started = Instant::now();
  let scanner = input.scanner(config);
  let reports = scanner.scan_all(files.accepted(), &cancel).await;
  let elapsed = started.elapsed();

  for report in &reports {
    interaction.reply(ResponseContent::Report(report))?;
  }
  let skipped = reports.iter().filter(|report| report.was_interrupted()).count();
  if skipped > 0 {
    warn!("Scan interrupted by user, {skipped} documents skipped");
    interaction.reply(ResponseContent::Warning(&format!(
      "Interrupted: {} of {} documents scanned",
      reports.len() - skipped,
      files.len()
    )))?;
  }

  format.write_path(&reports, &output)?;
  interaction.reply(ResponseContent::Success(&format!(
    "Wrote {format} report to {}",
    output.display()
  )))?;
  interaction.reply(ResponseContent::Info(&format!(
    "{} files in {:.2} seconds",
    reports.len() - skipped,
    elapsed.as_secs_f64()
  )))?;
  Ok(())
}
