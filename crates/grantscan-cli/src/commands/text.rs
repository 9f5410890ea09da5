//! Module for the "text" command: one `all_text_<stem>.txt` per document.

use grantscan::text::{condense, dehyphenate};

use super::*;

/// Prefix of the written text files.
const TEXT_FILE_PREFIX: &str = "all_text_";

/// Arguments for [`Commands::Text`]
#[derive(Args, Clone, Debug)]
pub struct TextArgs {
  /// Documents to read
  #[command(flatten)]
  pub input: InputArgs,

  /// Existing directory the text files are written to
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub output_dir: PathBuf,

  /// Flatten the text into one paragraph, dropping text that looks badly
  /// extracted
  #[arg(long)]
  pub condense: bool,

  /// Join words hyphenated across line breaks
  #[arg(long, conflicts_with = "condense")]
  pub dehyphenate: bool,
}

/// Function for the [`Commands::Text`] in the CLI.
pub async fn text<I: UserInteraction>(interaction: &I, config: Config, args: TextArgs) -> Result<()> {
  if !args.output_dir.is_dir() {
    return Err(
      GrantscanError::InvalidPath(format!(
        "'{}' is not a valid directory",
        args.output_dir.display()
      ))
      .into(),
    );
  }

  let files = args.input.discover(interaction, &config)?;
  let thresholds = config.text;
  let scanner = args.input.scanner(config);

  let mut written = 0;
  for path in files.accepted() {
    let document = match scanner.load(path).await {
      Ok(document) => document,
      Err(e) => {
        interaction.reply(ResponseContent::Error(&format!("{}: {e}", path.display())))?;
        continue;
      },
    };

    let raw = document.text();
    let content = if args.condense {
      match condense(&raw, &thresholds) {
        Some(condensed) => condensed,
        None => {
          interaction.reply(ResponseContent::Warning(&format!(
            "{}: text looks badly extracted, skipping",
            path.display()
          )))?;
          continue;
        },
      }
    } else if args.dehyphenate {
      dehyphenate(&raw)
    } else {
      raw
    };

    let stem = path.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    let target = args.output_dir.join(format!("{TEXT_FILE_PREFIX}{stem}.txt"));
    tokio::fs::write(&target, content).await?;
    trace!("Wrote {}", target.display());
    written += 1;
  }

  interaction.reply(ResponseContent::Success(&format!(
    "Wrote {written} text files to {}",
    args.output_dir.display()
  )))?;
  Ok(())
}
