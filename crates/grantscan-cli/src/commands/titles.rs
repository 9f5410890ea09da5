//! Module for the "titles" command.

use super::*;

/// Arguments for [`Commands::Titles`]
#[derive(Args, Clone, Debug)]
pub struct TitlesArgs {
  /// Documents to read
  #[command(flatten)]
  pub input: InputArgs,
}

/// Function for the [`Commands::Titles`] in the CLI.
///
/// A document that fails to load is reported and skipped.
pub async fn titles<I: UserInteraction>(
  interaction: &I,
  config: Config,
  args: TitlesArgs,
) -> Result<()> {
  let files = args.input.discover(interaction, &config)?;
  let scanner = args.input.scanner(config);

  for path in files.accepted() {
    match scanner.load(path).await {
      Ok(document) => {
        let titles: Vec<(u32, String)> =
          document.titles().map(|(number, title)| (number, title.to_string())).collect();
        interaction.reply(ResponseContent::Titles(path, &titles))?;
      },
      Err(e) => {
        interaction.reply(ResponseContent::Error(&format!("{}: {e}", path.display())))?
      },
    }
  }
  Ok(())
}
