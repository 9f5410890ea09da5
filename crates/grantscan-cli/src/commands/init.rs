//! Module for the "init" command.

use super::*;

/// Function for the [`Commands::Init`] in the CLI.
///
/// Writes the built-in configuration to `path` so it can be edited. An
/// existing file is only replaced after confirmation.
pub fn init<I: UserInteraction>(interaction: &I, path: PathBuf) -> Result<()> {
  let prompt = format!("{} already exists. Replace it with the defaults?", path.display());
  if path.exists() && !interaction.confirm(&prompt)? {
    interaction.reply(ResponseContent::Info("Keeping the existing configuration"))?;
    return Ok(());
  }

  Config::default().save(&path)?;
  debug!("Wrote default configuration to {}", path.display());
  interaction.reply(ResponseContent::Success(&format!(
    "Wrote default configuration to {}",
    path.display()
  )))?;
  Ok(())
}
