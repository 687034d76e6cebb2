//! Settings command.

use anyhow::{Context, Result};
use clap::Args;

use lsbhide::Settings;

use super::CommandExecutor;

/// Show the effective settings, optionally writing them to the default file.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Write the effective settings to ~/.lsbhide/config.toml
    #[arg(long)]
    pub save: bool,
}

impl CommandExecutor for ConfigCommand {
    fn execute(&self, settings: &Settings) -> Result<()> {
        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        print!("{}", content);

        if self.save {
            let path = settings.save().context("Failed to save settings")?;
            println!();
            println!("Settings written to {}", path.display());
        }

        Ok(())
    }
}
