//! Decode command - extract a hidden text message from a carrier.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lsbhide::{stego, Settings, StegoError};

use super::{effective_password, load_carrier, CommandExecutor};

/// Extract a hidden message from a carrier.
///
/// A missing message and a wrong password look the same; both print
/// "No hidden message found or incorrect password".
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Carrier file holding the message
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Password used when encoding
    #[arg(short, long)]
    pub password: Option<String>,

    /// Write the message to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self, settings: &Settings) -> Result<()> {
        let carrier = load_carrier(&self.carrier, settings)?;

        let message = match stego::decode_text(&carrier, effective_password(&self.password)) {
            Ok(message) => message,
            Err(StegoError::NoHiddenMessage) => {
                println!("No hidden message found or incorrect password");
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to extract message"),
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &message)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                println!("Message written to: {}", path.display());
                println!("  Size: {} bytes", message.len());
            }
            None => println!("{}", message),
        }

        Ok(())
    }
}
