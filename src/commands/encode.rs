//! Encode command - hide a text message in a carrier.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lsbhide::{stego, Settings};

use super::{effective_password, load_carrier, CommandExecutor};

/// Hide a text message in a PNG, BMP or WAV carrier.
///
/// The output keeps the carrier's format, size and sample count; only the
/// least significant bits used by the message change.
/// Without --message or --message-file the message is read from stdin.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Carrier file (PNG, BMP or integer PCM WAV)
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Text message to hide
    #[arg(short, long, conflicts_with = "message_file")]
    pub message: Option<String>,

    /// Read the message from a UTF-8 text file
    #[arg(long, conflicts_with = "message")]
    pub message_file: Option<PathBuf>,

    /// Password that scatters the message bits (obfuscation, not encryption)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Output file (default: <carrier stem><output_suffix>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self, settings: &Settings) -> Result<()> {
        let message = self.read_message()?;
        let password = effective_password(&self.password);

        let mut carrier = load_carrier(&self.carrier, settings)?;
        let report = stego::check_capacity(&carrier, &message, password.is_some());
        if !report.can_encode {
            anyhow::bail!(
                "Message is {} bytes but {} can hold at most {} bytes",
                report.message_size,
                self.carrier.display(),
                report.max_capacity
            );
        }

        let summary = stego::encode(&mut carrier, message.as_bytes(), password)
            .context("Failed to hide message")?;
        log::debug!("Wrote {} carrier bits", summary.bits_written);

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| settings.output_path_for(&self.carrier, carrier.extension()));
        carrier
            .save(&output)
            .with_context(|| format!("Failed to write {}", output.display()))?;

        println!("Message hidden in: {}", output.display());
        println!(
            "  Used: {} of {} bytes ({:.1}%)",
            report.message_size, report.max_capacity, report.capacity_percent
        );
        if password.is_some() {
            println!("  Bit order: keyed by password");
        }

        Ok(())
    }
}

impl EncodeCommand {
    fn read_message(&self) -> Result<String> {
        if let Some(message) = &self.message {
            return Ok(message.clone());
        }

        if let Some(path) = &self.message_file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read message file {}", path.display()));
        }

        let mut message = String::new();
        io::stdin()
            .read_to_string(&mut message)
            .context("Failed to read message from stdin")?;
        Ok(message)
    }
}
