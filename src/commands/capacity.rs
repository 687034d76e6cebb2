//! Capacity command - check how much text a carrier can hold.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lsbhide::{stego, Settings};

use super::{load_carrier, CommandExecutor};

/// Show a carrier's capacity and whether a message would fit.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Carrier file (PNG, BMP or integer PCM WAV)
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Message to measure against the capacity
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Whether a password will be used (does not change capacity)
    #[arg(short, long)]
    pub password: bool,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self, settings: &Settings) -> Result<()> {
        let carrier = load_carrier(&self.carrier, settings)?;
        let report = stego::check_capacity(&carrier, &self.message, self.password);

        println!("Carrier Capacity");
        println!("================");
        println!("  Carrier: {}", carrier);
        println!("  Max capacity: {} bytes", report.max_capacity);

        if !self.message.is_empty() {
            println!("  Message size: {} bytes", report.message_size);
            println!("  Usage: {:.1}%", report.capacity_percent);
            if report.can_encode {
                println!("  Status: FITS");
            } else {
                println!(
                    "  Status: TOO LARGE by {} bytes",
                    report.message_size - report.max_capacity
                );
            }
        }

        Ok(())
    }
}
