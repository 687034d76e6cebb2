//! Carrier info command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lsbhide::{stego, BitCarrier, Settings};

use super::{load_carrier, CommandExecutor};

/// Describe a carrier file: medium, format and usable bits.
#[derive(Args, Debug)]
pub struct InfoCommand {
    /// Carrier file
    #[arg(short, long)]
    pub carrier: PathBuf,
}

impl CommandExecutor for InfoCommand {
    fn execute(&self, settings: &Settings) -> Result<()> {
        let carrier = load_carrier(&self.carrier, settings)?;

        println!("{}", self.carrier.display());
        println!("  Kind: {}", carrier.kind());
        println!("  Details: {}", carrier);
        println!("  Usable bits: {}", carrier.sample_count());
        println!(
            "  Capacity: {} bytes",
            stego::compute_capacity(&carrier, false)
        );

        Ok(())
    }
}
