//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod capacity;
mod config;
mod decode;
mod encode;
mod info;

pub use capacity::CapacityCommand;
pub use config::ConfigCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use info::InfoCommand;

use std::path::Path;

use anyhow::{Context, Result};

use lsbhide::{Carrier, Settings};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, settings: &Settings) -> Result<()>;
}

/// Loads a carrier file, honouring the configured size limit.
fn load_carrier(path: &Path, settings: &Settings) -> Result<Carrier> {
    let carrier = Carrier::from_file_with_limit(path, settings.max_carrier_bytes)
        .with_context(|| format!("Failed to load carrier {}", path.display()))?;
    log::info!("Loaded {} carrier: {}", carrier.kind(), carrier);
    Ok(carrier)
}

/// Treats an empty password the same as none.
fn effective_password(password: &Option<String>) -> Option<&str> {
    password.as_deref().filter(|p| !p.is_empty())
}
