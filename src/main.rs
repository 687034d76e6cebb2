//! lsbhide - hide text in images and audio
//!
//! A CLI tool for least-significant-bit steganography in PNG/BMP images and
//! PCM WAV audio, with optional password-keyed bit ordering.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use lsbhide::Settings;

use commands::{
    CapacityCommand, CommandExecutor, ConfigCommand, DecodeCommand, EncodeCommand, InfoCommand,
};

/// lsbhide - hide text in images and audio
///
/// Messages are written into the least significant bits of a lossless
/// carrier. A password scatters the bits over the carrier; it does not
/// encrypt the message.
#[derive(Parser)]
#[command(name = "lsbhide")]
#[command(version)]
#[command(about = "LSB steganography for PNG/BMP images and WAV audio")]
#[command(long_about = None)]
struct Cli {
    /// Settings file (default: ~/.lsbhide/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in a carrier
    Encode(EncodeCommand),

    /// Extract a hidden message from a carrier
    Decode(DecodeCommand),

    /// Show how many bytes a carrier can hold
    Capacity(CapacityCommand),

    /// Describe a carrier file
    Info(InfoCommand),

    /// Show or save the settings
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialize logger")?;

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load().context("Failed to load settings")?,
    };

    match &cli.command {
        Commands::Encode(cmd) => cmd.execute(&settings),
        Commands::Decode(cmd) => cmd.execute(&settings),
        Commands::Capacity(cmd) => cmd.execute(&settings),
        Commands::Info(cmd) => cmd.execute(&settings),
        Commands::Config(cmd) => cmd.execute(&settings),
    }
}
