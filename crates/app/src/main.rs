//! Recibo CLI - Receipt text to structured drafts
//!
//! Usage:
//!   recibo parse receipt.txt          Parse OCR text (`-` for stdin)
//!   recibo scan receipt.jpg           OCR and parse an image (feature `tesseract`)
//!   recibo categorize "LECHE ENTERA"  Show the category for an item

mod cli;
mod commands;
mod config;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { files, date, rules, format } => {
            commands::cmd_parse(&config, &files, date, rules.as_deref(), format).await
        }
        #[cfg(feature = "tesseract")]
        Commands::Scan { image, date, rules, format } => {
            commands::cmd_scan(&config, &image, date, rules.as_deref(), format).await
        }
        Commands::Categorize { description, rules } => {
            commands::cmd_categorize(&config, &description, rules.as_deref())
        }
    }
}
