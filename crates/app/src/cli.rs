//! CLI argument definitions using clap
//!
//! The command implementations live in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Recibo - Turn receipt text into structured drafts
#[derive(Parser)]
#[command(name = "recibo")]
#[command(about = "Extract merchant, date, items and total from receipts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to config.toml in the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse OCR text files into receipt drafts
    Parse {
        /// Text files to parse; `-` reads standard input
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Date to use when a receipt carries none (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Categorization rules file, layered over the built-in keywords
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Run OCR on a receipt image and parse the result
    #[cfg(feature = "tesseract")]
    Scan {
        /// Receipt image (PNG or JPEG)
        image: PathBuf,

        /// Date to use when a receipt carries none (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Categorization rules file, layered over the built-in keywords
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show which category an item description falls under
    Categorize {
        /// Item description as printed on the receipt
        description: String,

        /// Categorization rules file, layered over the built-in keywords
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}
