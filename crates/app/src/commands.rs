//! Command implementations

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tokio::task::JoinSet;

use recibo_categorize::KeywordCategorizer;
use recibo_core::{Categorize, ReceiptDraft};
use recibo_ocr::Extractor;

use crate::cli::OutputFormat;
use crate::config::Config;

/// A receipt text and where it came from.
pub struct Input {
    pub source: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct Parsed {
    pub source: String,
    pub receipt: ReceiptDraft,
}

pub async fn cmd_parse(
    config: &Config,
    files: &[PathBuf],
    date: Option<NaiveDate>,
    rules: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let categorizer = Arc::new(config.categorizer(rules)?);
    let inputs = files.iter().map(|f| read_input(f)).collect::<Result<Vec<_>>>()?;

    let parsed = parse_all(inputs, categorizer, date).await?;
    tracing::info!(receipts = parsed.len(), "parsed receipts");

    print!("{}", render(&parsed, config.output_format(format))?);
    Ok(())
}

fn read_input(path: &Path) -> Result<Input> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(Input { source: "-".to_string(), text });
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Input { source: path.display().to_string(), text })
}

/// Parse every input on the blocking pool. Results come back in input order.
pub async fn parse_all(
    inputs: Vec<Input>,
    categorizer: Arc<KeywordCategorizer>,
    date: Option<NaiveDate>,
) -> Result<Vec<Parsed>> {
    let mut set = JoinSet::new();
    for (index, input) in inputs.into_iter().enumerate() {
        let categorizer = Arc::clone(&categorizer);
        set.spawn_blocking(move || {
            let draft = match date {
                Some(date) => Extractor::parse_on(&input.text, date),
                None => Extractor::parse(&input.text),
            };
            let receipt = draft.categorized(categorizer.as_ref());
            tracing::debug!(source = %input.source, items = receipt.items.len(), "parsed");
            (index, Parsed { source: input.source, receipt })
        });
    }

    let mut parsed = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        parsed.push(joined.context("Parser task failed")?);
    }
    parsed.sort_by_key(|(index, _)| *index);
    Ok(parsed.into_iter().map(|(_, p)| p).collect())
}

/// One input prints as a bare draft; several print as a list tagged by source.
pub fn render(parsed: &[Parsed], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = match parsed {
                [single] => serde_json::to_string_pretty(&single.receipt)?,
                many => serde_json::to_string_pretty(many)?,
            };
            Ok(json + "\n")
        }
        OutputFormat::Text => {
            let show_source = parsed.len() > 1;
            Ok(parsed
                .iter()
                .map(|p| render_text(p, show_source))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

fn render_text(parsed: &Parsed, show_source: bool) -> String {
    let r = &parsed.receipt;
    let mut out = String::new();
    if show_source {
        out.push_str(&format!("== {}\n", parsed.source));
    }
    out.push_str(&format!("{}  {}\n", r.merchant, r.date));
    for item in &r.items {
        out.push_str(&format!(
            "  {:<32} {:>9}  {}\n",
            truncate(&item.description, 32),
            item.price,
            item.category
        ));
    }
    out.push_str(&format!("  {:<32} {:>9}\n", "TOTAL", r.total));
    out
}

/// Truncate to `max` characters, marking the cut with `~`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}~")
    }
}

pub fn cmd_categorize(config: &Config, description: &str, rules: Option<&Path>) -> Result<()> {
    let categorizer = config.categorizer(rules)?;
    println!("{}", describe_category(&categorizer, description));
    Ok(())
}

pub fn describe_category(categorizer: &KeywordCategorizer, description: &str) -> String {
    match categorizer.find_matching_rule(description) {
        Some(rule) => format!("{} (rule: {})", rule.category, rule.name),
        None => format!("{} (no rule matched)", categorizer.categorize(description)),
    }
}

#[cfg(feature = "tesseract")]
pub async fn cmd_scan(
    config: &Config,
    image: &Path,
    date: Option<NaiveDate>,
    rules: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<()> {
    use recibo_ocr::{ReceiptPipeline, TesseractRecognizer};
    use tokio::sync::mpsc;

    let recognizer = TesseractRecognizer::new(config.ocr.data_path.clone(), &config.ocr.lang);
    let mut pipeline = ReceiptPipeline::new(recognizer, config.categorizer(rules)?);
    if let Some(date) = date {
        pipeline = pipeline.with_processing_date(date);
    }

    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;

    let (tx, mut rx) = mpsc::channel::<f32>(16);
    let reporter = tokio::spawn(async move {
        while let Some(fraction) = rx.recv().await {
            tracing::info!("OCR {:.0}%", fraction * 100.0);
        }
    });

    let cancel = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let result = pipeline
        .scan_until(bytes, Some(tx), cancel)
        .await
        .with_context(|| format!("Failed to scan {}", image.display()))?;
    let _ = reporter.await;

    let parsed = [Parsed { source: image.display().to_string(), receipt: result.draft }];
    print!("{}", render(&parsed, config.output_format(format))?);
    Ok(())
}
