use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::mpsc;

use recibo_core::{Categorize, ReceiptDraft};

use crate::extract::Extractor;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("OCR returned no text")]
    EmptyText,
    #[error("Scan cancelled")]
    Cancelled,
    #[error("OCR worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// The result of a single receipt scan.
#[derive(Debug)]
pub struct ScanResult {
    /// Raw OCR text output.
    pub ocr_text: String,
    /// Extracted draft with categories filled in.
    pub draft: ReceiptDraft,
}

/// Orchestrates: OCR (blocking worker, progress reported) → extract → categorize.
pub struct ReceiptPipeline<R: OcrBackend, C: Categorize> {
    recognizer: Arc<R>,
    categorizer: C,
    processing_date: Option<NaiveDate>,
}

impl<R: OcrBackend + 'static, C: Categorize> ReceiptPipeline<R, C> {
    pub fn new(recognizer: R, categorizer: C) -> Self {
        Self { recognizer: Arc::new(recognizer), categorizer, processing_date: None }
    }

    /// Pin the fallback date used when a receipt has none; defaults to today.
    pub fn with_processing_date(mut self, date: NaiveDate) -> Self {
        self.processing_date = Some(date);
        self
    }

    /// Scan an image file on disk.
    pub async fn scan_file(
        &self,
        path: &Path,
        progress: Option<mpsc::Sender<f32>>,
    ) -> Result<ScanResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.scan(bytes, progress).await
    }

    /// Scan raw image bytes. Progress fractions are sent to `progress` on a
    /// best-effort basis; a full channel drops updates rather than stalling OCR.
    pub async fn scan(
        &self,
        image: Vec<u8>,
        progress: Option<mpsc::Sender<f32>>,
    ) -> Result<ScanResult, PipelineError> {
        let recognizer = Arc::clone(&self.recognizer);
        let ocr_text = tokio::task::spawn_blocking(move || {
            let report = |fraction: f32| {
                if let Some(tx) = &progress {
                    let _ = tx.try_send(fraction.clamp(0.0, 1.0));
                }
            };
            recognizer.recognize(&image, &report)
        })
        .await??;

        // Nothing to parse: the one failure the extractor cannot degrade from.
        if ocr_text.trim().is_empty() {
            return Err(PipelineError::EmptyText);
        }

        let draft = self.extract(&ocr_text);
        tracing::info!(
            merchant = %draft.merchant,
            date = %draft.date,
            items = draft.items.len(),
            total = %draft.total,
            "receipt scanned"
        );
        Ok(ScanResult { ocr_text, draft })
    }

    /// Like [`ReceiptPipeline::scan`], but gives up with
    /// [`PipelineError::Cancelled`] as soon as `cancel` completes. The OCR
    /// worker itself runs to completion in the background; its output is
    /// discarded.
    pub async fn scan_until<F>(
        &self,
        image: Vec<u8>,
        progress: Option<mpsc::Sender<f32>>,
        cancel: F,
    ) -> Result<ScanResult, PipelineError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.scan(image, progress) => result,
            () = cancel => {
                tracing::warn!("receipt scan cancelled");
                Err(PipelineError::Cancelled)
            }
        }
    }

    /// Extract and categorize already-recognized text.
    pub fn extract(&self, ocr_text: &str) -> ReceiptDraft {
        let draft = match self.processing_date {
            Some(date) => Extractor::parse_on(ocr_text, date),
            None => Extractor::parse(ocr_text),
        };
        draft.categorized(&self.categorizer)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
