pub mod extract;
pub mod pipeline;
pub mod recognizer;

pub use extract::{Extractor, ItemScan, LineKind, MerchantAlias, PriceToken};
pub use pipeline::{PipelineError, ReceiptPipeline, ScanResult};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
