use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available - build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
///
/// Implementations accept raw image bytes (PNG/JPEG or a rendered document
/// page) and return the recognized text. Recognition can take seconds, so
/// backends report progress in `[0, 1]` through `progress` as they go.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8], progress: &dyn Fn(f32)) -> Result<String, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string, so the extraction pipeline can be exercised
/// without Tesseract installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8], progress: &dyn Fn(f32)) -> Result<String, OcrError> {
        progress(0.0);
        progress(1.0);
        Ok(self.text.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(
            &self,
            image_bytes: &[u8],
            progress: &dyn Fn(f32),
        ) -> Result<String, OcrError> {
            progress(0.0);
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            progress(0.25);
            let text = lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
            progress(1.0);
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("MERCADONA\n2 PAN 0,50 1,00");
        assert_eq!(r.recognize(b"fake image data", &|_| {}).unwrap(), "MERCADONA\n2 PAN 0,50 1,00");
    }

    #[test]
    fn mock_ignores_image_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything", &|_| {}).unwrap(), "hello");
        assert_eq!(r.recognize(b"", &|_| {}).unwrap(), "hello");
    }

    #[test]
    fn mock_reports_start_and_finish() {
        let seen = RefCell::new(Vec::new());
        MockRecognizer::new("x").recognize(b"", &|p| seen.borrow_mut().push(p)).unwrap();
        assert_eq!(seen.into_inner(), vec![0.0, 1.0]);
    }
}
