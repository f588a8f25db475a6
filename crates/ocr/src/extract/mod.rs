//! Receipt extraction engine: raw OCR text in, [`ReceiptDraft`] out.
//!
//! Every stage is a pure function over the trimmed, non-empty lines of the
//! input. Nothing here fails; each stage degrades to a default instead.

use chrono::{Local, NaiveDate};
use regex::Regex;

use recibo_core::{ReceiptDraft, UNKNOWN_MERCHANT};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
    ($name:ident, words $table:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| $crate::extract::keyword_regex($table))
        }
    };
}

pub mod classify;
pub mod date;
pub mod items;
pub mod merchant;
pub mod price;
pub mod total;

pub use classify::LineKind;
pub use items::ItemScan;
pub use merchant::MerchantAlias;
pub use price::PriceToken;

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Extract a draft from raw OCR text, dating it today when the receipt
    /// carries no readable date.
    pub fn parse(ocr_text: &str) -> ReceiptDraft {
        Self::parse_on(ocr_text, Local::now().date_naive())
    }

    /// Same as [`Extractor::parse`] with an explicit processing date, which
    /// makes the result fully deterministic.
    pub fn parse_on(ocr_text: &str, processing_date: NaiveDate) -> ReceiptDraft {
        let lines = split_lines(ocr_text);

        let merchant =
            merchant::identify(&lines).unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());
        let date = date::extract(&lines).unwrap_or(processing_date);

        let ItemScan { items, calculated_total } = items::extract(&lines);
        let detected_total = total::detect(&lines);
        let total = total::reconcile(detected_total, calculated_total, &items);

        tracing::debug!(
            %merchant,
            %date,
            items = items.len(),
            %calculated_total,
            detected_total = ?detected_total.map(|t| t.to_string()),
            %total,
            "receipt extracted"
        );

        ReceiptDraft { merchant, date, total, items }
    }
}

/// Split into trimmed, non-empty lines, keeping order and duplicates.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

// ── Shared matching helpers ───────────────────────────────────────────────────

/// Uppercase and strip the Spanish accents, so keyword tables can be written
/// in plain ASCII. Only for matching: byte offsets do not survive it.
pub(crate) fn fold_upper(s: &str) -> String {
    s.chars()
        .flat_map(char::to_uppercase)
        .map(|c| match c {
            'Á' | 'À' => 'A',
            'É' | 'È' => 'E',
            'Í' | 'Ì' => 'I',
            'Ó' | 'Ò' => 'O',
            'Ú' | 'Ù' | 'Ü' => 'U',
            other => other,
        })
        .collect()
}

/// Compile a keyword table into one alternation. Word boundaries are only
/// added on alphanumeric edges so entries like `AUT.` still match.
pub(crate) fn keyword_regex(words: &[&str]) -> Regex {
    let alternatives: Vec<String> = words
        .iter()
        .map(|w| {
            let mut pat = String::new();
            if w.starts_with(char::is_alphanumeric) {
                pat.push_str(r"\b");
            }
            pat.push_str(&regex::escape(w));
            if w.ends_with(char::is_alphanumeric) {
                pat.push_str(r"\b");
            }
            pat
        })
        .collect();
    Regex::new(&format!("(?:{})", alternatives.join("|"))).expect("invalid keyword table")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
