use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{Categorize, Category};
use crate::money::Money;

/// Merchant name used when nothing on the receipt identifies the store.
pub const UNKNOWN_MERCHANT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// Always within `(0, 1000)` when produced by the extractor.
    pub price: Money,
    pub category: Category,
}

impl LineItem {
    pub fn new(description: impl Into<String>, price: Money) -> Self {
        Self { description: description.into(), price, category: Category::Uncategorized }
    }
}

/// Best-effort structured reading of one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptDraft {
    pub merchant: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub total: Money,
    pub items: Vec<LineItem>,
}

impl ReceiptDraft {
    /// An empty draft dated `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            merchant: UNKNOWN_MERCHANT.to_string(),
            date,
            total: Money::zero(),
            items: Vec::new(),
        }
    }

    pub fn items_sum(&self) -> Money {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Returns a copy of this draft with every item run through `categorizer`.
    pub fn categorized<C: Categorize + ?Sized>(self, categorizer: &C) -> ReceiptDraft {
        let items = self
            .items
            .into_iter()
            .map(|item| LineItem { category: categorizer.categorize(&item.description), ..item })
            .collect();
        ReceiptDraft { items, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Everything(Category);

    impl Categorize for Everything {
        fn categorize(&self, _description: &str) -> Category {
            self.0
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_draft_uses_sentinels() {
        let d = ReceiptDraft::empty(date(2024, 2, 1));
        assert_eq!(d.merchant, UNKNOWN_MERCHANT);
        assert!(d.total.is_zero());
        assert!(d.items.is_empty());
    }

    #[test]
    fn new_item_is_uncategorized() {
        let item = LineItem::new("PAN", Money::from_cents(50));
        assert_eq!(item.category, Category::Uncategorized);
    }

    #[test]
    fn categorized_fills_every_item_and_keeps_the_rest() {
        let mut d = ReceiptDraft::empty(date(2024, 2, 1));
        d.items.push(LineItem::new("PAN", Money::from_cents(50)));
        d.items.push(LineItem::new("LECHE", Money::from_cents(89)));
        d.total = Money::from_cents(139);

        let c = d.clone().categorized(&Everything(Category::Bakery));
        assert!(c.items.iter().all(|i| i.category == Category::Bakery));
        assert_eq!(c.total, d.total);
        assert_eq!(c.items_sum(), Money::from_cents(139));
    }

    #[test]
    fn date_serializes_as_iso() {
        let d = ReceiptDraft::empty(date(2024, 2, 1));
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["date"], "2024-02-01");
        assert_eq!(json["merchant"], "Unknown");
    }
}
