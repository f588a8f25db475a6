//! Choosing the receipt total: the printed one when it is believable,
//! otherwise whatever the items add up to.

use recibo_core::{LineItem, Money};

use super::fold_upper;
use super::price;

const TOTAL_KEYWORDS: &[&str] = &["TOTAL", "IMPORTE", "PAGAR", "A PAGAR", "LIQUIDO"];

/// A printed total further than this from the item sum is not trusted.
pub const MAX_TOTAL_DEVIATION: Money = Money::from_units(30);

/// The amount on the last total-like line, ignoring subtotals.
pub fn detect(lines: &[&str]) -> Option<Money> {
    lines
        .iter()
        .filter(|line| {
            let folded = fold_upper(line);
            !folded.contains("SUBTOTAL") && TOTAL_KEYWORDS.iter().any(|k| folded.contains(k))
        })
        .filter_map(|line| price::tokens(line).last().map(|t| Money::from_decimal(t.value())))
        .last()
}

pub fn reconcile(detected: Option<Money>, calculated: Money, items: &[LineItem]) -> Money {
    let total = match detected {
        Some(t) if !t.is_zero() && t.abs_diff(calculated) <= MAX_TOTAL_DEVIATION => t,
        Some(t) => {
            tracing::debug!(detected = %t, %calculated, "printed total not trusted");
            t.max(calculated)
        }
        None => calculated,
    };

    if total.is_zero() {
        if let Some(top) = items.iter().map(|i| i.price).max() {
            return top;
        }
    }
    total
}
