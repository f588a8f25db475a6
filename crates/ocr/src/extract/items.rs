//! Item lines: find the charged price, derive the description, keep a running
//! total of line amounts.

use recibo_core::{LineItem, Money};
use rust_decimal::Decimal;

use super::classify::{classify, LineKind};
use super::fold_upper;
use super::price::{self, PriceToken};

/// Prices at or above this are misreads, not groceries.
const PRICE_CEILING: Decimal = Decimal::ONE_THOUSAND;

/// Lines carrying any of these are receipt metadata, not purchases.
const SUMMARY_KEYWORDS: &[&str] = &[
    "TOTAL",
    "SUBTOTAL",
    "SUB-TOTAL",
    "IVA",
    "I.V.A.",
    "BASE IMPONIBLE",
    "CUOTA",
    "TAX",
    "IMPORTE",
    "A PAGAR",
    "LIQUIDO",
    "ENTREGADO",
    "ENTREGA",
    "CAMBIO",
    "EFECTIVO",
    "TARJETA",
    "VISA",
    "MASTERCARD",
    "CONTACTLESS",
    "CASH",
    "CARD",
    "CHANGE",
    "DESCUENTO",
    "DTO",
    "DISCOUNT",
    "AHORRO",
    "REDONDEO",
    "ROUNDING",
    "TERMINAL",
    "TPV",
    "AUTORIZACION",
    "AUT.",
    "OPERACION",
    "COMERCIO",
    "N.C.",
];

re!(re_summary, words SUMMARY_KEYWORDS);
re!(re_garbage, r"\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}|\d{9,}");
re!(re_leading_quantity, r"^\d+(?:\s+|$)");

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemScan {
    pub items: Vec<LineItem>,
    /// Sum of each accepted line's last amount.
    pub calculated_total: Money,
}

pub fn extract(lines: &[&str]) -> ItemScan {
    let mut scan = ItemScan::default();
    for line in lines {
        if let Some((item, line_amount)) = extract_line(line) {
            scan.calculated_total = scan.calculated_total + line_amount;
            scan.items.push(item);
        }
    }
    scan
}

/// The item on `line` and the amount it adds to the running total.
fn extract_line(line: &str) -> Option<(LineItem, Money)> {
    let kind = classify(line);
    if kind == LineKind::Noise {
        return None;
    }

    let tokens = price::tokens(line);
    let (first, last) = (tokens.first()?, tokens.last()?);
    let charged = charged_token(&tokens)?;

    let description = describe(&line[..first.offset]);
    if description.chars().count() <= 1 {
        return reject(line, "description too short");
    }

    let price = Money::from_decimal(charged.value());
    if price <= Money::zero() || price.as_decimal() >= PRICE_CEILING {
        return reject(line, "price out of range");
    }
    if re_summary().is_match(&fold_upper(line)) {
        return reject(line, "summary line");
    }
    // Quantity-led lines may carry barcodes; only free-form lines are screened.
    if kind == LineKind::Undetermined && re_garbage().is_match(line) {
        return reject(line, "date or id digits");
    }

    Some((LineItem::new(description, price), Money::from_decimal(last.value())))
}

/// One price is the charge. With several, the second-to-last is taken as the
/// unit price, assuming `[qty] [description] [unit price] [line amount]`
/// columns; receipts printing their columns in another order misparse here.
fn charged_token<'a>(tokens: &'a [PriceToken<'a>]) -> Option<&'a PriceToken<'a>> {
    match tokens.len() {
        0 => None,
        1 => tokens.first(),
        n => tokens.get(n - 2),
    }
}

fn describe(prefix: &str) -> String {
    re_leading_quantity().replace(prefix.trim(), "").trim().to_string()
}

fn reject<T>(line: &str, reason: &str) -> Option<T> {
    tracing::trace!(line, reason, "item candidate rejected");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn single(line: &str) -> Option<LineItem> {
        extract(&[line]).items.into_iter().next()
    }

    #[test]
    fn single_price_is_the_charge() {
        let item = single("LECHE ENTERA 0,89").unwrap();
        assert_eq!(item.description, "LECHE ENTERA");
        assert_eq!(item.price, cents(89));
    }

    #[test]
    fn second_to_last_price_is_the_unit_price() {
        let scan = extract(&["2 PAN 0,50 1,00"]);
        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].description, "PAN");
        assert_eq!(scan.items[0].price, cents(50));
        assert_eq!(scan.calculated_total, cents(100));
    }

    #[test]
    fn three_prices_pick_the_middle_one() {
        let scan = extract(&["3 AGUA 1,10 0,40 1,20"]);
        assert_eq!(scan.items[0].description, "AGUA");
        assert_eq!(scan.items[0].price, cents(40));
        assert_eq!(scan.calculated_total, cents(120));
    }

    #[test]
    fn description_stops_at_first_price() {
        let item = single("CAFE 250G 2,35 2,35").unwrap();
        assert_eq!(item.description, "CAFE 250G");
    }

    #[test]
    fn lines_without_prices_are_skipped() {
        let scan = extract(&["MERCADONA S.A.", "01/02/2024", "PAN 3"]);
        assert!(scan.items.is_empty());
        assert!(scan.calculated_total.is_zero());
    }

    #[test]
    fn price_bounds_are_exclusive() {
        assert!(single("TELEVISOR 1000,00").is_none());
        assert!(single("MUESTRA 0,00").is_none());
        assert!(single("MUEBLE 999,99").is_some());
        assert!(single("CHICLE 0,01").is_some());
    }

    #[test]
    fn three_decimal_prices_are_checked_unrounded() {
        let item = single("MUEBLE 999,999").unwrap();
        assert_eq!(item.price.as_decimal(), Decimal::new(999_999, 3));

        let scan = extract(&["SOBRE AZUCAR 0,004"]);
        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].price.as_decimal(), Decimal::new(4, 3));
        assert_eq!(scan.calculated_total.as_decimal(), Decimal::new(4, 3));

        assert_eq!(single("AGUA 1,234").unwrap().price.as_decimal(), Decimal::new(1234, 3));
    }

    #[test]
    fn short_descriptions_are_rejected() {
        assert!(single("X 1,00").is_none());
        assert!(single("2 1,00").is_none());
        assert!(single("1,00").is_none());
    }

    #[test]
    fn summary_lines_are_rejected() {
        for line in [
            "TOTAL 12,00",
            "SUBTOTAL 10,00",
            "IVA 21% 2,10",
            "TARJETA VISA 12,00",
            "ENTREGADO 20,00",
            "CAMBIO 8,00",
            "DESCUENTO 0,50",
            "1 DTO. PAN 0,10",
            "LÍQUIDO A PAGAR 5,00",
        ] {
            assert!(single(line).is_none(), "{line} should be rejected");
        }
    }

    #[test]
    fn summary_words_need_word_edges() {
        assert!(single("ACEITE OLIVA 3,95").is_some());
        assert!(single("TOTALMENTE NATURAL 1,20").is_some());
    }

    #[test]
    fn dates_and_long_ids_are_garbage() {
        assert!(single("FECHA 01/02/2024 12,30").is_none());
        assert!(single("TEL 912345678 0,00").is_none());
        assert!(single("REF 1234567890 2,50").is_none());
        assert!(single("CADUCA15/06/2024 3,20").is_none());
    }

    #[test]
    fn any_description_over_one_char_is_kept() {
        assert_eq!(single("*** 1,00").unwrap().description, "***");

        let scan = extract(&["4% 3,85 0,15"]);
        assert_eq!(scan.items[0].description, "4%");
        assert_eq!(scan.items[0].price, cents(385));
        assert_eq!(scan.calculated_total, cents(15));

        assert_eq!(single("1 500 1,00 1,00").unwrap().description, "500");
    }

    #[test]
    fn quantity_lines_may_carry_long_codes() {
        let item = single("1 8410000123456 LECHE 0,89").unwrap();
        assert_eq!(item.description, "8410000123456 LECHE");
    }

    #[test]
    fn noise_lines_are_skipped() {
        assert!(extract(&["TOTAL COMPRA", "IVA"]).items.is_empty());
    }

    #[test]
    fn running_total_uses_last_amount_of_each_line() {
        let scan = extract(&["2 PAN 0,50 1,00", "3 HUEVOS 0,20 0,60", "LECHE 0,89", "TOTAL 2,49"]);
        assert_eq!(scan.items.len(), 3);
        let unit_prices: Money = scan.items.iter().map(|i| i.price).sum();
        assert_eq!(unit_prices, cents(50 + 20 + 89));
        assert_eq!(scan.calculated_total, cents(249));
    }

    #[test]
    fn items_keep_line_order() {
        let scan = extract(&["B ITEM 2,00", "A ITEM 1,00"]);
        let names: Vec<_> = scan.items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(names, ["B ITEM", "A ITEM"]);
    }
}
