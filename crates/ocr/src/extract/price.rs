//! Price tokens and the OCR-tolerant price normalizer.

use std::str::FromStr;

use rust_decimal::Decimal;

re!(re_price_token, r"\d+[.,]\d{2,3}");
re!(re_currency, r"(?i)EUR|USD|GBP|[€$£¥]");

/// A price-shaped substring of a line and where it starts (byte offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceToken<'a> {
    pub raw: &'a str,
    pub offset: usize,
}

impl PriceToken<'_> {
    pub fn value(&self) -> Decimal {
        normalize(self.raw)
    }
}

/// Every price-shaped substring of `line`, left to right.
pub fn tokens(line: &str) -> Vec<PriceToken<'_>> {
    re_price_token()
        .find_iter(line)
        .map(|m| PriceToken { raw: m.as_str(), offset: m.start() })
        .collect()
}

/// Turn a raw price string into a non-negative decimal. Returns zero for
/// anything that cannot be read as a number.
pub fn normalize(raw: &str) -> Decimal {
    let stripped = re_currency().replace_all(raw.trim(), "");
    let corrected: String = stripped.trim().chars().map(correct_ocr_char).collect();
    let resolved = resolve_separators(&corrected);
    let cleaned: String =
        resolved.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    parse_decimal(&cleaned)
}

/// Letters OCR commonly produces in place of digits.
fn correct_ocr_char(c: char) -> char {
    match c {
        'O' | 'o' => '0',
        'I' | 'l' | '|' => '1',
        'S' | 's' => '5',
        'B' => '8',
        'G' => '6',
        'Z' => '2',
        other => other,
    }
}

/// The rightmost `,` or `.` is the decimal point; every other separator is a
/// thousands mark and dropped. A lone `,` therefore becomes the decimal point.
fn resolve_separators(s: &str) -> String {
    let Some(decimal_at) = s.rfind([',', '.']) else {
        return s.to_string();
    };
    s.char_indices()
        .filter_map(|(i, c)| match c {
            ',' | '.' if i == decimal_at => Some('.'),
            ',' | '.' => None,
            other => Some(other),
        })
        .collect()
}

fn parse_decimal(s: &str) -> Decimal {
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s == "." {
        return Decimal::ZERO;
    }
    let padded;
    let s = if s.starts_with('.') {
        padded = format!("0{s}");
        padded.as_str()
    } else {
        s
    };
    Decimal::from_str(s).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn comma_is_decimal_point() {
        assert_eq!(normalize("1,25"), dec("1.25"));
    }

    #[test]
    fn comma_rightmost_dot_is_thousands() {
        assert_eq!(normalize("1.200,50"), dec("1200.50"));
    }

    #[test]
    fn dot_rightmost_comma_is_thousands() {
        assert_eq!(normalize("1,200.50"), dec("1200.50"));
    }

    #[test]
    fn ocr_letters_become_digits() {
        assert_eq!(normalize("12,5O"), dec("12.50"));
        assert_eq!(normalize("l,Z5"), dec("1.25"));
        assert_eq!(normalize("B,G0"), dec("8.60"));
        assert_eq!(normalize("S.|o"), dec("5.10"));
    }

    #[test]
    fn currency_markers_are_stripped() {
        assert_eq!(normalize(" 3,99 € "), dec("3.99"));
        assert_eq!(normalize("$12.00"), dec("12.00"));
        assert_eq!(normalize("EUR 4,10"), dec("4.10"));
        assert_eq!(normalize("usd 2.5"), dec("2.5"));
    }

    #[test]
    fn unparsable_is_zero() {
        assert_eq!(normalize(""), Decimal::ZERO);
        assert_eq!(normalize("abc"), Decimal::ZERO);
        assert_eq!(normalize(",."), Decimal::ZERO);
    }

    #[test]
    fn never_negative() {
        assert_eq!(normalize("-3,50"), dec("3.50"));
    }

    #[test]
    fn dangling_separators() {
        assert_eq!(normalize("7,"), dec("7"));
        assert_eq!(normalize(",99"), dec("0.99"));
    }

    #[test]
    fn repeated_separators_keep_only_the_last() {
        assert_eq!(normalize("1.234.567,89"), dec("1234567.89"));
        assert_eq!(normalize("1,234,567"), dec("1234.567"));
    }

    #[test]
    fn tokens_keep_order_and_offsets() {
        let t = tokens("2 PAN 0,50 1,00");
        assert_eq!(t.len(), 2);
        assert_eq!(t[0], PriceToken { raw: "0,50", offset: 6 });
        assert_eq!(t[1], PriceToken { raw: "1,00", offset: 11 });
    }

    #[test]
    fn tokens_need_two_decimals() {
        assert!(tokens("PAN 3,5").is_empty());
        assert!(tokens("CAJA 12").is_empty());
        assert_eq!(tokens("AGUA 1.234")[0].raw, "1.234");
    }

    #[test]
    fn token_value_uses_normalizer() {
        assert_eq!(tokens("LECHE 0,89")[0].value(), dec("0.89"));
    }
}
