//! Merchant identification: known aliases first, then the first plausible
//! header line.

use std::sync::OnceLock;

use regex::Regex;

use super::fold_upper;

/// How many leading lines are considered for the positional fallback.
const HEADER_LINES: usize = 12;

re!(re_digit_run, r"\d{2,}");
re!(re_not_a_name,
    r"(?i)(?:\bC/|\b(?:CALLE|AVDA|AVENIDA|AV|PLAZA|PZA|PASEO|CTRA|CARRETERA|POL|TEL|TELF|TLF|TELEFONO|FAX|CIF|NIF|N\.?I\.?F|C\.?I\.?F|TICKET|FACTURA|OPERACION|NUM|N[º°ª])\b)");

/// A canonical retailer name and the spellings that identify it.
#[derive(Debug, Clone, Copy)]
pub struct MerchantAlias {
    pub name: &'static str,
    pub spellings: &'static [&'static str],
}

/// Ordered: the first alias with a matching spelling wins.
pub const MERCHANT_ALIASES: &[MerchantAlias] = &[
    MerchantAlias { name: "MERCADONA", spellings: &["MERCADONA"] },
    MerchantAlias { name: "CARREFOUR", spellings: &["CARREFOUR", "CARREFUR"] },
    MerchantAlias { name: "LIDL", spellings: &["LIDL"] },
    MerchantAlias { name: "ALDI", spellings: &["ALDI"] },
    MerchantAlias { name: "EROSKI", spellings: &["EROSKI"] },
    MerchantAlias { name: "ALCAMPO", spellings: &["ALCAMPO", "AUCHAN"] },
    MerchantAlias { name: "HIPERCOR", spellings: &["HIPERCOR"] },
    MerchantAlias { name: "EL CORTE INGLES", spellings: &["EL CORTE INGLES", "SUPERCOR"] },
    MerchantAlias { name: "CONSUM", spellings: &["CONSUM"] },
    MerchantAlias { name: "AHORRAMAS", spellings: &["AHORRAMAS"] },
    MerchantAlias { name: "BONPREU", spellings: &["BONPREU", "BON PREU"] },
    MerchantAlias { name: "CAPRABO", spellings: &["CAPRABO"] },
    MerchantAlias { name: "GADIS", spellings: &["GADIS"] },
    MerchantAlias { name: "MAKRO", spellings: &["MAKRO"] },
    MerchantAlias { name: "DIA", spellings: &["SUPERMERCADOS DIA", "DIA %"] },
];

impl MerchantAlias {
    /// One pattern per spelling, letter by letter with optional whitespace
    /// between letters (`M E R C A D O N A`).
    fn patterns(&self) -> Vec<Regex> {
        self.spellings.iter().filter_map(|s| spaced_pattern(s)).collect()
    }
}

/// Word edges are added on purpose, narrowing plain letter matching: `DIA`
/// must not fire inside `MEDIA`, nor `CONSUM` inside `CONSUMO`.
fn spaced_pattern(spelling: &str) -> Option<Regex> {
    let letters: Vec<char> = spelling.chars().filter(|c| !c.is_whitespace()).collect();
    let first = *letters.first()?;
    let last = *letters.last()?;

    let body: Vec<String> = letters.iter().map(|c| regex::escape(&c.to_string())).collect();
    let mut pat = String::new();
    if first.is_alphanumeric() {
        pat.push_str(r"\b");
    }
    pat.push_str(&body.join(r"\s*"));
    if last.is_alphanumeric() {
        pat.push_str(r"\b");
    }
    Regex::new(&pat).ok()
}

fn compiled_aliases() -> &'static [(&'static str, Vec<Regex>)] {
    static R: OnceLock<Vec<(&'static str, Vec<Regex>)>> = OnceLock::new();
    R.get_or_init(|| MERCHANT_ALIASES.iter().map(|a| (a.name, a.patterns())).collect())
}

/// Resolve the merchant, or `None` when neither an alias nor a header line
/// fits.
pub fn identify(lines: &[&str]) -> Option<String> {
    match_alias(lines).map(str::to_string).or_else(|| header_line(lines))
}

pub fn match_alias(lines: &[&str]) -> Option<&'static str> {
    let buffer = lines.iter().map(|l| fold_upper(l)).collect::<Vec<_>>().join("\n");
    compiled_aliases()
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(&buffer)))
        .map(|(name, _)| *name)
}

fn header_line(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .take(HEADER_LINES)
        .find(|l| {
            l.chars().count() > 3 && !re_digit_run().is_match(l) && !re_not_a_name().is_match(l)
        })
        .map(|l| l.to_uppercase().trim().to_string())
}
