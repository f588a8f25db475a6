use super::fold_upper;

re!(re_item_shape, r"^\d+.*\d+[.,]\d{2}");

/// Structural boilerplate that is never an item when it makes up a whole line.
const NOISE_KEYWORDS: &[&str] = &[
    "IVA",
    "I.V.A.",
    "TEL",
    "TEL.",
    "TELF",
    "TELEFONO",
    "TLF",
    "FAX",
    "CIF",
    "NIF",
    "C.I.F.",
    "N.I.F.",
    "TAX",
    "PHONE",
    "FACTURA",
    "FACTURA SIMPLIFICADA",
    "TICKET",
    "COPIA CLIENTE",
    "DESCRIPCION",
    "CANT",
    "CANTIDAD",
    "PRECIO",
    "IMPORTE",
    "GRACIAS POR SU VISITA",
    "GRACIAS POR SU COMPRA",
    "VUELVA PRONTO",
    "THANK YOU",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Quantity-led line ending in a two-decimal amount.
    Item,
    /// Boilerplate or a section header; never produces an item.
    Noise,
    /// Anything else. Still tried as an item, but also screened for dates
    /// and long digit runs.
    Undetermined,
}

pub fn classify(line: &str) -> LineKind {
    if re_item_shape().is_match(line) {
        return LineKind::Item;
    }
    let folded = fold_upper(line);
    if NOISE_KEYWORDS.contains(&folded.as_str()) {
        return LineKind::Noise;
    }
    if folded.contains("TOTAL") && !line.chars().any(|c| c.is_ascii_digit()) {
        return LineKind::Noise;
    }
    LineKind::Undetermined
}
