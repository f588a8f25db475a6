use recibo_core::Category;

/// Built-in rules sit below anything a user writes.
pub const BUILTIN_PRIORITY: i32 = -100;

/// Grocery vocabulary matched as whole words on accent-folded descriptions.
///
/// Order matters: the first hit wins, so compound names that would otherwise
/// be claimed by a broader word come first.
pub const BUILTIN_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Snacks, &["patatas fritas", "papas fritas", "potato chips", "frutos secos"]),
    (Category::Dairy, &["leche de coco", "queso rallado"]),
    (Category::Beverages, &["agua con gas", "zumo de naranja", "orange juice"]),
    (Category::Household, &["papel higienico", "toilet paper", "papel cocina", "bolsa basura"]),
    (Category::PersonalCare, &["pasta de dientes", "gel de ducha", "crema solar"]),
    (
        Category::Produce,
        &[
            "patata", "tomate", "cebolla", "ajo", "lechuga", "zanahoria", "pimiento", "pepino",
            "calabacin", "berenjena", "platano", "manzana", "naranja", "pera", "limon", "fresa",
            "uva", "melon", "sandia", "aguacate", "kiwi", "fruta", "verdura", "potato", "tomato",
            "onion", "lettuce", "carrot", "banana", "apple", "orange", "lemon", "grape",
        ],
    ),
    (
        Category::Dairy,
        &[
            "leche", "yogur", "yogurt", "queso", "mantequilla", "nata", "kefir", "batido",
            "milk", "cheese", "butter", "cream",
        ],
    ),
    (
        Category::Meat,
        &[
            "pollo", "pechuga", "ternera", "cerdo", "lomo", "jamon", "chorizo", "salchichon",
            "salchicha", "pavo", "hamburguesa", "carne", "bacon", "beicon", "chicken", "beef",
            "pork", "ham", "sausage",
        ],
    ),
    (
        Category::Fish,
        &[
            "merluza", "salmon", "atun", "bacalao", "gamba", "langostino", "sardina", "boqueron",
            "calamar", "mejillon", "pescado", "tuna", "cod", "shrimp", "fish",
        ],
    ),
    (
        Category::Bakery,
        &[
            "pan", "barra", "baguette", "chapata", "croissant", "magdalena", "bolleria",
            "ensaimada", "bizcocho", "bread", "muffin",
        ],
    ),
    (
        Category::Beverages,
        &[
            "agua", "zumo", "refresco", "cola", "cerveza", "vino", "cafe", "te", "infusion",
            "tonica", "water", "juice", "beer", "wine", "coffee", "tea", "soda",
        ],
    ),
    (
        Category::Snacks,
        &[
            "patatillas", "chips", "galleta", "chocolate", "chocolatina", "caramelo", "chicle",
            "pipas", "almendra", "cacahuete", "aceituna", "snack", "cookie", "candy",
        ],
    ),
    (
        Category::Household,
        &[
            "detergente", "suavizante", "lejia", "lavavajillas", "friegasuelos", "estropajo",
            "servilleta", "bayeta", "insecticida", "detergent", "bleach", "sponge",
        ],
    ),
    (
        Category::PersonalCare,
        &[
            "champu", "gel", "desodorante", "colonia", "dentifrico", "cepillo", "maquinilla",
            "compresa", "tampon", "panal", "toallita", "jabon", "shampoo", "deodorant",
            "toothpaste", "soap",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeywordCategorizer;
    use recibo_core::Categorize;

    fn builtin() -> KeywordCategorizer {
        KeywordCategorizer::builtin()
    }

    #[test]
    fn every_keyword_compiles() {
        let expected: usize = BUILTIN_KEYWORDS.iter().map(|(_, words)| words.len()).sum();
        assert_eq!(builtin().len(), expected);
    }

    #[test]
    fn common_spanish_items() {
        let c = builtin();
        assert_eq!(c.categorize("LECHE SEMIDESNATADA"), Category::Dairy);
        assert_eq!(c.categorize("PAN BARRA"), Category::Bakery);
        assert_eq!(c.categorize("PECHUGA POLLO"), Category::Meat);
        assert_eq!(c.categorize("SALMÓN FRESCO"), Category::Fish);
        assert_eq!(c.categorize("TOMATES RAMA"), Category::Produce);
        assert_eq!(c.categorize("DETERGENTE LIQUIDO"), Category::Household);
        assert_eq!(c.categorize("CHAMPÚ ANTICASPA"), Category::PersonalCare);
        assert_eq!(c.categorize("AGUA MINERAL 1,5L"), Category::Beverages);
    }

    #[test]
    fn compound_names_beat_their_parts() {
        let c = builtin();
        assert_eq!(c.categorize("PATATAS FRITAS LAYS"), Category::Snacks);
        assert_eq!(c.categorize("PATATAS MALLA 3KG"), Category::Produce);
        assert_eq!(c.categorize("PAPEL HIGIENICO 12R"), Category::Household);
        assert_eq!(c.categorize("ZUMO DE NARANJA"), Category::Beverages);
    }

    #[test]
    fn substrings_do_not_count() {
        let c = builtin();
        // "pan" inside "panceta", "te" inside "tenedor"
        assert_eq!(c.categorize("PANCETA"), Category::Uncategorized);
        assert_eq!(c.categorize("TENEDORES"), Category::Uncategorized);
    }

    #[test]
    fn unknown_description_is_uncategorized() {
        assert_eq!(builtin().categorize("XJ-9 REF 4411"), Category::Uncategorized);
        assert_eq!(builtin().categorize(""), Category::Uncategorized);
    }
}
