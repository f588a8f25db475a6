use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of spending categories an item can be filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Fish,
    Bakery,
    Beverages,
    Snacks,
    Household,
    PersonalCare,
    #[default]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Produce,
        Category::Dairy,
        Category::Meat,
        Category::Fish,
        Category::Bakery,
        Category::Beverages,
        Category::Snacks,
        Category::Household,
        Category::PersonalCare,
        Category::Uncategorized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Fish => "fish",
            Category::Bakery => "bakery",
            Category::Beverages => "beverages",
            Category::Snacks => "snacks",
            Category::Household => "household",
            Category::PersonalCare => "personal_care",
            Category::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown category: '{s}'"))
    }
}

/// Assigns a category to a free-text item description.
pub trait Categorize {
    /// Returns [`Category::Uncategorized`] when nothing matches.
    fn categorize(&self, description: &str) -> Category;
}
