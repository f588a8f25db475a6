//! Keyword categorization of receipt line items.

pub mod builtin;
pub mod rules;
pub mod util;

pub use rules::{CategoryRule, KeywordCategorizer, MatchType, RuleError};
