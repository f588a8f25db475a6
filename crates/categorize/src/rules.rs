use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use recibo_core::{Categorize, Category};

use crate::builtin::{BUILTIN_KEYWORDS, BUILTIN_PRIORITY};
use crate::util::{fold, similarity};

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Failed to parse rules TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid regex in rule '{rule}': {source}")]
    Regex {
        rule: String,
        #[source]
        source: regex::Error,
    },
    #[error("Unknown match type: '{0}'")]
    MatchType(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    pub pattern: String,
    #[serde(default)]
    pub match_type: MatchType,
    pub category: Category,
}

impl CategoryRule {
    pub fn new(pattern: &str, match_type: MatchType, category: Category, priority: i32) -> Self {
        CategoryRule {
            name: pattern.to_string(),
            priority,
            pattern: pattern.to_string(),
            match_type,
            category,
        }
    }
}

/// How a rule's pattern is compared with an item description. Written in rule
/// files as `contains`, `word`, `exact`, `regex` or `fuzzy:<threshold>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MatchType {
    #[default]
    Contains,
    /// Whole words, tolerating a plural `s`/`es` suffix.
    Word,
    Exact,
    Regex,
    /// Best similarity against the whole description or any single word.
    Fuzzy {
        threshold: f32,
    },
}

impl FromStr for MatchType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contains" => Ok(MatchType::Contains),
            "word" => Ok(MatchType::Word),
            "exact" => Ok(MatchType::Exact),
            "regex" => Ok(MatchType::Regex),
            s if s.starts_with("fuzzy:") => {
                let threshold = s[6..]
                    .parse::<f32>()
                    .map_err(|_| RuleError::MatchType(s.to_string()))?;
                Ok(MatchType::Fuzzy { threshold })
            }
            other => Err(RuleError::MatchType(other.to_string())),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Contains => write!(f, "contains"),
            MatchType::Word => write!(f, "word"),
            MatchType::Exact => write!(f, "exact"),
            MatchType::Regex => write!(f, "regex"),
            MatchType::Fuzzy { threshold } => write!(f, "fuzzy:{threshold}"),
        }
    }
}

impl TryFrom<String> for MatchType {
    type Error = RuleError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MatchType> for String {
    fn from(m: MatchType) -> String {
        m.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<CategoryRule>,
}

/// Internal pairing of a rule with its folded pattern and precompiled regex.
struct CompiledRule {
    rule: CategoryRule,
    folded_pattern: String,
    compiled_regex: Option<Regex>,
}

impl CompiledRule {
    fn compile(rule: CategoryRule) -> Result<Self, RuleError> {
        let folded_pattern = fold(&rule.pattern);
        let source = match &rule.match_type {
            MatchType::Regex => Some(rule.pattern.clone()),
            MatchType::Word => Some(format!(r"\b{}(?:es|s)?\b", regex::escape(&folded_pattern))),
            _ => None,
        };
        let compiled_regex = source
            .map(|src| Regex::new(&src))
            .transpose()
            .map_err(|source| RuleError::Regex { rule: rule.name.clone(), source })?;
        Ok(CompiledRule { rule, folded_pattern, compiled_regex })
    }

    fn matches(&self, description: &str, folded: &str) -> bool {
        match &self.rule.match_type {
            MatchType::Contains => folded.contains(&self.folded_pattern),
            MatchType::Exact => folded.trim() == self.folded_pattern,
            MatchType::Word => self.compiled_regex.as_ref().is_some_and(|re| re.is_match(folded)),
            MatchType::Regex => {
                self.compiled_regex.as_ref().is_some_and(|re| re.is_match(description))
            }
            MatchType::Fuzzy { threshold } => {
                let whole = similarity(folded.trim(), &self.folded_pattern);
                let best_word = folded
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|w| !w.is_empty())
                    .map(|w| similarity(w, &self.folded_pattern))
                    .fold(whole, f32::max);
                best_word >= *threshold
            }
        }
    }
}

/// Keyword categorizer: rules are tried highest priority first, ties in the
/// order they were given; the first match decides the category.
pub struct KeywordCategorizer {
    rules: Vec<CompiledRule>,
}

impl KeywordCategorizer {
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self, RuleError> {
        let mut compiled =
            rules.into_iter().map(CompiledRule::compile).collect::<Result<Vec<_>, _>>()?;
        // Stable: equal priorities keep declaration order.
        compiled.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));
        Ok(Self { rules: compiled })
    }

    /// The built-in grocery keyword table.
    pub fn builtin() -> Self {
        let rules: Vec<CompiledRule> = builtin_rules()
            .into_iter()
            .filter_map(|r| CompiledRule::compile(r).ok())
            .collect();
        Self { rules }
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, RuleError> {
        let file: RuleFile = toml::from_str(toml_content)?;
        Self::new(file.rules)
    }

    /// User rules from `toml_content`, falling back to the built-in table.
    pub fn from_toml_with_builtin(toml_content: &str) -> Result<Self, RuleError> {
        let file: RuleFile = toml::from_str(toml_content)?;
        let mut rules = file.rules;
        tracing::debug!(user_rules = rules.len(), "loaded categorization rules");
        rules.extend(builtin_rules());
        Self::new(rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn find_matching_rule(&self, description: &str) -> Option<&CategoryRule> {
        let folded = fold(description);
        self.rules
            .iter()
            .find(|cr| cr.matches(description, &folded))
            .map(|cr| &cr.rule)
    }
}

impl Categorize for KeywordCategorizer {
    fn categorize(&self, description: &str) -> Category {
        self.find_matching_rule(description).map(|r| r.category).unwrap_or_default()
    }
}

fn builtin_rules() -> Vec<CategoryRule> {
    BUILTIN_KEYWORDS
        .iter()
        .flat_map(|(category, words)| {
            words.iter().map(move |w| {
                CategoryRule::new(w, MatchType::Word, *category, BUILTIN_PRIORITY)
            })
        })
        .collect()
}
