use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use recibo_categorize::KeywordCategorizer;

use crate::cli::OutputFormat;

/// Optional `config.toml`. Every key has a default, so an empty file is valid.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Categorization rules file used when `--rules` is not given.
    pub rules: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub ocr: OcrConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OcrConfig {
    /// Tesseract `tessdata` directory; the engine default when unset.
    pub data_path: Option<String>,
    pub lang: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self { data_path: None, lang: "spa".to_string() }
    }
}

impl Config {
    /// An explicit path must exist. The platform default is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        // Relative rule paths are relative to the config file.
        if let (Some(rules), Some(dir)) = (config.rules.as_mut(), path.parent()) {
            if rules.is_relative() {
                *rules = dir.join(&*rules);
            }
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }

    /// The built-in keyword table, plus user rules from `flag` or the config.
    pub fn categorizer(&self, flag: Option<&Path>) -> Result<KeywordCategorizer> {
        match flag.or(self.rules.as_deref()) {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read rules {}", path.display()))?;
                KeywordCategorizer::from_toml_with_builtin(&raw)
                    .with_context(|| format!("Invalid rules {}", path.display()))
            }
            None => Ok(KeywordCategorizer::builtin()),
        }
    }
}

pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "recibo", "Recibo")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
