//! Console configuration from environment variables.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("KADMOS_DECK not set")]
    MissingDeck,
    #[error("KADMOS_FIELDS lists no fields")]
    EmptyFields,
}

/// Settings for one console session.
///
/// Env vars:
/// - KADMOS_DECK: Path to the deck JSON (required)
/// - KADMOS_SEED: Session seed for a replayable item order
/// - KADMOS_FIELDS: Comma-separated fields to quiz (default: all)
/// - KADMOS_LANGUAGE: Language suffix for localized answers
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub deck_path: PathBuf,
    pub seed: Option<String>,
    pub fields: Option<Vec<String>>,
    pub language: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let deck_path = non_empty("KADMOS_DECK")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingDeck)?;

        let fields = match non_empty("KADMOS_FIELDS") {
            Some(list) => {
                let fields: Vec<String> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect();
                if fields.is_empty() {
                    return Err(ConfigError::EmptyFields);
                }
                Some(fields)
            }
            None => None,
        };

        Ok(Self {
            deck_path,
            seed: lookup("KADMOS_SEED"),
            fields,
            language: non_empty("KADMOS_LANGUAGE"),
        })
    }
}
