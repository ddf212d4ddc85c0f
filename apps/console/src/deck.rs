//! JSON decks for the console.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use kadmos_core::{PropertyConfig, PropertyData, QuizItem};
use serde::Deserialize;

/// Field configuration plus the raw items to quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    pub properties: BTreeMap<String, PropertyConfig>,
    pub items: Vec<DeckItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckItem {
    pub display: String,
    pub properties: BTreeMap<String, PropertyData>,
}

impl Deck {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading deck {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing deck {}", path.display()))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    /// Build the quiz items for the chosen fields.
    pub fn quiz_items(
        &self,
        fields: &[&str],
        language: Option<&str>,
    ) -> kadmos_core::Result<Vec<QuizItem>> {
        self.items
            .iter()
            .map(|item| {
                QuizItem::from_data(&item.display, &item.properties, &self.properties, fields, language)
            })
            .collect()
    }

    /// The same items graded with reference tolerances, index for index.
    pub fn reference_items(
        &self,
        fields: &[&str],
        language: Option<&str>,
    ) -> kadmos_core::Result<Vec<QuizItem>> {
        self.items
            .iter()
            .map(|item| {
                QuizItem::from_reference_data(
                    &item.display,
                    &item.properties,
                    &self.properties,
                    fields,
                    language,
                )
            })
            .collect()
    }
}
