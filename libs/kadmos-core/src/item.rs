//! Quiz items and round grading.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::config::{PropertyConfig, PropertyData};
use crate::error::{ConfigError, Result};
use crate::matching::passes;
use crate::property::{AnswerProperty, Grade};

/// One thing to quiz: a display payload and one graded property per field.
#[derive(Debug, Clone)]
pub struct QuizItem {
    pub display: String,
    properties: BTreeMap<String, AnswerProperty>,
}

/// Grade of a single field within a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGrade {
    pub field: String,
    pub grade: Grade,
}

/// Result of grading all fields of an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    /// Mean of the field scores; this is what the scheduler receives.
    pub score: f64,
    pub fields: Vec<FieldGrade>,
}

impl RoundResult {
    /// Whether every field passed.
    pub fn all_passed(&self) -> bool {
        self.fields.iter().all(|f| f.grade.passes())
    }
}

impl QuizItem {
    pub fn new(
        display: impl Into<String>,
        properties: BTreeMap<String, AnswerProperty>,
    ) -> Result<Self> {
        if properties.is_empty() {
            return Err(ConfigError::NoProperties);
        }
        Ok(Self {
            display: display.into(),
            properties,
        })
    }

    /// Build an item from raw field data.
    ///
    /// Only `fields` are graded. With a `language`, data stored under
    /// `"<field>_<language>"` takes precedence over `"<field>"`.
    pub fn from_data(
        display: impl Into<String>,
        data: &BTreeMap<String, PropertyData>,
        configs: &BTreeMap<String, PropertyConfig>,
        fields: &[&str],
        language: Option<&str>,
    ) -> Result<Self> {
        let mut properties = BTreeMap::new();

        for &field in fields {
            let localized = language.and_then(|lang| data.get(&format!("{field}_{lang}")));
            let value = localized
                .or_else(|| data.get(field))
                .ok_or_else(|| ConfigError::MissingField {
                    field: field.to_string(),
                })?;
            let config = configs.get(field).ok_or_else(|| ConfigError::MissingConfig {
                field: field.to_string(),
            })?;

            properties.insert(field.to_string(), AnswerProperty::from_data(value, config)?);
        }

        Self::new(display, properties)
    }

    /// Like [`from_data`](Self::from_data), graded with each field's
    /// reference tolerance.
    pub fn from_reference_data(
        display: impl Into<String>,
        data: &BTreeMap<String, PropertyData>,
        configs: &BTreeMap<String, PropertyConfig>,
        fields: &[&str],
        language: Option<&str>,
    ) -> Result<Self> {
        let configs: BTreeMap<String, PropertyConfig> = configs
            .iter()
            .map(|(field, config)| (field.clone(), config.for_reference()))
            .collect();
        Self::from_data(display, data, &configs, fields, language)
    }

    pub fn properties(&self) -> &BTreeMap<String, AnswerProperty> {
        &self.properties
    }

    pub fn property(&self, field: &str) -> Option<&AnswerProperty> {
        self.properties.get(field)
    }

    /// Field keys in grading order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Grade one guess per field. Missing guesses count as empty.
    pub fn grade_round(&self, guesses: &BTreeMap<String, String>) -> RoundResult {
        for field in guesses.keys() {
            if !self.properties.contains_key(field) {
                warn!(field = %field, "ignoring guess for unknown field");
            }
        }

        let fields: Vec<FieldGrade> = self
            .properties
            .iter()
            .map(|(field, property)| {
                let guess = guesses.get(field).map(String::as_str).unwrap_or("");
                FieldGrade {
                    field: field.clone(),
                    grade: property.grade(guess),
                }
            })
            .collect();

        let score = fields.iter().map(|f| f.grade.score).sum::<f64>() / fields.len() as f64;

        RoundResult { score, fields }
    }
}

/// Indices of the `references` whose `field` accepts `guess`.
///
/// A perfect match is returned alone. Otherwise every passing item is
/// returned, in order.
pub fn reference_matches(references: &[QuizItem], field: &str, guess: &str) -> Vec<usize> {
    let mut matches = Vec::new();

    for (index, item) in references.iter().enumerate() {
        let Some(property) = item.property(field) else {
            continue;
        };
        let score = property.grade(guess).score;
        if score >= 1.0 {
            return vec![index];
        }
        if passes(score) {
            matches.push(index);
        }
    }

    matches
}
