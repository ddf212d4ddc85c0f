//! Declarative property configuration and raw property data.
//!
//! Datasets describe each field once with a [`PropertyConfig`] and give every
//! item a [`PropertyData`] value for it. [`AnswerProperty::from_data`] turns
//! the pair into a gradable property, rejecting bad configuration up front.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::property::{
    AnswerProperty, ListAnswer, ListOptions, NumericAnswer, TextAnswer, DEFAULT_EXCLUDE,
    DEFAULT_SPLITTER,
};
use crate::types::{DistanceMode, ListMode, PropertyKind};

/// Per-field grading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyConfig {
    /// `"number"`, `"string"` or `"list"`; checked when properties are built.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub max_dist: f64,
    /// Looser tolerance used for reference tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_max_dist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_mode: Option<DistanceMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_mode: Option<ListMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_list: Option<Vec<String>>,
}

impl PropertyConfig {
    /// Create a configuration with only the type and tolerance set.
    pub fn new(kind: PropertyKind, max_dist: f64) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            max_dist,
            reference_max_dist: None,
            distance_mode: None,
            case_sensitive: None,
            list_mode: None,
            splitter: None,
            exclude_from_list: None,
        }
    }

    pub fn property_kind(&self) -> Result<PropertyKind> {
        PropertyKind::from_str(&self.kind)
            .ok_or_else(|| ConfigError::UnknownPropertyType(self.kind.clone()))
    }

    /// Configuration for reference tables: `reference_max_dist` replaces
    /// `max_dist` when set.
    pub fn for_reference(&self) -> Self {
        let mut config = self.clone();
        if let Some(max_dist) = self.reference_max_dist {
            config.max_dist = max_dist;
        }
        config
    }

    /// List options with defaults filled in.
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            list_mode: self.list_mode.unwrap_or_default(),
            case_sensitive: self.case_sensitive.unwrap_or(false),
            splitter: self
                .splitter
                .clone()
                .unwrap_or_else(|| DEFAULT_SPLITTER.to_string()),
            exclude_from_list: self
                .exclude_from_list
                .clone()
                .unwrap_or_else(|| vec![DEFAULT_EXCLUDE.to_string()]),
        }
    }
}

/// Alternative spellings: one string or several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Alternatives {
    One(String),
    Many(Vec<String>),
}

impl Alternatives {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

/// Raw value of one field of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyData {
    Number(f64),
    Text(String),
    List {
        source: String,
        #[serde(default)]
        alts: BTreeMap<String, Alternatives>,
    },
}

impl PropertyData {
    /// The canonical answer as text.
    pub fn source_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::List { source, .. } => source.clone(),
        }
    }
}

impl AnswerProperty {
    /// Build a property from raw data and its field configuration.
    pub fn from_data(data: &PropertyData, config: &PropertyConfig) -> Result<Self> {
        let max_dist = config.max_dist;

        match config.property_kind()? {
            PropertyKind::Number => {
                let mode = config.distance_mode.unwrap_or_default();
                let answer = match data {
                    PropertyData::Number(n) => NumericAnswer::new(*n, max_dist, mode)?,
                    other => NumericAnswer::parse(&other.source_text(), max_dist, mode)?,
                };
                Ok(Self::Numeric(answer))
            }
            PropertyKind::String => Ok(Self::Text(TextAnswer::new(
                data.source_text(),
                max_dist,
                config.case_sensitive.unwrap_or(false),
            )?)),
            PropertyKind::List => {
                let alternatives = match data {
                    PropertyData::List { alts, .. } => alts
                        .iter()
                        .map(|(value, alt)| (value.clone(), alt.clone().into_vec()))
                        .collect(),
                    _ => BTreeMap::new(),
                };
                Ok(Self::List(ListAnswer::new(
                    &data.source_text(),
                    max_dist,
                    alternatives,
                    &config.list_options(),
                )?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(json: &str) -> PropertyConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parse_config_with_defaults() {
        let config = config(r#"{"type": "string"}"#);
        assert_eq!(config, PropertyConfig::new(PropertyKind::String, 0.0));
    }

    #[test]
    fn parse_full_list_config() {
        let config = config(
            r#"{"type": "list", "maxDist": 1, "referenceMaxDist": 2, "listMode": "avg",
                "caseSensitive": true, "splitter": "[,]", "excludeFromList": []}"#,
        );
        assert_eq!(config.max_dist, 1.0);
        assert_eq!(config.for_reference().max_dist, 2.0);

        let options = config.list_options();
        assert_eq!(options.list_mode, ListMode::Avg);
        assert!(options.case_sensitive);
        assert_eq!(options.splitter, "[,]");
        assert!(options.exclude_from_list.is_empty());
    }

    #[test]
    fn for_reference_without_override_keeps_max_dist() {
        let config = PropertyConfig::new(PropertyKind::String, 1.0);
        assert_eq!(config.for_reference(), config);
    }

    #[test]
    fn parse_property_data() {
        let data: PropertyData = serde_json::from_str("19").unwrap();
        assert_eq!(data, PropertyData::Number(19.0));

        let data: PropertyData = serde_json::from_str(r#""alpha""#).unwrap();
        assert_eq!(data, PropertyData::Text("alpha".to_string()));

        let data: PropertyData =
            serde_json::from_str(r#"{"source": "alfa, a", "alts": {"alfa": "alpha"}}"#).unwrap();
        let PropertyData::List { source, alts } = data else {
            panic!("expected list data");
        };
        assert_eq!(source, "alfa, a");
        assert_eq!(alts["alfa"], Alternatives::One("alpha".to_string()));
    }

    #[test]
    fn build_numeric_from_string_data() {
        let mut config = PropertyConfig::new(PropertyKind::Number, 2.0);
        config.distance_mode = Some(DistanceMode::Linear);
        let property =
            AnswerProperty::from_data(&PropertyData::Text("19".to_string()), &config).unwrap();

        assert_eq!(property.kind(), PropertyKind::Number);
        assert_eq!(property.grade("17").score, 0.5);
    }

    #[test]
    fn build_list_with_alternatives() {
        let data: PropertyData =
            serde_json::from_str(r#"{"source": "alfa", "alts": {"alfa": ["alpha", "alef"]}}"#)
                .unwrap();
        let config = PropertyConfig::new(PropertyKind::List, 0.0);
        let property = AnswerProperty::from_data(&data, &config).unwrap();

        assert_eq!(property.grade("alef").score, 1.0);
        assert_eq!(property.display_string(), "alfa");
    }

    #[test]
    fn reject_unknown_type() {
        let config = config(r#"{"type": "real"}"#);
        let result = AnswerProperty::from_data(&PropertyData::Number(1.0), &config);
        assert!(matches!(result, Err(ConfigError::UnknownPropertyType(t)) if t == "real"));
    }

    #[test]
    fn reject_log_mode_zero() {
        let config = config(r#"{"type": "number", "distanceMode": "log"}"#);
        let result = AnswerProperty::from_data(&PropertyData::Number(0.0), &config);
        assert!(matches!(result, Err(ConfigError::ZeroInLogMode)));
    }

    #[test]
    fn reject_empty_list() {
        let config = config(r#"{"type": "list"}"#);
        let result = AnswerProperty::from_data(&PropertyData::Text(" ; ".to_string()), &config);
        assert!(matches!(result, Err(ConfigError::EmptyList { .. })));
    }
}
