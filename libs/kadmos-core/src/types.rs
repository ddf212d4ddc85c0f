//! Shared option types.

use serde::{Deserialize, Serialize};

/// How the distance between two numbers is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    /// `|a - b|`
    Linear,
    /// `|ln(a / b)|`, for answers that span orders of magnitude.
    Log,
}

impl Default for DistanceMode {
    fn default() -> Self {
        Self::Linear
    }
}

/// How scores of the individual list values are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    /// Any one correct value is enough.
    Best,
    /// Mean over the entered guesses of each guess's best match.
    Avg,
}

impl Default for ListMode {
    fn default() -> Self {
        Self::Best
    }
}

/// The answer property variants a dataset may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Number,
    String,
    List,
}

impl PropertyKind {
    /// Get the kind name as it appears in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::List => "list",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// Presentation of the cumulative score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFormat {
    /// `"2.35/3"`
    Ratio,
    /// `"78%"`
    Percent,
    /// `"2.35/3 (78%)"`
    Both,
}

impl Default for ScoreFormat {
    fn default() -> Self {
        Self::Ratio
    }
}
