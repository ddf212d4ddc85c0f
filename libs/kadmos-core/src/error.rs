//! Error types for kadmos-core.

use thiserror::Error;

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Result type alias for scheduler operations.
pub type SchedulerResult<T> = std::result::Result<T, SchedulerError>;

/// Errors raised while building answer properties and quiz items.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown property type \"{0}\"")]
    UnknownPropertyType(String),

    #[error("invalid max distance {0}")]
    InvalidMaxDist(f64),

    #[error("invalid number \"{0}\"")]
    InvalidNumber(String),

    #[error("expected value 0 is invalid with log distance mode")]
    ZeroInLogMode,

    #[error("no values left in list \"{source_text}\" after splitting")]
    EmptyList { source_text: String },

    #[error("invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("missing data for field \"{field}\"")]
    MissingField { field: String },

    #[error("missing configuration for field \"{field}\"")]
    MissingConfig { field: String },

    #[error("quiz item has no properties")]
    NoProperties,
}

/// Errors raised when the scheduler is driven out of order.
#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    #[error("no item has been drawn yet")]
    NotStarted,

    #[error("current item was already scored")]
    AlreadyScored,

    #[error("all items are retired")]
    Exhausted,

    #[error("score {0} is outside [0, 1]")]
    InvalidScore(f64),

    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("item {0} is retired")]
    Retired(usize),

    #[error("invalid punish factor {0}")]
    InvalidFactor(f64),
}
