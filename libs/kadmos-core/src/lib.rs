//! Scoring and item scheduling core for alphabet and vocabulary drills.
//!
//! Provides:
//! - Fuzzy answer grading (Optimal String Alignment distance)
//! - Numeric, text and list answer properties with marked feedback
//! - Offset-preserving text segmentation
//! - Adaptive, seedable item scheduling with progress and score accounting

pub mod config;
pub mod error;
pub mod item;
pub mod matching;
pub mod property;
pub mod scheduler;
pub mod segment;
pub mod types;

pub use config::{Alternatives, PropertyConfig, PropertyData};
pub use error::{ConfigError, Result, SchedulerError, SchedulerResult};
pub use item::{reference_matches, FieldGrade, QuizItem, RoundResult};
pub use matching::{falloff_score, osa_distance, passes, Mark, MarkedSegment};
pub use property::{AnswerProperty, Grade, ListAnswer, ListOptions, NumericAnswer, TextAnswer};
pub use scheduler::{ItemScheduler, SchedulerSnapshot};
pub use segment::SegmentedText;
pub use types::{DistanceMode, ListMode, PropertyKind, ScoreFormat};
