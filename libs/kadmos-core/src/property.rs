//! Gradable answer properties.
//!
//! Every field of a quiz item carries one [`AnswerProperty`]. Grading turns a
//! typed guess into a score in `[0, 1]` plus marked copies of the guess and
//! the solution for feedback display.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::matching::{falloff_score, mark_segments, osa_distance, passes, Mark, MarkedSegment};
use crate::segment::{split_all, SegmentedText};
use crate::types::{DistanceMode, ListMode, PropertyKind};

/// Default list separators.
pub const DEFAULT_SPLITTER: &str = "[,;/]";

/// Default exclusions: parenthetical asides such as `"khaf (final)"`.
pub const DEFAULT_EXCLUDE: &str = r"\(.*?\)";

/// Outcome of grading one guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grade {
    /// Score between 0.0 and 1.0.
    pub score: f64,
    /// The guess as typed, split into marked segments.
    pub marked_guess: Vec<MarkedSegment>,
    /// The solution, split into marked segments.
    pub marked_solution: Vec<MarkedSegment>,
}

impl Grade {
    pub fn passes(&self) -> bool {
        passes(self.score)
    }

    fn single(guess: &str, solution: &str, score: f64) -> Self {
        let mark = Mark::from_score(score);
        let marked_guess = if guess.is_empty() {
            vec![]
        } else {
            vec![MarkedSegment::new(guess, mark)]
        };

        Self {
            score,
            marked_guess,
            marked_solution: vec![MarkedSegment::new(solution, mark)],
        }
    }
}

/// A gradable answer.
#[derive(Debug, Clone)]
pub enum AnswerProperty {
    Numeric(NumericAnswer),
    Text(TextAnswer),
    List(ListAnswer),
}

impl AnswerProperty {
    /// Grade a guess against this property.
    pub fn grade(&self, guess: &str) -> Grade {
        match self {
            Self::Numeric(p) => p.grade(guess),
            Self::Text(p) => p.grade(guess),
            Self::List(p) => p.grade(guess),
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Numeric(_) => PropertyKind::Number,
            Self::Text(_) => PropertyKind::String,
            Self::List(_) => PropertyKind::List,
        }
    }

    pub fn max_dist(&self) -> f64 {
        match self {
            Self::Numeric(p) => p.max_dist,
            Self::Text(p) => p.matcher.max_dist,
            Self::List(p) => p.matcher.max_dist,
        }
    }

    /// The solution text as shown to the user.
    pub fn display_string(&self) -> &str {
        match self {
            Self::Numeric(p) => &p.display,
            Self::Text(p) => &p.value,
            Self::List(p) => &p.source,
        }
    }
}

fn check_max_dist(max_dist: f64) -> Result<f64> {
    if max_dist.is_finite() && max_dist >= 0.0 {
        Ok(max_dist)
    } else {
        Err(ConfigError::InvalidMaxDist(max_dist))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A numeric answer, optionally compared on a log scale.
#[derive(Debug, Clone)]
pub struct NumericAnswer {
    value: f64,
    display: String,
    max_dist: f64,
    distance_mode: DistanceMode,
}

impl NumericAnswer {
    pub fn new(value: f64, max_dist: f64, distance_mode: DistanceMode) -> Result<Self> {
        Self::build(value, value.to_string(), max_dist, distance_mode)
    }

    /// Build from a string, keeping its spelling for display.
    pub fn parse(value: &str, max_dist: f64, distance_mode: DistanceMode) -> Result<Self> {
        let number = value
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidNumber(value.to_string()))?;
        Self::build(number, value.trim().to_string(), max_dist, distance_mode)
    }

    fn build(
        value: f64,
        display: String,
        max_dist: f64,
        distance_mode: DistanceMode,
    ) -> Result<Self> {
        if !value.is_finite() {
            return Err(ConfigError::InvalidNumber(display));
        }
        if distance_mode == DistanceMode::Log && value == 0.0 {
            return Err(ConfigError::ZeroInLogMode);
        }

        Ok(Self {
            value,
            display,
            max_dist: check_max_dist(max_dist)?,
            distance_mode,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn distance_mode(&self) -> DistanceMode {
        self.distance_mode
    }

    /// Distance between a typed guess and the expected value.
    ///
    /// Guesses that are not numbers, and comparisons without a meaningful
    /// result such as a sign change in log mode, are infinitely far away.
    pub fn distance(&self, guess: &str) -> f64 {
        let Ok(number) = guess.trim().parse::<f64>() else {
            return f64::INFINITY;
        };

        let distance = match self.distance_mode {
            DistanceMode::Linear => (number - self.value).abs(),
            DistanceMode::Log => (number / self.value).ln().abs(),
        };

        if distance.is_finite() {
            distance
        } else {
            f64::INFINITY
        }
    }

    pub fn score(&self, guess: &str) -> f64 {
        falloff_score(self.distance(guess), self.max_dist)
    }

    pub fn grade(&self, guess: &str) -> Grade {
        Grade::single(guess, &self.display, self.score(guess))
    }
}

/// Fuzzy string comparison shared by text and list answers.
#[derive(Debug, Clone, Copy)]
struct TextMatcher {
    max_dist: f64,
    case_sensitive: bool,
}

impl TextMatcher {
    fn distance(&self, a: &str, b: &str) -> f64 {
        let (a, b) = (a.trim(), b.trim());
        let distance = if self.case_sensitive {
            osa_distance(a, b)
        } else {
            osa_distance(&a.to_lowercase(), &b.to_lowercase())
        };
        distance as f64
    }

    fn score(&self, guess: &str, candidate: &str) -> f64 {
        falloff_score(self.distance(guess, candidate), self.max_dist)
    }
}

/// A single text answer.
#[derive(Debug, Clone)]
pub struct TextAnswer {
    value: String,
    matcher: TextMatcher,
}

impl TextAnswer {
    pub fn new(value: impl Into<String>, max_dist: f64, case_sensitive: bool) -> Result<Self> {
        Ok(Self {
            value: value.into(),
            matcher: TextMatcher {
                max_dist: check_max_dist(max_dist)?,
                case_sensitive,
            },
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn case_sensitive(&self) -> bool {
        self.matcher.case_sensitive
    }

    /// Edit distance after trimming and, unless case sensitive, lowercasing.
    pub fn distance(&self, a: &str, b: &str) -> f64 {
        self.matcher.distance(a, b)
    }

    pub fn score(&self, guess: &str) -> f64 {
        self.matcher.score(guess, &self.value)
    }

    pub fn grade(&self, guess: &str) -> Grade {
        Grade::single(guess, &self.value, self.score(guess))
    }
}

/// Options for list answers.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub list_mode: ListMode,
    pub case_sensitive: bool,
    /// Regex matching the separators between values.
    pub splitter: String,
    /// Regexes for text cut out of the solution before splitting.
    pub exclude_from_list: Vec<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            list_mode: ListMode::default(),
            case_sensitive: false,
            splitter: DEFAULT_SPLITTER.to_string(),
            exclude_from_list: vec![DEFAULT_EXCLUDE.to_string()],
        }
    }
}

/// An answer with several accepted values, written as one delimited string.
#[derive(Debug, Clone)]
pub struct ListAnswer {
    source: String,
    alternatives: BTreeMap<String, Vec<String>>,
    list_mode: ListMode,
    splitter: Regex,
    exclude: Vec<Regex>,
    matcher: TextMatcher,
}

impl ListAnswer {
    /// Build from the canonical answer, e.g. `"kaf, khaf (final)"`.
    ///
    /// `alternatives` maps a value to extra accepted spellings.
    pub fn new(
        source: &str,
        max_dist: f64,
        alternatives: BTreeMap<String, Vec<String>>,
        options: &ListOptions,
    ) -> Result<Self> {
        let exclude = options
            .exclude_from_list
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;

        let answer = Self {
            source: source.trim().to_string(),
            alternatives,
            list_mode: options.list_mode,
            splitter: compile(&options.splitter)?,
            exclude,
            matcher: TextMatcher {
                max_dist: check_max_dist(max_dist)?,
                case_sensitive: options.case_sensitive,
            },
        };

        if answer.values().is_empty() {
            return Err(ConfigError::EmptyList {
                source_text: source.to_string(),
            });
        }

        Ok(answer)
    }

    pub fn list_mode(&self) -> ListMode {
        self.list_mode
    }

    /// The accepted values as views into the canonical string.
    pub fn values(&self) -> Vec<SegmentedText<'_>> {
        let mut patterns: Vec<&Regex> = self.exclude.iter().collect();
        patterns.push(&self.splitter);
        split_all(SegmentedText::new(&self.source), &patterns)
    }

    /// Split a guess into its trimmed, non-empty parts.
    pub fn guesses<'a>(&self, guess: &'a str) -> Vec<SegmentedText<'a>> {
        split_all(SegmentedText::new(guess), &[&self.splitter])
    }

    /// Score of one guess part against one value or any of its alternatives.
    fn value_score(&self, guess: &str, value: &str) -> f64 {
        let direct = self.matcher.score(guess, value);
        self.alternatives
            .get(value)
            .into_iter()
            .flatten()
            .map(|alt| self.matcher.score(guess, alt))
            .fold(direct, f64::max)
    }

    pub fn grade(&self, guess: &str) -> Grade {
        let values = self.values();
        let guesses = self.guesses(guess);

        let mut value_scores = vec![0.0; values.len()];
        let mut guess_scores = vec![0.0; guesses.len()];

        for (i, value) in values.iter().enumerate() {
            for (j, part) in guesses.iter().enumerate() {
                let score = self.value_score(part.text(), value.text());
                if score <= 0.0 {
                    continue;
                }
                if guess_scores[j] > 0.0 {
                    warn!(
                        guess = part.text(),
                        value = value.text(),
                        "guess matches multiple values, max distance too high"
                    );
                }
                value_scores[i] = f64::max(value_scores[i], score);
                guess_scores[j] = f64::max(guess_scores[j], score);
            }
        }

        let score = match self.list_mode {
            ListMode::Best => value_scores.iter().copied().fold(0.0, f64::max),
            ListMode::Avg if guess_scores.is_empty() => 0.0,
            ListMode::Avg => guess_scores.iter().sum::<f64>() / guess_scores.len() as f64,
        };

        Grade {
            score,
            marked_guess: mark_segments(guess, &guesses, &guess_scores),
            marked_solution: mark_segments(&self.source, &values, &value_scores),
        }
    }
}
