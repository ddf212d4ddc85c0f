//! Edit distance, grade falloff and marking of graded text.

use crate::segment::SegmentedText;
use serde::{Deserialize, Serialize};

/// Minimum score for a field to count as passed.
pub const PASS_THRESHOLD: f64 = 0.5;

/// Calculate the Optimal String Alignment distance between two strings.
///
/// Counts insertions, deletions, substitutions and swaps of two adjacent
/// characters. Unlike full Damerau-Levenshtein, no substring is edited more
/// than once, so `"ca"` to `"abc"` costs 3 rather than 2.
pub fn osa_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Transpositions look two rows back, so keep the full table.
    let mut d = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        d[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            let mut best = (d[i - 1][j] + 1) // deletion
                .min(d[i][j - 1] + 1) // insertion
                .min(d[i - 1][j - 1] + cost); // substitution

            if i > 1
                && j > 1
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                best = best.min(d[i - 2][j - 2] + 1); // transposition
            }

            d[i][j] = best;
        }
    }

    d[m][n]
}

/// Turn a distance into a score in `[0, 1]`.
///
/// Zero beyond `max_dist`, exactly 1 for an exact-match-only property, and
/// `2^(-d / max_dist)` in between. A NaN distance scores 0.
pub fn falloff_score(distance: f64, max_dist: f64) -> f64 {
    if distance.is_nan() || distance > max_dist {
        return 0.0;
    }
    if max_dist == 0.0 {
        return 1.0;
    }
    (-distance / max_dist).exp2()
}

/// Whether a field score counts as passed.
pub fn passes(score: f64) -> bool {
    score >= PASS_THRESHOLD
}

/// How a piece of graded text matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// Scored exactly 1.
    Correct,
    /// Scored above 0 but below 1.
    Partial,
    /// Scored 0.
    Incorrect,
    /// Separator or excluded text that was not graded.
    Unmarked,
}

impl Mark {
    /// Mark for a graded piece with the given score.
    pub fn from_score(score: f64) -> Self {
        if score >= 1.0 {
            Self::Correct
        } else if score > 0.0 {
            Self::Partial
        } else {
            Self::Incorrect
        }
    }
}

/// A piece of a guess or solution string together with its mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedSegment {
    pub text: String,
    pub mark: Mark,
}

impl MarkedSegment {
    pub fn new(text: impl Into<String>, mark: Mark) -> Self {
        Self {
            text: text.into(),
            mark,
        }
    }

    fn unmarked(text: &str) -> Self {
        Self::new(text, Mark::Unmarked)
    }
}

/// Interleave graded segments with the untouched text around them.
///
/// `segments` must all view `source`, in increasing and non-overlapping
/// order, with one score per segment. Concatenating the result gives back
/// `source` exactly.
pub fn mark_segments(
    source: &str,
    segments: &[SegmentedText<'_>],
    scores: &[f64],
) -> Vec<MarkedSegment> {
    let mut result = Vec::with_capacity(segments.len() * 2 + 1);
    let mut pos = 0;

    for (segment, &score) in segments.iter().zip(scores) {
        if segment.is_empty() {
            continue;
        }
        if pos < segment.start() {
            result.push(MarkedSegment::unmarked(&source[pos..segment.start()]));
        }
        result.push(MarkedSegment::new(segment.text(), Mark::from_score(score)));
        pos = segment.end();
    }

    if pos < source.len() {
        result.push(MarkedSegment::unmarked(&source[pos..]));
    }

    result
}

/// Join segment texts back into a single string.
#[cfg(test)]
pub(crate) fn concat_segments(segments: &[MarkedSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}
