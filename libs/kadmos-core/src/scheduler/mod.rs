//! Adaptive item scheduling.
//!
//! Every item starts with a retry budget of one. Scoring an item spends
//! budget on good answers and adds budget on bad ones, and the next item is
//! drawn with probability proportional to the remaining budgets. Items whose
//! budget reaches zero are retired; the session ends when none are left.

pub mod rng;
pub mod sampling;

use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{SchedulerError, SchedulerResult};
use crate::item::QuizItem;
use crate::types::ScoreFormat;

/// Budget change per point of score missed: `2 * (1 - score) - 1`.
pub const PUNISH_FACTOR: f64 = 2.0;

/// Default budget added by [`ItemScheduler::punish`].
pub const DEFAULT_PUNISH: f64 = 1.0;

/// Weight multiplier for the item shown last.
pub const PREVIOUS_DAMP_FACTOR: f64 = 0.5;

/// Budgets at or below this count as spent.
pub const RETIRE_EPSILON: f64 = 1e-9;

/// Plain-data view of the scheduler counters for status displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulerSnapshot {
    pub item_count: usize,
    pub active_count: usize,
    pub hit_count: usize,
    pub total_tries_left: f64,
    pub max_tries_left: f64,
    pub progress: f64,
    pub cumulative_score: f64,
    pub current_index: Option<usize>,
    pub previous_index: Option<usize>,
}

/// Picks the next item to quiz and keeps score for a session.
#[derive(Debug, Clone)]
pub struct ItemScheduler<T = QuizItem> {
    items: Vec<T>,
    tries_left: Vec<f64>,
    tries: Vec<u32>,
    best_scores: Vec<f64>,
    active_count: usize,
    hit_count: usize,
    total_tries_left: f64,
    max_tries_left: f64,
    current: Option<usize>,
    previous: Option<usize>,
    awaiting_score: bool,
    rng: ChaCha8Rng,
}

impl<T> ItemScheduler<T> {
    /// Scheduler with an unpredictable random stream.
    pub fn new(items: Vec<T>) -> Self {
        Self::with_rng(items, rng::entropy_rng())
    }

    /// Scheduler whose draws are reproducible from `seed`.
    pub fn with_seed(items: Vec<T>, seed: &str) -> Self {
        Self::with_rng(items, rng::seeded_rng(seed))
    }

    fn with_rng(items: Vec<T>, rng: ChaCha8Rng) -> Self {
        let n = items.len();
        Self {
            items,
            tries_left: vec![1.0; n],
            tries: vec![0; n],
            best_scores: vec![0.0; n],
            active_count: n,
            hit_count: 0,
            total_tries_left: n as f64,
            max_tries_left: n as f64,
            current: None,
            previous: None,
            awaiting_score: false,
            rng,
        }
    }

    /// Restart the random stream from `seed`.
    pub fn seed(&mut self, seed: &str) {
        self.rng = rng::seeded_rng(seed);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    /// The item drawn by the last [`next_item`](Self::next_item).
    pub fn current_item(&self) -> SchedulerResult<&T> {
        self.current
            .map(|i| &self.items[i])
            .ok_or(SchedulerError::NotStarted)
    }

    /// Draw the next item.
    ///
    /// Fails once every item is retired.
    pub fn next_item(&mut self) -> SchedulerResult<&T> {
        if self.is_empty() {
            return Err(SchedulerError::Exhausted);
        }

        self.previous = self.current;
        let weights = self.weights();
        let index =
            sampling::index_from_weights(&weights, &mut self.rng).ok_or(SchedulerError::Exhausted)?;

        debug!(index, previous = ?self.previous, "drew item");
        self.current = Some(index);
        self.awaiting_score = true;
        Ok(&self.items[index])
    }

    /// Sampling weights: remaining budgets, with the last item damped.
    fn weights(&self) -> Vec<f64> {
        let mut weights = self.tries_left.clone();
        if let Some(previous) = self.previous {
            weights[previous] *= PREVIOUS_DAMP_FACTOR;
        }
        weights
    }

    /// Record the score of the current item.
    ///
    /// Each draw takes exactly one score in `[0, 1]`.
    pub fn enter_score(&mut self, score: f64) -> SchedulerResult<()> {
        let index = self.current.ok_or(SchedulerError::NotStarted)?;
        if !self.awaiting_score {
            return Err(SchedulerError::AlreadyScored);
        }
        if !(0.0..=1.0).contains(&score) {
            return Err(SchedulerError::InvalidScore(score));
        }
        self.awaiting_score = false;

        self.tries[index] += 1;
        let tries = self.tries[index];
        if tries == 1 {
            self.hit_count += 1;
        }

        // Later attempts count for less.
        self.best_scores[index] = self.best_scores[index].max(score / f64::from(tries));

        let remaining = self.tries_left[index] + PUNISH_FACTOR * (1.0 - score) - 1.0;
        // Repeated fractional scores leave rounding residue.
        if remaining <= RETIRE_EPSILON {
            self.tries_left[index] = 0.0;
            self.active_count -= 1;
            debug!(index, tries, "item retired");
        } else {
            self.tries_left[index] = remaining;
        }

        debug!(index, score, tries_left = self.tries_left[index], "entered score");
        self.update_totals();
        Ok(())
    }

    /// Add `factor` to the budget of an active item.
    pub fn punish(&mut self, index: usize, factor: f64) -> SchedulerResult<()> {
        let len = self.items.len();
        if index >= len {
            return Err(SchedulerError::IndexOutOfRange { index, len });
        }
        if !factor.is_finite() || factor < 0.0 {
            return Err(SchedulerError::InvalidFactor(factor));
        }
        if self.is_retired(index) {
            return Err(SchedulerError::Retired(index));
        }

        self.tries_left[index] += factor;
        self.update_totals();
        Ok(())
    }

    /// Share one [`DEFAULT_PUNISH`] between the items a wrong answer
    /// belongs to.
    ///
    /// Each of the `k` indices gets `1 / k`. Retired items keep their share
    /// unspent. Returns how many items were punished.
    pub fn punish_confusions(&mut self, indices: &[usize]) -> SchedulerResult<usize> {
        let len = self.items.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(SchedulerError::IndexOutOfRange { index, len });
        }

        let share = DEFAULT_PUNISH / indices.len() as f64;
        let mut punished = 0;
        for &index in indices {
            if self.is_retired(index) {
                debug!(index, "not punishing retired item");
                continue;
            }
            self.tries_left[index] += share;
            punished += 1;
        }

        if punished > 0 {
            debug!(?indices, share, "punished confusions");
            self.update_totals();
        }
        Ok(punished)
    }

    fn update_totals(&mut self) {
        self.total_tries_left = self.tries_left.iter().sum();
        if self.total_tries_left > self.max_tries_left {
            self.max_tries_left = self.total_tries_left;
        }
    }

    /// Whether every item is retired.
    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    pub fn is_retired(&self, index: usize) -> bool {
        self.tries_left.get(index).is_some_and(|&t| t <= 0.0)
    }

    pub fn tries_left(&self, index: usize) -> Option<f64> {
        self.tries_left.get(index).copied()
    }

    pub fn tries(&self, index: usize) -> Option<u32> {
        self.tries.get(index).copied()
    }

    pub fn best_score(&self, index: usize) -> Option<f64> {
        self.best_scores.get(index).copied()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of distinct items scored at least once.
    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn total_tries_left(&self) -> f64 {
        self.total_tries_left
    }

    pub fn max_tries_left(&self) -> f64 {
        self.max_tries_left
    }

    /// Fraction of the budget used up, between 0.0 and 1.0.
    pub fn progress(&self) -> f64 {
        if self.max_tries_left <= 0.0 {
            return 1.0;
        }
        1.0 - self.total_tries_left / self.max_tries_left
    }

    /// Sum of the best discounted score of every item.
    pub fn cumulative_score(&self) -> f64 {
        self.best_scores.iter().sum()
    }

    /// Cumulative score over items seen, e.g. `"2.35/3 (78%)"`.
    pub fn score_string(&self, format: ScoreFormat) -> String {
        let score = self.cumulative_score();
        let ratio = format!("{}/{}", floor_to(score, 20.0), self.hit_count);
        let percent = if self.hit_count > 0 {
            format!("{}%", floor_to(score / self.hit_count as f64 * 100.0, 1.0))
        } else {
            "0%".to_string()
        };

        match format {
            ScoreFormat::Ratio => ratio,
            ScoreFormat::Percent => percent,
            ScoreFormat::Both => format!("{ratio} ({percent})"),
        }
    }

    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            item_count: self.items.len(),
            active_count: self.active_count,
            hit_count: self.hit_count,
            total_tries_left: self.total_tries_left,
            max_tries_left: self.max_tries_left,
            progress: self.progress(),
            cumulative_score: self.cumulative_score(),
            current_index: self.current,
            previous_index: self.previous,
        }
    }
}

/// Round down to a multiple of `1 / steps`.
fn floor_to(x: f64, steps: f64) -> f64 {
    (x * steps).floor() / steps
}
