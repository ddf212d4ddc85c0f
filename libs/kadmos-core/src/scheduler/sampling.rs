//! Weighted index sampling.

use rand::Rng;

/// Running sums: `sums[i] = weights[0] + ... + weights[i]`.
pub fn cumulative_sums(weights: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .scan(0.0, |sum, &w| {
            *sum += w;
            Some(*sum)
        })
        .collect()
}

/// Draw an index with probability proportional to its weight.
///
/// Inverse-CDF sampling: draws `u` in `[0, total)` and returns the smallest
/// index whose running sum exceeds `u`, so zero weights are never picked.
/// Returns `None` when no weight is positive.
pub fn index_from_weights<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let sums = cumulative_sums(weights);
    let total = sums.last().copied().unwrap_or(0.0);
    if total.is_nan() || total <= 0.0 {
        return None;
    }

    let u = rng.gen::<f64>() * total;
    let index = sums.partition_point(|&s| s <= u);

    if index < weights.len() {
        Some(index)
    } else {
        // u rounded up to total
        weights.iter().rposition(|&w| w > 0.0)
    }
}
