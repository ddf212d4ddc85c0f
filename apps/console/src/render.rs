//! Plain-text rendering of marked feedback.

use kadmos_core::{Mark, MarkedSegment};

/// Correct text is shown as is, partial matches as `~text~` and wrong ones
/// as `[text]`.
pub fn render(segments: &[MarkedSegment]) -> String {
    segments
        .iter()
        .map(|s| match s.mark {
            Mark::Correct | Mark::Unmarked => s.text.clone(),
            Mark::Partial => format!("~{}~", s.text),
            Mark::Incorrect => format!("[{}]", s.text),
        })
        .collect()
}
