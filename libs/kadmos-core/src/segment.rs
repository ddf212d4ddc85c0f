//! Offset-preserving views into a source string.
//!
//! Graded answers are split and trimmed before comparison, but feedback is
//! shown on the text exactly as it was typed. [`SegmentedText`] keeps the byte
//! offsets of every piece so the marks can be placed back onto the original.

use regex::Regex;

/// An immutable window `source[start..end]`.
///
/// Offsets are byte offsets and always fall on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentedText<'a> {
    source: &'a str,
    start: usize,
    end: usize,
}

impl<'a> SegmentedText<'a> {
    /// View the whole of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            end: source.len(),
        }
    }

    /// View `source[start..end]`, or `None` if that is not a valid slice.
    pub fn with_range(source: &'a str, start: usize, end: usize) -> Option<Self> {
        source.get(start..end).map(|_| Self { source, start, end })
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn text(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Split on every non-overlapping match of `pattern` within this view.
    ///
    /// Returns the pieces between matches, including the leading and trailing
    /// piece. Zero-length pieces are dropped unless `include_empty` is set.
    pub fn split(&self, pattern: &Regex, include_empty: bool) -> Vec<SegmentedText<'a>> {
        let mut result = Vec::new();
        let mut pos = 0;

        for m in pattern.find_iter(self.text()) {
            if include_empty || pos < m.start() {
                result.push(self.sub(pos, m.start()));
            }
            pos = m.end();
        }

        if include_empty || pos < self.len() {
            result.push(self.sub(pos, self.len()));
        }

        result
    }

    /// Narrow the view to exclude leading and trailing whitespace.
    pub fn trim(&self) -> SegmentedText<'a> {
        let text = self.text();
        let leading = text.len() - text.trim_start().len();
        if leading == text.len() {
            return self.sub(0, 0);
        }
        let trailing = text.len() - text.trim_end().len();

        if leading == 0 && trailing == 0 {
            return *self;
        }

        self.sub(leading, text.len() - trailing)
    }

    // Offsets relative to this view.
    fn sub(&self, from: usize, to: usize) -> SegmentedText<'a> {
        SegmentedText {
            source: self.source,
            start: self.start + from,
            end: self.start + to,
        }
    }
}

/// Split `text` by each of `patterns` in turn, trimming and dropping empty
/// pieces after every pass.
pub fn split_all<'a>(text: SegmentedText<'a>, patterns: &[&Regex]) -> Vec<SegmentedText<'a>> {
    let mut pieces = vec![text.trim()];
    pieces.retain(|p| !p.is_empty());

    for pattern in patterns {
        pieces = pieces
            .iter()
            .flat_map(|p| p.split(pattern, false))
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{concat_segments, mark_segments};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn texts<'a>(pieces: &[SegmentedText<'a>]) -> Vec<&'a str> {
        pieces.iter().map(|p| p.text()).collect()
    }

    #[test]
    fn split_keeps_offsets_into_source() {
        let source = "alfa, alpha;a";
        let pattern = Regex::new("[,;]").unwrap();
        let pieces = SegmentedText::new(source).split(&pattern, false);

        assert_eq!(texts(&pieces), vec!["alfa", " alpha", "a"]);
        assert_eq!((pieces[1].start(), pieces[1].end()), (5, 11));
        assert_eq!(pieces[2].start(), 12);
    }

    #[test]
    fn split_drops_empty_pieces() {
        let pattern = Regex::new(",").unwrap();
        let pieces = SegmentedText::new(",a,,b,").split(&pattern, false);
        assert_eq!(texts(&pieces), vec!["a", "b"]);
    }

    #[test]
    fn split_with_include_empty() {
        let pattern = Regex::new(",").unwrap();
        let pieces = SegmentedText::new(",a,,b,").split(&pattern, true);
        assert_eq!(texts(&pieces), vec!["", "a", "", "b", ""]);
    }

    #[test]
    fn split_of_sub_view_is_relative_to_source() {
        let source = "xx[a|b]yy";
        let inner = SegmentedText::with_range(source, 3, 6).unwrap();
        let pattern = Regex::new(r"\|").unwrap();
        let pieces = inner.split(&pattern, false);

        assert_eq!(texts(&pieces), vec!["a", "b"]);
        assert_eq!(pieces[1].start(), 5);
        assert_eq!(pieces[1].source(), source);
    }

    #[test]
    fn trim_narrows_offsets() {
        let seg = SegmentedText::new("  foo \t");
        let trimmed = seg.trim();
        assert_eq!(trimmed.text(), "foo");
        assert_eq!((trimmed.start(), trimmed.end()), (2, 5));
    }

    #[test]
    fn trim_without_whitespace_is_identity() {
        let seg = SegmentedText::new("foo");
        assert_eq!(seg.trim(), seg);
    }

    #[test]
    fn trim_of_blank_is_empty() {
        let trimmed = SegmentedText::new("   ").trim();
        assert!(trimmed.is_empty());
    }

    #[test]
    fn with_range_rejects_invalid_slices() {
        assert!(SegmentedText::with_range("abc", 2, 1).is_none());
        assert!(SegmentedText::with_range("abc", 0, 4).is_none());
        // Inside a multi-byte char.
        assert!(SegmentedText::with_range("é", 0, 1).is_none());
    }

    #[test]
    fn split_all_excises_parentheticals() {
        let source = "  foo, bar (baz) ";
        let paren = Regex::new(r"\(.*?\)").unwrap();
        let comma = Regex::new(",").unwrap();
        let pieces = split_all(SegmentedText::new(source), &[&paren, &comma]);

        assert_eq!(texts(&pieces), vec!["foo", "bar"]);

        let marked = mark_segments(source, &pieces, &[1.0, 0.0]);
        assert_eq!(concat_segments(&marked), source);
    }

    proptest! {
        #[test]
        fn derived_views_stay_inside_source(source in "[a-c ,;()]{0,24}") {
            let pattern = Regex::new("[,;]").unwrap();
            for piece in SegmentedText::new(&source).split(&pattern, true) {
                let piece = piece.trim();
                prop_assert!(piece.start() <= piece.end());
                prop_assert!(piece.end() <= source.len());
                prop_assert_eq!(piece.text(), &source[piece.start()..piece.end()]);
            }
        }

        #[test]
        fn marking_round_trips(source in "[a-c ,;()]{0,24}") {
            let paren = Regex::new(r"\(.*?\)").unwrap();
            let comma = Regex::new("[,;]").unwrap();
            let pieces = split_all(SegmentedText::new(&source), &[&paren, &comma]);
            let scores = vec![1.0; pieces.len()];
            let marked = mark_segments(&source, &pieces, &scores);
            prop_assert_eq!(concat_segments(&marked), source);
        }
    }
}
