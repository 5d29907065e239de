//! Byte-based span type for source location tracking.
//!
//! `ByteSpan` uses byte offsets (not character or line positions) because
//! that is what the proto lexer/parser collaborator (§1) hands back. Editor
//! positions are only computed on demand via [`crate::LineIndex`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-open `[start, end)` byte range in source text.
///
/// # Invariants
///
/// - `start <= end`
/// - Both bounds are valid byte offsets into the originating source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ByteSpan {
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
}

impl ByteSpan {
    /// Creates a new span.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `start > end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "ByteSpan: start ({start}) > end ({end})");
        Self { start, end }
    }

    /// Creates an empty, zero-width span at `pos`.
    #[inline]
    pub const fn empty(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Returns the span's length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `offset` falls within `[start, end)`.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Returns `true` if `offset` falls within `[start, end]` — the inclusive
    /// variant used by the narrowest-token finder (§4.1), where the caret
    /// just past the last character of a token still selects it.
    #[inline]
    pub const fn contains_inclusive(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Returns `true` if `self` fully contains `other`.
    #[inline]
    pub const fn contains_span(&self, other: ByteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` if `offset` falls strictly inside the half-open range
    /// `[self.start, end_exclusive)`, where `end_exclusive` may differ from
    /// `self.end` (used for the terminator-trimmed ranges in §4.2).
    #[inline]
    pub const fn intersects_half_open(&self, offset: usize, end_exclusive: usize) -> bool {
        offset >= self.start && offset < end_exclusive
    }

    /// Returns the intersection of two spans, or `None` if disjoint.
    pub fn intersection(&self, other: ByteSpan) -> Option<ByteSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end { Some(ByteSpan { start, end }) } else { None }
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[inline]
    pub fn union(&self, other: ByteSpan) -> ByteSpan {
        ByteSpan { start: self.start.min(other.start), end: self.end.max(other.end) }
    }

    /// Extracts the slice of `source` covered by this span.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds for `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Converts to a standard `Range<usize>`.
    #[inline]
    pub const fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for ByteSpan {
    #[inline]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<ByteSpan> for Range<usize> {
    #[inline]
    fn from(span: ByteSpan) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basics() {
        let span = ByteSpan::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn contains_is_exclusive_at_end() {
        let span = ByteSpan::new(5, 10);
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
    }

    #[test]
    fn contains_inclusive_selects_caret_just_past_token() {
        let span = ByteSpan::new(5, 10);
        assert!(span.contains_inclusive(10));
        assert!(!span.contains_inclusive(11));
    }

    #[test]
    fn intersects_half_open_uses_custom_end() {
        let span = ByteSpan::new(5, 20);
        assert!(span.intersects_half_open(8, 10));
        assert!(!span.intersects_half_open(10, 10));
    }

    #[test]
    fn intersection_and_union() {
        let a = ByteSpan::new(0, 10);
        let b = ByteSpan::new(5, 15);
        assert_eq!(a.intersection(b), Some(ByteSpan::new(5, 10)));
        assert_eq!(a.intersection(ByteSpan::new(10, 20)), None);
        assert_eq!(a.union(b), ByteSpan::new(0, 15));
    }

    #[test]
    fn contains_span() {
        let outer = ByteSpan::new(0, 20);
        let inner = ByteSpan::new(5, 15);
        assert!(outer.contains_span(inner));
        assert!(!inner.contains_span(outer));
    }
}
