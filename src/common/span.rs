use std::ops::Range;

/// The byte range of a token in the scanned input.
#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Span {
    /// The byte offset of the first character, inclusive.
    pub start: usize,
    /// The byte offset behind the last character, exclusive.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Returns true if the span covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of bytes covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// The span as a range usable for slicing the input.
    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}
