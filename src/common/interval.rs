/// A closed range `[start, end]` of Unicode code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    /// The first code point of the interval, inclusive.
    pub start: u32,
    /// The last code point of the interval, inclusive.
    pub end: u32,
}

impl Interval {
    /// Create a new interval.
    /// Panics if `start > end`.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        assert!(start <= end, "Invalid interval [{}, {}]", start, end);
        Interval { start, end }
    }

    /// Create an interval that contains exactly one character.
    #[inline]
    pub fn single(c: char) -> Self {
        Interval::new(c as u32, c as u32)
    }

    /// Create an interval from a character range.
    #[inline]
    pub fn from_chars(start: char, end: char) -> Self {
        Interval::new(start as u32, end as u32)
    }

    /// Check if the interval contains the given code point.
    #[inline]
    pub fn contains(&self, code_point: u32) -> bool {
        self.start <= code_point && code_point <= self.end
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{:#x}", self.start)
        } else {
            write!(f, "{:#x}..{:#x}", self.start, self.end)
        }
    }
}

/// Resolve a code point to its symbol id.
///
/// The intervals must be sorted and disjoint. Symbol ids are 1-based; `0` is returned when no
/// interval contains the code point.
#[inline]
pub fn symbol_of(intervals: &[(u32, u32)], code_point: u32) -> usize {
    // Index of the first interval that starts after the code point
    let index = intervals.partition_point(|(start, _)| *start <= code_point);
    if index > 0 && code_point <= intervals[index - 1].1 {
        index
    } else {
        0
    }
}
