//! This module contains the interval algebra that turns the character sets of all rules into one
//! alphabet of disjoint intervals.
//! Every interval of the alphabet is one input symbol of the automata, so the automata never see
//! single code points.

use log::trace;

use crate::common::Interval;

use super::SymbolID;

/// Splits possibly overlapping intervals into the minimal ordered sequence of disjoint intervals
/// such that every input interval is the union of a contiguous run of output intervals.
///
/// E.g. the intervals `[5, 70], [20, 30], [15, 50], [50, 60], [80, 90]` are split into
/// `[5, 14], [15, 19], [20, 30], [31, 49], [50, 50], [51, 60], [61, 70], [80, 90]`.
///
/// Code points that are not covered by any input interval are not covered by the output either.
pub fn split_intervals(intervals: &[Interval]) -> Vec<Interval> {
    // Encode the end points as (point << 1) + is_end. After sorting, a start at point p comes
    // before an end at point p.
    let mut events = intervals
        .iter()
        .flat_map(|i| [(i.start as u64) << 1, ((i.end as u64) << 1) | 1])
        .collect::<Vec<_>>();
    events.sort_unstable();

    let mut result = Vec::with_capacity((2 * intervals.len()).saturating_sub(1));
    // The nesting depth of the input intervals at the current point
    let mut depth = 0usize;
    // The start of the output interval that is currently open
    let mut open: Option<u32> = None;

    for event in events {
        let point = (event >> 1) as u32;
        if event & 1 == 0 {
            // A start point closes the open interval right before it.
            if let Some(start) = open {
                if start < point {
                    result.push(Interval::new(start, point - 1));
                }
            }
            open = Some(point);
            depth += 1;
        } else {
            // An end point closes the open interval including the point itself. If several
            // intervals end here, only the first one emits.
            if let Some(start) = open {
                if start <= point {
                    result.push(Interval::new(start, point));
                }
            }
            depth -= 1;
            open = if depth > 0 { point.checked_add(1) } else { None };
        }
    }

    debug_assert!(result.len() <= (2 * intervals.len()).saturating_sub(1));
    trace!(
        "Split {} intervals into {} disjoint intervals",
        intervals.len(),
        result.len()
    );
    result
}

/// Finds the indices of the alphabet intervals that exactly tile the interval `[start, end]`.
///
/// The interval has to align with the boundaries of the alphabet, which holds for every interval
/// the alphabet was split from. A misaligned interval is a bug in the caller and panics.
pub fn find_sub_intervals(start: u32, end: u32, alphabet: &[Interval]) -> Vec<SymbolID> {
    let mut index = match alphabet.binary_search_by_key(&start, |i| i.start) {
        Ok(index) => index,
        Err(_) => panic!(
            "Interval [{:#x}, {:#x}] does not start on an alphabet boundary",
            start, end
        ),
    };
    let mut result = vec![SymbolID::new(index)];
    while alphabet[index].end < end {
        index += 1;
        assert!(
            index < alphabet.len() && alphabet[index].start == alphabet[index - 1].end + 1,
            "Interval [{:#x}, {:#x}] is not tiled by the alphabet",
            start,
            end
        );
        result.push(SymbolID::new(index));
    }
    assert_eq!(
        alphabet[index].end, end,
        "Interval [{:#x}, {:#x}] does not end on an alphabet boundary",
        start, end
    );
    result
}

/// The alphabet of a lexer: sorted, disjoint code point intervals.
/// The interval at index `i` is the input symbol `SymbolID(i)` of the automata and has the
/// symbol id `i + 1` in the scanner tables, where `0` is reserved for the error input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    intervals: Vec<Interval>,
}

impl Alphabet {
    /// Creates the alphabet from all intervals used by the rules.
    pub fn new(intervals: &[Interval]) -> Self {
        Alphabet {
            intervals: split_intervals(intervals),
        }
    }

    /// Get the disjoint intervals of the alphabet.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The number of real symbols, the error symbol not counted.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if no rule uses any character.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The symbols that make up the given interval of a rule.
    pub fn symbols_of(&self, interval: &Interval) -> Vec<SymbolID> {
        find_sub_intervals(interval.start, interval.end, &self.intervals)
    }

    /// The symbol that contains the given code point.
    pub fn symbol_of(&self, code_point: u32) -> Option<SymbolID> {
        let index = self.intervals.partition_point(|i| i.start <= code_point);
        (index > 0 && self.intervals[index - 1].contains(code_point))
            .then(|| SymbolID::new(index - 1))
    }

    /// The interval of the given symbol.
    pub fn interval(&self, symbol: SymbolID) -> Option<&Interval> {
        self.intervals.get(symbol.as_usize())
    }

    /// The intervals as `(start, end)` pairs as used by the scanner tables.
    pub fn as_pairs(&self) -> Vec<(u32, u32)> {
        self.intervals.iter().map(|i| (i.start, i.end)).collect()
    }
}
