//! This module contains the regex AST the automaton construction works on and the conversion from
//! the high-level intermediate representation of the `regex_syntax` crate into it.

use regex_syntax::hir::{Class, Hir, HirKind, Repetition};

use crate::common::Interval;

use super::{LexGenError, LexGenErrorKind, Result};

macro_rules! unsupported {
    ($feature:expr) => {
        LexGenError::new(LexGenErrorKind::UnsupportedFeature($feature.to_string()))
    };
}

/// A regular expression over code point intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexAst {
    /// Matches one code point out of the given intervals. An empty set never matches.
    CharSet(Vec<Interval>),
    /// Matches the left expression followed by the right expression.
    Concat(Box<RegexAst>, Box<RegexAst>),
    /// Matches either the left or the right expression.
    Union(Box<RegexAst>, Box<RegexAst>),
    /// Matches zero or more repetitions of the expression.
    Star(Box<RegexAst>),
    /// Matches one or more repetitions of the expression.
    Plus(Box<RegexAst>),
    /// Matches the expression or the empty word.
    Optional(Box<RegexAst>),
}

impl RegexAst {
    /// A set of one single character.
    pub fn char(c: char) -> Self {
        RegexAst::CharSet(vec![Interval::single(c)])
    }

    /// A set of the characters in the range `start..=end`.
    pub fn range(start: char, end: char) -> Self {
        RegexAst::CharSet(vec![Interval::from_chars(start, end)])
    }

    /// The sequence of the characters of `text`. The empty string yields the empty word.
    pub fn literal(text: &str) -> Self {
        Self::concat_all(text.chars().map(RegexAst::char))
    }

    /// Matches only the empty word.
    pub fn empty() -> Self {
        RegexAst::Optional(Box::new(RegexAst::CharSet(Vec::new())))
    }

    /// Concatenation of `self` and `rhs`.
    pub fn then(self, rhs: RegexAst) -> Self {
        RegexAst::Concat(Box::new(self), Box::new(rhs))
    }

    /// Union of `self` and `rhs`.
    pub fn or(self, rhs: RegexAst) -> Self {
        RegexAst::Union(Box::new(self), Box::new(rhs))
    }

    /// Zero or more repetitions of `self`.
    pub fn star(self) -> Self {
        RegexAst::Star(Box::new(self))
    }

    /// One or more repetitions of `self`.
    pub fn plus(self) -> Self {
        RegexAst::Plus(Box::new(self))
    }

    /// `self` or the empty word.
    pub fn optional(self) -> Self {
        RegexAst::Optional(Box::new(self))
    }

    /// Folds the expressions left to right into nested concatenations.
    /// No expression at all yields the empty word.
    pub fn concat_all(asts: impl IntoIterator<Item = RegexAst>) -> Self {
        asts.into_iter()
            .reduce(RegexAst::then)
            .unwrap_or_else(RegexAst::empty)
    }

    /// Folds the expressions left to right into nested unions.
    /// No expression at all yields the empty character set.
    pub fn union_all(asts: impl IntoIterator<Item = RegexAst>) -> Self {
        asts.into_iter()
            .reduce(RegexAst::or)
            .unwrap_or(RegexAst::CharSet(Vec::new()))
    }

    /// Collects the intervals of all character sets in the expression in depth-first order.
    pub fn intervals(&self) -> Vec<Interval> {
        let mut intervals = Vec::new();
        self.collect_intervals(&mut intervals);
        intervals
    }

    fn collect_intervals(&self, intervals: &mut Vec<Interval>) {
        match self {
            RegexAst::CharSet(set) => intervals.extend_from_slice(set),
            RegexAst::Concat(lhs, rhs) | RegexAst::Union(lhs, rhs) => {
                lhs.collect_intervals(intervals);
                rhs.collect_intervals(intervals);
            }
            RegexAst::Star(ast) | RegexAst::Plus(ast) | RegexAst::Optional(ast) => {
                ast.collect_intervals(intervals)
            }
        }
    }
}

impl TryFrom<&Hir> for RegexAst {
    type Error = LexGenError;

    fn try_from(hir: &Hir) -> Result<Self> {
        match hir.kind() {
            HirKind::Empty => Ok(RegexAst::empty()),
            HirKind::Literal(literal) => {
                let text = std::str::from_utf8(&literal.0)
                    .map_err(|_| unsupported!(format!("Non UTF-8 literal {:?}", literal.0)))?;
                Ok(RegexAst::literal(text))
            }
            HirKind::Class(Class::Unicode(class)) => Ok(RegexAst::CharSet(
                class
                    .ranges()
                    .iter()
                    .map(|r| Interval::from_chars(r.start(), r.end()))
                    .collect(),
            )),
            HirKind::Class(Class::Bytes(class)) => {
                if class.ranges().iter().any(|r| r.end() > 0x7F) {
                    return Err(unsupported!(format!("Non ASCII byte class {:?}", class)));
                }
                Ok(RegexAst::CharSet(
                    class
                        .ranges()
                        .iter()
                        .map(|r| Interval::new(r.start() as u32, r.end() as u32))
                        .collect(),
                ))
            }
            HirKind::Look(look) => Err(unsupported!(format!("Assertion {:?}", look))),
            HirKind::Repetition(repetition) => lower_repetition(repetition),
            HirKind::Capture(capture) => RegexAst::try_from(capture.sub.as_ref()),
            HirKind::Concat(hirs) => Ok(RegexAst::concat_all(
                hirs.iter()
                    .map(RegexAst::try_from)
                    .collect::<Result<Vec<_>>>()?,
            )),
            HirKind::Alternation(hirs) => Ok(RegexAst::union_all(
                hirs.iter()
                    .map(RegexAst::try_from)
                    .collect::<Result<Vec<_>>>()?,
            )),
        }
    }
}

// Expands `sub{min,max}` into plain concatenations. Laziness has no meaning for a DFA and is
// ignored.
fn lower_repetition(repetition: &Repetition) -> Result<RegexAst> {
    let sub = RegexAst::try_from(repetition.sub.as_ref())?;
    let min = repetition.min as usize;
    let mut parts = Vec::new();
    match repetition.max {
        None if min == 0 => parts.push(sub.star()),
        None => {
            parts.extend(std::iter::repeat_n(sub.clone(), min - 1));
            parts.push(sub.plus());
        }
        Some(max) => {
            parts.extend(std::iter::repeat_n(sub.clone(), min));
            parts.extend(std::iter::repeat_n(sub.optional(), max as usize - min));
        }
    }
    Ok(RegexAst::concat_all(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiletime::parse_regex_syntax;

    fn lower(pattern: &str) -> Result<RegexAst> {
        RegexAst::try_from(&parse_regex_syntax(pattern)?)
    }

    #[test]
    fn test_lower_literal() {
        assert_eq!(
            lower("ab").unwrap(),
            RegexAst::char('a').then(RegexAst::char('b'))
        );
        assert_eq!(lower("ä").unwrap(), RegexAst::char('ä'));
    }

    #[test]
    fn test_lower_empty() {
        assert_eq!(lower("").unwrap(), RegexAst::empty());
        assert_eq!(lower("a{0}").unwrap(), RegexAst::empty());
    }

    #[test]
    fn test_lower_class() {
        assert_eq!(lower("[a-c]").unwrap(), RegexAst::range('a', 'c'));
        assert_eq!(
            lower(r"[\t ]").unwrap(),
            RegexAst::CharSet(vec![Interval::single('\t'), Interval::single(' ')])
        );
        assert_eq!(lower("(?-u:[a-c])").unwrap(), RegexAst::range('a', 'c'));
    }

    #[test]
    fn test_lower_repetitions() {
        let a = || RegexAst::char('a');
        assert_eq!(lower("a*").unwrap(), a().star());
        assert_eq!(lower("a+").unwrap(), a().plus());
        assert_eq!(lower("a?").unwrap(), a().optional());
        assert_eq!(lower("a*?").unwrap(), a().star());
        assert_eq!(lower("a{2}").unwrap(), a().then(a()));
        assert_eq!(lower("a{2,}").unwrap(), a().then(a().plus()));
        assert_eq!(
            lower("a{1,3}").unwrap(),
            a().then(a().optional()).then(a().optional())
        );
    }

    #[test]
    fn test_lower_capture_and_alternation() {
        let ast = lower("(ab)+c").unwrap();
        assert_eq!(
            ast,
            RegexAst::char('a')
                .then(RegexAst::char('b'))
                .plus()
                .then(RegexAst::char('c'))
        );
        assert_eq!(
            lower("ab|cd").unwrap(),
            RegexAst::literal("ab").or(RegexAst::literal("cd"))
        );
    }

    #[test]
    fn test_lower_unsupported() {
        for pattern in ["^a", "a$", r"\bx"] {
            let result = lower(pattern);
            assert!(
                matches!(
                    result.as_ref().map_err(|e| e.kind()),
                    Err(LexGenErrorKind::UnsupportedFeature(_))
                ),
                "{}: {:?}",
                pattern,
                result
            );
        }
    }

    #[test]
    fn test_intervals() {
        let ast = RegexAst::range('a', 'z')
            .or(RegexAst::char('_'))
            .then(RegexAst::range('0', '9').star());
        assert_eq!(
            ast.intervals(),
            vec![
                Interval::from_chars('a', 'z'),
                Interval::single('_'),
                Interval::from_chars('0', '9'),
            ]
        );
        assert!(RegexAst::empty().intervals().is_empty());
    }
}
