use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// Half-open interval `[begin, end)` over 0-based sequence coordinates.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub begin: usize,
    pub end: usize,
}

impl Range {
    pub fn new(begin: usize, end: usize) -> Self {
        Range { begin, end }
    }

    /// Range covering `length` positions starting at `start`.
    pub fn from_span(start: usize, length: usize) -> Self {
        Range {
            begin: start,
            end: start + length,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    #[inline]
    pub fn contains(&self, pos: usize) -> bool {
        self.begin <= pos && pos < self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    ///
    /// 1-based, inclusive rendering: `12` for a single position,
    /// `12-14` otherwise.
    ///
    pub fn to_one_based_string(&self) -> String {
        if self.len() == 1 {
            format!("{}", self.begin + 1)
        } else {
            format!("{}-{}", self.begin + 1, self.end)
        }
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_from_span() {
        let range = Range::from_span(3, 4);
        assert_eq!(range, Range::new(3, 7));
        assert_eq!(range.len(), 4);
        assert!(range.contains(6));
        assert!(!range.contains(7));
    }

    #[rstest]
    #[case(Range::new(0, 3), Range::new(2, 5), true)]
    #[case(Range::new(0, 3), Range::new(3, 5), false)]
    #[case(Range::new(4, 6), Range::new(0, 5), true)]
    fn test_overlaps(#[case] a: Range, #[case] b: Range, #[case] expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[rstest]
    #[case(Range::new(11, 12), "12")]
    #[case(Range::new(11, 14), "12-14")]
    fn test_one_based_string(#[case] range: Range, #[case] expected: &str) {
        assert_eq!(range.to_one_based_string(), expected);
    }
}
