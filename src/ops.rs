use std::fmt::{Debug, Formatter};

/// Slot index span within the year.
pub type Span = RangeExclusive<usize>;

#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RangeExclusive<T: Copy> {
    pub start: T,
    pub end: T,
}

impl<T: Copy + Debug> Debug for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<T: Copy> RangeExclusive<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

impl<T: Copy + PartialOrd> RangeExclusive<T> {
    /// Check whether both ranges share at least one point.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        (self.start < other.end) && (other.start < self.end)
    }
}
