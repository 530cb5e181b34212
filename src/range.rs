use crate::id::IdValue;
use std::fmt;

/// An inclusive span of ids `start..=end`.
///
/// Ranges order by `(start, end)`, which is what the free-range set relies on
/// for its predecessor/successor lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdRange<T> {
    start: T,
    end: T,
}

impl<T: IdValue> IdRange<T> {
    /// Creates the range between two bounds given in either order.
    pub fn new(bound1: T, bound2: T) -> Self {
        Self {
            start: bound1.min(bound2),
            end: bound1.max(bound2),
        }
    }

    /// Creates the range holding only `id`.
    pub fn single(id: T) -> Self {
        Self { start: id, end: id }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    /// Number of ids in the range. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u128 {
        T::span(self.start, self.end)
    }

    pub fn contains(&self, id: T) -> bool {
        self.start <= id && id <= self.end
    }

    /// Returns true if the two ranges share at least one id.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contains(other.start)
            || self.contains(other.end)
            || other.contains(self.start)
            || other.contains(self.end)
    }

    /// Returns true if the ranges touch without a gap and without overlapping.
    pub fn adjoins(&self, other: &Self) -> bool {
        self.end.checked_next() == Some(other.start) || other.end.checked_next() == Some(self.start)
    }

    /// Joins two adjoining ranges into one.
    ///
    /// Returns `None` if the ranges don't adjoin.
    pub fn merge_adjacent(&self, other: &Self) -> Option<Self> {
        self.adjoins(other).then(|| Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        })
    }

    /// Removes `id` from the range, yielding the zero, one or two pieces left.
    ///
    /// A range that doesn't contain `id` is yielded unchanged.
    pub fn split_around(&self, id: T) -> SplitAround<T> {
        if !self.contains(id) {
            return SplitAround {
                below: Some(*self),
                above: None,
            };
        }

        let below = id
            .checked_prev()
            .filter(|&prev| prev >= self.start)
            .map(|prev| Self::new(self.start, prev));
        let above = id
            .checked_next()
            .filter(|&next| next <= self.end)
            .map(|next| Self::new(next, self.end));

        SplitAround { below, above }
    }
}

impl<T: fmt::Display> fmt::Display for IdRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Pieces of a range left over after removing one id, lowest first.
///
/// Returned by [`IdRange::split_around`].
#[derive(Debug, Clone)]
pub struct SplitAround<T> {
    below: Option<IdRange<T>>,
    above: Option<IdRange<T>>,
}

impl<T> Iterator for SplitAround<T> {
    type Item = IdRange<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.below.take().or_else(|| self.above.take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.below.is_some() as usize + self.above.is_some() as usize;
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for SplitAround<T> {}
