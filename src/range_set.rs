use crate::id::IdValue;
use crate::range::IdRange;
use std::collections::BTreeSet;

/// Ordered set of free ranges.
///
/// Invariant: no two ranges in the set overlap or adjoin, so the set is the
/// minimal description of the free ids. Every mutation goes through
/// [`RangeSet::take`] or [`RangeSet::release`], which both preserve it.
#[derive(Debug, Clone)]
pub(crate) struct RangeSet<T> {
    ranges: BTreeSet<IdRange<T>>,
}

impl<T: IdValue> RangeSet<T> {
    /// Creates a set holding exactly `range`.
    pub(crate) fn new(range: IdRange<T>) -> Self {
        let mut ranges = BTreeSet::new();
        ranges.insert(range);
        Self { ranges }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of free ids across all ranges.
    pub(crate) fn id_count(&self) -> u128 {
        self.ranges.iter().map(IdRange::len).sum()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &IdRange<T>> + '_ {
        self.ranges.iter()
    }

    /// The free ranges on either side of `id` in sort order.
    ///
    /// The first is the last range ordered before `{id}`, the second the
    /// first range ordered at or after it. A range containing `id` is always
    /// one of the two.
    fn neighbours(&self, id: T) -> (Option<IdRange<T>>, Option<IdRange<T>>) {
        let probe = IdRange::single(id);
        let before = self.ranges.range(..probe).next_back().copied();
        let after = self.ranges.range(probe..).next().copied();
        (before, after)
    }

    /// The free range containing `id`, if any.
    pub(crate) fn find(&self, id: T) -> Option<IdRange<T>> {
        let (before, after) = self.neighbours(id);
        [before, after].into_iter().flatten().find(|range| range.contains(id))
    }

    /// Picks the range the next id comes from.
    ///
    /// Prefers the range containing `cursor`, then the nearest range above
    /// it, then the lowest range overall. A `None` cursor sits above every
    /// range. Returns `None` only when the set is empty.
    pub(crate) fn select(&self, cursor: Option<T>) -> Option<IdRange<T>> {
        let lowest = self.ranges.first().copied()?;
        let Some(cursor) = cursor else {
            return Some(lowest);
        };

        let (before, after) = self.neighbours(cursor);
        let candidate = [before, after]
            .into_iter()
            .flatten()
            .find(|range| range.contains(cursor))
            .or_else(|| after.filter(|range| range.start() > cursor));

        Some(candidate.unwrap_or(lowest))
    }

    /// Removes `id` from the free range `range` that holds it.
    pub(crate) fn take(&mut self, range: IdRange<T>, id: T) {
        debug_assert!(range.contains(id));
        self.ranges.remove(&range);
        self.ranges.extend(range.split_around(id));
    }

    /// Returns `id` to the set, merging it with any adjoining free ranges.
    ///
    /// Returns false if `id` was already free.
    pub(crate) fn release(&mut self, id: T) -> bool {
        let (before, after) = self.neighbours(id);
        let neighbours = [before, after];
        if neighbours.iter().flatten().any(|range| range.contains(id)) {
            return false;
        }

        let merged = neighbours
            .iter()
            .flatten()
            .fold(IdRange::single(id), |acc, range| {
                acc.merge_adjacent(range).unwrap_or(acc)
            });

        for range in neighbours.iter().flatten() {
            if merged.overlaps(range) {
                self.ranges.remove(range);
            }
        }
        self.ranges.insert(merged);
        true
    }

    /// Checks that no two ranges overlap or adjoin.
    #[cfg(test)]
    pub(crate) fn is_canonical(&self) -> bool {
        self.ranges
            .iter()
            .zip(self.ranges.iter().skip(1))
            .all(|(low, high)| {
                low.end() < high.start() && !low.overlaps(high) && !low.adjoins(high)
            })
    }
}
