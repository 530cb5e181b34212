use crate::error::AllocError;
use crate::id::IdValue;
use crate::range::IdRange;
use crate::range_set::RangeSet;
use log::{debug, trace};

/// Single-owner id allocator over a fixed inclusive range.
///
/// Hands out the smallest free id at or above the one after the last
/// allocation, wrapping around to the smallest free id overall when nothing
/// is free above. Freed ids become available again immediately.
///
/// Free ids are stored as a set of maximal ranges, so memory grows with the
/// number of holes in the allocation pattern rather than the size of the
/// range. Use [`IdAllocator`](crate::IdAllocator) to share a pool between
/// threads.
#[derive(Debug, Clone)]
pub struct IdPool<T> {
    bounds: IdRange<T>,
    free: RangeSet<T>,
    /// Where the next search starts. `None` once the type's maximum value has
    /// been allocated.
    cursor: Option<T>,
}

impl<T: IdValue> IdPool<T> {
    /// Creates a pool over `bound1..=bound2`, accepting the bounds in either
    /// order. Every id starts out free.
    pub fn new(bound1: T, bound2: T) -> Self {
        let bounds = IdRange::new(bound1, bound2);
        Self {
            bounds,
            free: RangeSet::new(bounds),
            cursor: Some(bounds.start()),
        }
    }

    /// Allocates an id.
    ///
    /// Fails with [`AllocError::Exhausted`] when every id in the range is in
    /// use.
    pub fn allocate(&mut self) -> Result<T, AllocError> {
        let Some(range) = self.free.select(self.cursor) else {
            debug!("id pool {} exhausted", self.bounds);
            return Err(AllocError::Exhausted);
        };

        let id = match self.cursor {
            Some(cursor) if range.contains(cursor) => cursor,
            _ => range.start(),
        };
        self.cursor = id.checked_next();
        self.free.take(range, id);

        trace!("allocated id {id} from free range {range}");
        Ok(id)
    }

    /// Returns `id` to the pool.
    ///
    /// Ids outside the pool's bounds and ids that are already free are
    /// ignored. Returns true if the id was released.
    pub fn free(&mut self, id: T) -> bool {
        if !self.bounds.contains(id) {
            debug!("ignoring free of id {id} outside {}", self.bounds);
            return false;
        }

        let released = self.free.release(id);
        if released {
            trace!("freed id {id}");
        } else {
            debug!("ignoring free of id {id} which is not allocated");
        }
        released
    }

    /// The range of ids this pool hands out.
    pub fn bounds(&self) -> IdRange<T> {
        self.bounds
    }

    /// Total number of ids in the pool.
    pub fn capacity(&self) -> u128 {
        self.bounds.len()
    }

    /// Number of ids currently free.
    pub fn free_count(&self) -> u128 {
        self.free.id_count()
    }

    /// Number of ids currently allocated.
    pub fn allocated_count(&self) -> u128 {
        self.capacity() - self.free_count()
    }

    /// Returns true if `id` is within bounds and not allocated.
    pub fn is_free(&self, id: T) -> bool {
        self.bounds.contains(id) && self.free.find(id).is_some()
    }

    /// Returns true if the next [`allocate`](Self::allocate) would fail.
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// The free ids as maximal ranges, lowest first.
    pub fn free_ranges(&self) -> impl Iterator<Item = IdRange<T>> + '_ {
        self.free.iter().copied()
    }

    #[cfg(test)]
    pub(crate) fn is_canonical(&self) -> bool {
        self.free.is_canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn allocate_n(pool: &mut IdPool<i32>, n: usize) -> Vec<i32> {
        (0..n).map(|_| pool.allocate().expect("pool should have free ids")).collect()
    }

    #[test]
    fn test_sequential_allocation() {
        let mut pool = IdPool::new(1, 5);
        assert_eq!(allocate_n(&mut pool, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(pool.allocate(), Err(AllocError::Exhausted));
        assert!(pool.is_exhausted());
    }

    #[test]
    fn test_reversed_bounds_scenario() {
        let mut pool = IdPool::new(5, 1);
        assert_eq!(pool.bounds(), IdRange::new(1, 5));
        assert_eq!(allocate_n(&mut pool, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(pool.allocate(), Err(AllocError::Exhausted));

        assert!(pool.free(3));
        assert!(pool.free(5));
        assert!(pool.free(4));
        assert!(!pool.free(0));
        assert_eq!(pool.allocate(), Ok(3));

        assert!(!pool.free(4));
        assert!(!pool.free(6));
        assert!(pool.free(1));
        assert_eq!(allocate_n(&mut pool, 3), vec![4, 5, 1]);
        assert_eq!(pool.allocate(), Err(AllocError::Exhausted));
    }

    #[test]
    fn test_cursor_scenario() {
        let mut pool = IdPool::new(1, 5);
        allocate_n(&mut pool, 5);
        pool.free(2);
        assert_eq!(pool.allocate(), Ok(2));

        for id in [1, 2, 3, 5] {
            assert!(pool.free(id));
        }
        assert_eq!(pool.free_ranges().collect::<Vec<_>>(), vec![
            IdRange::new(1, 3),
            IdRange::single(5)
        ]);
        assert_eq!(pool.allocate(), Ok(3));
    }

    #[test]
    fn test_prefers_above_cursor_over_lower_hole() {
        let mut pool = IdPool::new(1, 10);
        allocate_n(&mut pool, 4);
        pool.free(2);
        // 2 is free but the cursor sits at 5.
        assert_eq!(pool.allocate(), Ok(5));
        assert_eq!(pool.allocate(), Ok(6));
    }

    #[test]
    fn test_skips_to_nearest_free_above() {
        let mut pool = IdPool::new(1, 10);
        allocate_n(&mut pool, 10);
        pool.free(8);
        pool.free(3);
        // Cursor is past the top, so wrap to the lowest free id.
        assert_eq!(pool.allocate(), Ok(3));
        // Cursor is 4, which is allocated; the nearest free id above is 8.
        assert_eq!(pool.allocate(), Ok(8));
    }

    #[test]
    fn test_free_merges_to_uninterrupted_run() {
        let mut pool = IdPool::new(1, 6);
        allocate_n(&mut pool, 6);
        for id in [2, 4, 3] {
            pool.free(id);
        }
        assert_eq!(pool.free_ranges().collect::<Vec<_>>(), vec![IdRange::new(2, 4)]);
        assert_eq!(allocate_n(&mut pool, 3), vec![2, 3, 4]);
        assert!(pool.is_exhausted());
    }

    #[test]
    fn test_counts() {
        let mut pool = IdPool::new(10u16, 19);
        assert_eq!(pool.capacity(), 10);
        assert_eq!(pool.free_count(), 10);
        pool.allocate().unwrap();
        pool.allocate().unwrap();
        assert_eq!(pool.free_count(), 8);
        assert_eq!(pool.allocated_count(), 2);
        assert!(!pool.is_free(10));
        assert!(pool.is_free(12));
        assert!(!pool.is_free(20));
    }

    #[test]
    fn test_full_width_unsigned() {
        let mut pool = IdPool::new(u8::MIN, u8::MAX);
        for expected in 0..=u8::MAX {
            assert_eq!(pool.allocate(), Ok(expected));
        }
        assert_eq!(pool.allocate(), Err(AllocError::Exhausted));

        pool.free(255);
        pool.free(7);
        assert_eq!(pool.allocate(), Ok(7));
        assert_eq!(pool.allocate(), Ok(255));
        assert!(pool.is_exhausted());
    }

    #[test]
    fn test_full_width_signed() {
        let mut pool = IdPool::new(i8::MAX, i8::MIN);
        assert_eq!(pool.capacity(), 256);
        assert_eq!(pool.allocate(), Ok(-128));
        for _ in 0..255 {
            pool.allocate().unwrap();
        }
        assert!(pool.is_exhausted());
        pool.free(-1);
        pool.free(0);
        pool.free(1);
        assert_eq!(pool.free_ranges().collect::<Vec<_>>(), vec![IdRange::new(-1, 1)]);
        assert_eq!(pool.allocate(), Ok(-1));
    }

    #[test]
    fn test_wraps_after_type_maximum() {
        let mut pool = IdPool::new(u64::MAX - 2, u64::MAX);
        assert_eq!(pool.allocate(), Ok(u64::MAX - 2));
        pool.free(u64::MAX - 2);
        assert_eq!(pool.allocate(), Ok(u64::MAX - 1));
        assert_eq!(pool.allocate(), Ok(u64::MAX));
        assert_eq!(pool.allocate(), Ok(u64::MAX - 2));
    }

    #[test]
    fn test_single_id_pool() {
        let mut pool = IdPool::new(42, 42);
        assert_eq!(pool.allocate(), Ok(42));
        assert_eq!(pool.allocate(), Err(AllocError::Exhausted));
        assert!(pool.free(42));
        assert_eq!(pool.allocate(), Ok(42));
    }

    #[test]
    fn test_double_free_is_ignored() {
        let mut pool = IdPool::new(1, 5);
        allocate_n(&mut pool, 3);
        assert!(pool.free(2));
        assert!(!pool.free(2));
        assert!(!pool.free(5));
        assert_eq!(pool.free_count(), 3);
        assert!(pool.is_canonical());
    }
}
