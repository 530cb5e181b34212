use crate::error::AllocError;
use crate::id::IdValue;
use crate::pool::IdPool;
use crate::range::IdRange;
use parking_lot::Mutex;

/// Thread-safe id allocator.
///
/// Wraps an [`IdPool`] in a mutex. Every call holds the lock for its whole
/// duration, so concurrent allocations and frees never observe each other's
/// intermediate state.
///
/// ```
/// use range_id_allocator::{AllocError, IdAllocator};
///
/// let ids = IdAllocator::new(1u32, 3);
/// assert_eq!(ids.allocate(), Ok(1));
/// assert_eq!(ids.allocate(), Ok(2));
/// ids.free(1);
/// assert_eq!(ids.allocate(), Ok(3));
/// assert_eq!(ids.allocate(), Ok(1));
/// assert_eq!(ids.allocate(), Err(AllocError::Exhausted));
/// ```
#[derive(Debug)]
pub struct IdAllocator<T> {
    pool: Mutex<IdPool<T>>,
}

impl<T: IdValue> IdAllocator<T> {
    /// Creates an allocator over `bound1..=bound2`, accepting the bounds in
    /// either order.
    pub fn new(bound1: T, bound2: T) -> Self {
        Self::from(IdPool::new(bound1, bound2))
    }

    /// See [`IdPool::allocate`].
    pub fn allocate(&self) -> Result<T, AllocError> {
        self.pool.lock().allocate()
    }

    /// See [`IdPool::free`].
    pub fn free(&self, id: T) -> bool {
        self.pool.lock().free(id)
    }

    pub fn bounds(&self) -> IdRange<T> {
        self.pool.lock().bounds()
    }

    pub fn capacity(&self) -> u128 {
        self.pool.lock().capacity()
    }

    pub fn free_count(&self) -> u128 {
        self.pool.lock().free_count()
    }

    pub fn allocated_count(&self) -> u128 {
        self.pool.lock().allocated_count()
    }

    pub fn is_free(&self, id: T) -> bool {
        self.pool.lock().is_free(id)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pool.lock().is_exhausted()
    }

    /// Snapshot of the free ranges, lowest first.
    pub fn free_ranges(&self) -> Vec<IdRange<T>> {
        self.pool.lock().free_ranges().collect()
    }

    /// Consumes the allocator, returning the pool it guards.
    pub fn into_inner(self) -> IdPool<T> {
        self.pool.into_inner()
    }
}

impl<T: IdValue> From<IdPool<T>> for IdAllocator<T> {
    fn from(pool: IdPool<T>) -> Self {
        Self {
            pool: Mutex::new(pool),
        }
    }
}
