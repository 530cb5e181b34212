//! # Range Id Allocator - Bounded Integer Identifier Allocation
//!
//! Hands out unique integer ids from a fixed inclusive range and takes them
//! back for reuse.
//!
//! Allocation follows one rule: return the smallest free id at or above the
//! one after the last allocation, or, if nothing above is free, the smallest
//! free id overall. Without frees this counts upward; after frees, ids are
//! reused lowest first once the cursor wraps around.
//!
//! Free ids are tracked as a sorted set of maximal free ranges that never
//! overlap or touch, so memory is proportional to the number of holes, not to
//! the size of the id space. Full-width ranges like `u32::MIN..=u32::MAX` cost
//! nothing up front.
//!
//! ## Example
//!
//! ```
//! use range_id_allocator::{AllocError, IdPool};
//!
//! let mut pool = IdPool::new(5, 1);
//! for expected in 1..=5 {
//!     assert_eq!(pool.allocate(), Ok(expected));
//! }
//! assert_eq!(pool.allocate(), Err(AllocError::Exhausted));
//!
//! pool.free(3);
//! pool.free(0); // outside the range, ignored
//! assert_eq!(pool.allocate(), Ok(3));
//! ```
//!
//! ## Performance
//!
//! - O(log n) per allocate and free, n being the number of free ranges
//! - [`IdAllocator`] adds one uncontended mutex acquisition per call

mod allocator;
mod error;
mod id;
mod pool;
mod range;
mod range_set;


pub use allocator::IdAllocator;
pub use error::AllocError;
pub use id::IdValue;
pub use pool::IdPool;
pub use range::{IdRange, SplitAround};
