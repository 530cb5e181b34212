use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Integer types that can be handed out as identifiers.
///
/// All arithmetic the allocator needs goes through this trait, so nothing
/// overflows when a range touches the edge of the integer type.
pub trait IdValue: Copy + Ord + Hash + Debug + Display + Send + 'static {
    /// The value one above `self`, or `None` at the type's maximum.
    fn checked_next(self) -> Option<Self>;

    /// The value one below `self`, or `None` at the type's minimum.
    fn checked_prev(self) -> Option<Self>;

    /// Number of values in the inclusive span `lo..=hi`.
    ///
    /// Callers guarantee `lo <= hi`.
    fn span(lo: Self, hi: Self) -> u128;
}

macro_rules! impl_id_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IdValue for $ty {
                #[inline]
                fn checked_next(self) -> Option<Self> {
                    self.checked_add(1)
                }

                #[inline]
                fn checked_prev(self) -> Option<Self> {
                    self.checked_sub(1)
                }

                #[inline]
                fn span(lo: Self, hi: Self) -> u128 {
                    (hi as i128 - lo as i128) as u128 + 1
                }
            }
        )*
    };
}

impl_id_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
