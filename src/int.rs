//! Integer types that can be used to store extents, strides and indices.
//!
//! All of the primitive integer types implement [`IndexType`]. Signed types
//! are allowed, but only their non-negative values are meaningful.

use std::fmt::{Debug, Display};
use std::hash::{Hash};

use num_traits::{NumCast, PrimInt};

/// Implemented by the primitive integer types that can appear in an
/// [`Extents`].
///
/// [`Extents`]: super::Extents
pub trait IndexType: PrimInt + Hash + Debug + Display + Default + Send + Sync + 'static {
    /// The largest extent that can be stored in `Self`.
    const MAX_EXTENT: usize;

    /// Converts `value` with an `as` cast. The caller must already know that
    /// `value` fits.
    fn from_usize(value: usize) -> Self;

    /// Converts `self` with an `as` cast. The caller must already know that
    /// `self` is non-negative.
    fn as_usize(self) -> usize;
}

macro_rules! impl_index_type {
    ($($t:ty),*) => {$(
        impl IndexType for $t {
            const MAX_EXTENT: usize =
                if (<$t>::MAX as u128) > (usize::MAX as u128) { usize::MAX } else { <$t>::MAX as usize };

            #[inline(always)]
            fn from_usize(value: usize) -> Self { value as $t }

            #[inline(always)]
            fn as_usize(self) -> usize { self as usize }
        }
    )*}
}

impl_index_type!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

// ----------------------------------------------------------------------------

/// Converts `value` to `I` if it is non-negative and representable.
///
/// ```
/// use mdspan::cast_index;
/// assert_eq!(cast_index::<u8, i32>(200), Some(200u8));
/// assert_eq!(cast_index::<u8, i32>(300), None);
/// assert_eq!(cast_index::<usize, i64>(-1), None);
/// ```
pub fn cast_index<I: IndexType, J: IndexType>(value: J) -> Option<I> {
    if value < J::zero() { return None; }
    <I as NumCast>::from(value)
}

/// Like [`cast_index()`] but panics if `value` does not fit.
pub(crate) fn to_index<I: IndexType, J: IndexType>(value: J) -> I {
    match cast_index(value) {
        Some(i) => i,
        None => panic!("Index {} is not representable by the index type", value),
    }
}

// ----------------------------------------------------------------------------
