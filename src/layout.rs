//! Layout policies, which map index tuples to offsets.
//!
//! A [`Layout`] is a tag type such as [`LayoutRight`]. For each shape, it
//! names a [`Mapping`], which stores the [`Extents`] and any other run-time
//! state (e.g. strides) and computes offsets.

use std::fmt::{Debug};
use std::hash::{Hash};

use super::{IndexType, Dims, Extents, LeftMapping, RightMapping, StrideMapping};
use super::dims::{Arity};
use super::int::{to_index};

/// A layout policy. Implemented by [`LayoutLeft`], [`LayoutRight`] and
/// [`LayoutStride`].
pub trait Layout: 'static + Copy + Debug + Default + Send + Sync {
    /// The mapping for shape `D` and index type `I`.
    type Mapping<I: IndexType, D: Dims>: Mapping<Index=I, Dims=D, Layout=Self>;
}

/// The first index varies fastest, as in Fortran.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct LayoutLeft;

impl Layout for LayoutLeft {
    type Mapping<I: IndexType, D: Dims> = LeftMapping<I, D>;
}

/// The last index varies fastest, as in C.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct LayoutRight;

impl Layout for LayoutRight {
    type Mapping<I: IndexType, D: Dims> = RightMapping<I, D>;
}

/// Each dimension has an arbitrary stride.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct LayoutStride;

impl Layout for LayoutStride {
    type Mapping<I: IndexType, D: Dims> = StrideMapping<I, D>;
}

// ----------------------------------------------------------------------------

/// A function from index tuples within some [`Extents`] to offsets.
///
/// A mapping is:
/// - "unique" if no two index tuples have the same offset.
/// - "exhaustive" if every offset in `0..required_span_size()` is the offset
///   of some index tuple.
/// - "strided" if for each dimension `r` there is a stride `s` such that
///   incrementing index `r` always adds `s` to the offset.
///
/// The `ALWAYS_*` constants say whether a property holds for every value of
/// the mapping type. When a constant is `true`, the corresponding marker
/// trait ([`AlwaysUnique`], [`AlwaysExhaustive`], [`AlwaysStrided`]) is
/// also implemented.
pub trait Mapping: Copy + Debug + Eq + Hash + Send + Sync {
    /// The integer type of extents, indices and offsets.
    type Index: IndexType;

    /// The shape.
    type Dims: Dims;

    /// The layout tag that names this mapping.
    type Layout: Layout;

    const ALWAYS_UNIQUE: bool;
    const ALWAYS_EXHAUSTIVE: bool;
    const ALWAYS_STRIDED: bool;

    fn is_always_unique() -> bool { Self::ALWAYS_UNIQUE }
    fn is_always_exhaustive() -> bool { Self::ALWAYS_EXHAUSTIVE }
    fn is_always_strided() -> bool { Self::ALWAYS_STRIDED }

    fn extents(&self) -> &Extents<Self::Index, Self::Dims>;

    /// One more than the largest offset, or `0` if there are no index
    /// tuples.
    fn required_span_size(&self) -> Self::Index;

    /// Returns the offset of `index`.
    ///
    /// Every index must be less than the corresponding extent. This is only
    /// checked in debug builds.
    fn linear_index(&self, index: &<Self::Dims as Dims>::Array<Self::Index>) -> Self::Index;

    /// The stride of dimension `r`.
    ///
    /// Panics if `r` is not less than the rank.
    fn stride(&self, r: usize) -> Self::Index;

    fn is_unique(&self) -> bool;
    fn is_exhaustive(&self) -> bool;
    fn is_strided(&self) -> bool;

    /// Returns the offset of `index`, which can be given in any integer type.
    /// `N` must equal the rank, otherwise this is a compile-time error.
    ///
    /// # Panics
    ///
    /// Panics if an index is negative or does not fit in `Self::Index`.
    ///
    /// ```
    /// use mdspan::{Extents, Dyn, Mapping, LeftMapping, RightMapping};
    /// let e: Extents<usize, (Dyn, Dyn)> = Extents::new([2, 3]);
    /// assert_eq!(LeftMapping::new(e).offset_of([1, 2]), 1 + 2 * 2);
    /// assert_eq!(RightMapping::new(e).offset_of([1, 2]), 1 * 3 + 2);
    /// ```
    ///
    /// ```compile_fail
    /// use mdspan::{Extents, Dyn, Mapping, RightMapping};
    /// let m = RightMapping::new(Extents::<usize, (Dyn, Dyn)>::new([2, 3]));
    /// m.offset_of([1]);
    /// ```
    fn offset_of<J: IndexType, const N: usize>(&self, index: [J; N]) -> Self::Index {
        let () = Arity::<Self::Dims, N>::INDICES;
        let index = <Self::Dims as Dims>::array(|r| to_index::<Self::Index, J>(index[r]));
        self.linear_index(&index)
    }
}

/// Implemented by mappings for which [`Mapping::ALWAYS_UNIQUE`] is `true`.
pub trait AlwaysUnique: Mapping {}

/// Implemented by mappings for which [`Mapping::ALWAYS_EXHAUSTIVE`] is `true`.
pub trait AlwaysExhaustive: Mapping {}

/// Implemented by mappings for which [`Mapping::ALWAYS_STRIDED`] is `true`.
pub trait AlwaysStrided: Mapping {}

/// Implemented by mappings that are fully determined by their extents.
pub trait FromExtents: Mapping {
    fn from_extents(extents: Extents<Self::Index, Self::Dims>) -> Self;
}

/// Panics in debug builds if `index` is outside `extents`.
#[inline(always)]
pub(crate) fn debug_check_index<I: IndexType, D: Dims>(extents: &Extents<I, D>, index: &D::Array<I>) {
    if cfg!(debug_assertions) {
        for (r, &i) in index.as_ref().iter().enumerate() {
            assert!(
                i >= I::zero() && i < extents.extent(r),
                "Index {:?} is out of bounds for extents {:?}", index, extents,
            );
        }
    }
}

// ----------------------------------------------------------------------------

/// Calls [`Mapping::linear_index()`] on every index tuple, and checks the
/// results against the properties claimed by `mapping`.
#[cfg(test)]
pub(crate) fn check_mapping<M: Mapping>(mapping: &M) {
    let mut offsets = Vec::new();
    mapping.extents().each(|i| offsets.push(mapping.linear_index(&i).as_usize()));
    assert_eq!(offsets.len(), mapping.extents().size());

    let span = mapping.required_span_size().as_usize();
    assert_eq!(span, offsets.iter().max().map_or(0, |&max| max + 1));

    let mut distinct = offsets.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let unique = distinct.len() == offsets.len();
    if M::ALWAYS_UNIQUE { assert!(mapping.is_unique()); }
    if mapping.is_unique() { assert!(unique, "{:?} is not unique", mapping); }
    if unique {
        assert_eq!(mapping.is_exhaustive(), distinct.len() == span, "{:?}", mapping);
    }
    if M::ALWAYS_EXHAUSTIVE { assert!(mapping.is_exhaustive()); }

    if mapping.is_strided() {
        mapping.extents().each(|i| {
            for r in 0..<M::Dims as Dims>::RANK {
                let mut j = i;
                let next = j.as_ref()[r] + <M::Index as num_traits::One>::one();
                j.as_mut()[r] = next;
                if j.as_ref()[r] < mapping.extents().extent(r) {
                    assert_eq!(
                        mapping.linear_index(&j),
                        mapping.linear_index(&i) + mapping.stride(r),
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Fixed, Dyn};

    #[test]
    fn capabilities() {
        type L = <LayoutLeft as Layout>::Mapping<usize, (Dyn, Fixed<3>)>;
        type R = <LayoutRight as Layout>::Mapping<usize, (Dyn, Fixed<3>)>;
        type S = <LayoutStride as Layout>::Mapping<usize, (Dyn, Fixed<3>)>;
        assert!(L::is_always_unique() && L::is_always_exhaustive() && L::is_always_strided());
        assert!(R::is_always_unique() && R::is_always_exhaustive() && R::is_always_strided());
        assert!(S::is_always_unique() && !S::is_always_exhaustive() && S::is_always_strided());
    }

    #[test]
    fn offset_of_casts() {
        let m: RightMapping<u8, (Fixed<4>, Fixed<5>)> = RightMapping::default();
        assert_eq!(m.offset_of([3i64, 4]), 19u8);
        assert_eq!(m.offset_of([1usize, 0]), 5u8);
    }

    #[test]
    #[should_panic(expected = "not representable")]
    fn offset_of_negative() {
        let m: LeftMapping<usize, (Fixed<4>,)> = LeftMapping::default();
        m.offset_of([-1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of bounds")]
    fn offset_of_out_of_bounds() {
        let m: LeftMapping<usize, (Fixed<4>, Dyn)> = LeftMapping::new(Extents::new([2]));
        m.offset_of([0, 2]);
    }
}
