use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};

use super::{
    Error, IndexType, cast_index, Dims, DimsFrom, Extents, LayoutStride, Mapping, AlwaysUnique,
    AlwaysStrided, LeftMapping, RightMapping,
};
use super::dims::{Arity};
use super::int::{to_index};
use super::layout::{debug_check_index};

/// The [`Mapping`] of [`LayoutStride`]: each dimension has its own stride.
///
/// The offset of `[i0, i1, ...]` is `i0 * stride(0) + i1 * stride(1) + ...`.
/// The strides must make the mapping unique, but need not make it
/// exhaustive.
///
/// ```
/// use mdspan::{Extents, Dyn, Fixed, Mapping, StrideMapping};
/// let e: Extents<usize, (Dyn, Fixed<3>)> = Extents::new([2]);
/// let m = StrideMapping::new(e, [1, 3]);
/// assert_eq!(m.offset_of([1, 2]), 7);
/// assert_eq!(m.required_span_size(), 8);
/// assert!(m.is_unique());
/// assert!(!m.is_exhaustive());
/// ```
pub struct StrideMapping<I: IndexType, D: Dims> {
    extents: Extents<I, D>,
    strides: D::Array<I>,
}

impl<I: IndexType, D: Dims> StrideMapping<I, D> {
    /// Constructs a `StrideMapping` from its extents and strides.
    ///
    /// `N` must equal the rank. The strides are not checked for uniqueness;
    /// see [`Self::try_new()`].
    ///
    /// # Panics
    ///
    /// Panics if a stride is negative or does not fit in `I`.
    pub fn new<J: IndexType, const N: usize>(extents: Extents<I, D>, strides: [J; N]) -> Self {
        let () = Arity::<D, N>::INDICES;
        Self {extents, strides: D::array(|r| to_index(strides[r]))}
    }

    /// Constructs a `StrideMapping`, checking that every stride fits in `I`
    /// and that no two index tuples have the same offset.
    ///
    /// Sorting the dimensions by stride, each stride must be at least the
    /// span of the dimensions before it. This is sufficient for uniqueness
    /// but not necessary: interleaved layouts are rejected. Dimensions of
    /// extent `1` are ignored, as are the strides of a mapping with no
    /// index tuples.
    ///
    /// ```
    /// use mdspan::{Error, Extents, Dyn, StrideMapping};
    /// let e: Extents<usize, (Dyn, Dyn)> = Extents::new([2, 3]);
    /// assert!(StrideMapping::try_new(e, &[1, 2]).is_ok());
    /// assert!(StrideMapping::try_new(e, &[1, 3]).is_ok());
    /// assert_eq!(
    ///     StrideMapping::try_new(e, &[1, 1]),
    ///     Err(Error::OverlappingStrides { dim: 1, stride: 1, span: 2 }),
    /// );
    /// ```
    pub fn try_new<J: IndexType>(extents: Extents<I, D>, strides: &[J]) -> Result<Self, Error> {
        if strides.len() != D::RANK {
            return Err(Error::StrideCount { rank: D::RANK, got: strides.len() });
        }
        let mut checked = D::array(|_| I::zero());
        for (dim, &stride) in strides.iter().enumerate() {
            checked.as_mut()[dim] = cast_index(stride)
                .ok_or_else(|| Error::NotRepresentable { dim, value: stride.to_string() })?;
        }
        let mapping = Self {extents, strides: checked};
        if extents.is_empty() { return Ok(mapping); }
        let mut span = 1usize;
        for &dim in mapping.order().as_ref() {
            let extent = extents.extent(dim).as_usize();
            if extent == 1 { continue; }
            let stride = checked.as_ref()[dim].as_usize();
            if stride < span { return Err(Error::OverlappingStrides {dim, stride, span}); }
            span = span.saturating_add(stride.saturating_mul(extent - 1));
        }
        Ok(mapping)
    }

    /// Converts any unique, strided mapping with compatible extents, by
    /// asking it for its strides.
    ///
    /// # Panics
    ///
    /// Panics if the extents cannot be converted or a stride does not fit in
    /// `I`.
    pub fn from_mapping<M: AlwaysUnique + AlwaysStrided>(other: &M) -> Self where
        D: DimsFrom<M::Dims>,
    {
        Self {
            extents: Extents::from_extents(*other.extents()),
            strides: D::array(|r| to_index(other.stride(r))),
        }
    }

    /// Copies the extents and strides of a mapping with the same shape and
    /// index type. Nothing can fail.
    fn from_same_shape<M: AlwaysUnique + AlwaysStrided + Mapping<Index=I, Dims=D>>(other: &M) -> Self {
        Self {extents: *other.extents(), strides: D::array(|r| other.stride(r))}
    }

    /// All the strides.
    #[inline(always)]
    pub fn strides(&self) -> D::Array<I> { self.strides }

    /// The dimensions in increasing order of stride. Ties keep their order.
    fn order(&self) -> D::Array<usize> {
        let mut order = D::array(|r| r);
        order.as_mut().sort_by_key(|&r| self.strides.as_ref()[r]);
        order
    }
}

impl<I: IndexType, D: Dims> Mapping for StrideMapping<I, D> {
    type Index = I;
    type Dims = D;
    type Layout = LayoutStride;

    const ALWAYS_UNIQUE: bool = true;
    const ALWAYS_EXHAUSTIVE: bool = false;
    const ALWAYS_STRIDED: bool = true;

    #[inline(always)]
    fn extents(&self) -> &Extents<I, D> { &self.extents }

    fn required_span_size(&self) -> I {
        if D::RANK == 0 { return I::one(); }
        if !self.extents.all_positive() { return I::zero(); }
        self.strides.as_ref().iter().enumerate().fold(I::one(), |span, (r, &stride)| {
            span + (self.extents.extent(r) - I::one()) * stride
        })
    }

    #[inline(always)]
    fn linear_index(&self, index: &D::Array<I>) -> I {
        debug_check_index(&self.extents, index);
        index.as_ref().iter().zip(self.strides.as_ref()).fold(I::zero(), |offset, (&i, &stride)| {
            offset + i * stride
        })
    }

    #[inline(always)]
    fn stride(&self, r: usize) -> I { self.strides.as_ref()[r] }

    fn is_unique(&self) -> bool { true }

    /// `true` if the offsets fill `0..required_span_size()`, i.e. if, after
    /// sorting the dimensions of extent greater than `1` by stride, the first
    /// stride is `1` and each subsequent stride is the product of the
    /// previous stride and extent.
    fn is_exhaustive(&self) -> bool {
        if !self.extents.all_positive() { return true; }
        let mut expected = I::one();
        for &dim in self.order().as_ref() {
            let extent = self.extents.extent(dim);
            if extent == I::one() { continue; }
            if self.strides.as_ref()[dim] != expected { return false; }
            expected = expected * extent;
        }
        true
    }

    fn is_strided(&self) -> bool { true }
}

impl<I: IndexType, D: Dims> AlwaysUnique for StrideMapping<I, D> {}
impl<I: IndexType, D: Dims> AlwaysStrided for StrideMapping<I, D> {}

impl<I: IndexType, D: Dims> From<LeftMapping<I, D>> for StrideMapping<I, D> {
    fn from(other: LeftMapping<I, D>) -> Self { Self::from_same_shape(&other) }
}

impl<I: IndexType, D: Dims> From<RightMapping<I, D>> for StrideMapping<I, D> {
    fn from(other: RightMapping<I, D>) -> Self { Self::from_same_shape(&other) }
}

impl<I: IndexType, D: Dims> Default for StrideMapping<I, D> {
    /// Row-major strides for the default extents.
    fn default() -> Self { Self::from(RightMapping::<I, D>::default()) }
}

impl<I: IndexType, D: Dims> Clone for StrideMapping<I, D> {
    fn clone(&self) -> Self { *self }
}

impl<I: IndexType, D: Dims> Copy for StrideMapping<I, D> {}

impl<I: IndexType, D: Dims> Hash for StrideMapping<I, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.extents.hash(state);
        self.strides.hash(state);
    }
}

impl<I: IndexType, D: Dims> Debug for StrideMapping<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StrideMapping")
            .field("extents", &self.extents)
            .field("strides", &self.strides)
            .finish()
    }
}

/// Equal if the extents are equal and the strides are equal.
impl<I: IndexType, D: Dims, J: IndexType, D2: Dims> PartialEq<StrideMapping<J, D2>> for StrideMapping<I, D> {
    fn eq(&self, other: &StrideMapping<J, D2>) -> bool {
        self.extents == other.extents &&
        self.strides.as_ref().iter().zip(other.strides.as_ref())
            .all(|(&a, &b)| a.as_usize() == b.as_usize())
    }
}

impl<I: IndexType, D: Dims> Eq for StrideMapping<I, D> {}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use super::super::{Fixed, Dyn, DExtents};
    use super::super::layout::{check_mapping};

    fn mapping(extents: [usize; 3], strides: [usize; 3]) -> StrideMapping<usize, (Dyn, Dyn, Dyn)> {
        StrideMapping::new(Extents::new(extents), strides)
    }

    #[test]
    fn observers() {
        let e: Extents<usize, (Dyn, Fixed<3>)> = Extents::new([2]);
        let m = StrideMapping::new(e, [1, 3]);
        assert_eq!(m.offset_of([1, 0]), 1);
        assert_eq!(m.offset_of([1, 2]), 7);
        assert_eq!(m.offset_of([0, 1]), 3);
        assert_eq!(m.offset_of([1, 1]), 4);
        assert_eq!(m.strides(), [1, 3]);
        assert_eq!(m.required_span_size(), 8);
        assert!(!m.is_exhaustive());
        check_mapping(&m);
    }

    #[test]
    fn exhaustive_2d() {
        let e: DExtents<usize, 2> = Extents::new([2, 3]);
        for (strides, exhaustive) in [
            ([1, 2], true),
            ([3, 1], true),
            ([1, 3], false),
            ([4, 1], false),
            ([2, 3], false),
        ] {
            let m = StrideMapping::new(e, strides);
            assert_eq!(m.is_exhaustive(), exhaustive, "{:?}", m);
            check_mapping(&m);
        }
    }

    #[test]
    fn exhaustive_with_singletons() {
        for (extents, strides) in [
            ([2, 1, 3], [3, 1, 1]),
            ([2, 1, 3], [3, 7, 1]),
            ([2, 3, 1], [3, 1, 1]),
            ([2, 3, 1], [3, 1, 11]),
            ([3, 2, 1], [1, 3, 1]),
            ([3, 2, 1], [1, 3, 13]),
        ] {
            let m = mapping(extents, strides);
            assert!(m.is_exhaustive(), "{:?}", m);
            check_mapping(&m);
        }
    }

    #[test]
    fn zero_extent() {
        let m = mapping([2, 0, 3], [1, 2, 0]);
        assert_eq!(m.required_span_size(), 0);
        assert!(m.is_exhaustive());
        check_mapping(&m);
    }

    #[test]
    fn rank_zero() {
        let m: StrideMapping<usize, ()> = StrideMapping::new::<usize, 0>(Extents::default(), []);
        assert_eq!(m.required_span_size(), 1);
        assert!(m.is_exhaustive());
        assert_eq!(m.offset_of::<usize, 0>([]), 0);
        assert_eq!(m, StrideMapping::<usize, ()>::default());
    }

    #[test]
    fn from_layouts() {
        let e: Extents<u32, (Fixed<2>, Fixed<3>, Fixed<5>, Fixed<7>)> = Extents::default();
        let left = StrideMapping::from(LeftMapping::new(e));
        let right = StrideMapping::from(RightMapping::new(e));
        assert_eq!(left.strides(), [1, 2, 6, 30]);
        assert_eq!(right.strides(), [105, 35, 7, 1]);
        assert!(left.is_exhaustive());
        assert!(right.is_exhaustive());
        assert_eq!(right, StrideMapping::from(RightMapping::new(e)));
        assert_ne!(right, left);
        assert_eq!(StrideMapping::<u32, (Fixed<2>, Fixed<3>, Fixed<5>, Fixed<7>)>::default(), right);
    }

    fn strided_left<I: IndexType, D: Dims>(m: LeftMapping<I, D>) -> StrideMapping<I, D> { m.into() }
    fn strided_right<I: IndexType, D: Dims>(m: RightMapping<I, D>) -> StrideMapping<I, D> { m.into() }

    #[test]
    fn from_layouts_generic() {
        let e: Extents<u16, (Dyn, Fixed<3>, Dyn)> = Extents::new([2, 4]);
        assert_eq!(strided_left(LeftMapping::new(e)).strides(), [1, 2, 6]);
        assert_eq!(strided_right(RightMapping::new(e)).strides(), [12, 4, 1]);
        assert_eq!(strided_right(RightMapping::new(e)), strided_right(RightMapping::new(e)));
        let d: StrideMapping<u16, (Dyn, Fixed<3>, Dyn)> = StrideMapping::default();
        assert_eq!(d.strides(), [0, 0, 1]);
        assert_eq!(d.extents().to_array(), [0, 3, 0]);
    }

    #[test]
    fn stride_count_message() {
        let e: DExtents<usize, 3> = Extents::new([2, 2, 2]);
        let err = StrideMapping::try_new(e, &[4, 1]).map(|_| ()).unwrap_err();
        assert_eq!(err.to_string(), "expected 3 strides, got 2");
    }

    #[test]
    fn from_mapping() {
        let e: DExtents<usize, 2> = Extents::new([4, 6]);
        let s = StrideMapping::new(e, [12, 2]);
        let t: StrideMapping<u16, (Fixed<4>, Dyn)> = StrideMapping::from_mapping(&s);
        assert_eq!(t, s);
        let u: StrideMapping<usize, (Dyn, Dyn)> = StrideMapping::from_mapping(&RightMapping::new(e));
        assert_eq!(u.strides(), [6, 1]);
    }

    #[test]
    fn equality() {
        let e: DExtents<usize, 2> = Extents::new([2, 3]);
        let f: Extents<i8, (Fixed<2>, Fixed<3>)> = Extents::default();
        assert_eq!(StrideMapping::new(e, [3, 1]), StrideMapping::new(f, [3, 1]));
        assert_ne!(StrideMapping::new(e, [3, 1]), StrideMapping::new(f, [1, 2]));
        assert_ne!(StrideMapping::new(e, [1, 2]), StrideMapping::new(Extents::<usize, (Dyn, Dyn)>::new([3, 2]), [1, 2]));
    }

    #[test]
    fn try_new() {
        let e: DExtents<usize, 3> = Extents::new([2, 1, 3]);
        assert!(StrideMapping::try_new(e, &[3, 0, 1]).is_ok());
        assert_eq!(
            StrideMapping::try_new(e, &[1, 1, 1]),
            Err(Error::OverlappingStrides { dim: 2, stride: 1, span: 2 }),
        );
        assert_eq!(
            StrideMapping::try_new(e, &[3, 1]),
            Err(Error::StrideCount { rank: 3, got: 2 }),
        );
        assert!(matches!(
            StrideMapping::try_new(e, &[3, 1, -1]),
            Err(Error::NotRepresentable { dim: 2, .. }),
        ));
        let empty: DExtents<usize, 2> = Extents::new([0, 3]);
        assert!(StrideMapping::try_new(empty, &[0, 0]).is_ok());
    }

    #[test]
    #[should_panic(expected = "not representable")]
    fn negative_stride() {
        let e: DExtents<usize, 1> = Extents::new([2]);
        StrideMapping::new(e, [-1]);
    }

    proptest! {
        #[test]
        fn prop_accepted_strides_are_unique(
            extents in prop::array::uniform3(0usize..=4),
            strides in prop::array::uniform3(0usize..=12),
        ) {
            let e: DExtents<usize, 3> = Extents::new(extents);
            if let Ok(m) = StrideMapping::try_new(e, &strides) {
                check_mapping(&m);
            }
        }

        #[test]
        fn prop_permuted_right_is_exhaustive(
            extents in prop::array::uniform3(1usize..=4),
            perm in Just(vec![0usize, 1, 2]).prop_shuffle(),
        ) {
            let mut strides = [0usize; 3];
            let mut stride = 1;
            for &r in perm.iter().rev() {
                strides[r] = stride;
                stride *= extents[r];
            }
            let m = StrideMapping::new(Extents::<usize, (Dyn, Dyn, Dyn)>::new(extents), strides);
            prop_assert!(m.is_exhaustive());
            prop_assert_eq!(m.required_span_size(), extents.iter().product::<usize>());
            prop_assert_eq!(StrideMapping::try_new(*m.extents(), &strides), Ok(m));
            check_mapping(&m);
        }
    }
}
