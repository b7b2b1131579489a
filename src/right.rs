use super::{
    Error, IndexType, Dims, DimsFrom, RankAtMostOne, Extents, LayoutRight, Mapping, AlwaysUnique,
    AlwaysExhaustive, AlwaysStrided, FromExtents, LeftMapping, StrideMapping,
};
use super::layout::{debug_check_index};

/// The [`Mapping`] of [`LayoutRight`]: row-major, the last index varies
/// fastest. This is the default layout of an [`Mdspan`].
///
/// ```
/// use mdspan::{Extents, Fixed, Mapping, RightMapping};
/// let m: RightMapping<usize, (Fixed<2>, Fixed<3>, Fixed<5>, Fixed<7>)> = RightMapping::default();
/// assert_eq!([m.stride(0), m.stride(1), m.stride(2), m.stride(3)], [105, 35, 7, 1]);
/// assert_eq!(m.offset_of([1, 2, 3, 4]), 105 + 70 + 21 + 4);
/// ```
///
/// [`Mdspan`]: super::Mdspan
#[derive(Debug, Default, Copy, Clone, Hash)]
pub struct RightMapping<I: IndexType, D: Dims> {
    extents: Extents<I, D>,
}

impl<I: IndexType, D: Dims> RightMapping<I, D> {
    pub fn new(extents: Extents<I, D>) -> Self { Self {extents} }

    /// Converts a `RightMapping` with different extents. See
    /// [`Extents::from_extents()`].
    pub fn from_right<J: IndexType, D2: Dims>(other: &RightMapping<J, D2>) -> Self where
        D: DimsFrom<D2>,
    {
        Self::new(Extents::from_extents(other.extents))
    }

    /// Converts a [`LeftMapping`]. With at most one dimension, the two
    /// layouts agree.
    pub fn from_left<J: IndexType, D2: Dims>(other: &LeftMapping<J, D2>) -> Self where
        D: DimsFrom<D2> + RankAtMostOne,
    {
        Self::new(Extents::from_extents(*other.extents()))
    }

    /// Converts a [`StrideMapping`] whose strides are row-major.
    ///
    /// # Panics
    ///
    /// Panics if the extents cannot be converted or if any stride differs
    /// from the row-major stride.
    pub fn from_stride<J: IndexType, D2: Dims>(other: &StrideMapping<J, D2>) -> Self where
        D: DimsFrom<D2>,
    {
        match Self::try_from_stride(other) {
            Ok(mapping) => mapping,
            Err(e) => panic!("{}", e),
        }
    }

    /// Like [`Self::from_stride()`], but reports failure as an `Err`.
    pub fn try_from_stride<J: IndexType, D2: Dims>(other: &StrideMapping<J, D2>) -> Result<Self, Error> where
        D: DimsFrom<D2>,
    {
        let mapping = Self::new(Extents::try_from_extents(*other.extents())?);
        for dim in 0..D::RANK {
            let expected = mapping.stride(dim).as_usize();
            let got = other.stride(dim).as_usize();
            if expected != got { return Err(Error::StrideMismatch {dim, expected, got}); }
        }
        Ok(mapping)
    }
}

impl<I: IndexType, D: Dims> Mapping for RightMapping<I, D> {
    type Index = I;
    type Dims = D;
    type Layout = LayoutRight;

    const ALWAYS_UNIQUE: bool = true;
    const ALWAYS_EXHAUSTIVE: bool = true;
    const ALWAYS_STRIDED: bool = true;

    #[inline(always)]
    fn extents(&self) -> &Extents<I, D> { &self.extents }

    fn required_span_size(&self) -> I {
        (0..D::RANK).fold(I::one(), |size, r| size * self.extents.extent(r))
    }

    #[inline(always)]
    fn linear_index(&self, index: &D::Array<I>) -> I {
        debug_check_index(&self.extents, index);
        index.as_ref().iter().enumerate().fold(I::zero(), |offset, (r, &i)| {
            offset * self.extents.extent(r) + i
        })
    }

    fn stride(&self, r: usize) -> I {
        assert!(r < D::RANK, "Dimension {} is out of bounds for rank {}", r, D::RANK);
        (r + 1..D::RANK).fold(I::one(), |stride, d| stride * self.extents.extent(d))
    }

    fn is_unique(&self) -> bool { true }
    fn is_exhaustive(&self) -> bool { true }
    fn is_strided(&self) -> bool { true }
}

impl<I: IndexType, D: Dims> AlwaysUnique for RightMapping<I, D> {}
impl<I: IndexType, D: Dims> AlwaysExhaustive for RightMapping<I, D> {}
impl<I: IndexType, D: Dims> AlwaysStrided for RightMapping<I, D> {}

impl<I: IndexType, D: Dims> FromExtents for RightMapping<I, D> {
    fn from_extents(extents: Extents<I, D>) -> Self { Self::new(extents) }
}

impl<I: IndexType, D: RankAtMostOne> From<LeftMapping<I, D>> for RightMapping<I, D> {
    fn from(other: LeftMapping<I, D>) -> Self { Self::new(*other.extents()) }
}

impl<I: IndexType> From<StrideMapping<I, ()>> for RightMapping<I, ()> {
    fn from(other: StrideMapping<I, ()>) -> Self { Self::new(*other.extents()) }
}

impl<I: IndexType, D: Dims, J: IndexType, D2: Dims> PartialEq<RightMapping<J, D2>> for RightMapping<I, D> {
    fn eq(&self, other: &RightMapping<J, D2>) -> bool { self.extents == other.extents }
}

impl<I: IndexType, D: Dims> Eq for RightMapping<I, D> {}

// ----------------------------------------------------------------------------
