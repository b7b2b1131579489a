use super::{
    Error, IndexType, Dims, DimsFrom, RankAtMostOne, Extents, LayoutLeft, Mapping, AlwaysUnique,
    AlwaysExhaustive, AlwaysStrided, FromExtents, RightMapping, StrideMapping,
};
use super::layout::{debug_check_index};

/// The [`Mapping`] of [`LayoutLeft`]: column-major, the first index varies
/// fastest.
///
/// ```
/// use mdspan::{Extents, Fixed, Mapping, LeftMapping};
/// let m: LeftMapping<usize, (Fixed<2>, Fixed<3>, Fixed<5>, Fixed<7>)> = LeftMapping::default();
/// assert_eq!([m.stride(0), m.stride(1), m.stride(2), m.stride(3)], [1, 2, 6, 30]);
/// assert_eq!(m.required_span_size(), 210);
/// ```
#[derive(Debug, Default, Copy, Clone, Hash)]
pub struct LeftMapping<I: IndexType, D: Dims> {
    extents: Extents<I, D>,
}

impl<I: IndexType, D: Dims> LeftMapping<I, D> {
    pub fn new(extents: Extents<I, D>) -> Self { Self {extents} }

    /// Converts a `LeftMapping` with different extents. See
    /// [`Extents::from_extents()`].
    pub fn from_left<J: IndexType, D2: Dims>(other: &LeftMapping<J, D2>) -> Self where
        D: DimsFrom<D2>,
    {
        Self::new(Extents::from_extents(other.extents))
    }

    /// Converts a [`RightMapping`]. With at most one dimension, the two
    /// layouts agree.
    ///
    /// ```compile_fail
    /// use mdspan::{Extents, Dyn, LeftMapping, RightMapping};
    /// let e: Extents<usize, (Dyn, Dyn)> = Extents::new([2, 3]);
    /// let m: LeftMapping<usize, (Dyn, Dyn)> = LeftMapping::from_right(&RightMapping::new(e));
    /// ```
    pub fn from_right<J: IndexType, D2: Dims>(other: &RightMapping<J, D2>) -> Self where
        D: DimsFrom<D2> + RankAtMostOne,
    {
        Self::new(Extents::from_extents(*other.extents()))
    }

    /// Converts a [`StrideMapping`] whose strides are column-major.
    ///
    /// # Panics
    ///
    /// Panics if the extents cannot be converted or if any stride differs
    /// from the column-major stride.
    pub fn from_stride<J: IndexType, D2: Dims>(other: &StrideMapping<J, D2>) -> Self where
        D: DimsFrom<D2>,
    {
        match Self::try_from_stride(other) {
            Ok(mapping) => mapping,
            Err(e) => panic!("{}", e),
        }
    }

    /// Like [`Self::from_stride()`], but reports failure as an `Err`.
    ///
    /// ```
    /// use mdspan::{Error, Extents, Dyn, LeftMapping, StrideMapping};
    /// let e: Extents<usize, (Dyn, Dyn)> = Extents::new([2, 3]);
    /// let left = StrideMapping::new(e, [1, 2]);
    /// let right = StrideMapping::new(e, [3, 1]);
    /// assert_eq!(LeftMapping::<usize, (Dyn, Dyn)>::try_from_stride(&left), Ok(LeftMapping::new(e)));
    /// assert_eq!(
    ///     LeftMapping::<usize, (Dyn, Dyn)>::try_from_stride(&right),
    ///     Err(Error::StrideMismatch { dim: 0, expected: 1, got: 3 }),
    /// );
    /// ```
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

impl<I: IndexType, D: Dims> Mapping for LeftMapping<I, D> {
    type Index = I;
    type Dims = D;
    type Layout = LayoutLeft;

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
        index.as_ref().iter().enumerate().rev().fold(I::zero(), |offset, (r, &i)| {
            offset * self.extents.extent(r) + i
        })
    }

    fn stride(&self, r: usize) -> I {
        assert!(r < D::RANK, "Dimension {} is out of bounds for rank {}", r, D::RANK);
        (0..r).fold(I::one(), |stride, d| stride * self.extents.extent(d))
    }

    fn is_unique(&self) -> bool { true }
    fn is_exhaustive(&self) -> bool { true }
    fn is_strided(&self) -> bool { true }
}

impl<I: IndexType, D: Dims> AlwaysUnique for LeftMapping<I, D> {}
impl<I: IndexType, D: Dims> AlwaysExhaustive for LeftMapping<I, D> {}
impl<I: IndexType, D: Dims> AlwaysStrided for LeftMapping<I, D> {}

impl<I: IndexType, D: Dims> FromExtents for LeftMapping<I, D> {
    fn from_extents(extents: Extents<I, D>) -> Self { Self::new(extents) }
}

impl<I: IndexType, D: RankAtMostOne> From<RightMapping<I, D>> for LeftMapping<I, D> {
    fn from(other: RightMapping<I, D>) -> Self { Self::new(*other.extents()) }
}

impl<I: IndexType> From<StrideMapping<I, ()>> for LeftMapping<I, ()> {
    fn from(other: StrideMapping<I, ()>) -> Self { Self::new(*other.extents()) }
}

impl<I: IndexType, D: Dims, J: IndexType, D2: Dims> PartialEq<LeftMapping<J, D2>> for LeftMapping<I, D> {
    fn eq(&self, other: &LeftMapping<J, D2>) -> bool { self.extents == other.extents }
}

impl<I: IndexType, D: Dims> Eq for LeftMapping<I, D> {}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Fixed, Dyn, DExtents};
    use super::super::layout::{check_mapping};

    #[test]
    fn offsets() {
        let m: LeftMapping<usize, (Dyn, Dyn)> = LeftMapping::new(Extents::new([2, 3]));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m.offset_of([i, j]), i + 2 * j);
            }
        }
        assert_eq!(m.required_span_size(), 6);
        check_mapping(&m);
    }

    #[test]
    fn strides() {
        let m: LeftMapping<u32, (Fixed<2>, Dyn, Fixed<5>, Dyn)> = LeftMapping::new(Extents::new([3, 7]));
        assert_eq!((0..4).map(|r| m.stride(r)).collect::<Vec<_>>(), [1, 2, 6, 30]);
        check_mapping(&m);
    }

    #[test]
    fn shapes() {
        check_mapping(&LeftMapping::<usize, ()>::default());
        check_mapping(&LeftMapping::<i16, (Fixed<4>,)>::default());
        check_mapping(&LeftMapping::<u8, (Dyn, Fixed<3>, Dyn)>::new(Extents::new([2, 4])));
        check_mapping(&LeftMapping::<usize, (Dyn, Fixed<3>, Dyn)>::new(Extents::new([2, 0])));
        check_mapping(&LeftMapping::<usize, (Fixed<1>, Dyn, Fixed<1>)>::new(Extents::new([5])));
    }

    #[test]
    fn empty() {
        let m: LeftMapping<usize, (Dyn, Fixed<3>)> = LeftMapping::new(Extents::new([0]));
        assert_eq!(m.required_span_size(), 0);
        assert!(m.is_exhaustive());
        let rank0: LeftMapping<usize, ()> = LeftMapping::default();
        assert_eq!(rank0.required_span_size(), 1);
        assert_eq!(rank0.offset_of::<usize, 0>([]), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn stride_out_of_bounds() {
        let m: LeftMapping<usize, (Fixed<2>,)> = LeftMapping::default();
        m.stride(1);
    }

    #[test]
    fn conversions() {
        let e: DExtents<usize, 1> = Extents::new([5]);
        let right = RightMapping::new(e);
        let left: LeftMapping<usize, (Dyn,)> = right.into();
        assert_eq!(left, LeftMapping::new(e));
        let narrow: LeftMapping<u8, (Fixed<5>,)> = LeftMapping::from_right(&right);
        assert_eq!(narrow, left);
        let wide: LeftMapping<i64, (Dyn,)> = LeftMapping::from_left(&narrow);
        assert_eq!(wide, left);

        let rank0: LeftMapping<usize, ()> = StrideMapping::<usize, ()>::default().into();
        assert_eq!(rank0, LeftMapping::<usize, ()>::default());
    }

    #[test]
    fn from_stride() {
        let e: Extents<usize, (Dyn, Dyn, Dyn)> = Extents::new([2, 3, 4]);
        let s = StrideMapping::new(e, [1, 2, 6]);
        let m: LeftMapping<usize, (Fixed<2>, Dyn, Dyn)> = LeftMapping::from_stride(&s);
        assert_eq!(m, LeftMapping::new(e));
        let s = StrideMapping::new(e, [1, 2, 7]);
        assert_eq!(
            LeftMapping::<usize, (Dyn, Dyn, Dyn)>::try_from_stride(&s),
            Err(Error::StrideMismatch { dim: 2, expected: 6, got: 7 }),
        );
    }

    #[test]
    fn equality() {
        let a: LeftMapping<usize, (Fixed<2>, Dyn)> = LeftMapping::new(Extents::new([3]));
        let b: LeftMapping<u16, (Dyn, Dyn)> = LeftMapping::new(Extents::new([2, 3]));
        let c: LeftMapping<u16, (Dyn, Dyn)> = LeftMapping::new(Extents::new([3, 2]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
