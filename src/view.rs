use std::fmt::{self, Debug};
use std::marker::{PhantomData};

use super::{
    IndexType, Dims, FullyStatic, Extents, Layout, LayoutRight, Mapping, FromExtents, Accessor,
    AccessorMut, DefaultAccessor, DefaultAccessorMut,
};

/// A multi-dimensional view of memory that it does not own.
///
/// An `Mdspan` combines:
/// - a data handle of type `A::DataHandle`, e.g. a slice.
/// - a [`Mapping`] chosen by the [`Layout`] `L`, which holds the
///   [`Extents`] (with index type `I` and dimensions `D`) and maps index
///   tuples to offsets.
/// - an [`Accessor`] `A`, which turns the data handle and an offset into an
///   element reference.
///
/// The defaults give a row-major, read-only view of a slice.
///
/// ```
/// use mdspan::{Mdspan, Dyn, Fixed};
/// let data = [0, 1, 2, 3, 4, 5];
/// let v: Mdspan<i32, usize, (Dyn, Fixed<3>)> = Mdspan::new(&data[..], [2]);
/// assert_eq!(v.extent(0), 2);
/// assert_eq!(v.extent(1), 3);
/// assert_eq!(v[[1, 0]], 3);
/// assert_eq!(*v.at([1, 2]), 5);
/// ```
///
/// The `Default` `Mdspan` exists only if every extent is static:
///
/// ```compile_fail
/// use mdspan::{Mdspan, Dyn};
/// let v: Mdspan<i32, usize, (Dyn,)> = Default::default();
/// ```
///
/// A [`LayoutStride`] `Mdspan` cannot be constructed from its extents
/// alone:
///
/// ```compile_fail
/// use mdspan::{Mdspan, Dyn, LayoutStride};
/// let data = [0; 4];
/// let v: Mdspan<i32, usize, (Dyn,), LayoutStride> = Mdspan::new(&data[..], [4]);
/// ```
///
/// The data handle is not checked against [`Mapping::required_span_size()`].
/// With the default accessors, reading beyond the slice panics.
///
/// [`LayoutStride`]: super::LayoutStride
pub struct Mdspan<
    'a,
    T,
    I: IndexType,
    D: Dims,
    L: Layout = LayoutRight,
    A: Accessor<Element=T> = DefaultAccessor<'a, T>,
> {
    data: A::DataHandle,
    mapping: L::Mapping<I, D>,
    accessor: A,
    _marker: PhantomData<&'a T>,
}

/// An [`Mdspan`] that can modify its elements.
///
/// ```
/// use mdspan::{MdspanMut, Fixed, LayoutLeft};
/// let mut data = [0u8; 6];
/// let mut v: MdspanMut<u8, usize, (Fixed<2>, Fixed<3>), LayoutLeft> = MdspanMut::new(&mut data[..], [2, 3]);
/// v[[1, 2]] = 9;
/// *v.at_mut([0, 1]) = 4;
/// assert_eq!(v.view()[[1, 2]], 9);
/// assert_eq!(data, [0, 0, 4, 0, 0, 9]);
/// ```
pub type MdspanMut<'a, T, I, D, L = LayoutRight> = Mdspan<'a, T, I, D, L, DefaultAccessorMut<'a, T>>;

impl<'a, T, I: IndexType, D: Dims, L: Layout, A: Accessor<Element=T>> Mdspan<'a, T, I, D, L, A> {
    /// Constructs an `Mdspan` from a list of sizes, as for [`Extents::new()`].
    pub fn new<J: IndexType, const N: usize>(data: A::DataHandle, sizes: [J; N]) -> Self where
        L::Mapping<I, D>: FromExtents,
        A: Default,
    {
        Self::from_extents(data, Extents::new(sizes))
    }

    /// Constructs an `Mdspan` of the given extents, using the layout's
    /// mapping for them.
    pub fn from_extents(data: A::DataHandle, extents: Extents<I, D>) -> Self where
        L::Mapping<I, D>: FromExtents,
        A: Default,
    {
        Self::from_mapping(data, <L::Mapping<I, D> as FromExtents>::from_extents(extents))
    }

    /// Constructs an `Mdspan` from a mapping, using the default accessor.
    pub fn from_mapping(data: A::DataHandle, mapping: L::Mapping<I, D>) -> Self where
        A: Default,
    {
        Self::from_parts(data, mapping, A::default())
    }

    /// Constructs an `Mdspan` from all three of its parts.
    pub fn from_parts(data: A::DataHandle, mapping: L::Mapping<I, D>, accessor: A) -> Self {
        Self {data, mapping, accessor, _marker: PhantomData}
    }

    #[inline(always)]
    pub fn rank() -> usize { D::RANK }

    #[inline(always)]
    pub fn rank_dynamic() -> usize { D::RANK_DYNAMIC }

    #[inline(always)]
    pub fn static_extent(r: usize) -> usize { Extents::<I, D>::static_extent(r) }

    #[inline(always)]
    pub fn extent(&self, r: usize) -> I { self.extents().extent(r) }

    /// The number of elements, i.e. the product of the extents.
    pub fn size(&self) -> usize { self.extents().size() }

    /// `true` if any extent is zero.
    pub fn is_empty(&self) -> bool { self.extents().is_empty() }

    #[inline(always)]
    pub fn extents(&self) -> &Extents<I, D> { self.mapping.extents() }

    #[inline(always)]
    pub fn mapping(&self) -> &L::Mapping<I, D> { &self.mapping }

    #[inline(always)]
    pub fn accessor(&self) -> &A { &self.accessor }

    #[inline(always)]
    pub fn data(&self) -> &A::DataHandle { &self.data }

    pub fn is_always_unique() -> bool { <L::Mapping<I, D> as Mapping>::ALWAYS_UNIQUE }
    pub fn is_always_exhaustive() -> bool { <L::Mapping<I, D> as Mapping>::ALWAYS_EXHAUSTIVE }
    pub fn is_always_strided() -> bool { <L::Mapping<I, D> as Mapping>::ALWAYS_STRIDED }

    pub fn is_unique(&self) -> bool { self.mapping.is_unique() }
    pub fn is_exhaustive(&self) -> bool { self.mapping.is_exhaustive() }
    pub fn is_strided(&self) -> bool { self.mapping.is_strided() }

    pub fn stride(&self, r: usize) -> I { self.mapping.stride(r) }

    pub fn required_span_size(&self) -> I { self.mapping.required_span_size() }

    /// Returns the element at `index`.
    ///
    /// `N` must equal the rank, otherwise this is a compile-time error.
    /// Indices may be given in any integer type.
    ///
    /// # Panics
    ///
    /// Panics if an index is negative or does not fit in `I`. Indices beyond
    /// the extents are only detected in debug builds.
    ///
    /// ```compile_fail
    /// use mdspan::{Mdspan, Dyn};
    /// let data = [0; 4];
    /// let v: Mdspan<i32, usize, (Dyn, Dyn)> = Mdspan::new(&data[..], [2, 2]);
    /// v.at([1]);
    /// ```
    #[inline(always)]
    pub fn at<J: IndexType, const N: usize>(&self, index: [J; N]) -> A::Reference<'_> {
        let offset = self.mapping.offset_of(index).as_usize();
        self.accessor.access(&self.data, offset)
    }

    /// Returns the element at `index`, mutably. See [`Self::at()`].
    #[inline(always)]
    pub fn at_mut<J: IndexType, const N: usize>(&mut self, index: [J; N]) -> A::ReferenceMut<'_> where
        A: AccessorMut,
    {
        let offset = self.mapping.offset_of(index).as_usize();
        self.accessor.access_mut(&mut self.data, offset)
    }

    /// Apply `f` to every element in turn, varying the last index fastest.
    ///
    /// ```
    /// use mdspan::{Mdspan, Dyn, LayoutLeft};
    /// let data = [1, 2, 3, 4, 5, 6];
    /// let v: Mdspan<i32, u8, (Dyn, Dyn), LayoutLeft> = Mdspan::new(&data[..], [2, 3]);
    /// let mut all = Vec::new();
    /// v.each(|&x| all.push(x));
    /// assert_eq!(all, [1, 3, 5, 2, 4, 6]);
    /// ```
    pub fn each<'s>(&'s self, mut f: impl FnMut(A::Reference<'s>)) {
        self.extents().each(|index| {
            let offset = self.mapping.linear_index(&index).as_usize();
            f(self.accessor.access(&self.data, offset))
        });
    }
}

impl<'a, T, I: IndexType, D: Dims, L: Layout> Mdspan<'a, T, I, D, L, DefaultAccessorMut<'a, T>> {
    /// Reborrows `self` as a read-only `Mdspan`.
    pub fn view(&self) -> Mdspan<'_, T, I, D, L> {
        Mdspan::from_parts(&*self.data, self.mapping, DefaultAccessor::default())
    }
}

impl<'a, T, I: IndexType, D: Dims, L: Layout> From<MdspanMut<'a, T, I, D, L>> for Mdspan<'a, T, I, D, L> {
    fn from(other: MdspanMut<'a, T, I, D, L>) -> Self {
        let data: &'a [T] = other.data;
        Mdspan::from_parts(data, other.mapping, other.accessor.into())
    }
}

impl<'a, T, I: IndexType, D: Dims, L: Layout, A: Accessor<Element=T>> Default for Mdspan<'a, T, I, D, L, A> where
    D: FullyStatic,
    L::Mapping<I, D>: FromExtents,
    A: Default,
    A::DataHandle: Default,
{
    /// An `Mdspan` of the static extents, whose data handle is the default,
    /// e.g. an empty slice.
    fn default() -> Self {
        Self::from_extents(<A::DataHandle as Default>::default(), Extents::default())
    }
}

impl<'a, T, I: IndexType, D: Dims, L: Layout, A: Accessor<Element=T>> Clone for Mdspan<'a, T, I, D, L, A> where
    A::DataHandle: Clone,
{
    fn clone(&self) -> Self {
        Self::from_parts(self.data.clone(), self.mapping, self.accessor.clone())
    }
}

impl<'a, T, I: IndexType, D: Dims, L: Layout, A: Accessor<Element=T>> Copy for Mdspan<'a, T, I, D, L, A> where
    A: Copy,
    A::DataHandle: Copy,
{}

impl<'a, T, I: IndexType, D: Dims, L: Layout, A: Accessor<Element=T>> Debug for Mdspan<'a, T, I, D, L, A> where
    A: Debug,
    A::DataHandle: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mdspan")
            .field("data", &self.data)
            .field("mapping", &self.mapping)
            .field("accessor", &self.accessor)
            .finish()
    }
}

// ----------------------------------------------------------------------------

impl<'a, T, I: IndexType, D: Dims, L: Layout, J: IndexType, const N: usize> std::ops::Index<[J; N]> for Mdspan<'a, T, I, D, L, DefaultAccessor<'a, T>> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: [J; N]) -> &T { self.at(index) }
}

impl<'a, T, I: IndexType, D: Dims, L: Layout, J: IndexType, const N: usize> std::ops::Index<[J; N]> for Mdspan<'a, T, I, D, L, DefaultAccessorMut<'a, T>> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: [J; N]) -> &T { self.at(index) }
}

impl<'a, T, I: IndexType, D: Dims, L: Layout, J: IndexType, const N: usize> std::ops::IndexMut<[J; N]> for Mdspan<'a, T, I, D, L, DefaultAccessorMut<'a, T>> {
    #[inline(always)]
    fn index_mut(&mut self, index: [J; N]) -> &mut T { self.at_mut(index) }
}

// ----------------------------------------------------------------------------
