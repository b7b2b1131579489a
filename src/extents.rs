use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::marker::{PhantomData};

use super::{Error, IndexType, cast_index, Dims, DimsFrom, DimsWiden, AllDynamic, Rank, DYNAMIC_EXTENT};
use super::dims::{Arity};

/// The shape of a multi-dimensional array: one extent per dimension, each
/// of which is either fixed at compile time or chosen at run time.
///
/// `D` is a tuple of [`Fixed`] and [`Dyn`] describing the dimensions. `I`
/// is the integer type in which extents, and later indices and offsets,
/// are represented. Only the dynamic extents are stored.
///
/// ```
/// use mdspan::{Extents, Fixed, Dyn};
/// type E = Extents<usize, (Fixed<3>, Dyn)>;
/// let e = E::new([7]);
/// assert_eq!(E::rank(), 2);
/// assert_eq!(E::rank_dynamic(), 1);
/// assert_eq!(e.extent(0), 3);
/// assert_eq!(e.extent(1), 7);
/// assert_eq!(e.size(), 21);
/// assert_eq!(std::mem::size_of_val(&e), std::mem::size_of::<usize>());
/// ```
///
/// Every static extent must be representable by `I`:
///
/// ```compile_fail
/// use mdspan::{Extents, Fixed};
/// let e: Extents<u8, (Fixed<300>,)> = Extents::default();
/// ```
///
/// [`Fixed`]: super::Fixed
/// [`Dyn`]: super::Dyn
pub struct Extents<I: IndexType, D: Dims> {
    dynamic: D::Dynamic<I>,
}

/// [`Extents`] with `R` dimensions, all dynamic.
///
/// ```
/// use mdspan::{DExtents, Extents, Dyn};
/// let e: DExtents<u32, 2> = Extents::new([4, 5]);
/// let f: Extents<u32, (Dyn, Dyn)> = e;
/// assert_eq!(f.extent(1), 5);
/// ```
pub type DExtents<I, const R: usize> = Extents<I, <Rank<R> as AllDynamic>::Dims>;

/// Post-monomorphization check that every static extent fits in `I`.
struct StaticFit<I, D>(PhantomData<(I, D)>);

impl<I: IndexType, D: Dims> StaticFit<I, D> {
    const OK: () = {
        let mut r = 0;
        while r < D::RANK {
            let e = D::STATIC_EXTENTS[r];
            assert!(
                e == DYNAMIC_EXTENT || e <= I::MAX_EXTENT,
                "A static extent is not representable by the index type",
            );
            r += 1;
        }
    };
}

impl<I: IndexType, D: Dims> Extents<I, D> {
    /// Constructs an `Extents` from a list of sizes.
    ///
    /// `N` must be either [`Self::rank()`], giving every extent, or
    /// [`Self::rank_dynamic()`], giving only the dynamic extents in order.
    /// Any other `N` is a compile-time error.
    ///
    /// # Panics
    ///
    /// Panics if any size is negative or does not fit in `I`, or if a size
    /// given for a static dimension differs from its static extent. See
    /// [`Self::try_new()`] for a non-panicking version.
    ///
    /// ```
    /// use mdspan::{Extents, Fixed, Dyn};
    /// type E = Extents<u8, (Dyn, Fixed<2>, Dyn)>;
    /// assert_eq!(E::new([3, 4]), E::new([3, 2, 4]));
    /// ```
    ///
    /// ```compile_fail
    /// use mdspan::{Extents, Fixed, Dyn};
    /// let e: Extents<usize, (Fixed<2>, Dyn, Dyn)> = Extents::new([1]);
    /// ```
    pub fn new<J: IndexType, const N: usize>(sizes: [J; N]) -> Self {
        let () = Arity::<D, N>::SIZES;
        match Self::try_new(&sizes) {
            Ok(extents) => extents,
            Err(e) => panic!("{}", e),
        }
    }

    /// Constructs an `Extents` from a slice of sizes, with the same rules as
    /// [`Self::new()`], but checked at run time.
    ///
    /// ```
    /// use mdspan::{Error, Extents, Fixed, Dyn};
    /// type E = Extents<i8, (Fixed<2>, Dyn)>;
    /// assert!(E::try_new(&[5]).is_ok());
    /// assert!(matches!(E::try_new(&[1, 5]), Err(Error::StaticExtentMismatch { dim: 0, .. })));
    /// assert!(matches!(E::try_new(&[500]), Err(Error::NotRepresentable { dim: 1, .. })));
    /// assert!(matches!(E::try_new(&[1, 2, 3]), Err(Error::SizeCount { got: 3, .. })));
    /// ```
    pub fn try_new<J: IndexType>(sizes: &[J]) -> Result<Self, Error> {
        let () = StaticFit::<I, D>::OK;
        let every = if sizes.len() == D::RANK {
            true
        } else if sizes.len() == D::RANK_DYNAMIC {
            false
        } else {
            return Err(Error::SizeCount { rank: D::RANK, rank_dynamic: D::RANK_DYNAMIC, got: sizes.len() });
        };
        let mut checked = D::array(|_| I::zero());
        for dim in 0..D::RANK {
            let s = D::STATIC_EXTENTS[dim];
            let size = if every {
                sizes[dim]
            } else if s == DYNAMIC_EXTENT {
                sizes[D::DYNAMIC_INDEX[dim]]
            } else {
                continue;
            };
            let value: I = cast_index(size)
                .ok_or_else(|| Error::NotRepresentable { dim, value: size.to_string() })?;
            if s != DYNAMIC_EXTENT && value.as_usize() != s {
                return Err(Error::StaticExtentMismatch { dim, expected: s, got: value.as_usize() });
            }
            checked.as_mut()[dim] = value;
        }
        Ok(Self { dynamic: D::store(|dim| checked.as_ref()[dim]) })
    }

    /// Converts `other` to `Self`. Unlike [`Self::widen()`], this allows
    /// narrowing the index type and making dynamic dimensions static.
    ///
    /// # Panics
    ///
    /// Panics if an extent of `other` does not fit in `I`, or differs from
    /// the corresponding static extent of `Self`.
    ///
    /// ```
    /// use mdspan::{Extents, Fixed, Dyn};
    /// let dynamic: Extents<usize, (Dyn, Dyn)> = Extents::new([2, 3]);
    /// let fixed: Extents<u8, (Fixed<2>, Dyn)> = Extents::from_extents(dynamic);
    /// assert_eq!(fixed, dynamic);
    /// ```
    pub fn from_extents<J: IndexType, D2: Dims>(other: Extents<J, D2>) -> Self where
        D: DimsFrom<D2>,
    {
        match Self::try_from_extents(other) {
            Ok(extents) => extents,
            Err(e) => panic!("{}", e),
        }
    }

    /// Like [`Self::from_extents()`], but reports failure as an `Err`.
    pub fn try_from_extents<J: IndexType, D2: Dims>(other: Extents<J, D2>) -> Result<Self, Error> where
        D: DimsFrom<D2>,
    {
        Self::try_new(other.to_array().as_ref())
    }

    /// Converts `other` to `Self` where this cannot fail: the index type
    /// widens and no dynamic dimension becomes static.
    ///
    /// Widening the index type requires `I: From<J>`. The standard library
    /// omits some lossless conversions from that, e.g. `u32` to `usize` and
    /// `u16` to `isize`. Use [`Self::from_extents()`] for those.
    ///
    /// ```
    /// use mdspan::{Extents, Fixed, Dyn};
    /// let narrow: Extents<u8, (Fixed<2>, Dyn)> = Extents::new([3]);
    /// let wide: Extents<u64, (Dyn, Dyn)> = Extents::widen(narrow);
    /// assert_eq!(wide.extent(0), 2);
    /// assert_eq!(wide.extent(1), 3);
    ///
    /// let small: Extents<u32, (Dyn,)> = Extents::new([70000]);
    /// let big: Extents<u64, (Dyn,)> = Extents::widen(small);
    /// assert_eq!(big.extent(0), 70000);
    /// ```
    pub fn widen<J: IndexType, D2: Dims>(other: Extents<J, D2>) -> Self where
        D: DimsWiden<D2>,
        I: From<J>,
    {
        let () = StaticFit::<I, D>::OK;
        Self { dynamic: D::store(|dim| <I as From<J>>::from(other.extent(dim))) }
    }

    /// The number of dimensions.
    #[inline(always)]
    pub fn rank() -> usize { D::RANK }

    /// The number of dimensions whose extent is chosen at run time.
    #[inline(always)]
    pub fn rank_dynamic() -> usize { D::RANK_DYNAMIC }

    /// The compile-time extent of dimension `r`, or [`DYNAMIC_EXTENT`].
    ///
    /// Panics if `r >= Self::rank()`.
    #[inline(always)]
    pub fn static_extent(r: usize) -> usize { D::STATIC_EXTENTS[r] }

    /// The extent of dimension `r`.
    ///
    /// Panics if `r >= Self::rank()`.
    #[inline(always)]
    pub fn extent(&self, r: usize) -> I {
        if D::RANK_DYNAMIC == 0 {
            I::from_usize(D::STATIC_EXTENTS[r])
        } else if D::RANK_DYNAMIC == D::RANK {
            D::load(&self.dynamic, r)
        } else {
            match D::STATIC_EXTENTS[r] {
                DYNAMIC_EXTENT => D::load(&self.dynamic, r),
                s => I::from_usize(s),
            }
        }
    }

    /// The product of the extents. This is `1` if `Self::rank()` is `0`.
    pub fn size(&self) -> usize {
        (0..D::RANK).map(|r| self.extent(r).as_usize()).product()
    }

    /// `true` if any extent is zero.
    pub fn is_empty(&self) -> bool {
        (0..D::RANK).any(|r| self.extent(r).is_zero())
    }

    /// `true` if every extent is positive, including when there are none.
    pub(crate) fn all_positive(&self) -> bool { !self.is_empty() }

    /// Returns every extent.
    pub fn to_array(&self) -> D::Array<I> {
        D::array(|r| self.extent(r))
    }

    /// Calls `f` on every index tuple within `self`, varying the last
    /// dimension fastest.
    ///
    /// ```
    /// use mdspan::{Extents, Fixed, Dyn};
    /// let e: Extents<usize, (Dyn, Fixed<2>)> = Extents::new([2]);
    /// let mut all = Vec::new();
    /// e.each(|i| all.push(i));
    /// assert_eq!(all, [[0, 0], [0, 1], [1, 0], [1, 1]]);
    /// ```
    pub fn each(&self, mut f: impl FnMut(D::Array<I>)) {
        if self.is_empty() { return; }
        let mut index = D::array(|_| I::zero());
        loop {
            f(index);
            let mut r = D::RANK;
            loop {
                if r == 0 { return; }
                r -= 1;
                let i = &mut index.as_mut()[r];
                *i = *i + I::one();
                if *i < self.extent(r) { break; }
                *i = I::zero();
            }
        }
    }
}

impl<I: IndexType, D: Dims> Default for Extents<I, D> {
    /// Every dynamic extent is zero.
    fn default() -> Self {
        let () = StaticFit::<I, D>::OK;
        Self { dynamic: D::store(|_| I::zero()) }
    }
}

impl<I: IndexType, D: Dims> Clone for Extents<I, D> {
    fn clone(&self) -> Self { *self }
}

impl<I: IndexType, D: Dims> Copy for Extents<I, D> {}

impl<I: IndexType, D: Dims> Hash for Extents<I, D> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.dynamic.hash(state) }
}

impl<I: IndexType, D: Dims> Debug for Extents<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries((0..D::RANK).map(|r| self.extent(r))).finish()
    }
}

/// Two `Extents` are equal if they have the same rank and the same extents,
/// regardless of index type or which dimensions are static.
impl<I: IndexType, D: Dims, J: IndexType, D2: Dims> PartialEq<Extents<J, D2>> for Extents<I, D> {
    fn eq(&self, other: &Extents<J, D2>) -> bool {
        D::RANK == D2::RANK &&
        (0..D::RANK).all(|r| self.extent(r).as_usize() == other.extent(r).as_usize())
    }
}

impl<I: IndexType, D: Dims> Eq for Extents<I, D> {}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Fixed, Dyn};

    #[test]
    fn observers() {
        type E = Extents<i32, (Fixed<2>, Dyn, Fixed<4>)>;
        let e = E::new([3]);
        assert_eq!(E::rank(), 3);
        assert_eq!(E::rank_dynamic(), 1);
        assert_eq!(E::static_extent(0), 2);
        assert_eq!(E::static_extent(1), DYNAMIC_EXTENT);
        assert_eq!(E::static_extent(2), 4);
        assert_eq!(e.to_array(), [2, 3, 4]);
        assert_eq!(e.size(), 24);
        assert!(!e.is_empty());
    }

    #[test]
    fn rank_zero() {
        let e: Extents<usize, ()> = Extents::new::<usize, 0>([]);
        assert_eq!(Extents::<usize, ()>::rank(), 0);
        assert_eq!(e.size(), 1);
        assert!(e.all_positive());
        let mut calls = 0;
        e.each(|_| calls += 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn all_static() {
        let e: Extents<u16, (Fixed<2>, Fixed<3>)> = Extents::default();
        assert_eq!(e.to_array(), [2, 3]);
        assert_eq!(e, Extents::<u16, (Fixed<2>, Fixed<3>)>::new::<u16, 0>([]));
        assert_eq!(e, Extents::<u16, (Fixed<2>, Fixed<3>)>::new([2u16, 3]));
    }

    #[test]
    fn default_dynamic_is_zero() {
        let e: DExtents<usize, 2> = Extents::default();
        assert_eq!(e.to_array(), [0, 0]);
        assert!(e.is_empty());
        let mut calls = 0;
        e.each(|_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    #[should_panic(expected = "static extent 2")]
    fn static_mismatch() {
        let _: Extents<usize, (Fixed<2>, Dyn)> = Extents::new([3, 3]);
    }

    #[test]
    #[should_panic(expected = "not representable")]
    fn negative_size() {
        let _: DExtents<usize, 1> = Extents::new([-1]);
    }

    #[test]
    fn try_new_errors() {
        type E = Extents<u8, (Dyn, Fixed<3>)>;
        assert_eq!(
            E::try_new(&[1, 2, 3]),
            Err(Error::SizeCount { rank: 2, rank_dynamic: 1, got: 3 }),
        );
        assert_eq!(
            E::try_new(&[1, 4]),
            Err(Error::StaticExtentMismatch { dim: 1, expected: 3, got: 4 }),
        );
        assert_eq!(
            E::try_new(&[256]),
            Err(Error::NotRepresentable { dim: 0, value: "256".to_string() }),
        );
        assert_eq!(E::try_new(&[255]).map(|e| e.extent(0)), Ok(255));
    }

    #[test]
    fn equality() {
        let a: Extents<usize, (Fixed<2>, Dyn)> = Extents::new([3]);
        let b: Extents<i64, (Dyn, Fixed<3>)> = Extents::new([2]);
        let c: Extents<usize, (Dyn, Dyn)> = Extents::new([2, 4]);
        let d: Extents<usize, (Dyn,)> = Extents::new([2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a != d);
        assert_eq!(Extents::<u8, ()>::default(), Extents::<usize, ()>::default());
    }

    #[test]
    fn conversions() {
        let d: DExtents<usize, 3> = Extents::new([2, 3, 5]);
        let s: Extents<u8, (Fixed<2>, Dyn, Fixed<5>)> = Extents::from_extents(d);
        assert_eq!(s, d);
        let w: Extents<u32, (Dyn, Dyn, Fixed<5>)> = Extents::widen(s);
        assert_eq!(w, d);
        let t: Result<Extents<u8, (Fixed<3>, Dyn, Dyn)>, _> = Extents::try_from_extents(d);
        assert_eq!(t, Err(Error::StaticExtentMismatch { dim: 0, expected: 3, got: 2 }));
        let u: Extents<u32, (Dyn, Fixed<5>)> = Extents::new([9]);
        let v: Extents<usize, (Dyn, Dyn)> = Extents::from_extents(u);
        assert_eq!(v.to_array(), [9, 5]);
        let i: Extents<isize, (Fixed<5>,)> = Extents::from_extents(Extents::<u16, (Dyn,)>::new([5]));
        assert_eq!(i.extent(0), 5);
        let big: DExtents<usize, 1> = Extents::new([1000]);
        let n: Result<DExtents<u8, 1>, _> = Extents::try_from_extents(big);
        assert!(matches!(n, Err(Error::NotRepresentable { dim: 0, .. })));
    }

    #[test]
    fn each_order() {
        let e: Extents<u8, (Fixed<2>, Dyn, Fixed<2>)> = Extents::new([1]);
        let mut all = Vec::new();
        e.each(|i| all.push(i));
        assert_eq!(all, [[0, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]]);
    }

    #[test]
    fn debug() {
        let e: Extents<usize, (Fixed<2>, Dyn)> = Extents::new([7]);
        assert_eq!(format!("{:?}", e), "[2, 7]");
    }
}
