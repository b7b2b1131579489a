//! Tuples of [`Dim`]s, which describe the shape of an [`Extents`] at compile
//! time.
//!
//! `(Fixed<2>, Dyn, Fixed<4>)` is a rank-3 shape whose middle extent is
//! chosen at run time. Tuples of up to 8 dimensions implement [`Dims`].
//!
//! [`Extents`]: super::Extents

use std::fmt::{Debug};
use std::hash::{Hash};
use std::marker::{PhantomData};

use super::{IndexType, Dim, StaticDim, DimFrom, DimWiden, Dyn, DYNAMIC_EXTENT};

/// A fixed-size array with one element per dimension, e.g. the strides of a
/// mapping or an index tuple.
///
/// This is only implemented by `[T; N]`. It exists because `[T; Self::RANK]`
/// cannot be written in generic code.
pub trait IndexArray<T>: Copy + Debug + Eq + Hash + Send + Sync + AsRef<[T]> + AsMut<[T]> {
    /// Constructs `Self` by calling `f` on each dimension in order.
    fn from_fn(f: impl FnMut(usize) -> T) -> Self;
}

impl<T: Copy + Debug + Eq + Hash + Send + Sync, const N: usize> IndexArray<T> for [T; N] {
    #[inline(always)]
    fn from_fn(f: impl FnMut(usize) -> T) -> Self { std::array::from_fn(f) }
}

// ----------------------------------------------------------------------------

/// Implemented by tuples of [`Dim`]s.
///
/// You should not need to implement this trait.
pub trait Dims: 'static + Copy + Debug + Default + Hash + Eq + Send + Sync {
    /// The number of dimensions.
    const RANK: usize;

    /// The number of dimensions that are [`Dyn`].
    const RANK_DYNAMIC: usize;

    /// For each dimension, its [`Dim::STATIC`].
    const STATIC_EXTENTS: &'static [usize];

    /// For each dynamic dimension, the number of dynamic dimensions before
    /// it. For each static dimension, [`DYNAMIC_EXTENT`].
    const DYNAMIC_INDEX: &'static [usize];

    /// The run-time storage of the dynamic extents. Static dimensions occupy
    /// no space.
    type Dynamic<I: IndexType>: Copy + Debug + Default + Hash + Eq + Send + Sync;

    /// `[T; Self::RANK]`.
    type Array<T: Copy + Debug + Eq + Hash + Send + Sync>: IndexArray<T>;

    /// Returns the extent of dimension `r`.
    ///
    /// Panics if `r` is not less than `RANK`.
    fn load<I: IndexType>(dynamic: &Self::Dynamic<I>, r: usize) -> I;

    /// Constructs the run-time storage, calling `f(r)` for each dynamic
    /// dimension `r` in order.
    fn store<I: IndexType>(f: impl FnMut(usize) -> I) -> Self::Dynamic<I>;

    /// Constructs a `Self::Array` by calling `f` on each dimension in order.
    #[inline(always)]
    fn array<T: Copy + Debug + Eq + Hash + Send + Sync>(f: impl FnMut(usize) -> T) -> Self::Array<T> {
        <Self::Array<T> as IndexArray<T>>::from_fn(f)
    }
}

/// Computes [`Dims::DYNAMIC_INDEX`] from [`Dims::STATIC_EXTENTS`].
const fn dynamic_index<const R: usize>(statics: [usize; R]) -> [usize; R] {
    let mut ret = [DYNAMIC_EXTENT; R];
    let mut slot = 0;
    let mut r = 0;
    while r < R {
        if statics[r] == DYNAMIC_EXTENT {
            ret[r] = slot;
            slot += 1;
        }
        r += 1;
    }
    ret
}

/// `Self` can be constructed from a `Src` of the same rank, checking at run
/// time that the static extents of `Self` match.
pub trait DimsFrom<Src: Dims>: Dims {}

/// `Self` can be constructed from a `Src` of the same rank without any
/// run-time check.
pub trait DimsWiden<Src: Dims>: DimsFrom<Src> {}

/// Implemented by tuples of [`Fixed`]s.
///
/// [`Fixed`]: super::Fixed
pub trait FullyStatic: Dims {}

/// Implemented by `()` and by 1-tuples.
pub trait RankAtMostOne: Dims {}

impl RankAtMostOne for () {}
impl<A0: Dim> RankAtMostOne for (A0,) {}

macro_rules! impl_dims {
    ($rank:literal; $($n:tt $a:ident $b:ident),*) => {
        impl<$($a: Dim),*> Dims for ($($a,)*) {
            const RANK: usize = $rank;
            const RANK_DYNAMIC: usize = 0 $(+ $a::IS_DYNAMIC as usize)*;
            const STATIC_EXTENTS: &'static [usize] = &[$($a::STATIC),*];
            const DYNAMIC_INDEX: &'static [usize] = &dynamic_index([$($a::STATIC),*]);

            type Dynamic<I: IndexType> = ($(<$a as Dim>::Stored<I>,)*);
            type Array<T: Copy + Debug + Eq + Hash + Send + Sync> = [T; $rank];

            #[allow(unused_variables)]
            fn load<I: IndexType>(dynamic: &Self::Dynamic<I>, r: usize) -> I {
                match r {
                    $($n => $a::load(dynamic.$n),)*
                    _ => panic!("Dimension {} is out of bounds for rank {}", r, $rank),
                }
            }

            #[allow(unused_variables, unused_mut)]
            fn store<I: IndexType>(mut f: impl FnMut(usize) -> I) -> Self::Dynamic<I> {
                ($($a::store(|| f($n)),)*)
            }
        }

        impl<$($a: DimFrom<$b>, $b: Dim),*> DimsFrom<($($b,)*)> for ($($a,)*) {}
        impl<$($a: DimWiden<$b>, $b: Dim),*> DimsWiden<($($b,)*)> for ($($a,)*) {}
        impl<$($a: StaticDim),*> FullyStatic for ($($a,)*) {}
    }
}

impl_dims!(0;);
impl_dims!(1; 0 A0 B0);
impl_dims!(2; 0 A0 B0, 1 A1 B1);
impl_dims!(3; 0 A0 B0, 1 A1 B1, 2 A2 B2);
impl_dims!(4; 0 A0 B0, 1 A1 B1, 2 A2 B2, 3 A3 B3);
impl_dims!(5; 0 A0 B0, 1 A1 B1, 2 A2 B2, 3 A3 B3, 4 A4 B4);
impl_dims!(6; 0 A0 B0, 1 A1 B1, 2 A2 B2, 3 A3 B3, 4 A4 B4, 5 A5 B5);
impl_dims!(7; 0 A0 B0, 1 A1 B1, 2 A2 B2, 3 A3 B3, 4 A4 B4, 5 A5 B5, 6 A6 B6);
impl_dims!(8; 0 A0 B0, 1 A1 B1, 2 A2 B2, 3 A3 B3, 4 A4 B4, 5 A5 B5, 6 A6 B6, 7 A7 B7);

// ----------------------------------------------------------------------------

/// Names the all-[`Dyn`] shape of rank `R`. See [`DExtents`].
///
/// [`DExtents`]: super::DExtents
pub struct Rank<const R: usize>;

/// Implemented by [`Rank<R>`] for `R` up to 8.
pub trait AllDynamic {
    type Dims: Dims;
}

impl AllDynamic for Rank<0> { type Dims = (); }
impl AllDynamic for Rank<1> { type Dims = (Dyn,); }
impl AllDynamic for Rank<2> { type Dims = (Dyn, Dyn); }
impl AllDynamic for Rank<3> { type Dims = (Dyn, Dyn, Dyn); }
impl AllDynamic for Rank<4> { type Dims = (Dyn, Dyn, Dyn, Dyn); }
impl AllDynamic for Rank<5> { type Dims = (Dyn, Dyn, Dyn, Dyn, Dyn); }
impl AllDynamic for Rank<6> { type Dims = (Dyn, Dyn, Dyn, Dyn, Dyn, Dyn); }
impl AllDynamic for Rank<7> { type Dims = (Dyn, Dyn, Dyn, Dyn, Dyn, Dyn, Dyn); }
impl AllDynamic for Rank<8> { type Dims = (Dyn, Dyn, Dyn, Dyn, Dyn, Dyn, Dyn, Dyn); }

// ----------------------------------------------------------------------------

/// Post-monomorphization checks on the length of an array argument.
pub(crate) struct Arity<D, const N: usize>(PhantomData<D>);

impl<D: Dims, const N: usize> Arity<D, N> {
    pub(crate) const SIZES: () = assert!(
        N == D::RANK || N == D::RANK_DYNAMIC,
        "The number of sizes must equal the rank or the dynamic rank",
    );

    pub(crate) const INDICES: () = assert!(
        N == D::RANK,
        "The number of indices must equal the rank",
    );
}

// ----------------------------------------------------------------------------
