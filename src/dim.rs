//! Specifications of a single dimension: [`Fixed`] or [`Dyn`].

use std::fmt::{Debug};
use std::hash::{Hash};

use super::{IndexType};

/// The value reported by [`Extents::static_extent()`] for a dimension whose
/// extent is only known at run time.
///
/// [`Extents::static_extent()`]: super::Extents::static_extent
pub const DYNAMIC_EXTENT: usize = usize::MAX;

/// Implemented by [`Fixed`] and [`Dyn`].
pub trait Dim: 'static + Copy + Debug + Default + Hash + Eq + Send + Sync {
    /// The compile-time extent, or [`DYNAMIC_EXTENT`].
    const STATIC: usize;

    /// `true` if the extent is stored at run time.
    const IS_DYNAMIC: bool = Self::STATIC == DYNAMIC_EXTENT;

    /// The run-time storage for this dimension when extents are stored as
    /// `I`s. This is `()` for static dimensions.
    type Stored<I: IndexType>: Copy + Debug + Default + Hash + Eq + Send + Sync;

    /// Returns the extent represented by `stored`.
    fn load<I: IndexType>(stored: Self::Stored<I>) -> I;

    /// Constructs the storage for this dimension. `f` is only called if the
    /// dimension is dynamic.
    fn store<I: IndexType>(f: impl FnOnce() -> I) -> Self::Stored<I>;
}

// ----------------------------------------------------------------------------

/// A dimension whose extent is the compile-time constant `N`.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed<const N: usize>;

impl<const N: usize> Dim for Fixed<N> {
    const STATIC: usize = {
        assert!(N != DYNAMIC_EXTENT, "A static extent cannot equal DYNAMIC_EXTENT");
        N
    };

    type Stored<I: IndexType> = ();

    #[inline(always)]
    fn load<I: IndexType>((): ()) -> I { I::from_usize(N) }

    #[inline(always)]
    fn store<I: IndexType>(_: impl FnOnce() -> I) {}
}

/// A dimension whose extent is chosen at run time.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dyn;

impl Dim for Dyn {
    const STATIC: usize = DYNAMIC_EXTENT;

    type Stored<I: IndexType> = I;

    #[inline(always)]
    fn load<I: IndexType>(stored: I) -> I { stored }

    #[inline(always)]
    fn store<I: IndexType>(f: impl FnOnce() -> I) -> I { f() }
}

// ----------------------------------------------------------------------------

/// Implemented only by [`Fixed`].
pub trait StaticDim: Dim {}

impl<const N: usize> StaticDim for Fixed<N> {}

/// `Self` can be constructed from a `Src`, possibly with a run-time check.
///
/// A `Fixed<N>` can be made from a `Dyn` (checking the extent is `N`), but
/// not from a `Fixed<M>` with `M != N`.
///
/// ```compile_fail
/// use mdspan::{Extents, Fixed};
/// let a: Extents<usize, (Fixed<2>,)> = Extents::default();
/// let b: Extents<usize, (Fixed<3>,)> = Extents::from_extents(a);
/// ```
pub trait DimFrom<Src: Dim>: Dim {}

impl<const N: usize> DimFrom<Fixed<N>> for Fixed<N> {}
impl<const N: usize> DimFrom<Dyn> for Fixed<N> {}
impl<const N: usize> DimFrom<Fixed<N>> for Dyn {}
impl DimFrom<Dyn> for Dyn {}

/// `Self` can be constructed from a `Src` without any run-time check.
pub trait DimWiden<Src: Dim>: DimFrom<Src> {}

impl<const N: usize> DimWiden<Fixed<N>> for Fixed<N> {}
impl<const N: usize> DimWiden<Fixed<N>> for Dyn {}
impl DimWiden<Dyn> for Dyn {}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statics() {
        assert_eq!(Fixed::<3>::STATIC, 3);
        assert!(!Fixed::<0>::IS_DYNAMIC);
        assert_eq!(Dyn::STATIC, DYNAMIC_EXTENT);
        assert!(Dyn::IS_DYNAMIC);
    }

    #[test]
    fn load_store() {
        let s = Fixed::<5>::store::<u16>(|| panic!("static dimensions store nothing"));
        assert_eq!(Fixed::<5>::load::<u16>(s), 5);
        let s = Dyn::store(|| 9i32);
        assert_eq!(Dyn::load::<i32>(s), 9);
        assert_eq!(std::mem::size_of::<<Fixed<7> as Dim>::Stored<u64>>(), 0);
    }
}
