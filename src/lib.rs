//! A pure-Rust library providing non-owning multi-dimensional views of
//! memory.
//!
//! [`Mdspan`] interprets a data handle, usually a slice, as a
//! multi-dimensional array. It does not own or allocate anything; it only
//! computes where each element lives. It is assembled from three policies:
//!
//! - [`Extents<I, D>`] is the shape. `D` is a tuple such as
//!   `(Fixed<3>, Dyn)` whose elements say which extents are compile-time
//!   constants ([`Fixed`]) and which are chosen at run time ([`Dyn`]). Only
//!   the run-time extents are stored. `I` is the integer type used for
//!   extents, indices and offsets; it can be any primitive integer.
//! - A [`Layout`] chooses a [`Mapping`] from index tuples to offsets.
//!   [`LayoutRight`] (row-major, the default), [`LayoutLeft`] (column-major)
//!   and [`LayoutStride`] (arbitrary strides) are provided.
//! - An [`Accessor`] turns the data handle and an offset into an element
//!   reference. [`DefaultAccessor`] and [`DefaultAccessorMut`] index a
//!   slice.
//!
//! ```
//! use mdspan::{Mdspan, MdspanMut, Extents, Fixed, Dyn, LayoutStride, StrideMapping};
//!
//! let mut data: Vec<i32> = (0..8).collect();
//!
//! // A 2x4 row-major view.
//! let v: Mdspan<i32, usize, (Fixed<2>, Dyn)> = Mdspan::new(&data[..], [4]);
//! assert_eq!(v[[1, 3]], 7);
//!
//! // The first three columns, transposed.
//! let e: Extents<u8, (Dyn, Dyn)> = Extents::new([3, 2]);
//! let w: Mdspan<i32, u8, (Dyn, Dyn), LayoutStride> =
//!     Mdspan::from_mapping(&data[..], StrideMapping::new(e, [1, 4]));
//! assert_eq!(w[[2, 1]], 6);
//! assert!(!w.is_exhaustive());
//!
//! // Writing through a view.
//! let mut m: MdspanMut<i32, usize, (Dyn, Dyn)> = MdspanMut::new(&mut data[..], [4, 2]);
//! m[[3, 1]] = -1;
//! assert_eq!(data[7], -1);
//! ```
//!
//! Mistakes that can be detected at compile time are compile-time errors:
//! giving the wrong number of sizes or indices, converting between
//! incompatible static extents, or constructing a [`LayoutStride`] view
//! without strides. Mistakes that can only be detected at run time panic;
//! most constructors have a `try_` variant that returns an [`Error`]
//! instead.

mod int;
pub use int::{IndexType, cast_index};

mod dim;
pub use dim::{DYNAMIC_EXTENT, Dim, Fixed, Dyn, StaticDim, DimFrom, DimWiden};

mod dims;
pub use dims::{IndexArray, Dims, DimsFrom, DimsWiden, FullyStatic, RankAtMostOne, Rank, AllDynamic};

mod error;
pub use error::{Error};

mod extents;
pub use extents::{Extents, DExtents};

pub mod layout;
pub use layout::{
    Layout, LayoutLeft, LayoutRight, LayoutStride, Mapping, AlwaysUnique, AlwaysExhaustive,
    AlwaysStrided, FromExtents,
};

mod left;
pub use left::{LeftMapping};

mod right;
pub use right::{RightMapping};

mod stride;
pub use stride::{StrideMapping};

pub mod accessor;
pub use accessor::{Accessor, AccessorMut, DefaultAccessor, DefaultAccessorMut};

mod view;
pub use view::{Mdspan, MdspanMut};
