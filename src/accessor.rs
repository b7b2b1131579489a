//! Accessor policies, which turn a data handle and an offset into an element
//! reference.

use std::fmt::{self, Debug};
use std::marker::{PhantomData};

/// Describes how to reach the element at an offset from a data handle.
///
/// [`DefaultAccessor`] and [`DefaultAccessorMut`] index a slice. Other
/// accessors may carry state, or return values that are not plain
/// references.
///
/// ```
/// use mdspan::{Accessor, Mdspan, Extents, Dyn, LayoutRight, RightMapping};
///
/// /// Reads every element scaled by `self.0`.
/// #[derive(Clone)]
/// struct Scaled(i32);
///
/// impl Accessor for Scaled {
///     type Element = i32;
///     type DataHandle = Vec<i32>;
///     type Reference<'s> = i32;
///     fn offset(&self, handle: Vec<i32>, i: usize) -> Vec<i32> { handle[i..].to_vec() }
///     fn access<'s>(&'s self, handle: &'s Vec<i32>, i: usize) -> i32 { handle[i] * self.0 }
/// }
///
/// let mapping = RightMapping::new(Extents::new([3]));
/// let v: Mdspan<i32, usize, (Dyn,), LayoutRight, Scaled> =
///     Mdspan::from_parts(vec![1, 2, 3], mapping, Scaled(10));
/// assert_eq!(v.at([2]), 30);
/// ```
pub trait Accessor: Clone {
    /// The type of the elements.
    type Element;

    /// The type that designates the memory, e.g. a slice.
    type DataHandle;

    /// The result of [`Self::access()`].
    type Reference<'s> where Self: 's;

    /// Returns a handle to the memory starting `i` elements after `handle`.
    fn offset(&self, handle: Self::DataHandle, i: usize) -> Self::DataHandle;

    /// Returns the element `i` elements after `handle`.
    fn access<'s>(&'s self, handle: &'s Self::DataHandle, i: usize) -> Self::Reference<'s>;
}

/// An [`Accessor`] that can also give mutable access.
pub trait AccessorMut: Accessor {
    /// The result of [`Self::access_mut()`].
    type ReferenceMut<'s> where Self: 's;

    /// Returns the element `i` elements after `handle`, mutably.
    fn access_mut<'s>(&'s self, handle: &'s mut Self::DataHandle, i: usize) -> Self::ReferenceMut<'s>;
}

// ----------------------------------------------------------------------------

/// Read-only access to a `&[T]`.
///
/// Accessing an offset beyond the slice panics.
pub struct DefaultAccessor<'a, T>(PhantomData<&'a [T]>);

impl<'a, T> Accessor for DefaultAccessor<'a, T> {
    type Element = T;
    type DataHandle = &'a [T];
    type Reference<'s> = &'s T where Self: 's;

    #[inline(always)]
    fn offset(&self, handle: &'a [T], i: usize) -> &'a [T] { &handle[i..] }

    #[inline(always)]
    fn access<'s>(&'s self, handle: &'s &'a [T], i: usize) -> &'s T { &handle[i] }
}

impl<'a, T> Default for DefaultAccessor<'a, T> {
    fn default() -> Self { Self(PhantomData) }
}

impl<'a, T> Clone for DefaultAccessor<'a, T> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T> Copy for DefaultAccessor<'a, T> {}

impl<'a, T> Debug for DefaultAccessor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("DefaultAccessor") }
}

/// Dropping mutability is the only conversion between the default
/// accessors.
impl<'a, T> From<DefaultAccessorMut<'a, T>> for DefaultAccessor<'a, T> {
    fn from(_: DefaultAccessorMut<'a, T>) -> Self { Self::default() }
}

// ----------------------------------------------------------------------------

/// Read-write access to a `&mut [T]`.
///
/// Accessing an offset beyond the slice panics.
pub struct DefaultAccessorMut<'a, T>(PhantomData<&'a mut [T]>);

impl<'a, T> Accessor for DefaultAccessorMut<'a, T> {
    type Element = T;
    type DataHandle = &'a mut [T];
    type Reference<'s> = &'s T where Self: 's;

    #[inline(always)]
    fn offset(&self, handle: &'a mut [T], i: usize) -> &'a mut [T] { &mut handle[i..] }

    #[inline(always)]
    fn access<'s>(&'s self, handle: &'s &'a mut [T], i: usize) -> &'s T { &handle[i] }
}

impl<'a, T> AccessorMut for DefaultAccessorMut<'a, T> {
    type ReferenceMut<'s> = &'s mut T where Self: 's;

    #[inline(always)]
    fn access_mut<'s>(&'s self, handle: &'s mut &'a mut [T], i: usize) -> &'s mut T { &mut handle[i] }
}

impl<'a, T> Default for DefaultAccessorMut<'a, T> {
    fn default() -> Self { Self(PhantomData) }
}

impl<'a, T> Clone for DefaultAccessorMut<'a, T> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T> Copy for DefaultAccessorMut<'a, T> {}

impl<'a, T> Debug for DefaultAccessorMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("DefaultAccessorMut") }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read() {
        let data = [10, 11, 12, 13];
        let a = DefaultAccessor::default();
        let handle: &[i32] = &data;
        assert_eq!(*a.access(&handle, 2), 12);
        let tail = a.offset(handle, 1);
        assert_eq!(*a.access(&tail, 0), 11);
    }

    #[test]
    fn write() {
        let mut data = [0u8; 4];
        let a = DefaultAccessorMut::default();
        let mut handle: &mut [u8] = &mut data;
        *a.access_mut(&mut handle, 3) = 7;
        let mut tail = a.offset(handle, 2);
        *a.access_mut(&mut tail, 0) = 5;
        assert_eq!(*a.access(&tail, 1), 7);
        assert_eq!(data, [0, 0, 5, 7]);
    }

    #[test]
    #[should_panic]
    fn beyond_slice() {
        let data = [1, 2, 3];
        let handle: &[i32] = &data;
        DefaultAccessor::default().access(&handle, 3);
    }

    #[test]
    fn convert() {
        let a: DefaultAccessorMut<'_, f64> = DefaultAccessorMut::default();
        let b: DefaultAccessor<'_, f64> = a.into();
        assert_eq!(format!("{:?}", b), "DefaultAccessor");
    }
}
