//! Strided, non-owning element access.
//!
//! An accessor borrows a typed tensor's storage together with its shape
//! and strides. It is built on demand by `TypedTensor::accessor` and
//! `TypedTensor::accessor_mut`, which check the requested rank `N` (a
//! `typenum` unsigned) against the tensor's runtime rank. Writes through
//! an `AccessorMut` land directly in the tensor's storage.
//!
//! Indexing with a `usize` addresses the flattened row-major storage.
//! Indexing with a `GenericArray<usize, N>` addresses one element per
//! axis. Both panic when out of bounds, like slice indexing; `get` and
//! `get_mut` are the checked variants.

use super::shape::check_rank;
use crate::error::Result;
use generic_array::{ArrayLength, GenericArray};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Index, IndexMut};

#[derive(Debug)]
pub struct StridedAccessor<'a, D, N> {
    data: D,
    shape: &'a [usize],
    strides: &'a [usize],
    _rank: PhantomData<N>,
}

/// Read-only accessor.
pub type Accessor<'a, T, N> = StridedAccessor<'a, &'a [T], N>;

/// Read-write accessor.
pub type AccessorMut<'a, T, N> = StridedAccessor<'a, &'a mut [T], N>;

impl<'a, D, N> StridedAccessor<'a, D, N>
where
    N: ArrayLength<usize>,
{
    pub(crate) fn new(data: D, shape: &'a [usize], strides: &'a [usize]) -> Result<Self> {
        check_rank::<N>(shape)?;

        Ok(StridedAccessor {
            data,
            shape,
            strides,
            _rank: PhantomData,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.strides
    }

    #[inline]
    pub fn rank(&self) -> usize {
        N::USIZE
    }

    fn linear_index(&self, position: &[usize]) -> Option<usize> {
        if position
            .iter()
            .zip(self.shape.iter())
            .any(|(index, bound)| index >= bound)
        {
            return None;
        }

        Some(
            position
                .iter()
                .rev()
                .zip(self.strides.iter().rev())
                .fold(0, |acc, (x, y)| acc + (x * y)),
        )
    }

    fn linear_index_or_panic(&self, position: &[usize]) -> usize {
        match self.linear_index(position) {
            Some(index) => index,
            None => panic!(
                "index {:?} is out of bounds for shape {:?}",
                position, self.shape
            ),
        }
    }
}

impl<'a, T, D, N> StridedAccessor<'a, D, N>
where
    D: Deref<Target = [T]>,
    N: ArrayLength<usize>,
{
    /// Number of addressable elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get<I>(&self, position: I) -> Option<&T>
    where
        I: Into<GenericArray<usize, N>>,
    {
        let position = position.into();
        let index = self.linear_index(&position)?;
        self.data.get(index)
    }
}

impl<'a, T, D, N> StridedAccessor<'a, D, N>
where
    D: DerefMut<Target = [T]>,
    N: ArrayLength<usize>,
{
    pub fn get_mut<I>(&mut self, position: I) -> Option<&mut T>
    where
        I: Into<GenericArray<usize, N>>,
    {
        let position = position.into();
        let index = self.linear_index(&position)?;
        self.data.get_mut(index)
    }
}

impl<'a, T, D, N> Index<usize> for StridedAccessor<'a, D, N>
where
    D: Deref<Target = [T]>,
{
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T, D, N> IndexMut<usize> for StridedAccessor<'a, D, N>
where
    D: DerefMut<Target = [T]>,
{
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<'a, T, D, N> Index<GenericArray<usize, N>> for StridedAccessor<'a, D, N>
where
    D: Deref<Target = [T]>,
    N: ArrayLength<usize>,
{
    type Output = T;

    fn index(&self, position: GenericArray<usize, N>) -> &T {
        let index = self.linear_index_or_panic(&position);
        &self.data[index]
    }
}

impl<'a, T, D, N> IndexMut<GenericArray<usize, N>> for StridedAccessor<'a, D, N>
where
    D: DerefMut<Target = [T]>,
    N: ArrayLength<usize>,
{
    fn index_mut(&mut self, position: GenericArray<usize, N>) -> &mut T {
        let index = self.linear_index_or_panic(&position);
        &mut self.data[index]
    }
}
