//! Statically typed tensors.
//!
//! A `TypedTensor<T>` is what a `Tensor` holds for each dtype; callers
//! reach it through the checked downcasts on `Tensor` and never copy the
//! storage to do so. It dereferences to its `HeapLayout`, and through it
//! to the flat `[T]` element slice, so `iter`, `iter_mut`, `len` and
//! slice indexing all work on the row-major storage directly.
//!
//! Construction is crate private: storage always comes from a
//! `TensorAllocator`, and a `TypedTensor` outside the crate is one taken
//! out of an allocated `Tensor`.

use super::accessor::{Accessor, AccessorMut, StridedAccessor};
use super::dtype::{Dtype, Element};
use super::heap_layout::HeapLayout;
use crate::error::{Error, Result};
use generic_array::ArrayLength;
use rayon::prelude::*;
use std::ops::{Deref, DerefMut};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct TypedTensor<T> {
    layout: HeapLayout<T>,
}

impl<T> TypedTensor<T>
where
    T: Element,
{
    /// Allocates a default-filled tensor (`0` for numbers, `""` for strings).
    pub(crate) fn new(shape: Vec<usize>) -> Result<Self> {
        match HeapLayout::try_alloc(&shape) {
            Ok(layout) => Ok(TypedTensor { layout }),
            Err(reason) => Err(Error::Allocation {
                dtype: T::DTYPE,
                shape,
                reason,
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_vec(data: Vec<T>, shape: Vec<usize>) -> Result<Self> {
        let expected = super::shape::num_elements(&shape).ok_or_else(|| Error::Allocation {
            dtype: T::DTYPE,
            shape: shape.clone(),
            reason: "element count overflows usize".to_string(),
        })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(TypedTensor {
            layout: HeapLayout::from_parts(data, shape),
        })
    }

    #[inline]
    pub fn dtype(&self) -> Dtype {
        T::DTYPE
    }

    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.num_elements()
    }

    /// Read-only strided view of rank `N`.
    pub fn accessor<N>(&self) -> Result<Accessor<'_, T, N>>
    where
        N: ArrayLength<usize>,
    {
        let layout = &self.layout;
        StridedAccessor::new(&layout[..], layout.shape(), layout.strides())
    }

    /// Read-write strided view of rank `N`.
    pub fn accessor_mut<N>(&mut self) -> Result<AccessorMut<'_, T, N>>
    where
        N: ArrayLength<usize>,
    {
        let (shape, strides, data) = self.layout.split_mut();
        StridedAccessor::new(data, shape, strides)
    }

    /// The single element of a one-element tensor.
    pub fn as_scalar(&self) -> Result<&T> {
        self.check_scalar()?;
        Ok(&self.layout[0])
    }

    pub fn as_scalar_mut(&mut self) -> Result<&mut T> {
        self.check_scalar()?;
        Ok(&mut self.layout[0])
    }

    fn check_scalar(&self) -> Result<()> {
        if self.numel() != 1 {
            return Err(Error::RankMismatch {
                reason: format!("scalar access needs exactly 1 element, found {}", self.numel()),
                shape: self.shape().to_vec(),
            });
        }

        Ok(())
    }

    /// Overwrites every element with `data`, in row-major order.
    ///
    /// The length is checked before anything is written: on
    /// `SizeMismatch` the tensor keeps its previous contents.
    pub fn copy_from(&mut self, data: &[T]) -> Result<()> {
        if data.len() != self.numel() {
            trace!(
                expected = self.numel(),
                actual = data.len(),
                "rejected bulk copy"
            );
            return Err(Error::SizeMismatch {
                expected: self.numel(),
                actual: data.len(),
            });
        }

        self.layout.clone_from_slice(data);
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        let data: &mut [T] = &mut self.layout;
        data.par_iter_mut().for_each(|x| *x = value.clone());
    }

    pub fn into_vec(self) -> Vec<T> {
        self.layout.into_vec()
    }
}

impl<T> PartialEq for TypedTensor<T>
where
    T: Element,
{
    /// Same shape and exactly equal elements. No tolerance: `NaN`
    /// never equals itself.
    fn eq(&self, other: &Self) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        let lhs: &[T] = &self.layout;
        let rhs: &[T] = &other.layout;
        lhs.par_iter().zip(rhs.par_iter()).all(|(x, y)| *x == *y)
    }
}

impl<T> Deref for TypedTensor<T> {
    type Target = HeapLayout<T>;

    fn deref(&self) -> &Self::Target {
        &self.layout
    }
}

impl<T> DerefMut for TypedTensor<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.layout
    }
}

impl<'a, T> IntoIterator for &'a TypedTensor<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.layout.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut TypedTensor<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.layout.iter_mut()
    }
}
