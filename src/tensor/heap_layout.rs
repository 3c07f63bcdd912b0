use super::shape::{intrinsic_strides, num_elements};
use std::ops::{Deref, DerefMut};

/// `Vec`-backed contiguous row-major storage with a runtime shape.
///
/// The shape and strides are fixed at construction; the layout never
/// reshapes or reallocates afterwards. It dereferences to the flat
/// element slice, which is the raw element access external serializers
/// rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct HeapLayout<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T> HeapLayout<T> {
    /// Allocates `shape` filled with `T::default()`.
    ///
    /// Fails with a human readable reason when the element count or the
    /// byte size cannot be represented, or the heap refuses the request.
    pub(crate) fn try_alloc(shape: &[usize]) -> Result<Self, String>
    where
        T: Default + Clone,
    {
        let len = num_elements(shape).ok_or_else(|| "element count overflows usize".to_string())?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| format!("cannot reserve {} elements: {}", len, e))?;
        data.resize(len, T::default());

        Ok(Self::from_parts(data, shape.to_vec()))
    }

    /// Caller guarantees `data.len()` is the element count of `shape`.
    pub(crate) fn from_parts(data: Vec<T>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(Some(data.len()), num_elements(&shape));
        let strides = intrinsic_strides(&shape);
        HeapLayout {
            data,
            shape,
            strides,
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Shape, strides and mutable data borrowed at once.
    pub(crate) fn split_mut(&mut self) -> (&[usize], &[usize], &mut [T]) {
        (&self.shape, &self.strides, &mut self.data)
    }
}

impl<T> Deref for HeapLayout<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.data.as_slice()
    }
}

impl<T> DerefMut for HeapLayout<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut_slice()
    }
}
