//! Tensor factories.
//!
//! `TensorAllocator` is the contract a storage backend implements. It is
//! object safe, so backends can be passed around as
//! `&dyn TensorAllocator`; the statically typed conveniences live in
//! `TensorAllocatorExt`, which every allocator gets for free.

use super::allocation_policy::AllocationPolicy;
use super::dtype::{Dtype, Element};
use super::tensor::Tensor;
use super::typed::TypedTensor;
use crate::error::Result;
use crate::ring::Ring;
use tracing::{debug, warn};

pub trait TensorAllocator: Send + Sync {
    /// Returns a new, exclusively owned tensor of `dtype` and `shape`.
    ///
    /// Contents are backend defined. Fails with `Error::Allocation` when
    /// the backend cannot satisfy the request.
    fn allocate_tensor(&self, shape: &[usize], dtype: Dtype) -> Result<Tensor>;
}

pub trait TensorAllocatorExt: TensorAllocator {
    /// `allocate_tensor` with the dtype fixed by `T`.
    fn allocate<T: Element>(&self, shape: &[usize]) -> Result<Tensor> {
        self.allocate_tensor(shape, T::DTYPE)
    }

    fn ones<T: Element + Ring>(&self, shape: &[usize]) -> Result<Tensor> {
        let mut tensor = self.allocate::<T>(shape)?;
        tensor.as_typed_tensor_mut::<T>()?.fill(T::ONE);
        Ok(tensor)
    }

    fn zeros<T: Element + Ring>(&self, shape: &[usize]) -> Result<Tensor> {
        let mut tensor = self.allocate::<T>(shape)?;
        tensor.as_typed_tensor_mut::<T>()?.fill(T::ZERO);
        Ok(tensor)
    }

    /// Allocates `shape` and copies `data` into it in row-major order.
    fn from_vec<T: Element>(&self, data: &[T], shape: &[usize]) -> Result<Tensor> {
        let mut tensor = self.allocate::<T>(shape)?;
        tensor.copy_from(data)?;
        Ok(tensor)
    }
}

impl<A> TensorAllocatorExt for A where A: TensorAllocator + ?Sized {}

/// Allocator backed by the process heap, filled with `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct HeapAllocator {
    policy: AllocationPolicy,
}

impl HeapAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AllocationPolicy) -> Self {
        HeapAllocator { policy }
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }
}

impl TensorAllocator for HeapAllocator {
    fn allocate_tensor(&self, shape: &[usize], dtype: Dtype) -> Result<Tensor> {
        self.policy.check(shape, dtype)?;
        debug!(%dtype, ?shape, "allocating tensor");
        let tensor = crate::with_dtype!(dtype, T => {
            TypedTensor::<T>::new(shape.to_vec()).map(Tensor::from)
        });
        if let Err(err) = &tensor {
            warn!(%err, "heap allocation failed");
        }

        tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn allocates_every_dtype() {
        let alloc = HeapAllocator::new();
        for dtype in Dtype::ALL.iter().copied() {
            let tensor = alloc.allocate_tensor(&[2, 3], dtype).unwrap();
            assert_eq!(tensor.dtype(), dtype);
            assert_eq!(tensor.shape(), &[2, 3]);
            assert_eq!(tensor.numel(), 6);
        }
    }

    #[test]
    fn allocations_are_independent() {
        let alloc = HeapAllocator::new();
        let mut a = alloc.allocate::<i32>(&[3]).unwrap();
        let b = alloc.allocate::<i32>(&[3]).unwrap();
        a.copy_from(&[1, 2, 3]).unwrap();
        assert_eq!(b.as_typed_tensor::<i32>().unwrap().into_iter().sum::<i32>(), 0);
    }

    #[test]
    fn ones_and_zeros() {
        let alloc = HeapAllocator::new();
        let ones = alloc.ones::<f32>(&[5]).unwrap();
        assert!(ones.as_typed_tensor::<f32>().unwrap().iter().all(|x| *x == 1.0));
        let zeros = alloc.zeros::<u16>(&[2, 2]).unwrap();
        assert!(zeros.as_typed_tensor::<u16>().unwrap().iter().all(|x| *x == 0));
    }

    #[test]
    fn from_vec_checks_length() {
        let alloc = HeapAllocator::new();
        let tensor = alloc.from_vec(&[1i8, 2, 3, 4], &[2, 2]).unwrap();
        assert_eq!(*tensor.accessor::<i8, typenum::U2>().unwrap().get([1usize, 0]).unwrap(), 3);
        assert!(matches!(
            alloc.from_vec(&[1i8, 2, 3], &[2, 2]),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn policy_rejections() {
        let alloc = HeapAllocator::with_policy(AllocationPolicy {
            max_elements: Some(10),
            dtypes: Some(vec![Dtype::Float32]),
        });
        assert!(alloc.ones::<f32>(&[10]).is_ok());
        assert!(matches!(
            alloc.ones::<f32>(&[11]),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            alloc.allocate::<String>(&[1]),
            Err(Error::Allocation { .. })
        ));
    }

    #[test]
    fn oversized_requests_fail_without_panicking() {
        let alloc = HeapAllocator::new();
        assert!(matches!(
            alloc.allocate_tensor(&[usize::MAX, 2], Dtype::Uint8),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            alloc.allocate_tensor(&[usize::MAX / 2], Dtype::Float64),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            alloc.ones::<i32>(&[usize::MAX, usize::MAX]),
            Err(Error::Allocation { .. })
        ));

        let empty = alloc.allocate_tensor(&[0, usize::MAX, usize::MAX], Dtype::Int16).unwrap();
        assert_eq!(empty.numel(), 0);
    }

    #[test]
    fn capped_policy_rejects_overflowing_shapes() {
        let alloc = HeapAllocator::with_policy(AllocationPolicy {
            max_elements: Some(10),
            dtypes: None,
        });
        assert_eq!(
            alloc.allocate_tensor(&[usize::MAX, 3], Dtype::Float32),
            Err(Error::Allocation {
                dtype: Dtype::Float32,
                shape: vec![usize::MAX, 3],
                reason: "element count overflows usize".to_string(),
            })
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let alloc: Box<dyn TensorAllocator> = Box::new(HeapAllocator::new());
        let tensor = alloc.ones::<u8>(&[3]).unwrap();
        let typed = tensor.into_typed_tensor::<u8>().unwrap();
        assert_eq!(typed.into_vec(), vec![1, 1, 1]);
    }
}
