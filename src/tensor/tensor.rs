use super::accessor::{Accessor, AccessorMut};
use super::dtype::{Dtype, Element};
use super::typed::TypedTensor;
use crate::error::{Error, Result};
use crate::value::Value;
use generic_array::ArrayLength;
use tracing::trace;

/// The type-erased tensor that crosses every component boundary.
///
/// `Tensor` is a tagged union over the closed dtype set: each variant owns
/// the `TypedTensor` of the matching native element type. Code that does
/// not know the element type inspects `dtype`, `shape` and `numel`; code
/// that does obtains the typed tensor with `as_typed_tensor`, which checks
/// the tag on every call and borrows the existing storage instead of
/// copying it.
///
/// Tensors are created by a `TensorAllocator` (or from an existing
/// `TypedTensor` with `From`), and their shape never changes afterwards.
#[derive(Debug, Clone)]
pub enum Tensor {
    Float32(TypedTensor<f32>),
    Float64(TypedTensor<f64>),
    String(TypedTensor<String>),
    Int8(TypedTensor<i8>),
    Int16(TypedTensor<i16>),
    Int32(TypedTensor<i32>),
    Int64(TypedTensor<i64>),
    Uint8(TypedTensor<u8>),
    Uint16(TypedTensor<u16>),
    Uint32(TypedTensor<u32>),
    Uint64(TypedTensor<u64>),
}

/// Evaluates `$body` with `$typed` bound to the typed tensor inside `$tensor`.
macro_rules! dispatch_tensor {
    ($tensor:expr, $typed:ident => $body:expr) => {
        match $tensor {
            Tensor::Float32($typed) => $body,
            Tensor::Float64($typed) => $body,
            Tensor::String($typed) => $body,
            Tensor::Int8($typed) => $body,
            Tensor::Int16($typed) => $body,
            Tensor::Int32($typed) => $body,
            Tensor::Int64($typed) => $body,
            Tensor::Uint8($typed) => $body,
            Tensor::Uint16($typed) => $body,
            Tensor::Uint32($typed) => $body,
            Tensor::Uint64($typed) => $body,
        }
    };
}

pub(crate) use dispatch_tensor;

impl Tensor {
    /// Serialization tag shared by every tensor, whatever its dtype.
    pub const SERIALIZE_TAG: &'static str = "tensor";

    pub fn dtype(&self) -> Dtype {
        dispatch_tensor!(self, typed => typed.dtype())
    }

    pub fn shape(&self) -> &[usize] {
        dispatch_tensor!(self, typed => typed.shape())
    }

    pub fn rank(&self) -> usize {
        self.shape().len()
    }

    pub fn numel(&self) -> usize {
        dispatch_tensor!(self, typed => typed.numel())
    }

    /// Checked downcast to the statically typed tensor.
    pub fn as_typed_tensor<T: Element>(&self) -> Result<&TypedTensor<T>> {
        let actual = self.dtype();
        T::downcast_ref(self).ok_or_else(|| Self::dtype_mismatch::<T>(actual))
    }

    pub fn as_typed_tensor_mut<T: Element>(&mut self) -> Result<&mut TypedTensor<T>> {
        let actual = self.dtype();
        T::downcast_mut(self).ok_or_else(|| Self::dtype_mismatch::<T>(actual))
    }

    /// Takes the typed tensor out, or hands `self` back on a dtype mismatch.
    pub fn into_typed_tensor<T: Element>(self) -> std::result::Result<TypedTensor<T>, Tensor> {
        T::downcast_owned(self)
    }

    fn dtype_mismatch<T: Element>(actual: Dtype) -> Error {
        trace!(requested = %T::DTYPE, %actual, "rejected downcast");
        Error::DtypeMismatch {
            requested: T::DTYPE,
            actual,
        }
    }

    /// The single element of a one-element tensor of dtype `T`.
    ///
    /// The dtype is checked first, then the element count.
    pub fn as_scalar<T: Element>(&self) -> Result<&T> {
        self.as_typed_tensor::<T>()?.as_scalar()
    }

    pub fn as_scalar_mut<T: Element>(&mut self) -> Result<&mut T> {
        self.as_typed_tensor_mut::<T>()?.as_scalar_mut()
    }

    pub fn accessor<T: Element, N: ArrayLength<usize>>(&self) -> Result<Accessor<'_, T, N>> {
        self.as_typed_tensor::<T>()?.accessor::<N>()
    }

    pub fn accessor_mut<T: Element, N: ArrayLength<usize>>(
        &mut self,
    ) -> Result<AccessorMut<'_, T, N>> {
        self.as_typed_tensor_mut::<T>()?.accessor_mut::<N>()
    }

    pub fn copy_from<T: Element>(&mut self, data: &[T]) -> Result<()> {
        self.as_typed_tensor_mut::<T>()?.copy_from(data)
    }
}

impl<T: Element> From<TypedTensor<T>> for Tensor {
    fn from(typed: TypedTensor<T>) -> Self {
        T::into_tensor(typed)
    }
}

/// Tensors of different dtypes or shapes are unequal; otherwise every
/// element is compared exactly.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tensor::Float32(lhs), Tensor::Float32(rhs)) => lhs == rhs,
            (Tensor::Float64(lhs), Tensor::Float64(rhs)) => lhs == rhs,
            (Tensor::String(lhs), Tensor::String(rhs)) => lhs == rhs,
            (Tensor::Int8(lhs), Tensor::Int8(rhs)) => lhs == rhs,
            (Tensor::Int16(lhs), Tensor::Int16(rhs)) => lhs == rhs,
            (Tensor::Int32(lhs), Tensor::Int32(rhs)) => lhs == rhs,
            (Tensor::Int64(lhs), Tensor::Int64(rhs)) => lhs == rhs,
            (Tensor::Uint8(lhs), Tensor::Uint8(rhs)) => lhs == rhs,
            (Tensor::Uint16(lhs), Tensor::Uint16(rhs)) => lhs == rhs,
            (Tensor::Uint32(lhs), Tensor::Uint32(rhs)) => lhs == rhs,
            (Tensor::Uint64(lhs), Tensor::Uint64(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl Value for Tensor {
    fn is_tensor(&self) -> bool {
        true
    }

    fn serialize_tag(&self) -> &'static str {
        Self::SERIALIZE_TAG
    }

    fn as_tensor(&self) -> Result<&Tensor> {
        Ok(self)
    }

    fn as_tensor_mut(&mut self) -> Result<&mut Tensor> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typenum::{U1, U2};

    fn uint8_counting(n: usize) -> Tensor {
        let mut tensor: Tensor = TypedTensor::<u8>::new(vec![n]).unwrap().into();
        {
            let mut acc = tensor.accessor_mut::<u8, U1>().unwrap();
            for i in 0..n {
                acc[i] = i as u8;
            }
        }
        tensor
    }

    #[test]
    fn introspection() {
        let tensor: Tensor = TypedTensor::<f64>::new(vec![5, 6]).unwrap().into();
        assert_eq!(tensor.dtype(), Dtype::Float64);
        assert_eq!(tensor.shape(), &[5, 6]);
        assert_eq!(tensor.rank(), 2);
        assert_eq!(tensor.numel(), 30);
        assert!(tensor.is_tensor());
        assert_eq!(tensor.serialize_tag(), "tensor");
    }

    #[test]
    fn downcast_checks_dtype() {
        let tensor: Tensor = TypedTensor::<f32>::new(vec![8]).unwrap().into();
        assert!(tensor.as_typed_tensor::<f32>().is_ok());
        assert_eq!(
            tensor.as_typed_tensor::<i8>().unwrap_err(),
            Error::DtypeMismatch {
                requested: Dtype::Int8,
                actual: Dtype::Float32,
            }
        );
    }

    #[test]
    fn downcast_shares_storage() {
        let mut tensor = uint8_counting(4);
        tensor.as_typed_tensor_mut::<u8>().unwrap()[2] = 42;
        let typed = tensor.as_typed_tensor::<u8>().unwrap();
        assert_eq!(typed.iter().copied().collect::<Vec<_>>(), vec![0, 1, 42, 3]);
    }

    #[test]
    fn scalar_checks_dtype_and_count() {
        let mut scalar: Tensor = TypedTensor::<u8>::new(vec![1]).unwrap().into();
        *scalar.as_scalar_mut::<u8>().unwrap() = 42;
        assert_eq!(*scalar.as_scalar::<u8>().unwrap(), 42);
        assert!(matches!(
            scalar.as_scalar::<u16>(),
            Err(Error::DtypeMismatch { .. })
        ));

        let vector = uint8_counting(10);
        assert!(matches!(
            vector.as_scalar::<u8>(),
            Err(Error::RankMismatch { .. })
        ));
        assert!(matches!(
            vector.as_scalar::<u16>(),
            Err(Error::DtypeMismatch { .. })
        ));
    }

    #[test]
    fn accessor_checks_dtype_then_rank() {
        let tensor = uint8_counting(3);
        assert!(matches!(
            tensor.accessor::<f32, U1>(),
            Err(Error::DtypeMismatch { .. })
        ));
        assert!(matches!(
            tensor.accessor::<u8, U2>(),
            Err(Error::RankMismatch { .. })
        ));
        assert_eq!(tensor.accessor::<u8, U1>().unwrap()[2], 2);
    }

    #[test]
    fn into_typed_round_trip() {
        let tensor = uint8_counting(3);
        let tensor = tensor.into_typed_tensor::<i8>().unwrap_err();
        let typed = tensor.into_typed_tensor::<u8>().unwrap();
        assert_eq!(typed.into_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn equality() {
        let a = uint8_counting(5);
        let b = uint8_counting(5);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_ne!(a, uint8_counting(6));

        let widened: Tensor = TypedTensor::from_vec(vec![0u16, 1, 2, 3, 4], vec![5])
            .unwrap()
            .into();
        assert_ne!(a, widened);
    }
}
