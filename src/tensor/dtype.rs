//! The closed set of element types a tensor can hold.
//!
//! `Dtype` is the runtime tag and `Element` is its compile-time
//! counterpart: every native element type implements `Element` with
//! exactly one `Dtype`, and `with_dtype!` maps a runtime tag back to the
//! native type. The mapping is one-to-one in both directions.

use super::tensor::Tensor;
use super::typed::TypedTensor;
use crate::error::Error;
use polytensor_macros::expand_impl;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem::size_of;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Float32,
    Float64,
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl Dtype {
    pub const ALL: [Dtype; 11] = [
        Dtype::Float32,
        Dtype::Float64,
        Dtype::String,
        Dtype::Int8,
        Dtype::Int16,
        Dtype::Int32,
        Dtype::Int64,
        Dtype::Uint8,
        Dtype::Uint16,
        Dtype::Uint32,
        Dtype::Uint64,
    ];

    /// Canonical name, also used by the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Dtype::Float32 => "float32",
            Dtype::Float64 => "float64",
            Dtype::String => "string",
            Dtype::Int8 => "int8",
            Dtype::Int16 => "int16",
            Dtype::Int32 => "int32",
            Dtype::Int64 => "int64",
            Dtype::Uint8 => "uint8",
            Dtype::Uint16 => "uint16",
            Dtype::Uint32 => "uint32",
            Dtype::Uint64 => "uint64",
        }
    }

    /// Width of one element in bytes. Strings have no fixed width.
    pub fn size_in_bytes(self) -> Option<usize> {
        match self {
            Dtype::String => None,
            other => Some(crate::with_dtype!(other, T => size_of::<T>())),
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dtype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dtype::ALL
            .iter()
            .copied()
            .find(|dtype| dtype.name() == s)
            .ok_or_else(|| Error::UnknownDtype(s.to_string()))
    }
}

/// Runs `$body` with `$t` bound to the native element type of `$dtype`.
///
/// ```
/// use polytensor::tensor::dtype::Dtype;
///
/// let width = polytensor::with_dtype!(Dtype::Int16, T => std::mem::size_of::<T>());
/// assert_eq!(width, 2);
/// ```
#[macro_export]
macro_rules! with_dtype {
    ($dtype:expr, $t:ident => $body:expr) => {
        match $dtype {
            $crate::tensor::dtype::Dtype::Float32 => {
                type $t = f32;
                $body
            }
            $crate::tensor::dtype::Dtype::Float64 => {
                type $t = f64;
                $body
            }
            $crate::tensor::dtype::Dtype::String => {
                type $t = ::std::string::String;
                $body
            }
            $crate::tensor::dtype::Dtype::Int8 => {
                type $t = i8;
                $body
            }
            $crate::tensor::dtype::Dtype::Int16 => {
                type $t = i16;
                $body
            }
            $crate::tensor::dtype::Dtype::Int32 => {
                type $t = i32;
                $body
            }
            $crate::tensor::dtype::Dtype::Int64 => {
                type $t = i64;
                $body
            }
            $crate::tensor::dtype::Dtype::Uint8 => {
                type $t = u8;
                $body
            }
            $crate::tensor::dtype::Dtype::Uint16 => {
                type $t = u16;
                $body
            }
            $crate::tensor::dtype::Dtype::Uint32 => {
                type $t = u32;
                $body
            }
            $crate::tensor::dtype::Dtype::Uint64 => {
                type $t = u64;
                $body
            }
        }
    };
}

mod sealed {
    pub trait Sealed {}
}

/// Native element type of a tensor.
///
/// Sealed: the set of implementors is exactly the `Dtype` variants.
pub trait Element:
    sealed::Sealed + Clone + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const DTYPE: Dtype;

    #[doc(hidden)]
    fn into_tensor(typed: TypedTensor<Self>) -> Tensor;
    #[doc(hidden)]
    fn downcast_ref(tensor: &Tensor) -> Option<&TypedTensor<Self>>;
    #[doc(hidden)]
    fn downcast_mut(tensor: &mut Tensor) -> Option<&mut TypedTensor<Self>>;
    #[doc(hidden)]
    fn downcast_owned(tensor: Tensor) -> std::result::Result<TypedTensor<Self>, Tensor>;
}

/// Tag of the native type `T`.
pub const fn dtype_of<T: Element>() -> Dtype {
    T::DTYPE
}

#[expand_impl(
    _f32<T=f32>,
    _f64<T=f64>,
    _string<T=String>,
    _i8<T=i8>,
    _i16<T=i16>,
    _i32<T=i32>,
    _i64<T=i64>,
    _u8<T=u8>,
    _u16<T=u16>,
    _u32<T=u32>,
    _u64<T=u64>,
)]
impl<T> sealed::Sealed for T {}

#[expand_impl(
    _f32<T=f32, D=Float32>,
    _f64<T=f64, D=Float64>,
    _string<T=String, D=String>,
    _i8<T=i8, D=Int8>,
    _i16<T=i16, D=Int16>,
    _i32<T=i32, D=Int32>,
    _i64<T=i64, D=Int64>,
    _u8<T=u8, D=Uint8>,
    _u16<T=u16, D=Uint16>,
    _u32<T=u32, D=Uint32>,
    _u64<T=u64, D=Uint64>,
)]
impl<T> Element for T {
    const DTYPE: Dtype = Dtype::D;

    fn into_tensor(typed: TypedTensor<T>) -> Tensor {
        Tensor::D(typed)
    }

    fn downcast_ref(tensor: &Tensor) -> Option<&TypedTensor<T>> {
        match tensor {
            Tensor::D(typed) => Some(typed),
            _ => None,
        }
    }

    fn downcast_mut(tensor: &mut Tensor) -> Option<&mut TypedTensor<T>> {
        match tensor {
            Tensor::D(typed) => Some(typed),
            _ => None,
        }
    }

    fn downcast_owned(tensor: Tensor) -> std::result::Result<TypedTensor<T>, Tensor> {
        match tensor {
            Tensor::D(typed) => Ok(typed),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_mapping() {
        assert_eq!(dtype_of::<u8>(), Dtype::Uint8);
        assert_eq!(dtype_of::<i8>(), Dtype::Int8);
        assert_eq!(dtype_of::<f32>(), Dtype::Float32);
        assert_eq!(dtype_of::<f64>(), Dtype::Float64);
        assert_eq!(dtype_of::<String>(), Dtype::String);
        assert_eq!(dtype_of::<u64>(), Dtype::Uint64);
    }

    #[test]
    fn mapping_is_bijective() {
        for dtype in Dtype::ALL.iter().copied() {
            let round_trip = crate::with_dtype!(dtype, T => dtype_of::<T>());
            assert_eq!(round_trip, dtype);
        }
    }

    #[test]
    fn names_round_trip() {
        for dtype in Dtype::ALL.iter().copied() {
            assert_eq!(dtype.to_string().parse::<Dtype>(), Ok(dtype));
        }
        assert_eq!(
            "complex64".parse::<Dtype>(),
            Err(Error::UnknownDtype("complex64".to_string()))
        );
    }

    #[test]
    fn serde_uses_canonical_names() {
        for dtype in Dtype::ALL.iter().copied() {
            let json = serde_json::to_string(&dtype).unwrap();
            assert_eq!(json, format!("\"{}\"", dtype.name()));
            let back: Dtype = serde_json::from_str(&json).unwrap();
            assert_eq!(back, dtype);
        }
    }

    #[test]
    fn element_sizes() {
        assert_eq!(Dtype::Uint8.size_in_bytes(), Some(1));
        assert_eq!(Dtype::Int16.size_in_bytes(), Some(2));
        assert_eq!(Dtype::Float32.size_in_bytes(), Some(4));
        assert_eq!(Dtype::Float64.size_in_bytes(), Some(8));
        assert_eq!(Dtype::String.size_in_bytes(), None);
    }
}
