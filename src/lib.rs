//! `polytensor` stores tensors of any element type behind a single
//! type-erased `Tensor` value and hands out statically typed views of them
//! after checking the runtime dtype tag.
//!
//! ```
//! use polytensor::prelude::*;
//! use typenum::U2;
//!
//! let alloc = HeapAllocator::new();
//! let mut tensor = alloc.allocate_tensor(&[2, 3], Dtype::Float32)?;
//! let last: GenericArray<usize, U2> = GenericArray::from([1, 2]);
//! tensor.accessor_mut::<f32, U2>()?[last] = 4.5;
//!
//! assert_eq!(tensor.as_typed_tensor::<f32>()?[5], 4.5);
//! assert!(tensor.as_typed_tensor::<f64>().is_err());
//! # Ok::<(), polytensor::error::Error>(())
//! ```

pub mod error;
pub mod prelude;
pub mod ring;
pub mod tensor;
pub mod value;
