//! `tensor` holds multidimensional arrays whose element type is only known
//! at runtime. A `Tensor` carries a `Dtype` tag, a shape and row-major
//! storage; checked downcasts turn it into a `TypedTensor<T>` over the same
//! storage, and accessors give indexed access whose rank is a type level
//! integer from the `typenum` crate, checked once when the accessor is built.

pub mod accessor;
pub mod allocation_policy;
pub mod allocator;
pub mod dtype;
pub mod format;
pub mod heap_layout;
pub mod prelude;
pub mod shape;
pub mod tensor;
pub mod typed;
