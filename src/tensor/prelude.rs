pub use super::accessor::{Accessor, AccessorMut, StridedAccessor};
pub use super::allocation_policy::AllocationPolicy;
pub use super::allocator::{HeapAllocator, TensorAllocator, TensorAllocatorExt};
pub use super::dtype::{dtype_of, Dtype, Element};
pub use super::heap_layout::HeapLayout;
pub use super::tensor::Tensor;
pub use super::typed::TypedTensor;
