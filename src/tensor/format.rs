//! Bounded text rendering of tensors.
//!
//! Up to `MAX_FULL_ELEMENTS` elements are printed in full; longer tensors
//! print the first and last `EDGE_ELEMENTS` around a ` ... ` marker. Both
//! the typed and the type-erased forms render as
//! `Tensor(dtype=uint8, shape=[3]) [10, 11, 12]`.

use super::dtype::Element;
use super::tensor::{dispatch_tensor, Tensor};
use super::typed::TypedTensor;
use std::fmt::{self, Display, Formatter};

pub const MAX_FULL_ELEMENTS: usize = 6;
pub const EDGE_ELEMENTS: usize = 3;

fn write_joined<T: Display>(f: &mut Formatter<'_>, elements: &[T]) -> fmt::Result {
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", element)?;
    }
    Ok(())
}

/// Writes `elements` in brackets, eliding the middle of long sequences.
pub fn write_elements<T: Display>(f: &mut Formatter<'_>, elements: &[T]) -> fmt::Result {
    f.write_str("[")?;
    if elements.len() <= MAX_FULL_ELEMENTS {
        write_joined(f, elements)?;
    } else {
        write_joined(f, &elements[..EDGE_ELEMENTS])?;
        f.write_str(" ... ")?;
        write_joined(f, &elements[elements.len() - EDGE_ELEMENTS..])?;
    }
    f.write_str("]")
}

impl<T> Display for TypedTensor<T>
where
    T: Element,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(dtype={}, shape={:?}) ", self.dtype(), self.shape())?;
        let elements: &[T] = self;
        write_elements(f, elements)
    }
}

impl Display for Tensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        dispatch_tensor!(self, typed => Display::fmt(typed, f))
    }
}
