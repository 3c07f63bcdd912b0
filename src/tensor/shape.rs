//! Runtime shape arithmetic.
//!
//! Shapes are plain `[usize]` slices in row-major order. Ranks requested
//! by callers are type-level unsigned integers from `typenum` and are
//! checked against the runtime shape here.

use crate::error::{Error, Result};
use typenum::Unsigned;

/// Number of elements of a tensor with the given shape, or `None` when
/// the count overflows `usize`. An empty shape describes a single element.
pub fn num_elements(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }

    shape.iter().try_fold(1usize, |acc, dim| acc.checked_mul(*dim))
}

/// Row-major strides of a contiguous tensor, in elements.
pub fn intrinsic_strides(shape: &[usize]) -> Vec<usize> {
    intrinsic_strides_in_place(shape.to_vec())
}

// Saturates: strides of an empty tensor are never used for addressing.
fn intrinsic_strides_in_place(mut shape: Vec<usize>) -> Vec<usize> {
    let mut product: usize = 1;
    for stride in shape.iter_mut().rev() {
        let tmp = product;
        product = product.saturating_mul(*stride);
        *stride = tmp;
    }

    shape
}

/// Fails with `RankMismatch` unless `shape` has exactly `N` axes.
pub fn check_rank<N: Unsigned>(shape: &[usize]) -> Result<()> {
    if shape.len() != N::USIZE {
        return Err(Error::RankMismatch {
            reason: format!("requested a rank {} accessor", N::USIZE),
            shape: shape.to_vec(),
        });
    }

    Ok(())
}
