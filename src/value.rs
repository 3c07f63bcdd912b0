//! `value` is the common root of everything a pipeline passes around.
//!
//! Tensors are one kind of `Value`; other kinds only need a serialization
//! tag. Equality is defined between tensors only: comparing anything else
//! is an error, not `false`.

use crate::error::{Error, Result};
use crate::tensor::tensor::Tensor;
use std::collections::BTreeMap;
use std::fmt;

pub trait Value: fmt::Debug + Send + Sync {
    fn is_tensor(&self) -> bool {
        false
    }

    /// Stable name identifying the concrete kind of value.
    fn serialize_tag(&self) -> &'static str;

    fn as_tensor(&self) -> Result<&Tensor> {
        Err(Error::NotATensor {
            tag: self.serialize_tag(),
        })
    }

    fn as_tensor_mut(&mut self) -> Result<&mut Tensor> {
        Err(Error::NotATensor {
            tag: self.serialize_tag(),
        })
    }
}

fn tensor_pair<'a>(lhs: &'a dyn Value, rhs: &'a dyn Value) -> Result<(&'a Tensor, &'a Tensor)> {
    match (lhs.as_tensor(), rhs.as_tensor()) {
        (Ok(l), Ok(r)) => Ok((l, r)),
        _ => Err(Error::UnsupportedComparison {
            lhs: lhs.serialize_tag(),
            rhs: rhs.serialize_tag(),
        }),
    }
}

/// Compares two values, which must both be tensors.
pub fn values_equal(lhs: &dyn Value, rhs: &dyn Value) -> Result<bool> {
    let (lhs, rhs) = tensor_pair(lhs, rhs)?;
    Ok(lhs == rhs)
}

impl dyn Value {
    pub fn try_eq(&self, other: &dyn Value) -> Result<bool> {
        values_equal(self, other)
    }
}

/// Named values, ordered by name.
pub type ValueMap = BTreeMap<String, Box<dyn Value>>;

/// Maps holding different names are unequal without looking at the
/// values. Otherwise every entry must be a tensor on both sides, checked
/// before any elements are compared, and the maps are equal when every
/// pair of tensors is.
pub fn value_maps_equal(lhs: &ValueMap, rhs: &ValueMap) -> Result<bool> {
    if lhs.len() != rhs.len() || lhs.keys().ne(rhs.keys()) {
        return Ok(false);
    }

    let pairs = lhs
        .values()
        .zip(rhs.values())
        .map(|(l, r)| tensor_pair(l.as_ref(), r.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(pairs.into_iter().all(|(l, r)| l == r))
}
