//! Error types shared by every `polytensor` operation.
//!
//! All checks are eager: a failed check is reported to the immediate
//! caller and nothing is coerced or retried.

use crate::tensor::dtype::Dtype;
use thiserror::Error;

/// Result type alias for `polytensor` operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A non-tensor value was used where a tensor is required
    #[error("value with serialization tag `{tag}` is not a tensor")]
    NotATensor { tag: &'static str },

    /// Downcast or typed scalar access with the wrong element type
    #[error("dtype mismatch: tensor holds {actual}, requested {requested}")]
    DtypeMismatch { requested: Dtype, actual: Dtype },

    /// Accessor rank or scalar element count does not match the tensor
    #[error("rank mismatch: {reason}, tensor has shape {shape:?}")]
    RankMismatch { reason: String, shape: Vec<usize> },

    /// Bulk copy source length differs from the tensor element count
    #[error("size mismatch: tensor holds {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Equality between values where at least one is not a tensor
    #[error("cannot compare `{lhs}` with `{rhs}`: only tensors support equality")]
    UnsupportedComparison { lhs: &'static str, rhs: &'static str },

    /// The backend refused an allocation request
    #[error("cannot allocate {dtype} tensor of shape {shape:?}: {reason}")]
    Allocation {
        dtype: Dtype,
        shape: Vec<usize>,
        reason: String,
    },

    #[error("unknown dtype name `{0}`")]
    UnknownDtype(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_dtype_mismatch() {
        let err = Error::DtypeMismatch {
            requested: Dtype::Int8,
            actual: Dtype::Float32,
        };
        let msg = err.to_string();
        assert!(msg.contains("int8"));
        assert!(msg.contains("float32"));
    }

    #[test]
    fn display_size_mismatch() {
        let err = Error::SizeMismatch {
            expected: 5,
            actual: 4,
        };
        assert_eq!(err.to_string(), "size mismatch: tensor holds 5 elements, got 4");
    }

    #[test]
    fn display_unsupported_comparison_names_both_sides() {
        let err = Error::UnsupportedComparison {
            lhs: "tensor",
            rhs: "something",
        };
        let msg = err.to_string();
        assert!(msg.contains("`tensor`"));
        assert!(msg.contains("`something`"));
    }

    #[test]
    fn config_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
