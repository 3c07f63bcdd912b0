use super::dtype::Dtype;
use super::shape::num_elements;
use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::warn;

/// Limits a `HeapAllocator` enforces before allocating.
///
/// The default policy accepts every request. A policy can be loaded from
/// JSON, where both fields are optional:
///
/// ```
/// use polytensor::tensor::allocation_policy::AllocationPolicy;
/// use polytensor::tensor::dtype::Dtype;
///
/// let policy = AllocationPolicy::from_json(r#"{ "max_elements": 1024, "dtypes": ["float32"] }"#).unwrap();
/// assert!(policy.check(&[32, 32], Dtype::Float32).is_ok());
/// assert!(policy.check(&[4], Dtype::Int8).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocationPolicy {
    /// Largest element count a single tensor may have.
    pub max_elements: Option<usize>,
    /// Dtypes the backend can hold. `None` allows all of them.
    pub dtypes: Option<Vec<Dtype>>,
}

impl AllocationPolicy {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn allows_dtype(&self, dtype: Dtype) -> bool {
        self.dtypes
            .as_ref()
            .map_or(true, |dtypes| dtypes.contains(&dtype))
    }

    pub fn check(&self, shape: &[usize], dtype: Dtype) -> Result<()> {
        if !self.allows_dtype(dtype) {
            return Err(Self::reject(shape, dtype, "dtype is not supported".to_string()));
        }

        if let Some(max) = self.max_elements {
            let requested = match num_elements(shape) {
                Some(requested) => requested,
                None => {
                    return Err(Self::reject(
                        shape,
                        dtype,
                        "element count overflows usize".to_string(),
                    ))
                }
            };
            if requested > max {
                return Err(Self::reject(
                    shape,
                    dtype,
                    format!("{} elements exceed the limit of {}", requested, max),
                ));
            }
        }

        Ok(())
    }

    fn reject(shape: &[usize], dtype: Dtype, reason: String) -> Error {
        warn!(%dtype, ?shape, %reason, "allocation rejected by policy");
        Error::Allocation {
            dtype,
            shape: shape.to_vec(),
            reason,
        }
    }
}
