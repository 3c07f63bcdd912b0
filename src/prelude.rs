pub use crate::error::{Error, Result};
pub use crate::ring::Ring;
pub use crate::tensor::prelude::*;
pub use crate::value::{value_maps_equal, values_equal, Value, ValueMap};
pub use generic_array::GenericArray;
