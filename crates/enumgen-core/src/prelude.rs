//! Convenient re-exports for downstream crates.

pub use crate::config::{GeneratorConfig, Policy};
pub use crate::convert::{parse_text, safe_cast, Numeric};
pub use crate::error::{Error, Result};
pub use crate::hash::{fingerprint, Hash256};
pub use crate::scalar::{EnumScalar, FloatKey, ScalarKind};
pub use crate::types::PersistedScalar;
pub use crate::value::{Entry, NameResolver, Value};
