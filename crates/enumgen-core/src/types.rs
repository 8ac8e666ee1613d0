//! Persisted scalar protocol: the canonical forms a value takes when stored in
//! an external record-oriented store.
//!
//! Values only ever *produce* `I64`, `F64`, or `Str`. `Null` and `Bin` are
//! accepted on the way back in; `Bool` exists so stores that hand back
//! booleans get a type-mismatch error instead of a silent coercion.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PersistedScalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl PersistedScalar {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PersistedScalar::Null => "null",
            PersistedScalar::Bool(_) => "bool",
            PersistedScalar::I64(_) => "i64",
            PersistedScalar::F64(_) => "f64",
            PersistedScalar::Str(_) => "string",
            PersistedScalar::Bin(_) => "bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PersistedScalar::Null)
    }
}

impl From<i64> for PersistedScalar {
    fn from(v: i64) -> Self {
        PersistedScalar::I64(v)
    }
}

impl From<f64> for PersistedScalar {
    fn from(v: f64) -> Self {
        PersistedScalar::F64(v)
    }
}

impl From<&str> for PersistedScalar {
    fn from(v: &str) -> Self {
        PersistedScalar::Str(v.to_string())
    }
}

impl From<String> for PersistedScalar {
    fn from(v: String) -> Self {
        PersistedScalar::Str(v)
    }
}

impl From<Vec<u8>> for PersistedScalar {
    fn from(v: Vec<u8>) -> Self {
        PersistedScalar::Bin(v)
    }
}

impl<T: Into<PersistedScalar>> From<Option<T>> for PersistedScalar {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(PersistedScalar::Null)
    }
}
