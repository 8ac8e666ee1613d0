//! `Basic`: a non-generic, i64-valued enum member bound to a shared registry.
//!
//! Every `Basic` made from the same root shares one `Generator<i64>` by
//! `Arc`; the members are views, the registry owns the mapping.
//!
//! ```
//! use enumgen_registry::Basic;
//!
//! let status = Basic::new_registry();
//! let pending = status.add("Pending"); // 0
//! let active = status.add("Active"); // 1
//! assert_eq!(active.get(), 1);
//! assert_eq!(pending.with(100).get(), 100);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::de::{DeserializeSeed, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use enumgen_core::{Entry, Error, PersistedScalar, Result, Value};

use crate::generator::{Generator, Registry};

#[derive(Clone, Default)]
pub struct Basic {
    name: String,
    value: i64,
    meta: Option<Registry<i64>>,
}

impl Basic {
    /// Fresh registry numbering from 0. The returned root has an empty name.
    pub fn new_registry() -> Self {
        Self::bind(&Arc::new(Generator::numeric(0)))
    }

    /// Empty member (value 0, no name) bound to `registry`, ready to be a
    /// decode target.
    pub fn bind(registry: &Registry<i64>) -> Self {
        Self {
            name: String::new(),
            value: 0,
            meta: Some(Arc::clone(registry)),
        }
    }

    pub fn registry(&self) -> Option<&Registry<i64>> {
        self.meta.as_ref()
    }

    fn meta(&self) -> Result<&Registry<i64>> {
        self.meta.as_ref().ok_or(Error::NoRegistry)
    }

    fn sibling(&self, meta: &Registry<i64>, name: String, value: i64) -> Self {
        Self {
            name,
            value,
            meta: Some(Arc::clone(meta)),
        }
    }

    pub fn get(&self) -> i64 {
        self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `name` under the next sequential value.
    pub fn try_add(&self, name: &str) -> Result<Basic> {
        let meta = self.meta()?;
        let (value, name) = meta.try_next(name)?.into_parts();
        Ok(self.sibling(meta, name, value))
    }

    /// Panics if `name` is already registered or this member is unbound.
    pub fn add(&self, name: &str) -> Basic {
        self.try_add(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Move this member's name to `value`.
    ///
    /// Fails if `value` already belongs to another name. The old mapping is
    /// dropped from the indexes but its entry stays in the registry's ordered
    /// entries.
    pub fn try_with(&self, value: i64) -> Result<Basic> {
        let meta = self.meta()?;
        meta.reassign(&self.name, value)?;
        Ok(self.sibling(meta, self.name.clone(), value))
    }

    /// Panics if `value` is already used by another name.
    pub fn with(&self, value: i64) -> Basic {
        self.try_with(value).unwrap_or_else(|e| panic!("{e}"))
    }

    /// `add(name)` then `with(value)`. If the second step fails the name
    /// keeps the sequential value it was given.
    pub fn try_from_value(&self, v: &Value<i64>) -> Result<Basic> {
        self.try_add(v.name())?.try_with(*v.raw())
    }

    pub fn from_value(&self, v: &Value<i64>) -> Basic {
        self.try_from_value(v).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn to_value(&self) -> Value<i64> {
        Value::new(self.value, self.name.clone())
    }

    /// Every entry of the registry as a member, in insertion order.
    pub fn values(&self) -> Vec<Basic> {
        match &self.meta {
            Some(meta) => meta
                .values()
                .into_iter()
                .map(|v| {
                    let (value, name) = v.into_parts();
                    self.sibling(meta, name, value)
                })
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.meta()?.contains(&self.value) {
            return Err(Error::InvalidValue(self.value.to_string()));
        }
        Ok(())
    }

    pub fn to_persisted(&self) -> PersistedScalar {
        PersistedScalar::I64(self.value)
    }

    /// Load from a persisted record and resolve the name in the registry.
    ///
    /// Accepts i64, f64 (truncated), and decimal text or bytes. `Null`
    /// resets to value 0 with an empty name.
    pub fn populate_from_persisted(&mut self, scalar: &PersistedScalar) -> Result<()> {
        let meta = self.meta()?;
        let value = match scalar {
            PersistedScalar::Null => {
                self.value = 0;
                self.name.clear();
                return Ok(());
            }
            PersistedScalar::I64(v) => *v,
            PersistedScalar::F64(v) => *v as i64,
            PersistedScalar::Str(s) => parse_decimal(s)?,
            PersistedScalar::Bin(b) => parse_decimal(&String::from_utf8_lossy(b))?,
            other => {
                return Err(Error::TypeMismatch {
                    found: other.kind_name(),
                    target: "Basic",
                })
            }
        };
        let name = meta
            .name_of(&value)
            .ok_or_else(|| Error::InvalidValue(value.to_string()))?;
        self.value = value;
        self.name = name;
        Ok(())
    }

    /// Decode the JSON integer form and resolve the name in the registry.
    ///
    /// `null` decodes as 0, which must be registered like any other value.
    pub fn decode_json(&mut self, bytes: &[u8]) -> Result<()> {
        let meta = self.meta()?;
        let value = serde_json::from_slice::<Option<i64>>(bytes)?.unwrap_or(0);
        let name = meta
            .name_of(&value)
            .ok_or_else(|| Error::InvalidValue(value.to_string()))?;
        self.value = value;
        self.name = name;
        Ok(())
    }
}

fn parse_decimal(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| Error::InvalidValue(s.to_string()))
}

impl Entry<i64> for Basic {
    fn raw(&self) -> &i64 {
        &self.value
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Basic {
    fn eq(&self, other: &Self) -> bool {
        let same_registry = match (&self.meta, &other.meta) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_registry && self.value == other.value && self.name == other.name
    }
}

impl Eq for Basic {}

impl fmt::Debug for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Basic")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("bound", &self.meta.is_some())
            .finish()
    }
}

impl fmt::Display for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Basic {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

/// Deserialize a `Basic` bound to a known registry. `null` reads as 0.
///
/// ```
/// use enumgen_registry::{Basic, BasicSeed};
/// use serde::de::DeserializeSeed;
///
/// let root = Basic::new_registry();
/// root.add("Pending");
/// let registry = root.registry().unwrap();
/// let mut de = serde_json::Deserializer::from_str("0");
/// let b = BasicSeed(registry).deserialize(&mut de).unwrap();
/// assert_eq!(b.name(), "Pending");
/// ```
pub struct BasicSeed<'a>(pub &'a Registry<i64>);

impl<'de> DeserializeSeed<'de> for BasicSeed<'_> {
    type Value = Basic;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Basic, D::Error> {
        let value = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
        let name = self
            .0
            .name_of(&value)
            .ok_or_else(|| D::Error::custom(Error::InvalidValue(value.to_string())))?;
        Ok(Basic {
            name,
            value,
            meta: Some(Arc::clone(self.0)),
        })
    }
}
