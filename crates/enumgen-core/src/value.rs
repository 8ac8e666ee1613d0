//! `Value<T>`: an immutable (raw, name) pair plus its external encodings.
//!
//! A value never consults a registry on its own. Decoding fills in the raw
//! scalar only; callers that want the name resolved pass a [`NameResolver`].

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::convert::safe_cast;
use crate::error::{Error, Result};
use crate::scalar::EnumScalar;
use crate::types::PersistedScalar;

/// Anything that looks like an enum member: a raw value with a display name.
pub trait Entry<T> {
    fn raw(&self) -> &T;
    fn name(&self) -> &str;
}

/// Optional strategy for recovering a name from a raw value during decode.
pub trait NameResolver<T> {
    fn resolve_name(&self, raw: &T) -> Option<String>;
}

impl<T, F> NameResolver<T> for F
where
    F: Fn(&T) -> Option<String>,
{
    fn resolve_name(&self, raw: &T) -> Option<String> {
        self(raw)
    }
}

#[derive(Debug, Clone)]
pub struct Value<T: EnumScalar> {
    raw: T,
    name: String,
}

impl<T: EnumScalar> Value<T> {
    /// Pure constructor; no registry validation.
    pub fn new(raw: T, name: impl Into<String>) -> Self {
        Self {
            raw,
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.raw.clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_parts(self) -> (T, String) {
        (self.raw, self.name)
    }

    /// JSON form of the raw scalar. The name is never encoded.
    ///
    /// Infinite and NaN floats have no JSON number form and fail with
    /// `OutOfRange`.
    pub fn encode_text(&self) -> Result<Vec<u8>> {
        if !self.raw.is_finite() {
            return Err(non_finite::<T>(&self.raw));
        }
        Ok(serde_json::to_vec(&self.raw)?)
    }

    /// Replace the raw scalar from its JSON form. The name is left as is.
    pub fn decode_text(&mut self, bytes: &[u8]) -> Result<()> {
        self.raw = serde_json::from_slice(bytes)?;
        Ok(())
    }

    /// Like [`Value::decode_text`], then set the name from `resolver`
    /// (empty if the resolver does not know the value).
    pub fn decode_text_with(&mut self, bytes: &[u8], resolver: &dyn NameResolver<T>) -> Result<()> {
        self.decode_text(bytes)?;
        self.name = resolver.resolve_name(&self.raw).unwrap_or_default();
        Ok(())
    }

    pub fn to_persisted(&self) -> Result<PersistedScalar> {
        Ok(self.raw.to_persisted())
    }

    /// Parse the raw scalar from a persisted record.
    ///
    /// `Null` resets to the zero value with an empty name. Any kind other
    /// than i64, f64, text, or bytes is a type mismatch. The value is left
    /// unchanged on error.
    pub fn populate_from_persisted(&mut self, scalar: &PersistedScalar) -> Result<()> {
        match raw_from_persisted::<T>(scalar)? {
            Some(raw) => self.raw = raw,
            None => {
                self.raw = T::zero();
                self.name.clear();
            }
        }
        Ok(())
    }

    pub fn populate_from_persisted_with(
        &mut self,
        scalar: &PersistedScalar,
        resolver: &dyn NameResolver<T>,
    ) -> Result<()> {
        self.populate_from_persisted(scalar)?;
        if !scalar.is_null() {
            self.name = resolver.resolve_name(&self.raw).unwrap_or_default();
        }
        Ok(())
    }
}

fn non_finite<T: EnumScalar>(raw: &T) -> Error {
    Error::OutOfRange {
        value: raw.to_text(),
        target: T::TYPE_NAME,
    }
}

/// Decode a persisted scalar into `T`; `Ok(None)` for `Null`.
pub fn raw_from_persisted<T: EnumScalar>(scalar: &PersistedScalar) -> Result<Option<T>> {
    let raw = match scalar {
        PersistedScalar::Null => return Ok(None),
        PersistedScalar::I64(v) => safe_cast::<T>(*v),
        PersistedScalar::F64(v) => safe_cast::<T>(*v),
        PersistedScalar::Str(s) => T::parse_text(s),
        PersistedScalar::Bin(b) => {
            let s = std::str::from_utf8(b).map_err(|e| Error::Parse {
                input: String::from_utf8_lossy(b).into_owned(),
                target: T::TYPE_NAME,
                reason: e.to_string(),
            })?;
            T::parse_text(s)
        }
        other => Err(Error::TypeMismatch {
            found: other.kind_name(),
            target: T::TYPE_NAME,
        }),
    };
    #[cfg(feature = "tracing")]
    let raw = raw.inspect_err(|e| {
        tracing::trace!(kind = scalar.kind_name(), error = %e, "rejected persisted scalar")
    });
    raw.map(Some)
}

impl<T: EnumScalar> Entry<T> for Value<T> {
    fn raw(&self) -> &T {
        &self.raw
    }

    fn name(&self) -> &str {
        Value::name(self)
    }
}

impl<T: EnumScalar> Default for Value<T> {
    fn default() -> Self {
        Self::new(T::zero(), "")
    }
}

impl<T: EnumScalar> PartialEq for Value<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.key() == other.raw.key()
    }
}

impl<T: EnumScalar> Eq for Value<T> {}

impl<T: EnumScalar> Hash for Value<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.key().hash(state);
    }
}

impl<T: EnumScalar> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T: EnumScalar> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !self.raw.is_finite() {
            return Err(S::Error::custom(non_finite::<T>(&self.raw)));
        }
        self.raw.serialize(serializer)
    }
}

impl<'de, T: EnumScalar> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = T::deserialize(deserializer)?;
        Ok(Self::new(raw, ""))
    }
}
