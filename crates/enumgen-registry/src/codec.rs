//! Textual key-value codec for registries.
//!
//! A registry serializes to a JSON object mapping each registered value's
//! textual form to its name, in insertion order:
//!
//! ```json
//! {"1": "Small", "100": "Large"}
//! ```
//!
//! Decoding builds a *static* registry. The input is fully decoded and
//! checked before anything is committed, so a failed decode never leaves a
//! registry half-replaced.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use enumgen_core::{Entry, EnumScalar, Error, Result};

use crate::generator::{Generator, State};

impl<T: EnumScalar> Serialize for Generator<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let st = self.read();
        let mut map = serializer.serialize_map(Some(st.by_value.len()))?;
        for v in st.live_entries() {
            map.serialize_entry(&v.raw().to_text(), v.name())?;
        }
        map.end()
    }
}

impl<'de, T: EnumScalar> Deserialize<'de> for Generator<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = IndexMap::<String, String>::deserialize(deserializer)?;
        decode_index::<T>(raw)
            .map(Generator::from_state)
            .map_err(D::Error::custom)
    }
}

/// Parse every key into `T` and build static state. Repeated names, or two
/// keys that parse to the same value (`"1"` and `"01"`), are rejected.
fn decode_index<T: EnumScalar>(raw: IndexMap<String, String>) -> Result<State<T>> {
    let mut pairs = Vec::with_capacity(raw.len());
    for (text, name) in raw {
        let value = T::parse_text(&text).map_err(|e| Error::Decode(format!("key {text:?}: {e}")))?;
        pairs.push((name, value));
    }
    State::mapped(pairs).map_err(|e| Error::Decode(e.to_string()))
}

impl<T: EnumScalar> Generator<T> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: IndexMap<String, String> = serde_json::from_slice(bytes)?;
        Ok(Self::from_state(decode_index(raw)?))
    }

    /// Replace this registry's whole state with the decoded input.
    ///
    /// Afterwards the registry is static: `next` panics, as on a mapped one.
    /// Handles sharing this registry see the new state. On error nothing
    /// changes.
    pub fn replace_from_json(&self, bytes: &[u8]) -> Result<()> {
        let raw: IndexMap<String, String> = serde_json::from_slice(bytes)?;
        let fresh = decode_index::<T>(raw)?;
        let mut st = self.write();
        *st = fresh;

        #[cfg(feature = "tracing")]
        tracing::debug!(entries = st.entries.len(), "replaced enum registry from external input");

        Ok(())
    }
}
