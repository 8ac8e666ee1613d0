//! `Generator<T>`: the authoritative value <-> name registry of one enum.
//!
//! Invariants (hold after every public operation, including concurrent ones):
//! - `by_value` and `by_name` are exact inverses of each other.
//! - Names are unique; a duplicate is rejected, never overwritten.
//! - `entries` is append-only. It is *not* authoritative: after a `Basic`
//!   reassignment it may still hold the old value. The indexes are the truth.
//! - A static registry (no incrementer) never generates values.
//!
//! Every mutation takes the write lock for the whole check-then-act sequence;
//! every read takes the read lock. Nothing is handed out by reference.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use enumgen_core::config::{GeneratorConfig, Policy};
use enumgen_core::hash::{fingerprint, Hash256};
use enumgen_core::scalar::ScalarKind;
use enumgen_core::{Entry, EnumScalar, Error, NameResolver, Result, Value};

use crate::policy::{BitFlag, Cyclic, Incrementer, Prefixed, Step};

/// Shared handle: one registry, many owners.
pub type Registry<T> = Arc<Generator<T>>;

pub(crate) struct State<T: EnumScalar> {
    pub(crate) current: T,
    pub(crate) increment: Option<Box<dyn Incrementer<T>>>,
    pub(crate) entries: Vec<Value<T>>,
    pub(crate) by_value: HashMap<T::Key, String>,
    pub(crate) by_name: HashMap<String, T>,
}

impl<T: EnumScalar> State<T> {
    fn sequential(start: T, increment: Box<dyn Incrementer<T>>) -> Self {
        Self {
            current: start,
            increment: Some(increment),
            entries: Vec::new(),
            by_value: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Static state from ordered pairs. Rejects repeated names or values.
    pub(crate) fn mapped<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let mut state = Self {
            current: T::zero(),
            increment: None,
            entries: Vec::new(),
            by_value: HashMap::new(),
            by_name: HashMap::new(),
        };
        for (name, value) in pairs {
            let name = name.into();
            state.check_free(&name, &value)?;
            state.insert(value, name);
        }
        Ok(state)
    }

    fn check_free(&self, name: &str, value: &T) -> Result<()> {
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        if let Some(existing) = self.by_value.get(&value.key()) {
            return Err(Error::DuplicateValue {
                value: value.to_text(),
                existing: existing.clone(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, value: T, name: String) {
        self.by_value.insert(value.key(), name.clone());
        self.by_name.insert(name.clone(), value.clone());
        self.entries.push(Value::new(value, name));
    }

    /// Entries still backed by the indexes, in insertion order, each once.
    pub(crate) fn live_entries(&self) -> impl Iterator<Item = &Value<T>> + '_ {
        let mut seen = std::collections::HashSet::new();
        self.entries.iter().filter(move |v| {
            let key = v.raw().key();
            self.by_value.get(&key).map(String::as_str) == Some(v.name()) && seen.insert(key)
        })
    }
}

pub struct Generator<T: EnumScalar> {
    state: RwLock<State<T>>,
}

impl<T: EnumScalar> Generator<T> {
    /// Sequential generator starting at the zero value with the default step.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> GeneratorBuilder<T> {
        GeneratorBuilder {
            start: T::zero(),
            increment: Box::new(Step),
        }
    }

    /// Sequential generator starting at `start` with the default step.
    pub fn numeric(start: T) -> Self {
        Self::builder().start(start).build()
    }

    /// `start, start << 1, start << 2, ...` for integer kinds.
    pub fn bit_flag(start: T) -> Self {
        Self::builder().start(start).increment(BitFlag).build()
    }

    /// Static registry from ordered `(name, value)` pairs.
    ///
    /// Fails on a repeated name or value. `next` on the result panics.
    pub fn mapped<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        Ok(Self::from_state(State::mapped(pairs)?))
    }

    pub fn from_config(cfg: &GeneratorConfig) -> Result<Self> {
        let parse_start = || cfg.start.as_deref().map(T::parse_text).transpose();
        let generator = match &cfg.policy {
            Policy::Step => Self::builder()
                .start(parse_start()?.unwrap_or_else(T::zero))
                .build(),
            Policy::BitFlag => Self::builder()
                .start(parse_start()?.unwrap_or_else(T::zero))
                .increment(BitFlag)
                .build(),
            Policy::Cyclic { modulus } => {
                if !T::KIND.is_integer() {
                    return Err(Error::Config(format!(
                        "cyclic policy needs an integer type, got {}",
                        T::TYPE_NAME
                    )));
                }
                Self::builder()
                    .start(parse_start()?.unwrap_or_else(T::zero))
                    .increment(Cyclic::new(*modulus))
                    .build()
            }
            Policy::Prefixed { prefix } => {
                if T::KIND != ScalarKind::Text {
                    return Err(Error::Config(format!(
                        "prefixed policy needs a text type, got {}",
                        T::TYPE_NAME
                    )));
                }
                let n = match cfg.start.as_deref() {
                    Some(s) => s
                        .parse::<i64>()
                        .map_err(|e| Error::Config(format!("prefixed start {s:?}: {e}")))?,
                    None => 0,
                };
                let policy = Prefixed::new(prefix.clone());
                Self::builder()
                    .start(T::parse_text(&policy.format(n))?)
                    .increment(policy)
                    .build()
            }
        };
        Ok(generator)
    }

    pub(crate) fn from_state(state: State<T>) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    // A panic inside a user incrementer poisons the lock, but it runs before
    // any field is touched, so the state behind a poisoned lock is intact.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, State<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, State<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `name` under the current value and advance the sequence.
    ///
    /// Fails with `StaticRegistry` on a mapped/deserialized registry and with
    /// `DuplicateName` if `name` is taken; the state is unchanged on failure.
    pub fn try_next(&self, name: &str) -> Result<Value<T>> {
        let mut st = self.write();
        let following = match &st.increment {
            None => return Err(Error::StaticRegistry),
            Some(_) if st.by_name.contains_key(name) => {
                return Err(Error::DuplicateName(name.to_string()))
            }
            Some(inc) => inc.advance(&st.current),
        };
        let value = std::mem::replace(&mut st.current, following);
        // Odd policies (cyclic, bit flags that overflow to 0) revisit values;
        // the newest name wins the value and the old name is unlinked.
        if let Some(prev) = st.by_value.remove(&value.key()) {
            st.by_name.remove(&prev);
        }
        st.insert(value.clone(), name.to_string());

        #[cfg(feature = "tracing")]
        tracing::trace!(enum_name = name, value = %value, "generated enum value");

        Ok(Value::new(value, name))
    }

    /// Like [`Generator::try_next`], but a usage-contract violation panics.
    ///
    /// The panic is raised after the lock is released, so the registry stays
    /// usable.
    pub fn next(&self, name: &str) -> Value<T> {
        match self.try_next(name) {
            Ok(v) => v,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(enum_name = name, error = %e, "enum usage violation");
                panic!("{e}")
            }
        }
    }

    pub fn name_of(&self, value: &T) -> Option<String> {
        self.read().by_value.get(&value.key()).cloned()
    }

    pub fn value_of(&self, name: &str) -> Option<T> {
        self.read().by_name.get(name).cloned()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.read().by_value.contains_key(&value.key())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.read().by_name.contains_key(name)
    }

    /// Copy of all entries in insertion order (see the module docs on staleness).
    pub fn values(&self) -> Vec<Value<T>> {
        self.read().entries.clone()
    }

    /// Names of all entries in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.read()
            .entries
            .iter()
            .map(|v| v.name().to_string())
            .collect()
    }

    /// Registered values, in no particular order.
    pub fn valid_values(&self) -> Vec<T> {
        self.read().by_name.values().cloned().collect()
    }

    pub fn value_index(&self) -> HashMap<T::Key, String> {
        self.read().by_value.clone()
    }

    pub fn name_index(&self) -> HashMap<String, T> {
        self.read().by_name.clone()
    }

    /// Number of registered values.
    pub fn len(&self) -> usize {
        self.read().by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for mapped or deserialized registries.
    pub fn is_static(&self) -> bool {
        self.read().increment.is_none()
    }

    /// Resolve `s` as a registered name first, then as a value literal.
    pub fn parse(&self, s: &str) -> Result<Value<T>> {
        let st = self.read();
        if let Some(v) = st.by_name.get(s) {
            return Ok(Value::new(v.clone(), s));
        }
        let parsed = T::parse_text(s)?;
        match st.by_value.get(&parsed.key()) {
            Some(name) => Ok(Value::new(parsed, name.clone())),
            None => Err(Error::NoMatch(s.to_string())),
        }
    }

    /// Like [`Generator::parse`], but panics on failure. Meant for literals
    /// known to be registered.
    pub fn must_parse(&self, s: &str) -> Value<T> {
        self.parse(s).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn validate(&self, value: &T) -> Result<()> {
        if !self.contains(value) {
            return Err(Error::InvalidValue(value.to_text()));
        }
        Ok(())
    }

    pub fn validate_name(&self, name: &str) -> Result<()> {
        if !self.contains_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Stable digest of the serialized index (see [`enumgen_core::hash`]).
    pub fn fingerprint(&self) -> Result<Hash256> {
        fingerprint(self)
    }

    /// Move `name` to `new`, used by `Basic::with`.
    ///
    /// Fails if `new` belongs to a different name. Whatever value `name`
    /// currently holds is unlinked first; a fresh entry is appended and the
    /// stale one stays in `entries`.
    pub(crate) fn reassign(&self, name: &str, new: T) -> Result<()> {
        let mut st = self.write();
        if let Some(existing) = st.by_value.get(&new.key()) {
            if existing != name {
                return Err(Error::DuplicateValue {
                    value: new.to_text(),
                    existing: existing.clone(),
                });
            }
        }
        if let Some(old) = st.by_name.remove(name) {
            st.by_value.remove(&old.key());
        }
        st.insert(new.clone(), name.to_string());

        #[cfg(feature = "tracing")]
        tracing::debug!(enum_name = name, value = %new, "reassigned enum value");

        Ok(())
    }
}

impl<T: EnumScalar> Default for Generator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EnumScalar> NameResolver<T> for Generator<T> {
    fn resolve_name(&self, raw: &T) -> Option<String> {
        self.name_of(raw)
    }
}

impl<T: EnumScalar> fmt::Debug for Generator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.read();
        f.debug_struct("Generator")
            .field("current", &st.current)
            .field("static", &st.increment.is_none())
            .field("entries", &st.entries)
            .finish()
    }
}

impl Generator<String> {
    /// `"A", "B", ..., "Z", "AA", ...`
    pub fn alpha() -> Self {
        Self::numeric("A".to_string())
    }

    /// `prefix{start}, prefix{start+1}, ...`
    pub fn prefixed(prefix: impl Into<String>, start: i64) -> Self {
        let policy = Prefixed::new(prefix);
        Self::builder()
            .start(policy.format(start))
            .increment(policy)
            .build()
    }
}

impl Generator<i64> {
    /// `0, 1, ..., modulus - 1, 0, ...`; `modulus <= 0` always yields 0.
    pub fn cyclic(modulus: i64) -> Self {
        Self::builder().increment(Cyclic::new(modulus)).build()
    }
}

/// Options for a sequential generator.
pub struct GeneratorBuilder<T: EnumScalar> {
    start: T,
    increment: Box<dyn Incrementer<T>>,
}

impl<T: EnumScalar> GeneratorBuilder<T> {
    pub fn start(mut self, start: T) -> Self {
        self.start = start;
        self
    }

    pub fn increment(mut self, policy: impl Incrementer<T> + 'static) -> Self {
        self.increment = Box::new(policy);
        self
    }

    /// Closure form of [`GeneratorBuilder::increment`].
    pub fn increment_with<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.increment(f)
    }

    pub fn build(self) -> Generator<T> {
        Generator::from_state(State::sequential(self.start, self.increment))
    }
}
