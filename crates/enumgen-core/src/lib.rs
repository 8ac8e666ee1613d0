#![forbid(unsafe_code)]
//! enumgen-core: raw scalar kinds, enum values, and their external encodings.
//!
//! Everything here is a leaf: no registry, no locking, no I/O. A `Value<T>`
//! is a (raw, name) pair; registries live in `enumgen-registry`.
//!
//! Encodings:
//! - textual: the raw scalar as JSON (`1`, `2.5`, `"red"`), never the name;
//! - persisted: one of i64 / f64 / text, parsed back from those plus bytes
//!   and an explicit `Null`.

pub mod config;
pub mod convert;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod scalar;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use scalar::EnumScalar;
pub use types::PersistedScalar;
pub use value::{Entry, NameResolver, Value};
