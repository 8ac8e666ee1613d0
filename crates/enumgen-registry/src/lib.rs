#![forbid(unsafe_code)]
//! enumgen-registry: shared value <-> name registries.
//!
//! - [`Generator`]: generic, thread-safe registry with pluggable increment
//!   policies, or a static one built from fixed pairs / decoded JSON.
//! - [`Basic`]: i64 members that share one registry by handle and can be
//!   re-valued after creation.
//! - [`Maker`] and [`enum_struct!`]: static enums numbered by field order.

pub mod basic;
pub mod codec;
pub mod generator;
pub mod maker;
pub mod policy;

pub use basic::{Basic, BasicSeed};
pub use generator::{Generator, GeneratorBuilder, Registry};
pub use maker::{IntegerScalar, Maker};
pub use policy::{BitFlag, Cyclic, Incrementer, Prefixed, Step};

pub use enumgen_core::{Entry, EnumScalar, Error, NameResolver, PersistedScalar, Result, Value};
