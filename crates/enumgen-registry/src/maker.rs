//! `Maker<E>`: a static enum built from an ordered list of field names.
//!
//! Field `i` gets value `i`. The usual entry point is [`enum_struct!`], which
//! declares a plain struct holding one integer per member and fills it in.
//!
//! [`enum_struct!`]: crate::enum_struct

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use enumgen_core::{EnumScalar, Error, Result, Value};

use crate::generator::Generator;

/// Integer scalars a `Maker` can number fields with.
pub trait IntegerScalar: EnumScalar {}

macro_rules! integer_scalar {
    ($($t:ty),*) => {
        $(impl IntegerScalar for $t {})*
    };
}

integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

pub struct Maker<E: IntegerScalar> {
    inner: Generator<E>,
}

impl<E: IntegerScalar> Maker<E> {
    /// Number `fields` from 0 in order.
    ///
    /// Fails with `Capacity` when there are `2^(bits-1)` fields or more, and
    /// with `DuplicateName` on a repeated field.
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        if fields.len() as u128 >= 1u128 << (E::BITS - 1) {
            return Err(Error::Capacity {
                fields: fields.len(),
                target: E::TYPE_NAME,
            });
        }
        let pairs = fields
            .iter()
            .enumerate()
            .map(|(i, f)| -> Result<(String, E)> {
                Ok((f.as_ref().to_string(), E::from_i64(i as i64)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            inner: Generator::mapped(pairs)?,
        })
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<E> {
        self.inner.value_of(name)
    }

    /// Field name holding `value`.
    pub fn name(&self, value: &E) -> Option<String> {
        self.inner.name_of(value)
    }

    pub fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    pub fn entries(&self) -> Vec<Value<E>> {
        self.inner.values()
    }

    pub fn contains(&self, value: &E) -> bool {
        self.inner.contains(value)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.inner.contains_name(name)
    }

    pub fn value_index(&self) -> HashMap<E::Key, String> {
        self.inner.value_index()
    }

    pub fn name_index(&self) -> HashMap<String, E> {
        self.inner.name_index()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Underlying static registry.
    pub fn generator(&self) -> &Generator<E> {
        &self.inner
    }
}

impl<E: IntegerScalar> std::fmt::Debug for Maker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Maker").field("fields", &self.names()).finish()
    }
}

/// Same object form as a generator: `{"0":"Red","1":"Blue"}`.
impl<E: IntegerScalar> Serialize for Maker<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

/// Declare a struct of enum members numbered in declaration order.
///
/// ```
/// enumgen_registry::enum_struct! {
///     pub struct Colors: u8 { Red, Blue, Green }
/// }
///
/// let (colors, maker) = Colors::make().unwrap();
/// assert_eq!(colors.Blue, 1);
/// assert_eq!(maker.name(&2).as_deref(), Some("Green"));
/// assert_eq!(maker.get("Red"), Some(0));
/// ```
#[macro_export]
macro_rules! enum_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $t:ty { $($field:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name {
            $(pub $field: $t,)*
        }

        impl $name {
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            pub fn make() -> $crate::Result<($name, $crate::Maker<$t>)> {
                let maker = $crate::Maker::<$t>::new(Self::FIELDS)?;
                let this = $name {
                    $($field: maker.get(stringify!($field)).ok_or_else(|| {
                        $crate::Error::InvalidName(stringify!($field).to_string())
                    })?,)*
                };
                Ok((this, maker))
            }
        }
    };
}
