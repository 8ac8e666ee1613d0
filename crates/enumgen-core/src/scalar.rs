//! The closed set of raw scalar kinds an enum can be built on.
//!
//! Every raw type carries an `Eq + Hash` key so registries can index it.
//! Integers and text key on themselves; floats key on a normalized bit
//! pattern (`FloatKey`).

use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::{Error, Result};
use crate::types::PersistedScalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Signed,
    Unsigned,
    Float,
    Text,
}

impl ScalarKind {
    pub fn is_integer(self) -> bool {
        matches!(self, ScalarKind::Signed | ScalarKind::Unsigned)
    }
}

/// Hash/equality key for floating point raws.
///
/// The value is widened to f64; `-0.0` folds into `0.0` and every NaN folds
/// into one canonical NaN, so the key is a lawful `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(v: f64) -> Self {
        let v = if v == 0.0 {
            0.0
        } else if v.is_nan() {
            f64::NAN
        } else {
            v
        };
        Self(v.to_bits())
    }

    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// A raw type usable as the underlying value of an enum.
///
/// Implemented for all fixed-width integers, `f32`/`f64`, and `String`.
/// Downstream crates should not implement it for other types: the persisted
/// protocol and the textual codec only know these kinds.
pub trait EnumScalar:
    Clone + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Index key; equality and hashing of enum values are defined by it.
    type Key: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static;

    const KIND: ScalarKind;
    const TYPE_NAME: &'static str;
    /// Bit width for numeric kinds, 0 for text.
    const BITS: u32;

    fn key(&self) -> Self::Key;

    fn zero() -> Self;

    /// Default increment: +1 for numbers, alphabetic odometer for text.
    fn step(&self) -> Self;

    /// Bit-flag increment. Only integers shift; other kinds return themselves.
    fn shift_left(&self) -> Self {
        self.clone()
    }

    /// Exact i64 view, integers only.
    fn as_i64(&self) -> Option<i64> {
        None
    }

    /// Range-checked conversion from a wire-level signed integer.
    fn from_i64(n: i64) -> Result<Self>;

    /// Range-checked conversion from a wire-level float.
    fn from_f64(n: f64) -> Result<Self>;

    fn parse_text(s: &str) -> Result<Self>;

    /// Canonical textual form, used as the key of the serialized index.
    fn to_text(&self) -> String {
        self.to_string()
    }

    /// False for infinite or NaN floats, which have no JSON number form.
    fn is_finite(&self) -> bool {
        true
    }

    fn to_persisted(&self) -> PersistedScalar;
}

macro_rules! int_scalar {
    ($t:ty, $kind:expr, $parse:ident) => {
        impl EnumScalar for $t {
            type Key = $t;

            const KIND: ScalarKind = $kind;
            const TYPE_NAME: &'static str = stringify!($t);
            const BITS: u32 = <$t>::BITS;

            fn key(&self) -> Self::Key {
                *self
            }

            fn zero() -> Self {
                0
            }

            fn step(&self) -> Self {
                self.wrapping_add(1)
            }

            fn shift_left(&self) -> Self {
                self.wrapping_shl(1)
            }

            fn as_i64(&self) -> Option<i64> {
                i64::try_from(*self).ok()
            }

            fn from_i64(n: i64) -> Result<Self> {
                <$t>::try_from(n).map_err(|_| Error::OutOfRange {
                    value: n.to_string(),
                    target: Self::TYPE_NAME,
                })
            }

            fn from_f64(n: f64) -> Result<Self> {
                // `as` saturates, so the round trip alone misses values one
                // past MAX at 64 bits; the bound check covers that.
                let converted = n as $t;
                let in_bounds = n >= <$t>::MIN as f64 && n < <$t>::MAX as f64 + 1.0;
                if !in_bounds || converted as f64 != n {
                    return Err(Error::OutOfRange {
                        value: n.to_string(),
                        target: Self::TYPE_NAME,
                    });
                }
                Ok(converted)
            }

            fn parse_text(s: &str) -> Result<Self> {
                convert::$parse::<Self>(s)
            }

            fn to_persisted(&self) -> PersistedScalar {
                // Unsigned values above i64::MAX wrap here.
                PersistedScalar::I64(*self as i64)
            }
        }
    };
}

int_scalar!(i8, ScalarKind::Signed, parse_signed);
int_scalar!(i16, ScalarKind::Signed, parse_signed);
int_scalar!(i32, ScalarKind::Signed, parse_signed);
int_scalar!(i64, ScalarKind::Signed, parse_signed);
int_scalar!(isize, ScalarKind::Signed, parse_signed);
int_scalar!(u8, ScalarKind::Unsigned, parse_unsigned);
int_scalar!(u16, ScalarKind::Unsigned, parse_unsigned);
int_scalar!(u32, ScalarKind::Unsigned, parse_unsigned);
int_scalar!(u64, ScalarKind::Unsigned, parse_unsigned);
int_scalar!(usize, ScalarKind::Unsigned, parse_unsigned);

macro_rules! float_scalar {
    ($t:ty) => {
        impl EnumScalar for $t {
            type Key = FloatKey;

            const KIND: ScalarKind = ScalarKind::Float;
            const TYPE_NAME: &'static str = stringify!($t);
            const BITS: u32 = std::mem::size_of::<$t>() as u32 * 8;

            fn key(&self) -> Self::Key {
                FloatKey::new(*self as f64)
            }

            fn zero() -> Self {
                0.0
            }

            fn step(&self) -> Self {
                self + 1.0
            }

            fn from_i64(n: i64) -> Result<Self> {
                Ok(n as $t)
            }

            fn from_f64(n: f64) -> Result<Self> {
                // Precision loss is expected here, no round-trip check.
                Ok(n as $t)
            }

            fn parse_text(s: &str) -> Result<Self> {
                convert::parse_float::<Self>(s)
            }

            fn is_finite(&self) -> bool {
                <$t>::is_finite(*self)
            }

            fn to_persisted(&self) -> PersistedScalar {
                PersistedScalar::F64(*self as f64)
            }
        }
    };
}

float_scalar!(f32);
float_scalar!(f64);

impl EnumScalar for String {
    type Key = String;

    const KIND: ScalarKind = ScalarKind::Text;
    const TYPE_NAME: &'static str = "String";
    const BITS: u32 = 0;

    fn key(&self) -> Self::Key {
        self.clone()
    }

    fn zero() -> Self {
        String::new()
    }

    fn step(&self) -> Self {
        alpha_next(self)
    }

    fn from_i64(n: i64) -> Result<Self> {
        Ok(n.to_string())
    }

    fn from_f64(n: f64) -> Result<Self> {
        Ok(n.to_string())
    }

    fn parse_text(s: &str) -> Result<Self> {
        Ok(s.to_string())
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn to_persisted(&self) -> PersistedScalar {
        PersistedScalar::Str(self.clone())
    }
}

/// Base-26 uppercase odometer: `"A" -> "B"`, `"Z" -> "AA"`, `"AZ" -> "BA"`.
///
/// Any position at or above `'Z'` is treated as overflowed and reset to `'A'`
/// with a carry, so lowercase or non-letter input is not preserved.
pub fn alpha_next(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "A".to_string();
    }
    for i in (0..chars.len()).rev() {
        if chars[i] < 'Z' {
            // Below 'Z' the successor is always a valid char.
            chars[i] = char::from_u32(chars[i] as u32 + 1).unwrap_or('A');
            return chars.into_iter().collect();
        }
        chars[i] = 'A';
    }
    let mut out = String::with_capacity(chars.len() + 1);
    out.push('A');
    out.extend(chars);
    out
}
