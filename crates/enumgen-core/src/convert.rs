//! Safe numeric narrowing/widening and text parsing into raw scalar types.
//!
//! Both entry points fail with a recoverable `Error` on malformed or
//! out-of-range input; nothing here panics.

use crate::error::{Error, Result};
use crate::scalar::EnumScalar;

/// A wire-level number as it arrives from JSON or a persisted record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::Int(v)
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Float(v)
    }
}

/// Convert a wire-level number into `T`, failing if it is not representable.
///
/// Integer targets require the value to survive the round trip exactly
/// (`3.5 -> i32` fails, `300 -> u8` fails, `-1 -> u64` fails). Float targets
/// accept precision loss.
pub fn safe_cast<T: EnumScalar>(n: impl Into<Numeric>) -> Result<T> {
    match n.into() {
        Numeric::Int(v) => T::from_i64(v),
        Numeric::Float(v) => T::from_f64(v),
    }
}

/// Parse text into `T`.
///
/// Text passes through unchanged; signed integers parse as base-10 i64 and
/// then narrow via [`safe_cast`]; unsigned integers parse as base-10 u64 and
/// are checked against the bit width of `T`; floats parse as f64.
pub fn parse_text<T: EnumScalar>(s: &str) -> Result<T> {
    T::parse_text(s)
}

pub(crate) fn parse_signed<T: EnumScalar>(s: &str) -> Result<T> {
    let v: i64 = s.parse().map_err(|e| parse_error::<T>(s, e))?;
    safe_cast(v)
}

pub(crate) fn parse_unsigned<T>(s: &str) -> Result<T>
where
    T: EnumScalar + TryFrom<u64>,
{
    let v: u64 = s.parse().map_err(|e| parse_error::<T>(s, e))?;
    if T::BITS < 64 && v > (1u64 << T::BITS) - 1 {
        return Err(out_of_range::<T>(v));
    }
    T::try_from(v).map_err(|_| out_of_range::<T>(v))
}

pub(crate) fn parse_float<T: EnumScalar>(s: &str) -> Result<T> {
    let v: f64 = s.parse().map_err(|e| parse_error::<T>(s, e))?;
    safe_cast(v)
}

fn parse_error<T: EnumScalar>(input: &str, reason: impl std::fmt::Display) -> Error {
    Error::Parse {
        input: input.to_string(),
        target: T::TYPE_NAME,
        reason: reason.to_string(),
    }
}

fn out_of_range<T: EnumScalar>(v: u64) -> Error {
    Error::OutOfRange {
        value: v.to_string(),
        target: T::TYPE_NAME,
    }
}
