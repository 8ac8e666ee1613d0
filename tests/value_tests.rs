//! Values and raw conversions as seen from outside the crates.

use enumgen_core::convert::{parse_text, safe_cast};
use enumgen_core::{Entry, Error, PersistedScalar, Value};
use enumgen_registry::Generator;

#[test]
fn test_safe_cast_table() {
    assert_eq!(safe_cast::<i8>(127i64), Ok(127));
    assert!(matches!(safe_cast::<i8>(128i64), Err(Error::OutOfRange { .. })));
    assert!(safe_cast::<u64>(-1i64).is_err());
    assert_eq!(safe_cast::<u64>(i64::MAX), Ok(i64::MAX as u64));
    assert_eq!(safe_cast::<i32>(3.0f64), Ok(3));
    assert!(safe_cast::<i32>(3.5f64).is_err());
    assert!(safe_cast::<u8>(300.0f64).is_err());
    assert_eq!(safe_cast::<f32>(0.1f64), Ok(0.1f32));
    assert_eq!(safe_cast::<f64>(7i64), Ok(7.0));
    assert_eq!(safe_cast::<String>(12i64), Ok("12".to_string()));
}

#[test]
fn test_parse_text_table() {
    assert_eq!(parse_text::<i8>("127"), Ok(127));
    assert!(parse_text::<i8>("128").is_err());
    assert_eq!(parse_text::<i16>("-5"), Ok(-5));
    assert_eq!(parse_text::<u64>("18446744073709551615"), Ok(u64::MAX));
    assert!(parse_text::<u8>("256").is_err());
    assert!(parse_text::<u8>("-1").is_err());
    assert_eq!(parse_text::<f64>("2.5"), Ok(2.5));
    assert_eq!(parse_text::<String>("as is"), Ok("as is".to_string()));
    assert!(matches!(
        parse_text::<i32>("abc"),
        Err(Error::Parse { target: "i32", .. })
    ));
}

#[test]
fn test_text_codec_skips_name() {
    let v = Value::new("red".to_string(), "Red");
    assert_eq!(v.encode_text().unwrap(), br#""red""#);

    let mut d = Value::<String>::default();
    d.decode_text(br#""blue""#).unwrap();
    assert_eq!(d.raw(), "blue");
    assert_eq!(d.name(), "");
}

#[test]
fn test_decode_resolves_name_through_registry() {
    let g = Generator::numeric(1i32);
    g.next("Small");
    g.next("Large");

    let mut v = Value::<i32>::default();
    v.decode_text_with(b"2", &g).unwrap();
    assert_eq!(v.name(), "Large");

    v.populate_from_persisted_with(&PersistedScalar::Str("1".into()), &g)
        .unwrap();
    assert_eq!((v.get(), v.name()), (1, "Small"));

    v.populate_from_persisted_with(&PersistedScalar::I64(9), &g)
        .unwrap();
    assert_eq!((v.get(), v.name()), (9, ""));
}

#[test]
fn test_persisted_per_kind() {
    assert_eq!(
        Value::new(2.5f32, "x").to_persisted().unwrap(),
        PersistedScalar::F64(2.5)
    );
    assert_eq!(
        Value::new("t".to_string(), "x").to_persisted().unwrap(),
        PersistedScalar::Str("t".into())
    );
    assert_eq!(
        Value::new(-3i8, "x").to_persisted().unwrap(),
        PersistedScalar::I64(-3)
    );

    let mut text = Value::<String>::default();
    text.populate_from_persisted(&PersistedScalar::I64(5)).unwrap();
    assert_eq!(text.get(), "5");

    let mut int = Value::<i64>::default();
    assert!(int
        .populate_from_persisted(&PersistedScalar::Bin(vec![0xff, 0xfe]))
        .is_err());
}

#[test]
fn test_values_hash_by_raw() {
    use std::collections::HashSet;

    let set: HashSet<Value<f64>> = [
        Value::new(0.0, "Zero"),
        Value::new(-0.0, "NegZero"),
        Value::new(1.0, "One"),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 2);
}
