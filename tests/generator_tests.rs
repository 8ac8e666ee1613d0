//! Generator behavior across policies, threads, and the JSON index codec.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use enumgen_core::config::GeneratorConfig;
use enumgen_core::Error;
use enumgen_registry::{Generator, Registry};

#[test]
fn test_concurrent_next_assigns_unique_values() {
    let g: Registry<i64> = Arc::new(Generator::new());
    let handles: Vec<_> = (0..100)
        .map(|i| {
            let g = Arc::clone(&g);
            thread::spawn(move || g.next(&format!("Value{i}")).get())
        })
        .collect();

    let values: HashSet<i64> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();

    assert_eq!(values.len(), 100);
    assert_eq!(values, (0..100).collect::<HashSet<i64>>());
    assert_eq!(g.len(), 100);
    for v in 0..100 {
        let name = g.name_of(&v).expect("every value is named");
        assert_eq!(g.value_of(&name), Some(v));
    }
}

#[test]
fn test_concurrent_readers_and_writers() {
    let g: Registry<u32> = Arc::new(Generator::new());
    let writers: Vec<_> = (0..8)
        .map(|w| {
            let g = Arc::clone(&g);
            thread::spawn(move || {
                for i in 0..25 {
                    g.next(&format!("W{w}-{i}"));
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let g = Arc::clone(&g);
            thread::spawn(move || {
                for _ in 0..50 {
                    let idx = g.name_index();
                    for (name, v) in &idx {
                        assert!(name.starts_with('W'));
                        assert!(*v < 200);
                    }
                }
            })
        })
        .collect();
    for h in writers.into_iter().chain(readers) {
        h.join().expect("thread panicked");
    }
    assert_eq!(g.len(), 200);
    assert_eq!(g.values().len(), 200);
}

#[test]
fn test_bit_flag_sequence() {
    let g = Generator::bit_flag(1u32);
    let got: Vec<u32> = ["Read", "Write", "Exec", "Admin"]
        .iter()
        .map(|n| g.next(n).get())
        .collect();
    assert_eq!(got, vec![1, 2, 4, 8]);
    assert_eq!(g.name_of(&4).as_deref(), Some("Exec"));
}

#[test]
fn test_cyclic_wraps() {
    let g = Generator::cyclic(3);
    let got: Vec<i64> = ["A", "B", "C", "D"].iter().map(|n| g.next(n).get()).collect();
    assert_eq!(got, vec![0, 1, 2, 0]);

    let g = Generator::cyclic(0);
    assert_eq!(g.next("A").get(), 0);
    assert_eq!(g.next("B").get(), 0);
    assert_eq!(g.name_of(&0).as_deref(), Some("B"));
}

#[test]
fn test_alpha_and_prefixed_text() {
    let g = Generator::alpha();
    assert_eq!(g.next("First").get(), "A");
    assert_eq!(g.next("Second").get(), "B");

    let g = Generator::numeric("Y".to_string());
    let got: Vec<String> = ["P", "Q", "R"].iter().map(|n| g.next(n).get()).collect();
    assert_eq!(got, vec!["Y", "Z", "AA"]);

    let g = Generator::prefixed("dog", 1);
    assert_eq!(g.next("Rex").get(), "dog1");
    assert_eq!(g.next("Fido").get(), "dog2");
    assert_eq!(g.parse("dog2").unwrap().name(), "Fido");
}

#[test]
fn test_float_generator() {
    let g = Generator::numeric(0.5f64);
    g.next("Half");
    g.next("OneAndHalf");
    assert_eq!(g.parse("1.5").unwrap().name(), "OneAndHalf");
    assert_eq!(g.name_of(&0.5).as_deref(), Some("Half"));
    assert!(!g.contains(&2.5));
}

#[test]
fn test_parse_returns_named_value() {
    let g = Generator::mapped([("Small", 1i32), ("Large", 100)]).unwrap();
    let v = g.parse("Large").unwrap();
    assert_eq!((v.get(), v.name()), (100, "Large"));
    assert_eq!(g.must_parse("1").name(), "Small");
    assert_eq!(g.parse("50"), Err(Error::NoMatch("50".into())));
}

#[test]
fn test_from_config() {
    let cfg =
        GeneratorConfig::from_json(r#"{"start":"5","policy":{"kind":"cyclic","modulus":7}}"#)
            .unwrap();
    let g = Generator::<i32>::from_config(&cfg).unwrap();
    assert_eq!(g.next("A").get(), 5);
    assert_eq!(g.next("B").get(), 6);
    assert_eq!(g.next("C").get(), 0);

    let cfg = GeneratorConfig::from_json(
        r#"{"start":"10","policy":{"kind":"prefixed","prefix":"item-"}}"#,
    )
    .unwrap();
    let g = Generator::<String>::from_config(&cfg).unwrap();
    assert_eq!(g.next("X").get(), "item-10");
    assert_eq!(g.next("Y").get(), "item-11");
}

#[test]
fn test_from_config_rejects_policy_for_kind() {
    let cyclic = GeneratorConfig::from_json(r#"{"policy":{"kind":"cyclic","modulus":3}}"#).unwrap();
    assert!(matches!(
        Generator::<String>::from_config(&cyclic),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Generator::<f64>::from_config(&cyclic),
        Err(Error::Config(_))
    ));

    let prefixed =
        GeneratorConfig::from_json(r#"{"policy":{"kind":"prefixed","prefix":"p"}}"#).unwrap();
    assert!(matches!(
        Generator::<i64>::from_config(&prefixed),
        Err(Error::Config(_))
    ));

    let bad_start = GeneratorConfig::from_json(r#"{"start":"many"}"#).unwrap();
    assert!(matches!(
        Generator::<u8>::from_config(&bad_start),
        Err(Error::Parse { .. })
    ));
}

#[test]
fn test_json_round_trip_is_static() {
    let g = Generator::numeric(1i32);
    for name in ["One", "Two", "Three"] {
        g.next(name);
    }
    let json = g.to_json().unwrap();
    assert_eq!(json, r#"{"1":"One","2":"Two","3":"Three"}"#);

    let back: Generator<i32> = serde_json::from_str(&json).unwrap();
    assert!(back.is_static());
    assert_eq!(back.value_index(), g.value_index());
    assert_eq!(back.name_index(), g.name_index());
    assert_eq!(back.fingerprint().unwrap(), g.fingerprint().unwrap());
    assert_eq!(back.try_next("Four"), Err(Error::StaticRegistry));
}

#[test]
#[should_panic(expected = "static registry")]
fn test_next_on_decoded_registry_panics() {
    let g = Generator::<u8>::from_json(br#"{"1":"One"}"#).unwrap();
    g.next("Two");
}

#[test]
fn test_replace_is_seen_by_shared_handles() {
    let g: Registry<i64> = Arc::new(Generator::new());
    g.next("Old");
    let other = Arc::clone(&g);

    g.replace_from_json(br#"{"10":"Ten","20":"Twenty"}"#).unwrap();
    assert_eq!(other.name_of(&10).as_deref(), Some("Ten"));
    assert!(!other.contains_name("Old"));
    assert!(other.is_static());

    // A rejected replacement keeps the previous state.
    assert!(matches!(
        g.replace_from_json(br#"{"30":"Ten","40":"Ten"}"#),
        Err(Error::Decode(_))
    ));
    assert_eq!(other.names(), vec!["Ten", "Twenty"]);
}

#[test]
fn test_fingerprint_tracks_content() {
    let a = Generator::numeric(0u16);
    let b = Generator::numeric(0u16);
    a.next("X");
    b.next("X");
    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    b.next("Y");
    assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
}
