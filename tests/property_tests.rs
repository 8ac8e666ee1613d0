//! Randomized checks of the registry invariants.

use proptest::prelude::*;

use enumgen_registry::{Basic, Generator};

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    With(u8, i64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::Add),
        ((0u8..12), (-5i64..20)).prop_map(|(n, v)| Op::With(n, v)),
    ]
}

fn assert_inverse(root: &Basic) -> Result<(), TestCaseError> {
    let meta = root.registry().expect("bound");
    let by_value = meta.value_index();
    let by_name = meta.name_index();
    prop_assert_eq!(by_value.len(), by_name.len());
    for (name, value) in &by_name {
        prop_assert_eq!(by_value.get(value), Some(name));
    }
    Ok(())
}

proptest! {
    #[test]
    fn indexes_stay_inverse(ops in prop::collection::vec(arb_op(), 1..60)) {
        let root = Basic::new_registry();
        let mut members: Vec<Basic> = Vec::new();
        for op in ops {
            match op {
                Op::Add(n) => {
                    if let Ok(b) = root.try_add(&format!("N{n}")) {
                        members.push(b);
                    }
                }
                Op::With(i, v) => {
                    // Members may be stale; the registry must stay consistent anyway.
                    if let Some(b) = members.get(i as usize % members.len().max(1)) {
                        if let Ok(moved) = b.try_with(v) {
                            members.push(moved);
                        }
                    }
                }
            }
            assert_inverse(&root)?;
        }
    }

    #[test]
    fn json_round_trip_preserves_indexes(start in -1000i64..1000, count in 0usize..40) {
        let g = Generator::numeric(start);
        for i in 0..count {
            g.next(&format!("E{i}"));
        }
        let back: Generator<i64> = serde_json::from_str(&g.to_json().unwrap()).unwrap();
        prop_assert_eq!(back.value_index(), g.value_index());
        prop_assert_eq!(back.name_index(), g.name_index());
        prop_assert_eq!(back.names(), g.names());
    }
}
