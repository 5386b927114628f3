use proptest::prelude::*;

use tessera_core::Knowledge;

const NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

#[derive(Debug, Clone)]
enum Op {
    Require(usize, usize),
    Forbid(usize, usize),
    Tier(usize, usize),
    ForbidWithin(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..5_usize, 0..5_usize).prop_map(|(a, b)| Op::Require(a, b)),
        (0..5_usize, 0..5_usize).prop_map(|(a, b)| Op::Forbid(a, b)),
        (0..3_usize, 0..5_usize).prop_map(|(t, v)| Op::Tier(t, v)),
        (0..3_usize).prop_map(Op::ForbidWithin),
    ]
}

proptest! {
    /// No sequence of accepted or rejected mutations leaves a pair both required and forbidden.
    #[test]
    fn required_and_forbidden_stay_disjoint(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut k = Knowledge::new();
        for op in ops {
            let _ = match op {
                Op::Require(a, b) => k.set_required(NAMES[a], NAMES[b]),
                Op::Forbid(a, b) => k.set_forbidden(NAMES[a], NAMES[b]),
                Op::Tier(t, v) => k.set_tier(t, NAMES[v]),
                Op::ForbidWithin(t) => k.set_tier_forbidden_within(t, true),
            };
            for from in NAMES {
                for to in NAMES {
                    prop_assert!(
                        !(k.is_required(from, to) && k.is_forbidden(from, to)),
                        "{from} --> {to} both required and forbidden"
                    );
                }
            }
            prop_assert!(k.validate().is_ok());
        }
    }
}

#[test]
fn default_layout_flag_round_trips() {
    let mut k = Knowledge::new();
    assert!(!k.is_default_to_knowledge_layout());
    k.set_default_to_knowledge_layout(true);
    assert!(k.is_default_to_knowledge_layout());
    assert!(k.is_empty());
}

#[test]
fn tiers_list_in_order() {
    let mut k = Knowledge::new();
    k.set_tier(1, "Late").unwrap();
    k.set_tier(0, "Early").unwrap();
    assert_eq!(
        k.tiers(),
        vec![vec!["Early".to_string()], vec!["Late".to_string()]]
    );
    k.remove_from_tiers("Late");
    assert_eq!(k.tier_of("Late"), None);
}
