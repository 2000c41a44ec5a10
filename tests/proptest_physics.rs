//! Property tests for the force ledger and body-body collisions.
//!
//! Random operation sequences are applied to a ledger alongside a plain map
//! model; random pairs of bodies are collided and checked for momentum
//! conservation.

use std::collections::HashMap;

use forcebox::sim::{Body, Collision, EntityId, ForceManager, ForceName, VecExt};
use glam::{IVec2, Vec2};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum LedgerOp {
    Add(EntityId, ForceName, Vec2),
    Remove(EntityId, ForceName),
}

fn entity_strategy() -> impl Strategy<Value = EntityId> {
    prop_oneof![
        (0..4u32).prop_map(EntityId::Body),
        (0..4u32).prop_map(EntityId::Collider),
        (0..2u32).prop_map(EntityId::Stream),
    ]
}

fn name_strategy() -> impl Strategy<Value = ForceName> {
    prop_oneof![
        Just(ForceName::Weight),
        Just(ForceName::Drive),
        Just(ForceName::Push),
        Just(ForceName::Reaction),
        Just(ForceName::Wind),
        Just(ForceName::FrictionX),
        Just(ForceName::Custom("Magnet".to_owned())),
    ]
}

fn vector_strategy() -> impl Strategy<Value = Vec2> {
    prop_oneof![
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Vec2::new(x, y)),
        Just(Vec2::ZERO),
        (-0.04f32..0.04).prop_map(|x| Vec2::new(x, -x)),
    ]
}

fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        3 => (entity_strategy(), name_strategy(), vector_strategy())
            .prop_map(|(s, n, v)| LedgerOp::Add(s, n, v)),
        1 => (entity_strategy(), name_strategy()).prop_map(|(s, n)| LedgerOp::Remove(s, n)),
    ]
}

fn body_strategy() -> impl Strategy<Value = (f32, Vec2)> {
    (
        0.1f32..200.0,
        (-20.0f32..20.0, -20.0f32..20.0).prop_map(|(x, y)| Vec2::new(x, y)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    /// The ledger behaves like a map keyed by (source, name) that never
    /// stores negligible vectors.
    #[test]
    fn ledger_matches_map_model(ops in prop::collection::vec(ledger_op_strategy(), 1..60)) {
        let mut ledger = ForceManager::new();
        let mut model: HashMap<(EntityId, ForceName), Vec2> = HashMap::new();

        for op in ops {
            match op {
                LedgerOp::Add(source, name, vector) => {
                    ledger.add(source, name.clone(), vector);
                    if vector.is_negligible() {
                        model.remove(&(source, name));
                    } else {
                        model.insert((source, name), vector);
                    }
                }
                LedgerOp::Remove(source, name) => {
                    ledger.remove(source, &name);
                    model.remove(&(source, name));
                }
            }
        }

        prop_assert_eq!(ledger.len(), model.len());
        let mut keys = Vec::new();
        for (source, name, vector) in ledger.iter() {
            prop_assert_eq!(model.get(&(source, name.clone())), Some(&vector));
            keys.push((source, name.clone()));
        }
        let before = keys.len();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }

    /// Elastic resolution keeps total momentum and inverts relative velocity.
    #[test]
    fn collision_conserves_momentum(a in body_strategy(), b in body_strategy()) {
        let mut bodies = vec![
            Body::new(Vec2::new(100.0, 100.0), IVec2::new(20, 20), a.0).with_velocity(a.1),
            Body::new(Vec2::new(110.0, 100.0), IVec2::new(20, 20), b.0).with_velocity(b.1),
        ];
        bodies[1].id = 1;

        let total = |bodies: &[Body]| bodies.iter().map(|b| b.velocity() * b.mass()).sum::<Vec2>();
        let before = total(&bodies);
        let rel_before = bodies[1].velocity() - bodies[0].velocity();

        let mut collision = Collision::new(0, 1);
        collision.resolve(&mut bodies);

        let after = total(&bodies);
        let rel_after = bodies[1].velocity() - bodies[0].velocity();
        let scale = 1.0 + before.abs().max_element();
        prop_assert!((before - after).length() / scale < 1e-3);
        prop_assert!((rel_before + rel_after).length() < 1e-2);
        prop_assert!(collision.resolved);
    }
}
