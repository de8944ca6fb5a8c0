#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can
// exercise the map against small capacities without feature gates.

use crate::chain_hash_map::ChainHashMap;
use crate::hash::ByteHasher;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{HashMap, VecDeque};

// Pool-indexed operations to improve shrinking: indices shrink to
// earlier keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    InsertOwned(usize, i32),
    Get(usize),
    GetAll(usize),
    Contains(String),
    RemoveAll(usize),
    RemoveFirst(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=8, proptest::collection::vec("[a-z]{0,5}", 1..=8)).prop_flat_map(
        |(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::InsertOwned(i, v)),
                idx.clone().prop_map(OpI::Get),
                idx.clone().prop_map(OpI::GetAll),
                prop_oneof![
                    contains_pool.prop_map(|s: String| s),
                    "[a-z]{0,5}".prop_map(|s| s)
                ]
                .prop_map(OpI::Contains),
                idx.clone().prop_map(OpI::RemoveAll),
                idx.clone().prop_map(OpI::RemoveFirst),
                (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

// State-machine equivalence against a multimap model. Invariants
// exercised across random operation sequences:
// - get resolves to the oldest duplicate; get_all yields duplicates in
//   insertion order.
// - remove returns every duplicate oldest-first and leaves the key
//   absent; remove_first pops exactly the oldest.
// - insert and insert_owned are observationally identical.
// - iter yields each live entry exactly once (as a multiset).
// - len/is_empty parity with the model after every operation.
fn check_against_model<S: ByteHasher>(
    mut sut: ChainHashMap<i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, VecDeque<i32>> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].as_bytes();
                sut.insert(k, v);
                model.entry(k.to_vec()).or_default().push_back(v);
            }
            OpI::InsertOwned(i, v) => {
                let k = pool[i].as_bytes();
                sut.insert_owned(k.to_vec(), v);
                model.entry(k.to_vec()).or_default().push_back(v);
            }
            OpI::Get(i) => {
                let k = pool[i].as_bytes();
                let expected = model.get(k).and_then(|q| q.front());
                prop_assert_eq!(sut.get(k), expected);
            }
            OpI::GetAll(i) => {
                let k = pool[i].as_bytes();
                let got: Vec<i32> = sut.get_all(k).copied().collect();
                let expected: Vec<i32> = model
                    .get(k)
                    .map(|q| q.iter().copied().collect())
                    .unwrap_or_default();
                prop_assert_eq!(got, expected);
            }
            OpI::Contains(s) => {
                let k = s.as_bytes();
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::RemoveAll(i) => {
                let k = pool[i].as_bytes();
                let got = sut.remove(k);
                let expected: Vec<i32> = model
                    .remove(k)
                    .map(|q| q.into_iter().collect())
                    .unwrap_or_default();
                prop_assert_eq!(got, expected);
                prop_assert!(!sut.contains_key(k));
            }
            OpI::RemoveFirst(i) => {
                let k = pool[i].as_bytes();
                let got = sut.remove_first(k);
                let expected = model.get_mut(k).and_then(|q| q.pop_front());
                if model.get(k).is_some_and(|q| q.is_empty()) {
                    model.remove(k);
                }
                prop_assert_eq!(got, expected);
            }
            OpI::Mutate(i, d) => {
                let k = pool[i].as_bytes();
                match (sut.get_mut(k), model.get_mut(k).and_then(|q| q.front_mut())) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (sv, mv) => prop_assert!(
                        false,
                        "presence mismatch: sut {:?} model {:?}",
                        sv,
                        mv
                    ),
                }
            }
            OpI::Iterate => {
                let mut got: Vec<(Vec<u8>, i32)> =
                    sut.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
                let mut expected: Vec<(Vec<u8>, i32)> = model
                    .iter()
                    .flat_map(|(k, q)| q.iter().map(|v| (k.clone(), *v)))
                    .collect();
                got.sort();
                expected.sort();
                prop_assert_eq!(got, expected);
            }
        }

        // Post-conditions after each op: size parity with the model.
        let model_len: usize = model.values().map(VecDeque::len).sum();
        prop_assert_eq!(sut.len(), model_len);
        prop_assert_eq!(sut.is_empty(), model_len == 0);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut: ChainHashMap<i32> = ChainHashMap::new(capacity);
        check_against_model(sut, &pool, ops)?;
    }
}

// Collision variant: a constant hasher funnels every key into one
// bucket, stressing chain scanning, tail appends, and unlinking with a
// live predecessor.
struct ConstHasher;
impl ByteHasher for ConstHasher {
    fn hash_bytes(&self, _data: &[u8]) -> u32 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_chain((capacity, pool, ops) in arb_scenario()) {
        let sut: ChainHashMap<i32, ConstHasher> =
            ChainHashMap::with_hasher(capacity, ConstHasher);
        check_against_model(sut, &pool, ops)?;
    }
}
