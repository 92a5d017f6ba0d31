#![cfg(test)]

// Property tests for ChainSet kept inside the crate so they can check the
// bucket array and chains directly, not only the public surface.

use crate::set::ChainSet;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

// Pool-indexed operations shrink well: indices shrink to earlier keys and
// op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Erase(usize),
    Find(usize),
    Extend(Vec<usize>),
    Clear,
    Rehash(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => idx.clone().prop_map(Op::Insert),
            3 => idx.clone().prop_map(Op::Erase),
            3 => idx.clone().prop_map(Op::Find),
            2 => proptest::collection::vec(idx.clone(), 0..12).prop_map(Op::Extend),
            1 => Just(Op::Clear),
            1 => (0usize..80).prop_map(Op::Rehash),
            2 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Every chained key sits in the bucket its hash selects, and the chains
/// together hold exactly `len()` nodes.
fn check_layout(sut: &ChainSet<String>) -> Result<(), TestCaseError> {
    let mut chained = 0;
    for bucket in 0..sut.table.bucket_count() {
        for key in sut.table.chain(bucket) {
            prop_assert_eq!(sut.table.bucket_of(key), bucket);
            chained += 1;
        }
    }
    prop_assert_eq!(chained, sut.len());
    prop_assert!(sut.bucket_count() >= 7);
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// - insert reports `true` exactly when the model lacks the key; the
//   returned cursor points at an equal key.
// - erase returns 1 or 0 matching the model; find/count parity.
// - after every insertion the load factor stays within the bound.
// - iteration yields `len()` distinct keys equal to the model's set.
// - clear keeps the bucket count; rehash never drops keys.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainSet<String> = ChainSet::new();
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                Op::Insert(i) => {
                    let k = pool[i].clone();
                    let fresh = model.insert(k.clone());
                    let before = sut.bucket_count();
                    let (it, inserted) = sut.insert(k.clone());
                    prop_assert_eq!(it.get(), Some(&k));
                    prop_assert_eq!(inserted, fresh);
                    if !fresh {
                        prop_assert_eq!(sut.bucket_count(), before, "duplicate must not grow");
                    }
                    prop_assert!(sut.load_factor() <= sut.max_load_factor());
                }
                Op::Erase(i) => {
                    let k = &pool[i];
                    let expected = usize::from(model.remove(k));
                    prop_assert_eq!(sut.erase(k.as_str()), expected);
                    prop_assert!(sut.find(k.as_str()) == sut.end());
                }
                Op::Find(i) => {
                    let k = &pool[i];
                    let present = model.contains(k);
                    prop_assert_eq!(sut.count(k.as_str()), usize::from(present));
                    prop_assert_eq!(sut.find(k.as_str()).get(), model.get(k));
                }
                Op::Extend(idxs) => {
                    let keys: Vec<String> = idxs.iter().map(|&i| pool[i].clone()).collect();
                    model.extend(keys.iter().cloned());
                    sut.extend(keys);
                    prop_assert!(sut.load_factor() <= sut.max_load_factor());
                }
                Op::Clear => {
                    let before = sut.bucket_count();
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.bucket_count(), before);
                    prop_assert!(sut.begin() == sut.end());
                }
                Op::Rehash(n) => {
                    sut.rehash(n);
                    prop_assert!(sut.bucket_count() >= n);
                    prop_assert!(sut.load_factor() <= sut.max_load_factor());
                }
                Op::Iterate => {
                    let seen: Vec<&String> = sut.iter().collect();
                    prop_assert_eq!(seen.len(), sut.len());
                    let distinct: BTreeSet<&String> = seen.iter().copied().collect();
                    prop_assert_eq!(distinct.len(), seen.len());
                    let expected: BTreeSet<&String> = model.iter().collect();
                    prop_assert_eq!(distinct, expected);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            check_layout(&sut)?;
        }
    }
}

// Property: a copy equals its source, keeps its bucket count, and is
// independent of it afterwards.
proptest! {
    #[test]
    fn prop_clone_is_independent(keys in proptest::collection::btree_set(any::<u16>(), 1..64)) {
        let src: ChainSet<u16> = keys.iter().copied().collect();
        let mut copy = src.clone();
        prop_assert!(copy == src);
        prop_assert_eq!(copy.bucket_count(), src.bucket_count());

        let victim = *keys.iter().next().unwrap();
        prop_assert_eq!(copy.erase(&victim), 1);
        prop_assert_eq!(src.count(&victim), 1);
        prop_assert!(copy != src);
    }
}
