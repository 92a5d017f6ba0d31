// ChainSet property tests over the public surface.
//
// Property 1: growth never loses keys.
//  - Model: BTreeSet of everything inserted.
//  - Invariant: after every insert the set equals the model (len and
//    membership) and the load factor stays within the bound, across
//    however many rehashes the batch triggers.
//
// Property 2: set equality is order-independent.
//  - Two sets built from permutations of the same keys compare equal,
//    whatever their growth history; removing one key breaks equality.
//
// Property 3: erase then find.
//  - erase(k) == 1 for inserted keys, then find(k) == end(); a second
//    erase returns 0.
use chain_hashset::ChainSet;
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    #[test]
    fn prop_growth_preserves_keys(keys in proptest::collection::vec(any::<i64>(), 0..300)) {
        let mut s: ChainSet<i64> = ChainSet::new();
        let mut model = BTreeSet::new();
        for k in keys {
            let fresh = model.insert(k);
            prop_assert_eq!(s.insert(k).1, fresh);
            prop_assert!(s.load_factor() <= s.max_load_factor());
        }
        prop_assert_eq!(s.len(), model.len());
        for k in &model {
            prop_assert_eq!(s.count(k), 1);
        }
        let seen: BTreeSet<i64> = s.iter().copied().collect();
        prop_assert_eq!(seen, model);
    }

    #[test]
    fn prop_equality_ignores_insertion_order(
        keys in proptest::collection::btree_set(any::<u32>(), 1..100),
        seed in any::<u64>(),
    ) {
        let forward: Vec<u32> = keys.iter().copied().collect();
        let mut shuffled = forward.clone();
        // Deterministic shuffle driven by the seed.
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            shuffled.swap(i, (state >> 33) as usize % (i + 1));
        }

        let a: ChainSet<u32> = forward.into_iter().collect();
        let mut b: ChainSet<u32> = ChainSet::new();
        for k in shuffled {
            b.insert(k);
        }
        prop_assert!(a == b);
        prop_assert!(b == a);

        let first = *keys.iter().next().unwrap();
        b.erase(&first);
        prop_assert!(a != b);
    }

    #[test]
    fn prop_erase_then_find(keys in proptest::collection::btree_set("[a-z]{1,6}", 1..40)) {
        let mut s: ChainSet<String> = keys.iter().cloned().collect();
        for k in &keys {
            prop_assert_eq!(s.erase(k.as_str()), 1);
            prop_assert!(s.find(k.as_str()) == s.end());
            prop_assert_eq!(s.erase(k.as_str()), 0);
        }
        prop_assert!(s.is_empty());
        prop_assert!(s.begin() == s.end());
    }
}
