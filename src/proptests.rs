use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Height and balance of every node, recomputed from the public traversals
/// and child lookups only.
fn validate_tree<V>(t: &AvlTree<u16, V>) {
    t.check_consistency();

    fn subtree_height<V>(t: &AvlTree<u16, V>, key: Option<&u16>) -> usize {
        let Some(key) = key else {
            return 0;
        };
        let left = subtree_height(t, t.key_of_left_child_of(key).unwrap());
        let right = subtree_height(t, t.key_of_right_child_of(key).unwrap());
        assert!(
            left.abs_diff(right) <= 1,
            "node {key} out of balance: {left} vs {right}"
        );
        1 + left.max(right)
    }

    let height = subtree_height(t, t.key_at_root());
    assert_eq!(height, t.height(), "height must match recomputed height");

    // AVL height bound
    let bound = 1.4405 * ((t.num_keys() + 2) as f64).log2() - 0.3277;
    assert!(
        height as f64 <= bound,
        "height {height} exceeds AVL bound {bound}"
    );
}

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = 0u16..512;
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        20 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=300)
}

fn policy_strategy() -> impl Strategy<Value = Rebalance> {
    prop_oneof![Just(Rebalance::WholeTree), Just(Rebalance::SearchPath)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(rebalance in policy_strategy(), ops in ops_strategy()) {
        let mut t: AvlTree<u16, u32> = AvlTree::with_rebalance(rebalance);
        let mut m: BTreeMap<u16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let got = t.insert(key, value);
                    if m.contains_key(&key) {
                        prop_assert_eq!(got, Err(Error::DuplicateKey));
                    } else {
                        prop_assert_eq!(got, Ok(()));
                        m.insert(key, value);
                    }
                }
                Op::Remove(key) => {
                    let got = t.remove(&key);
                    match m.remove(&key) {
                        Some(_) => prop_assert_eq!(got, Ok(true)),
                        None => prop_assert_eq!(got, Err(Error::KeyNotFound)),
                    }
                }
                Op::Get(key) => {
                    let got = t.get(&key).ok().copied();
                    prop_assert_eq!(got, m.get(&key).copied());
                    prop_assert_eq!(t.contains(&key), Ok(m.contains_key(&key)));
                }
            }

            prop_assert_eq!(t.num_keys(), m.len());
        }

        validate_tree(&t);
        let got: Vec<u16> = t.in_order_traversal().into_iter().copied().collect();
        let expected: Vec<u16> = m.keys().copied().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_traversals_are_permutations(keys in prop::collection::btree_set(any::<u16>(), 0..200)) {
        let t = AvlTree::try_from_iter(keys.iter().map(|key| (*key, ()))).unwrap();
        validate_tree(&t);

        let expected: Vec<u16> = keys.iter().copied().collect();
        for traversal in [
            t.pre_order_traversal(),
            t.post_order_traversal(),
            t.level_order_traversal(),
        ] {
            prop_assert_eq!(traversal.len(), t.num_keys());
            let mut sorted: Vec<u16> = traversal.into_iter().copied().collect();
            sorted.sort_unstable();
            prop_assert_eq!(&sorted, &expected);
        }

        prop_assert_eq!(t.level_order_traversal().first().copied(), t.key_at_root());
        prop_assert_eq!(t.pre_order_traversal().first().copied(), t.key_at_root());
        prop_assert_eq!(t.post_order_traversal().last().copied(), t.key_at_root());
    }

    #[test]
    fn prop_policies_build_identical_trees(ops in ops_strategy()) {
        let mut whole: AvlTree<u16, u32> = AvlTree::with_rebalance(Rebalance::WholeTree);
        let mut path: AvlTree<u16, u32> = AvlTree::with_rebalance(Rebalance::SearchPath);
        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(whole.insert(key, value), path.insert(key, value));
                }
                Op::Remove(key) => prop_assert_eq!(whole.remove(&key), path.remove(&key)),
                Op::Get(_) => {}
            }
        }
        prop_assert_eq!(whole.pre_order_traversal(), path.pre_order_traversal());
    }
}
