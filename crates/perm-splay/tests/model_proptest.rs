//! Model-based property tests: every operation is replayed on a plain
//! `Vec<i64>` and the results must agree.

mod common;

use perm_splay::{SeqError, SeqTree};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert { value: i64, pos: usize },
    Delete { pos: usize },
    Sum { a: usize, b: usize },
    Min { a: usize, b: usize },
    Max { a: usize, b: usize },
    Assign { value: i64, a: usize, b: usize },
    Add { delta: i64, a: usize, b: usize },
    Reverse { a: usize, b: usize },
    Next { a: usize, b: usize },
    Prev { a: usize, b: usize },
    Set { pos: usize, value: i64 },
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    let idx = 0..64usize;
    prop_oneof![
        3 => (-20..20i64, idx.clone()).prop_map(|(value, pos)| Op::Insert { value, pos }),
        1 => idx.clone().prop_map(|pos| Op::Delete { pos }),
        2 => (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Sum { a, b }),
        1 => (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Min { a, b }),
        1 => (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Max { a, b }),
        1 => (-20..20i64, idx.clone(), idx.clone()).prop_map(|(value, a, b)| Op::Assign { value, a, b }),
        1 => (-5..5i64, idx.clone(), idx.clone()).prop_map(|(delta, a, b)| Op::Add { delta, a, b }),
        1 => (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Reverse { a, b }),
        2 => (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Next { a, b }),
        2 => (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Prev { a, b }),
        1 => (idx, -20..20i64).prop_map(|(pos, value)| Op::Set { pos, value }),
    ]
}

/// Maps raw indices onto a valid inclusive range of a non-empty model.
fn range(a: usize, b: usize, len: usize) -> (usize, usize) {
    let (a, b) = (a % len, b % len);
    (a.min(b), a.max(b))
}

fn apply(tree: &mut SeqTree, model: &mut Vec<i64>, op: &Op) -> Result<(), TestCaseError> {
    let len = model.len();
    if len == 0 {
        match op {
            Op::Insert { value, .. } => {
                tree.insert(*value, 0).unwrap();
                model.insert(0, *value);
            }
            Op::Delete { pos } => {
                prop_assert_eq!(tree.delete(*pos), Err(SeqError::EmptyRangeOnEmptyTree));
            }
            _ => {
                prop_assert_eq!(tree.sum(0, 0), Err(SeqError::EmptyRangeOnEmptyTree));
            }
        }
        return Ok(());
    }

    match *op {
        Op::Insert { value, pos } => {
            let pos = pos % (len + 1);
            tree.insert(value, pos).unwrap();
            model.insert(pos, value);
        }
        Op::Delete { pos } => {
            let pos = pos % len;
            prop_assert_eq!(tree.delete(pos), Ok(model.remove(pos)));
        }
        Op::Sum { a, b } => {
            let (a, b) = range(a, b, len);
            prop_assert_eq!(tree.sum(a, b), Ok(model[a..=b].iter().sum::<i64>()));
        }
        Op::Min { a, b } => {
            let (a, b) = range(a, b, len);
            prop_assert_eq!(tree.min(a, b), Ok(*model[a..=b].iter().min().unwrap()));
        }
        Op::Max { a, b } => {
            let (a, b) = range(a, b, len);
            prop_assert_eq!(tree.max(a, b), Ok(*model[a..=b].iter().max().unwrap()));
        }
        Op::Assign { value, a, b } => {
            let (a, b) = range(a, b, len);
            tree.assign(value, a, b).unwrap();
            model[a..=b].iter_mut().for_each(|v| *v = value);
        }
        Op::Add { delta, a, b } => {
            let (a, b) = range(a, b, len);
            tree.add(delta, a, b).unwrap();
            model[a..=b].iter_mut().for_each(|v| *v += delta);
        }
        Op::Reverse { a, b } => {
            let (a, b) = range(a, b, len);
            tree.reverse(a, b).unwrap();
            model[a..=b].reverse();
        }
        Op::Next { a, b } => {
            let (a, b) = range(a, b, len);
            let expected = common::next_permutation(&mut model[a..=b]);
            prop_assert_eq!(tree.next_permutation(a, b), Ok(expected));
        }
        Op::Prev { a, b } => {
            let (a, b) = range(a, b, len);
            let expected = common::prev_permutation(&mut model[a..=b]);
            prop_assert_eq!(tree.prev_permutation(a, b), Ok(expected));
        }
        Op::Set { pos, value } => {
            let pos = pos % len;
            tree.set(pos, value).unwrap();
            model[pos] = value;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn operations_match_vec_model(
        initial in prop::collection::vec(-20..20i64, 0..24),
        ops in prop::collection::vec(arbitrary_op(), 1..80),
    ) {
        let mut tree = SeqTree::from_slice(&initial);
        let mut model = initial.clone();
        for op in &ops {
            apply(&mut tree, &mut model, op)?;
            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(tree.to_vec(), model.clone());
        }
        tree.validate();
    }

    #[test]
    fn reverse_is_an_involution(
        values in prop::collection::vec(any::<i32>(), 1..40),
        a in 0..40usize,
        b in 0..40usize,
    ) {
        let values: Vec<i64> = values.into_iter().map(i64::from).collect();
        let (a, b) = range(a, b, values.len());
        let mut tree = SeqTree::from_slice(&values);
        tree.reverse(a, b).unwrap();
        tree.reverse(a, b).unwrap();
        prop_assert_eq!(tree.to_vec(), values);
    }

    #[test]
    fn permutation_keeps_the_multiset(
        values in prop::collection::vec(0..4i64, 1..30),
        steps in 1..20usize,
        a in 0..30usize,
        b in 0..30usize,
    ) {
        let (a, b) = range(a, b, values.len());
        let mut tree = SeqTree::from_slice(&values);
        for _ in 0..steps {
            tree.next_permutation(a, b).unwrap();
        }
        let mut after = tree.to_vec();
        let mut before = values.clone();
        prop_assert_eq!(&after[..a], &before[..a]);
        prop_assert_eq!(&after[b + 1..], &before[b + 1..]);
        after[a..=b].sort_unstable();
        before[a..=b].sort_unstable();
        prop_assert_eq!(after, before);
    }
}
