use bst::linked::Tree;

use std::collections::HashSet;

/// Builds a tree by inserting every element of `xs` in order.
fn build(xs: &[i16]) -> Tree<i16> {
    xs.iter().copied().collect()
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i16>) -> bool {
        let tree = build(&xs);

        xs.iter().all(|x| tree.contains(x) && tree.find(x) == Some(x))
    }

    fn contains_not(xs: Vec<i16>, nots: Vec<i16>) -> bool {
        let tree = build(&xs);
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }

    fn in_order_is_ascending(xs: Vec<i16>) -> bool {
        let tree = build(&xs);
        let keys: Vec<_> = tree.iter().collect();

        keys.windows(2).all(|pair| pair[0] < pair[1])
    }

    fn len_counts_distinct_keys(xs: Vec<i16>) -> bool {
        let tree = build(&xs);
        let distinct: HashSet<_> = xs.iter().collect();

        tree.len() == distinct.len()
            && tree.preorder().count() == tree.len()
            && tree.iter().count() == tree.len()
    }

    fn rebalance_keeps_keys(xs: Vec<i16>) -> bool {
        let mut tree = build(&xs);
        let before: Vec<_> = tree.iter().copied().collect();
        tree.rebalance();
        let after: Vec<_> = tree.iter().copied().collect();

        before == after && tree.len() == before.len()
    }

    fn rebalance_bounds_height(xs: Vec<i16>) -> bool {
        let mut tree = build(&xs);
        tree.rebalance();
        // ceil(log2(len + 1))
        let bound = (usize::BITS - tree.len().leading_zeros()) as usize;

        tree.height() <= bound
    }

    fn rebalance_root_is_median(xs: Vec<i16>) -> bool {
        let mut tree = build(&xs);
        let sorted: Vec<_> = tree.iter().copied().collect();
        tree.rebalance();

        tree.preorder().next() == sorted.get(sorted.len() / 2)
    }

    fn clear_empties(xs: Vec<i16>) -> bool {
        let mut tree = build(&xs);
        tree.clear();

        tree.is_empty() && tree.len() == 0 && tree.preorder().next().is_none()
    }

    fn successor_and_predecessor_are_neighbours(xs: Vec<i16>, probe: i16) -> bool {
        let tree = build(&xs);
        let above = tree.iter().find(|x| **x > probe);
        let below = tree.iter().take_while(|x| **x < probe).last();

        tree.successor(&probe) == above && tree.predecessor(&probe) == below
    }
}

#[test]
fn replace_swaps_key() {
    let mut tree = build(&[123, 34, 11, 678, 100]);

    assert_eq!(tree.replace(&123, 124), Some(123));
    assert!(tree.contains(&124));
    assert!(!tree.contains(&123));
    assert_eq!(tree.len(), 5);
}

#[test]
fn strings_as_keys() {
    let words = ["pear", "apple", "quince", "fig", "banana"];
    let mut tree: Tree<String> = words.iter().map(|w| w.to_string()).collect();

    assert_eq!(
        tree.range_find(&"b".to_string(), &"p".to_string()),
        [&"fig".to_string(), &"banana".to_string()]
    );
    assert_eq!(tree.successor(&"fig".to_string()), Some(&"pear".to_string()));

    tree.rebalance();
    assert_eq!(tree.preorder().next(), Some(&"fig".to_string()));
}
