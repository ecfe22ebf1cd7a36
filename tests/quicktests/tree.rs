use ordered_tree::{Order, Tree};

use std::collections::{BTreeSet, HashSet};

fn in_order(tree: &Tree<i8>) -> Vec<i8> {
    tree.values().copied().collect()
}

fn strictly_ascending(xs: &[i8]) -> bool {
    xs.windows(2).all(|w| w[0] < w[1])
}

/// Builds a tree and then skews it with inserts of values it may not hold yet.
fn skewed(xs: Vec<i8>, inserts: &[i8]) -> Tree<i8> {
    let mut tree = Tree::build(xs);
    for x in inserts {
        tree.insert(*x);
    }
    tree
}

#[quickcheck]
fn build_matches_sorted_set(xs: Vec<i8>) -> bool {
    let tree = Tree::build(xs.iter().copied());
    let set: BTreeSet<_> = xs.into_iter().collect();

    tree.len() == set.len() && in_order(&tree) == set.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn build_is_balanced(xs: Vec<i8>) -> bool {
    Tree::build(xs).is_balanced()
}

#[quickcheck]
fn stays_ordered(xs: Vec<i8>, inserts: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = skewed(xs, &inserts);
    for x in &deletes {
        tree.delete_item(x);
    }

    strictly_ascending(&in_order(&tree))
}

#[quickcheck]
fn double_insert_is_noop(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = Tree::build(xs);
    tree.insert(x);
    let before = in_order(&tree);
    let inserted = tree.insert(x);

    !inserted && in_order(&tree) == before && tree.len() == before.len()
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::build(xs.iter().copied());
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none() && tree.height(x).is_none() && tree.depth(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::build(xs.iter().copied());
    for delete in &deletes {
        tree.delete_item(delete);
    }

    let deleted: HashSet<_> = deletes.iter().copied().collect();
    let still_present: Vec<_> = xs.iter().filter(|x| !deleted.contains(*x)).collect();

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn rebalance_restores_balance(xs: Vec<i8>, inserts: Vec<i8>) -> bool {
    let mut tree = skewed(xs, &inserts);
    let before = in_order(&tree);
    tree.rebalance();

    tree.is_balanced() && in_order(&tree) == before
}

#[quickcheck]
fn traversals_visit_every_node_once(xs: Vec<i8>, inserts: Vec<i8>) -> bool {
    let tree = skewed(xs, &inserts);
    let expected: HashSet<_> = tree.values().copied().collect();

    [
        Order::LevelOrder,
        Order::PreOrder,
        Order::InOrder,
        Order::PostOrder,
    ]
    .into_iter()
    .all(|order| {
        let mut seen = Vec::new();
        tree.for_each(order, Some(|n: &ordered_tree::Node<i8>| seen.push(*n.data())))
            .is_ok()
            && seen.len() == tree.len()
            && seen.iter().copied().collect::<HashSet<_>>() == expected
    })
}

#[quickcheck]
fn root_has_depth_zero(xs: Vec<i8>) -> bool {
    let tree = Tree::build(xs);
    match tree.root() {
        Some(root) => tree.depth(root.data()) == Some(0),
        None => tree.is_empty(),
    }
}
