//! A mutable BST that owns its nodes through `Box`es and only rebalances when asked to.
//!
//! Inserting and deleting never rotate nodes, so a tree can become arbitrarily skewed. Calling
//! [`Tree::rebalance`] discards the structure and rebuilds a tree of minimal height from the
//! sorted values.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let mut tree = Tree::build([1, 2, 3, 4, 5, 6, 7]);
//! assert!(tree.is_balanced());
//! assert_eq!(tree.height(&4), Some(2));
//!
//! // Inserting past the end of the range builds a skewed tail.
//! tree.insert(8);
//! tree.insert(9);
//! tree.insert(10);
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.values().copied().collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());
//! ```

use std::cmp::Ordering;
use std::mem;

use log::{debug, trace};

use crate::error::Error;
use crate::traversal::{Iter, Order};

/// An owned, possibly empty, subtree.
type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree over unique values. Nodes are owned by their parent (or the tree, for
/// the root) and there are no parent pointers.
#[derive(Clone)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    // The derived drop recurses once per level which a skewed tree can turn into a stack
    // overflow, so detach children onto a heap-allocated stack instead.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> std::fmt::Debug for Tree<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a Node<T>;
    type IntoIter = Iter<'a, T>;

    /// Iterates the nodes in ascending order.
    fn into_iter(self) -> Self::IntoIter {
        self.iter(Order::InOrder)
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a balanced tree holding the given values. Duplicates are dropped.
    ///
    /// The values are sorted and the middle one (rounding down) becomes the root, with the
    /// halves on either side built the same way into its subtrees. This gives a tree of minimal
    /// height which, when the number of values is even, has one more node on its right.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree = Tree::build([5, 3, 8, 3, 1]);
    ///
    /// assert_eq!(tree.len(), 4);
    /// assert_eq!(tree.root().map(|n| *n.data()), Some(3));
    /// assert_eq!(tree.values().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
    /// ```
    pub fn build<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();

        let tree = Self::from_sorted(values);
        debug!("built tree with {} nodes", tree.len);
        tree
    }

    /// Builds a tree of minimal height from strictly ascending values.
    fn from_sorted(values: Vec<T>) -> Self {
        let len = values.len();
        let mut values = values.into_iter();
        let root = Node::build_sorted(len, &mut values);

        Self { root, len }
    }

    /// The root node of the tree, if there is one.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Finds the node holding `value`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree = Tree::build([1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&3).map(|n| *n.data()), Some(3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(&node.data) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Whether the tree holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_some()
    }

    /// Inserts `value` as a new leaf and returns `true`. If the tree already holds `value`
    /// nothing changes and `false` is returned. The tree is never rebalanced here.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let inserted = Node::insert(&mut self.root, value);
        if inserted {
            self.len += 1;
        } else {
            trace!("ignoring insert of a value already in the tree");
        }
        inserted
    }

    /// Deletes `value` from the tree and returns it. If the tree doesn't hold `value`, nothing
    /// happens.
    ///
    /// A node with a single child is replaced by that child. A node with two children takes the
    /// value of its in-order successor (the smallest value in its right subtree) whose node is
    /// then removed from the right subtree instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::build([1, 2, 3]);
    ///
    /// assert_eq!(tree.delete_item(&2), Some(2));
    /// assert_eq!(tree.delete_item(&2), None);
    /// assert_eq!(tree.values().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn delete_item(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let deleted = Node::delete(&mut self.root, value);
        match deleted {
            Some(_) => self.len -= 1,
            None => trace!("nothing to delete, value not in the tree"),
        }
        deleted
    }

    /// Iterates over the nodes of the tree in the given order.
    pub fn iter(&self, order: Order) -> Iter<'_, T> {
        Iter::new(self.root(), order)
    }

    /// Iterates over the values of the tree in ascending order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter(Order::InOrder).map(Node::data)
    }

    /// Calls `callback` on every node in the given order. Unlike the `*_for_each` methods, the
    /// callback may be absent, in which case nothing is visited and an error is returned.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCallback`] if `callback` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Error, Node, Order, Tree};
    ///
    /// let tree = Tree::build([1, 2, 3]);
    /// let mut seen = Vec::new();
    ///
    /// tree.for_each(Order::PreOrder, Some(|n: &Node<i32>| seen.push(*n.data())))?;
    /// assert_eq!(seen, [2, 1, 3]);
    ///
    /// let missing: Option<fn(&Node<i32>)> = None;
    /// assert_eq!(tree.for_each(Order::PreOrder, missing), Err(Error::MissingCallback));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn for_each<F>(&self, order: Order, callback: Option<F>) -> Result<(), Error>
    where
        F: FnMut(&Node<T>),
    {
        let callback = callback.ok_or(Error::MissingCallback)?;
        self.iter(order).for_each(callback);
        Ok(())
    }

    /// Calls `callback` on every node, breadth first and left to right within a level.
    pub fn level_order_for_each<F>(&self, callback: F)
    where
        F: FnMut(&Node<T>),
    {
        self.iter(Order::LevelOrder).for_each(callback);
    }

    /// Calls `callback` on every node in ascending order.
    pub fn in_order_for_each<F>(&self, callback: F)
    where
        F: FnMut(&Node<T>),
    {
        self.iter(Order::InOrder).for_each(callback);
    }

    /// Calls `callback` on every node, each before its subtrees.
    pub fn pre_order_for_each<F>(&self, callback: F)
    where
        F: FnMut(&Node<T>),
    {
        self.iter(Order::PreOrder).for_each(callback);
    }

    /// Calls `callback` on every node, each after its subtrees.
    pub fn post_order_for_each<F>(&self, callback: F)
    where
        F: FnMut(&Node<T>),
    {
        self.iter(Order::PostOrder).for_each(callback);
    }

    /// The height of the subtree rooted at the node holding `value`, counted in edges down to
    /// its deepest leaf. A leaf has height 0. Returns `None` if the tree doesn't hold `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree = Tree::build([1, 2, 3]);
    ///
    /// assert_eq!(tree.height(&2), Some(1));
    /// assert_eq!(tree.height(&1), Some(0));
    /// assert_eq!(tree.height(&4), None);
    /// ```
    pub fn height(&self, value: &T) -> Option<usize>
    where
        T: Ord,
    {
        self.find(value).map(Node::height)
    }

    /// The number of edges between the root and the node holding `value`. Returns `None` if the
    /// tree doesn't hold `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree = Tree::build([1, 2, 3]);
    ///
    /// assert_eq!(tree.depth(&2), Some(0));
    /// assert_eq!(tree.depth(&3), Some(1));
    /// assert_eq!(tree.depth(&4), None);
    /// ```
    pub fn depth(&self, value: &T) -> Option<usize>
    where
        T: Ord,
    {
        let mut current = self.root();
        let mut depth = 0;
        while let Some(node) = current {
            current = match value.cmp(&node.data) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(depth),
                Ordering::Greater => node.right(),
            };
            depth += 1;
        }

        None
    }

    /// Whether, for every node, the heights of its left and right subtrees differ by at most 1.
    /// An empty tree is balanced.
    pub fn is_balanced(&self) -> bool {
        Node::balance(&self.root).balanced
    }

    /// Rebuilds the tree into one of minimal height holding the same values.
    pub fn rebalance(&mut self) {
        let mut values = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root.take();

        // An in-order walk that consumes the old nodes as it goes.
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node { data, right, .. } = *node;
            values.push(data);
            current = right;
        }

        *self = Self::from_sorted(values);
        debug!("rebalanced tree with {} nodes", self.len);

        if cfg!(debug_assertions) {
            assert!(self.is_balanced());
        }
    }
}

/// The result of checking a subtree's balance: whether every node in it is balanced and the
/// subtree's height.
struct Balance {
    balanced: bool,
    /// Counted in edges, so an empty subtree is -1.
    height: isize,
}

/// A single value in a [`Tree`] along with its children.
#[derive(Clone, Debug)]
pub struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(data: T) -> Box<Self> {
        Box::new(Self {
            data,
            left: None,
            right: None,
        })
    }

    /// The value held by this node.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The number of edges from this node down to its deepest leaf.
    pub fn height(&self) -> usize {
        let left = self.left().map_or(0, |n| n.height() + 1);
        let right = self.right().map_or(0, |n| n.height() + 1);
        left.max(right)
    }

    /// Builds a subtree from the next `len` values of an ascending iterator. Picking the left
    /// half's size as `(len - 1) / 2` puts the same value at the root as picking index
    /// `(start + end) / 2` of the sorted slice would.
    fn build_sorted(len: usize, values: &mut impl Iterator<Item = T>) -> Link<T> {
        if len == 0 {
            return None;
        }

        let left_len = (len - 1) / 2;
        let left = Self::build_sorted(left_len, values);
        let data = values
            .next()
            .expect("building a subtree requires as many values as its length");
        let right = Self::build_sorted(len - 1 - left_len, values);

        Some(Box::new(Self { data, left, right }))
    }

    fn insert(link: &mut Link<T>, value: T) -> bool
    where
        T: Ord,
    {
        let Some(node) = link else {
            *link = Some(Self::new_boxed(value));
            return true;
        };

        let inserted = match value.cmp(&node.data) {
            Ordering::Less => Self::insert(&mut node.left, value),
            Ordering::Equal => false,
            Ordering::Greater => Self::insert(&mut node.right, value),
        };

        if cfg!(debug_assertions) {
            node.assert_ordered();
        }
        inserted
    }

    /// Deletes `value` from the subtree in `link`, returning it if it was found.
    fn delete(link: &mut Link<T>, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let node = link.as_mut()?;
        let deleted = match value.cmp(&node.data) {
            Ordering::Less => Self::delete(&mut node.left, value),
            Ordering::Greater => Self::delete(&mut node.right, value),
            Ordering::Equal if node.left.is_some() => match Self::delete_min(&mut node.right) {
                Some(successor) => Some(mem::replace(&mut node.data, successor)),
                None => Self::unlink(link),
            },
            Ordering::Equal => Self::unlink(link),
        };

        if cfg!(debug_assertions) {
            if let Some(node) = link {
                node.assert_ordered();
            }
        }
        deleted
    }

    /// Removes the node in `link`, which has at most one child, and moves that child into its
    /// place.
    fn unlink(link: &mut Link<T>) -> Option<T> {
        let Self { data, left, right } = *link.take()?;
        debug_assert!(left.is_none() || right.is_none());
        *link = left.or(right);
        Some(data)
    }

    /// Removes the leftmost node of the subtree in `link` and returns its value. The leftmost
    /// node has no left child so its right child takes its place.
    fn delete_min(link: &mut Link<T>) -> Option<T> {
        let node = link.as_mut()?;
        if node.left.is_some() {
            return Self::delete_min(&mut node.left);
        }
        Self::unlink(link)
    }

    /// Checks every subtree bottom up, carrying heights along so none is computed twice.
    fn balance(link: &Link<T>) -> Balance {
        let Some(node) = link else {
            return Balance {
                balanced: true,
                height: -1,
            };
        };

        let left = Self::balance(&node.left);
        let right = Self::balance(&node.right);
        Balance {
            balanced: left.balanced && right.balanced && left.height.abs_diff(right.height) <= 1,
            height: left.height.max(right.height) + 1,
        }
    }

    fn assert_ordered(&self)
    where
        T: Ord,
    {
        if let Some(left) = self.left() {
            assert!(self.data > left.data);
        }
        if let Some(right) = self.right() {
            assert!(self.data < right.data);
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts,
    /// deletes, and rebuilds we have the same values in both.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    assert_eq!(bst.insert(x.clone()), set.insert(x.clone()));
                }
                Op::Delete(x) => {
                    assert_eq!(bst.delete_item(x), set.take(x));
                }
                Op::Rebalance => {
                    bst.rebalance();
                    assert!(bst.is_balanced());
                }
                Op::Iter => {
                    assert!(bst.values().eq(set.iter()));
                }
            }
            assert_eq!(bst.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            bst_ordered(&tree) && set.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn depth_plus_height_within_root_height(xs: Vec<i8>, extra: Vec<i8>) -> bool {
            let mut tree = Tree::build(xs);
            for x in extra {
                tree.insert(x);
            }
            let root_height = tree.root().map_or(0, Node::height);

            let within = tree.values().all(|x| {
                let depth = tree.depth(x).unwrap();
                let height = tree.height(x).unwrap();
                depth + height <= root_height
            });
            within
        }
    }

    /// Whether an in-order walk yields strictly ascending values.
    fn bst_ordered<T: Ord>(tree: &Tree<T>) -> bool {
        let values: Vec<_> = tree.values().collect();
        values.windows(2).all(|w| w[0] < w[1])
    }
}
