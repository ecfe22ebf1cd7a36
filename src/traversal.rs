//! Lazy traversals over a [`Tree`][crate::Tree].
//!
//! All four orders share a single walk. Level order pulls pending work from
//! the front of a queue, the depth-first orders pull it from the back, and the
//! order decides how a node's children and the node itself are scheduled.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Order, Tree};
//!
//! let tree = Tree::build([1, 2, 3, 4, 5, 6, 7]);
//! let data = |order| tree.iter(order).map(|n| *n.data()).collect::<Vec<_>>();
//!
//! assert_eq!(data(Order::LevelOrder), [4, 2, 6, 1, 3, 5, 7]);
//! assert_eq!(data(Order::PreOrder), [4, 2, 1, 3, 6, 5, 7]);
//! assert_eq!(data(Order::InOrder), [1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(data(Order::PostOrder), [1, 3, 2, 5, 7, 6, 4]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::tree::Node;

/// The order in which a traversal visits the nodes of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Breadth first, left before right within a level.
    LevelOrder,
    /// A node before its left subtree, then its right subtree.
    PreOrder,
    /// A node between its left and right subtrees. Yields ascending values.
    InOrder,
    /// A node after both of its subtrees.
    PostOrder,
}

/// Pending work for a traversal.
enum Step<'a, T> {
    /// Schedule this node and its children according to the traversal order.
    Expand(&'a Node<T>),
    /// Yield this node.
    Visit(&'a Node<T>),
}

/// An iterator over the nodes of a tree in a given [`Order`]. Created by
/// [`Tree::iter`][crate::Tree::iter].
///
/// The iterator borrows the tree so the tree can't be mutated while it's
/// alive. Every node is yielded exactly once.
pub struct Iter<'a, T> {
    order: Order,
    pending: VecDeque<Step<'a, T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, order: Order) -> Self {
        let mut pending = VecDeque::new();
        if let Some(root) = root {
            pending.push_back(Step::Expand(root));
        }
        Self { order, pending }
    }

    /// The order this iterator visits nodes in.
    pub fn order(&self) -> Order {
        self.order
    }

    fn next_step(&mut self) -> Option<Step<'a, T>> {
        match self.order {
            Order::LevelOrder => self.pending.pop_front(),
            _ => self.pending.pop_back(),
        }
    }

    /// Schedules `node` and its children. The depth-first orders push onto a
    /// stack so everything is pushed in reverse of the order it's wanted.
    fn expand(&mut self, node: &'a Node<T>) -> Option<&'a Node<T>> {
        let left = node.left().map(Step::Expand);
        let right = node.right().map(Step::Expand);
        match self.order {
            Order::LevelOrder => {
                self.pending.extend(left);
                self.pending.extend(right);
                Some(node)
            }
            Order::PreOrder => {
                self.pending.extend(right);
                self.pending.extend(left);
                Some(node)
            }
            Order::InOrder => {
                self.pending.extend(right);
                self.pending.push_back(Step::Visit(node));
                self.pending.extend(left);
                None
            }
            Order::PostOrder => {
                self.pending.push_back(Step::Visit(node));
                self.pending.extend(right);
                self.pending.extend(left);
                None
            }
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("order", &self.order)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.next_step() {
            let visited = match step {
                Step::Expand(node) => self.expand(node),
                Step::Visit(node) => Some(node),
            };
            if visited.is_some() {
                return visited;
            }
        }

        None
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
