//! This crate exposes an ordered Binary Search Tree (BST) over unique values
//! that is rebalanced by rebuilding rather than by rotations.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! may have a left and a right child `Node`. The most important invariants
//! of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)`. The [`Tree`] here never
//! restores its height on `insert` or `delete_item`, so inserting values outside
//! the original range skews it. [`Tree::is_balanced`] reports whether every node's
//! subtrees differ in height by at most one and [`Tree::rebalance`] rebuilds the
//! tree from its sorted values so that they do.
//!
//! Nodes are visited in level order, pre-order, in-order, or post-order, either
//! through callbacks (e.g. [`Tree::level_order_for_each`]) or through the lazy
//! [`Iter`] returned by [`Tree::iter`].

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod traversal;
pub mod tree;

pub use error::Error;
pub use traversal::{Iter, Order};
pub use tree::{Node, Tree};
