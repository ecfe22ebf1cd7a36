//! Errors surfaced by [`Tree`][crate::Tree] operations.

use thiserror::Error;

/// The error type for tree operations. Almost every edge condition on a tree
/// (duplicate inserts, deleting or querying a missing value, traversing an
/// empty tree) is a no-op or a `None`, so the only failure is a programming
/// error on the caller's side.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A traversal was requested without a callback to visit nodes with.
    #[error("callback function is required")]
    MissingCallback,
}
