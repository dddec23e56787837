//! An ordered map implemented with an AVL tree.
//!
//! Keys are unique and totally ordered, values are opaque. After every
//! insertion and removal the tree is rebalanced so that the heights of the
//! two subtrees of any node differ by at most one.
//!
//! Fallible operations return [`Error`]; a failed operation never modifies
//! the tree.
//!
//! The crate logs through [`tracing`]: `debug` events for accepted and
//! rejected mutations, `trace` events for every rotation.

mod error;
mod key;
mod node;
mod traverse;
mod tree;

pub use error::{Error, Result};
pub use key::Key;
pub use tree::{AvlTree, Rebalance};


#[cfg(test)]
mod proptests;
