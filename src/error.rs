use thiserror::Error;

/// Errors returned by fallible tree operations.
///
/// Every error leaves the tree exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The caller supplied a key that reports itself as null.
    #[error("key must not be null")]
    IllegalNullKey,
    /// The key is not stored in the tree.
    #[error("key not found")]
    KeyNotFound,
    /// The key is already stored in the tree.
    #[error("duplicate key")]
    DuplicateKey,
}

pub type Result<T> = std::result::Result<T, Error>;
