use crate::TriePath;
use thiserror::Error;

/// Error type for trie operations.
///
/// Only [`TrieError::BranchExists`] and [`TrieError::LeafOutOfBounds`] describe the trie itself.
/// Both reject a single insertion and leave the rest of the tree untouched. The remaining
/// variants report malformed input handed to the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrieError {
    /// The inserted path collides with a branch that is already in the trie, or lies on the
    /// way to one.
    #[error("branch already exists at path {path}")]
    BranchExists {
        /// The rejected leaf path.
        path: TriePath,
    },

    /// The inserted path runs through an existing leaf, which would have to become an
    /// internal node.
    #[error("leaf path {path} passes through an existing leaf")]
    LeafOutOfBounds {
        /// The rejected leaf path.
        path: TriePath,
    },

    /// The path carries no key bits below the sentinel.
    #[error("invalid leaf path {0}: expected at least one key bit after the sentinel")]
    InvalidPath(
        /// The rejected path
        TriePath,
    ),

    /// The hash algorithm identifier is unknown or not supported by this crate.
    #[error("unsupported hash algorithm {0}")]
    UnsupportedHashAlgorithm(
        /// The algorithm identifier
        u16,
    ),

    /// A hash imprint or raw digest could not be decoded.
    #[error("invalid hash imprint: {0}")]
    InvalidImprint(
        /// The reason the imprint was rejected
        &'static str,
    ),
}

impl From<TrieError> for alloy_rlp::Error {
    fn from(err: TrieError) -> Self {
        match err {
            TrieError::BranchExists { .. } => Self::Custom("branch already exists"),
            TrieError::LeafOutOfBounds { .. } => Self::Custom("leaf out of bounds"),
            TrieError::InvalidPath(_) => Self::Custom("invalid trie path"),
            TrieError::UnsupportedHashAlgorithm(_) => Self::Custom("unsupported hash algorithm"),
            TrieError::InvalidImprint(reason) => Self::Custom(reason),
        }
    }
}
