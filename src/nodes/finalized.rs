use super::{children_hash, leaf_hash, node_hash};
use crate::{
    TriePath, TrieValue,
    hash::{DataHash, HashAlgorithm},
};
use alloc::sync::Arc;

/// An immutable, hashed branch of a finalized trie.
///
/// Subtrees are reference counted, so roots calculated from the same builder share every
/// branch that did not change in between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinalizedBranch<V: TrieValue> {
    /// A leaf holding a value.
    Leaf(FinalizedLeaf<V>),
    /// An internal node with two children.
    Node(FinalizedNode<V>),
}

impl<V: TrieValue> FinalizedBranch<V> {
    /// Returns the path of the branch relative to its parent.
    pub const fn path(&self) -> &TriePath {
        match self {
            Self::Leaf(leaf) => &leaf.path,
            Self::Node(node) => &node.path,
        }
    }

    /// Returns the branch hash.
    pub const fn hash(&self) -> &DataHash {
        match self {
            Self::Leaf(leaf) => &leaf.hash,
            Self::Node(node) => &node.hash,
        }
    }

    /// Returns the aggregate of every leaf under this branch.
    pub const fn aggregate(&self) -> &V::Aggregate {
        match self {
            Self::Leaf(leaf) => &leaf.aggregate,
            Self::Node(node) => &node.aggregate,
        }
    }

    /// Returns `true` if this is a leaf.
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

/// A finalized leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalizedLeaf<V: TrieValue> {
    path: TriePath,
    value: V,
    aggregate: V::Aggregate,
    hash: DataHash,
}

impl<V: TrieValue> FinalizedLeaf<V> {
    /// Hashes a leaf.
    pub fn new(algorithm: HashAlgorithm, path: TriePath, value: V) -> Self {
        let hash = leaf_hash(algorithm, &path, &value);
        let aggregate = value.aggregate();
        Self { path, value, aggregate, hash }
    }

    /// Returns the leaf path relative to its parent.
    pub const fn path(&self) -> &TriePath {
        &self.path
    }

    /// Returns the leaf value.
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the aggregate contributed by the leaf.
    pub const fn aggregate(&self) -> &V::Aggregate {
        &self.aggregate
    }

    /// Returns the leaf hash.
    pub const fn hash(&self) -> &DataHash {
        &self.hash
    }
}

/// A finalized internal node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalizedNode<V: TrieValue> {
    path: TriePath,
    left: Arc<FinalizedBranch<V>>,
    right: Arc<FinalizedBranch<V>>,
    children_hash: DataHash,
    aggregate: V::Aggregate,
    hash: DataHash,
}

impl<V: TrieValue> FinalizedNode<V> {
    /// Hashes an internal node over two finalized children.
    pub fn new(
        algorithm: HashAlgorithm,
        path: TriePath,
        left: Arc<FinalizedBranch<V>>,
        right: Arc<FinalizedBranch<V>>,
    ) -> Self {
        let (children_hash, aggregate) = children_hash::<V>(
            algorithm,
            Some((left.hash(), left.aggregate())),
            Some((right.hash(), right.aggregate())),
        );
        let hash = node_hash(algorithm, &path, &children_hash);
        Self { path, left, right, children_hash, aggregate, hash }
    }

    /// Returns the node path relative to its parent.
    pub const fn path(&self) -> &TriePath {
        &self.path
    }

    /// Returns the left child.
    pub fn left(&self) -> &FinalizedBranch<V> {
        &self.left
    }

    /// Returns the right child.
    pub fn right(&self) -> &FinalizedBranch<V> {
        &self.right
    }

    /// Returns the child on the given side.
    pub fn child(&self, is_right: bool) -> &FinalizedBranch<V> {
        if is_right { &self.right } else { &self.left }
    }

    /// Returns the hash of both children, the value a proof discloses for a terminal node.
    pub const fn children_hash(&self) -> &DataHash {
        &self.children_hash
    }

    /// Returns the combined aggregate of both children.
    pub const fn aggregate(&self) -> &V::Aggregate {
        &self.aggregate
    }

    /// Returns the node hash.
    pub const fn hash(&self) -> &DataHash {
        &self.hash
    }
}
