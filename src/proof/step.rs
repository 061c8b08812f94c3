use crate::{TriePath, TrieValue, hash::DataHash};
use alloy_primitives::Bytes;

/// The branch next to the one a proof step descends into.
///
/// `aggregate` is `()` for the plain trie and the sibling's counter for the sum trie.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sibling<A> {
    /// Hash of the sibling branch.
    pub hash: DataHash,
    /// Aggregate of the sibling branch.
    pub aggregate: A,
}

/// Terminal branch disclosed by the innermost step of a proof.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: serde::Serialize, V::Aggregate: serde::Serialize",
        deserialize = "V: serde::Deserialize<'de>, V::Aggregate: serde::Deserialize<'de>"
    ))
)]
pub enum PathStepBranch<V: TrieValue = Bytes> {
    /// The query ends in a leaf holding this value.
    Leaf(V),
    /// The query ends in an internal node: it diverges inside the node's path or stops at it.
    Node {
        /// Hash of the node's two children.
        children_hash: DataHash,
        /// Aggregate of the node.
        aggregate: V::Aggregate,
    },
}

/// One level of a proof, listed from the innermost branch outwards.
///
/// `path` is the path of the branch at this level relative to its parent. For an empty root
/// slot it is the unconsumed part of the query instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: serde::Serialize, V::Aggregate: serde::Serialize",
        deserialize = "V: serde::Deserialize<'de>, V::Aggregate: serde::Deserialize<'de>"
    ))
)]
pub struct PathStep<V: TrieValue = Bytes> {
    /// Path segment of this level.
    pub path: TriePath,
    /// The other branch under the same parent, if there is one.
    pub sibling: Option<Sibling<V::Aggregate>>,
    /// Terminal branch, present only on the innermost step of a non-empty slot.
    pub branch: Option<PathStepBranch<V>>,
}
