use crate::{
    CommonPath, TriePath, TrieValue,
    hash::{DataHash, HashAlgorithm},
    nodes::{FinalizedBranch, children_hash},
    proof::{Path, PathStep, PathStepBranch, Sibling},
};
use alloc::{sync::Arc, vec::Vec};
use alloy_primitives::Bytes;
use tracing::{debug, trace};

/// Immutable root of a finalized trie.
///
/// Produced by [`SparseMerkleTree::calculate_root`](crate::SparseMerkleTree::calculate_root).
/// The root holds up to two branches, selected by the lowest key bit, and is cheap to clone and
/// safe to share between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootNode<V: TrieValue = Bytes> {
    algorithm: HashAlgorithm,
    left: Option<Arc<FinalizedBranch<V>>>,
    right: Option<Arc<FinalizedBranch<V>>>,
    hash: DataHash,
    aggregate: V::Aggregate,
}

impl<V: TrieValue> RootNode<V> {
    pub(crate) fn new(
        algorithm: HashAlgorithm,
        left: Option<Arc<FinalizedBranch<V>>>,
        right: Option<Arc<FinalizedBranch<V>>>,
    ) -> Self {
        let (hash, aggregate) = children_hash::<V>(
            algorithm,
            left.as_deref().map(|branch| (branch.hash(), branch.aggregate())),
            right.as_deref().map(|branch| (branch.hash(), branch.aggregate())),
        );
        Self { algorithm, left, right, hash, aggregate }
    }

    /// Returns the root hash.
    pub const fn root_hash(&self) -> &DataHash {
        &self.hash
    }

    /// Returns the aggregate of every leaf in the trie.
    pub const fn aggregate(&self) -> &V::Aggregate {
        &self.aggregate
    }

    /// Returns the hash algorithm the trie was built with.
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the branch whose paths start with a `0` bit.
    pub fn left(&self) -> Option<&FinalizedBranch<V>> {
        self.left.as_deref()
    }

    /// Returns the branch whose paths start with a `1` bit.
    pub fn right(&self) -> Option<&FinalizedBranch<V>> {
        self.right.as_deref()
    }

    /// Returns the branch on the given side.
    pub fn child(&self, is_right: bool) -> Option<&FinalizedBranch<V>> {
        if is_right { self.right() } else { self.left() }
    }

    /// Builds the proof for `path`.
    ///
    /// The proof discloses the branch the query ends in: a leaf, an internal node the query
    /// diverges from, or an empty root slot. Verifying it against `path` tells whether the path
    /// holds a leaf.
    pub fn get_path(&self, path: &TriePath) -> Path<V> {
        let mut steps = Vec::new();
        let mut remaining = path.clone();
        let mut parent = (self.left(), self.right());
        loop {
            let is_right = remaining.is_right();
            let (branch, sibling) = if is_right { (parent.1, parent.0) } else { (parent.0, parent.1) };
            let sibling = sibling.map(|branch| Sibling {
                hash: branch.hash().clone(),
                aggregate: branch.aggregate().clone(),
            });

            let Some(branch) = branch else {
                trace!(target: "smt::root", %remaining, "query ends in empty slot");
                // A query without a sentinel descends left, so its step names the left slot.
                let path =
                    if remaining.is_zero() { TriePath::from_key_bits([false]) } else { remaining };
                steps.push(PathStep { path, sibling, branch: None });
                break;
            };

            let node = match branch {
                FinalizedBranch::Leaf(leaf) => {
                    trace!(target: "smt::root", path = %leaf.path(), "query ends in leaf");
                    steps.push(PathStep {
                        path: leaf.path().clone(),
                        sibling,
                        branch: Some(PathStepBranch::Leaf(leaf.value().clone())),
                    });
                    break;
                }
                FinalizedBranch::Node(node) => node,
            };

            let common = CommonPath::new(&remaining, node.path());
            let rest = remaining.skip(common.length());
            if common.path() != node.path() || rest.is_root() {
                trace!(target: "smt::root", path = %node.path(), "query ends in node");
                steps.push(PathStep {
                    path: node.path().clone(),
                    sibling,
                    branch: Some(PathStepBranch::Node {
                        children_hash: node.children_hash().clone(),
                        aggregate: node.aggregate().clone(),
                    }),
                });
                break;
            }

            trace!(target: "smt::root", path = %node.path(), "query passes node");
            steps.push(PathStep { path: node.path().clone(), sibling, branch: None });
            remaining = rest;
            parent = (Some(node.left()), Some(node.right()));
        }

        steps.reverse();
        debug!(target: "smt::root", %path, steps = steps.len(), "built proof");
        Path { root: self.hash.clone(), aggregate: self.aggregate.clone(), steps }
    }
}
