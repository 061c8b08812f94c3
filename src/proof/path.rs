use super::{PathStep, PathStepBranch, VerificationResult};
use crate::{
    TriePath, TrieValue,
    hash::DataHash,
    nodes::{children_hash, leaf_hash, node_hash},
};
use alloc::vec::Vec;
use alloy_primitives::Bytes;
use tracing::{debug, trace};

/// A proof path from a branch up to the root.
///
/// Produced by [`RootNode::get_path`](crate::RootNode::get_path). Steps run from the innermost
/// branch outwards, and only the first one may disclose a terminal branch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: serde::Serialize, V::Aggregate: serde::Serialize",
        deserialize = "V: serde::Deserialize<'de>, V::Aggregate: serde::Deserialize<'de>"
    ))
)]
pub struct Path<V: TrieValue = Bytes> {
    /// Root hash the path claims to lead to.
    pub root: DataHash,
    /// Root aggregate the path claims to lead to.
    pub aggregate: V::Aggregate,
    /// Steps from the innermost branch outwards.
    pub steps: Vec<PathStep<V>>,
}

impl<V: TrieValue> Path<V> {
    /// Verifies the path and checks whether it proves a leaf at `query`.
    ///
    /// The path is valid if hashing its steps reproduces the root hash and aggregate it carries,
    /// using the algorithm of the root hash. It is included if it ends in a leaf and the key
    /// rebuilt from the step paths equals `query`. The two flags are independent: an inclusion
    /// check needs both, a non-inclusion check needs a valid path that is not included.
    ///
    /// Malformed paths, with no steps or with a step missing its sentinel, are neither valid nor
    /// included.
    pub fn verify(&self, query: &TriePath) -> VerificationResult {
        let algorithm = self.root.algorithm();
        let Some(first) = self.steps.first() else {
            debug!(target: "smt::proof", "rejecting path without steps");
            return VerificationResult::invalid();
        };
        if self.steps.iter().any(|step| step.path.is_zero()) {
            debug!(target: "smt::proof", "rejecting path with a zero step path");
            return VerificationResult::invalid();
        }

        let mut key = TriePath::root();
        let mut ends_in_leaf = false;
        let mut current = match &first.branch {
            None => None,
            Some(PathStepBranch::Leaf(value)) => {
                ends_in_leaf = true;
                Some((leaf_hash(algorithm, &first.path, value), value.aggregate()))
            }
            Some(PathStepBranch::Node { children_hash, aggregate }) => {
                Some((node_hash(algorithm, &first.path, children_hash), aggregate.clone()))
            }
        };
        if current.is_some() {
            key = prepend(&first.path, &key);
        }

        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 {
                key = prepend(&step.path, &key);
                if let Some((hash, _)) = &mut current {
                    *hash = node_hash(algorithm, &step.path, hash);
                }
            }

            let own = current.as_ref().map(|(hash, aggregate)| (hash, aggregate));
            let sibling = step.sibling.as_ref().map(|sibling| (&sibling.hash, &sibling.aggregate));
            let (left, right) = if step.path.is_right() { (sibling, own) } else { (own, sibling) };
            let (hash, aggregate) = children_hash::<V>(algorithm, left, right);
            trace!(target: "smt::proof", path = %step.path, ?hash, "folded step");
            current = Some((hash, aggregate));
        }

        let path_valid = current
            .is_some_and(|(hash, aggregate)| hash == self.root && aggregate == self.aggregate);
        let path_included = ends_in_leaf && key == *query;
        debug!(target: "smt::proof", %query, path_valid, path_included, "verified path");
        VerificationResult::new(path_valid, path_included)
    }
}

// Zero paths are rejected before folding, so every step path carries a sentinel.
fn prepend(path: &TriePath, key: &TriePath) -> TriePath {
    path.with_suffix(key).unwrap_or_else(|| key.clone())
}
