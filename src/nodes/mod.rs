//! Branches of the trie in both their mutable and finalized forms, and the hashing rules that
//! turn one into the other.

use crate::{
    TriePath, TrieValue,
    hash::{DataHash, DataHasher, HashAlgorithm},
};

mod pending;
pub(crate) use pending::{PendingBranch, Slot};

mod finalized;
pub use finalized::{FinalizedBranch, FinalizedLeaf, FinalizedNode};

/// Marker hashed in place of an absent child.
pub const EMPTY_BRANCH: [u8; 1] = [0x00];

/// Hashes a leaf at `path`, laid out as chosen by the value type.
///
/// Plain leaves hash as `H(enc(path) ‖ value)`.
pub fn leaf_hash<V: TrieValue>(algorithm: HashAlgorithm, path: &TriePath, value: &V) -> DataHash {
    let mut hasher = DataHasher::new(algorithm);
    value.hash_leaf(path, &mut hasher);
    hasher.digest()
}

/// Hashes an internal node from its path and the hash of its children.
pub fn node_hash(algorithm: HashAlgorithm, path: &TriePath, children_hash: &DataHash) -> DataHash {
    DataHasher::new(algorithm).chain(path.to_bytes_be()).chain(children_hash).digest()
}

/// Hashes a pair of children and returns the digest with their combined aggregate.
///
/// Absent children hash as [`EMPTY_BRANCH`] and contribute the default aggregate. Plain children
/// hash as `H(left ‖ right)`.
pub fn children_hash<V: TrieValue>(
    algorithm: HashAlgorithm,
    left: Option<(&DataHash, &V::Aggregate)>,
    right: Option<(&DataHash, &V::Aggregate)>,
) -> (DataHash, V::Aggregate) {
    let zero = V::Aggregate::default();
    let (left_hash, left_aggregate) = split_child(left, &zero);
    let (right_hash, right_aggregate) = split_child(right, &zero);
    let aggregate = V::combine(left_aggregate, right_aggregate);

    let mut hasher = DataHasher::new(algorithm);
    V::hash_children((left_hash, left_aggregate), (right_hash, right_aggregate), &mut hasher);
    (hasher.digest(), aggregate)
}

fn split_child<'a, A>(child: Option<(&'a DataHash, &'a A)>, zero: &'a A) -> (&'a [u8], &'a A) {
    let empty: &'static [u8] = &EMPTY_BRANCH;
    match child {
        Some((hash, aggregate)) => (hash.data(), aggregate),
        None => (empty, zero),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, hex};

    #[test]
    fn empty_children() {
        let (hash, ()) = children_hash::<Bytes>(HashAlgorithm::Sha256, None, None);
        assert_eq!(
            hash.data(),
            hex!("96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7")
        );
    }

    #[test]
    fn leaf_and_pair() {
        let algorithm = HashAlgorithm::Sha256;
        let left = leaf_hash(algorithm, &TriePath::from(0b10u64), &Bytes::from_static(&[1, 2, 3]));
        assert_eq!(
            left.data(),
            hex!("745c8c22ab076f27ce4cfb29cab6bfc6340398d87a2dde221e1c7c3176ee38c2")
        );
        let right =
            leaf_hash(algorithm, &TriePath::from(0b11u64), &Bytes::from_static(&[1, 2, 3, 4]));
        let (root, ()) =
            children_hash::<Bytes>(algorithm, Some((&left, &())), Some((&right, &())));
        assert_eq!(
            root.data(),
            hex!("89d5f6db387b3b4b707acd94ee8ec7d866243c41cd2e51488f6e0705249f744b")
        );
    }

    #[test]
    fn node_prefixes_children_hash() {
        let algorithm = HashAlgorithm::Sha256;
        let (children, ()) = children_hash::<Bytes>(algorithm, None, None);
        let expected = DataHasher::new(algorithm).chain([0x05]).chain(children.data()).digest();
        assert_eq!(node_hash(algorithm, &TriePath::from(0b101u64), &children), expected);
    }
}
