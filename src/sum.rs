//! The sum trie: every leaf carries a counter and every branch commits to the sum of the
//! counters below it.
//!
//! Sum hashes commit to RLP lists so that every field, and every child counter, is bound on its
//! own:
//!
//! - leaf: `H(rlp([path, value, counter]))`
//! - children: `H(rlp([left hash, left counter, right hash, right counter]))`

use crate::{
    Path, PathStep, RootNode, SparseMerkleTree, TrieError, TriePath, TrieValue,
    hash::DataHasher,
    path::{biguint_length, decode_biguint, encode_biguint},
};
use alloc::vec::Vec;
use alloy_primitives::Bytes;
use alloy_rlp::{BufMut, Decodable, Encodable, Header, length_of_length};
use num_bigint::BigUint;

/// Sparse Merkle trie whose leaves carry counters.
pub type SparseMerkleSumTree = SparseMerkleTree<SumLeaf>;

/// Finalized root of a [`SparseMerkleSumTree`].
pub type SumRootNode = RootNode<SumLeaf>;

/// Proof path of a [`SparseMerkleSumTree`].
pub type SumPath = Path<SumLeaf>;

/// Proof step of a [`SparseMerkleSumTree`].
pub type SumPathStep = PathStep<SumLeaf>;

/// A sum trie leaf: an opaque value and a non-negative counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumLeaf {
    /// Leaf value.
    pub value: Bytes,
    /// Leaf counter, for example a token amount.
    pub counter: BigUint,
}

impl SumLeaf {
    /// Creates a new sum leaf.
    pub fn new(value: impl Into<Bytes>, counter: impl Into<BigUint>) -> Self {
        Self { value: value.into(), counter: counter.into() }
    }

    fn rlp_payload_length(&self) -> usize {
        self.value.length() + biguint_length(&self.counter)
    }
}

impl TrieValue for SumLeaf {
    type Aggregate = BigUint;

    #[inline]
    fn aggregate(&self) -> BigUint {
        self.counter.clone()
    }

    #[inline]
    fn combine(left: &BigUint, right: &BigUint) -> BigUint {
        left + right
    }

    fn hash_leaf(&self, path: &TriePath, hasher: &mut DataHasher) {
        let payload_length = path.length() + self.rlp_payload_length();
        let mut out = Vec::with_capacity(payload_length + length_of_length(payload_length));
        Header { list: true, payload_length }.encode(&mut out);
        path.encode(&mut out);
        self.value.encode(&mut out);
        encode_biguint(&self.counter, &mut out);
        hasher.update(out);
    }

    fn hash_children(
        left: (&[u8], &BigUint),
        right: (&[u8], &BigUint),
        hasher: &mut DataHasher,
    ) {
        let payload_length = left.0.length()
            + biguint_length(left.1)
            + right.0.length()
            + biguint_length(right.1);
        let mut out = Vec::with_capacity(payload_length + length_of_length(payload_length));
        Header { list: true, payload_length }.encode(&mut out);
        for (hash, counter) in [left, right] {
            hash.encode(&mut out);
            encode_biguint(counter, &mut out);
        }
        hasher.update(out);
    }

    #[inline]
    fn encode_aggregate(aggregate: &BigUint, out: &mut dyn BufMut) {
        encode_biguint(aggregate, out)
    }

    #[inline]
    fn aggregate_length(aggregate: &BigUint) -> usize {
        biguint_length(aggregate)
    }

    #[inline]
    fn decode_aggregate(buf: &mut &[u8]) -> alloy_rlp::Result<BigUint> {
        decode_biguint(buf)
    }
}

impl Encodable for SumLeaf {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        self.value.encode(out);
        encode_biguint(&self.counter, out);
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for SumLeaf {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let mut bytes = Header::decode_bytes(buf, true)?;
        let value = Bytes::decode(&mut bytes)?;
        let counter = decode_biguint(&mut bytes)?;
        if !bytes.is_empty() {
            return Err(alloy_rlp::Error::UnexpectedLength);
        }
        Ok(Self { value, counter })
    }
}

impl SparseMerkleSumTree {
    /// Adds a leaf with the given value and counter.
    ///
    /// See [`SparseMerkleTree::add_leaf`] for the possible errors.
    pub fn add_counted_leaf(
        &mut self,
        path: TriePath,
        value: impl Into<Bytes>,
        counter: impl Into<BigUint>,
    ) -> Result<(), TrieError> {
        self.add_leaf(path, SumLeaf::new(value, counter))
    }
}

impl SumRootNode {
    /// Returns the sum of all leaf counters.
    pub const fn counter(&self) -> &BigUint {
        self.aggregate()
    }
}

impl SumPath {
    /// Returns the root counter the path claims to lead to.
    pub const fn root_counter(&self) -> &BigUint {
        &self.aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PathStepBranch, hash::HashAlgorithm};
    use alloc::vec::Vec;
    use alloy_primitives::{b256, hex};

    const LEAVES: [(u64, &[u8], u64); 4] = [
        (0b100000000, b"value00000000", 10),
        (0b100000001, b"value00000001", 20),
        (0b101000001, b"value01000001", 30),
        (0b1100, b"value100", 40),
    ];

    fn sum_root() -> SumRootNode {
        let mut tree = SparseMerkleSumTree::default();
        for (path, value, counter) in LEAVES {
            tree.add_counted_leaf(path.into(), Bytes::from_static(value), counter).unwrap();
        }
        tree.calculate_root()
    }

    #[test]
    fn root_commits_to_counter_sum() {
        let root = sum_root();
        assert_eq!(*root.counter(), BigUint::from(100u32));
        assert_eq!(
            root.root_hash().as_b256(),
            Some(b256!("b53daec8fc0eead5b01c36a38c4fb26d6f6bf2b1fb5d309cc10ad04ba4c72cef"))
        );
    }

    #[test]
    fn empty_sum_root() {
        let root = SparseMerkleSumTree::default().calculate_root();
        assert_eq!(*root.counter(), BigUint::default());
        let expected = DataHasher::new(HashAlgorithm::Sha256).chain(hex!("c400800080")).digest();
        assert_eq!(*root.root_hash(), expected);
        assert_eq!(
            root.root_hash().as_b256(),
            Some(b256!("24517125e125ae29446b6c7aad373b40e00900d8996c8f63097befc1ccbfb374"))
        );
    }

    #[test]
    fn proof_discloses_counters() {
        let root = sum_root();
        let query = TriePath::from(0b100000000u64);
        let path = root.get_path(&query);
        assert_eq!(*path.root_counter(), BigUint::from(100u32));

        let counters: Vec<_> = path
            .steps
            .iter()
            .map(|step| (step.path.clone(), step.sibling.as_ref().map(|s| s.aggregate.clone())))
            .collect();
        assert_eq!(
            counters,
            [
                (TriePath::from(0b1000000u64), Some(BigUint::from(40u32))),
                (TriePath::from(0b100u64), Some(BigUint::from(50u32))),
            ]
        );
        assert_eq!(
            path.steps[0].branch,
            Some(PathStepBranch::Leaf(SumLeaf::new(Bytes::from_static(b"value00000000"), 10u32)))
        );

        let result = path.verify(&query);
        assert!(result.is_path_valid());
        assert!(result.is_path_included());
    }

    #[test]
    fn tampered_counters_fail_verification() {
        let root = sum_root();
        let query = TriePath::from(0b100000000u64);
        let path = root.get_path(&query);

        for index in 0..path.steps.len() {
            let mut tampered = path.clone();
            if let Some(sibling) = &mut tampered.steps[index].sibling {
                sibling.aggregate += 1u8;
            }
            assert!(!tampered.verify(&query).is_path_valid(), "sibling {index}");
        }

        let mut tampered = path.clone();
        if let Some(PathStepBranch::Leaf(leaf)) = &mut tampered.steps[0].branch {
            leaf.counter += 1u8;
        }
        assert!(!tampered.verify(&query).is_path_valid());

        let mut tampered = path;
        tampered.aggregate = BigUint::from(101u32);
        assert!(!tampered.verify(&query).is_path_valid());
    }

    #[test]
    fn leaf_fields_are_delimited() {
        let mut tree = SparseMerkleSumTree::default();
        tree.add_counted_leaf(0b10u64.into(), Bytes::from_static(&[1]), 512u32).unwrap();
        tree.add_counted_leaf(0b11u64.into(), Bytes::from_static(b"b"), 5u32).unwrap();
        let root = tree.calculate_root();
        assert_eq!(
            root.root_hash().as_b256(),
            Some(b256!("6952a9bc42b4fddbb58bccca9a1eb18861eba7ad0ca88e6e31ccc949fd4a29ae"))
        );

        let query = TriePath::from(0b10u64);
        let path = root.get_path(&query);
        assert!(path.verify(&query).is_successful());

        // Same leaf payload bytes and the same counter sum, split differently.
        let mut forged = path;
        forged.steps[0].branch =
            Some(PathStepBranch::Leaf(SumLeaf::new(Bytes::from_static(&[1, 2]), 0u32)));
        if let Some(sibling) = &mut forged.steps[0].sibling {
            sibling.aggregate = BigUint::from(517u32);
        }
        let result = forged.verify(&query);
        assert!(!result.is_path_valid());
        assert!(!result.is_successful());
    }

    #[test]
    fn child_counters_are_bound_individually() {
        let root = sum_root();
        let query = TriePath::from(0b110u64);
        let path = root.get_path(&query);
        assert_eq!(path.steps.len(), 1);
        assert!(matches!(path.steps[0].branch, Some(PathStepBranch::Node { .. })));
        assert!(path.verify(&query).is_path_valid());

        let mut shifted = path;
        if let Some(PathStepBranch::Node { aggregate, .. }) = &mut shifted.steps[0].branch {
            *aggregate += 7u8;
        }
        if let Some(sibling) = &mut shifted.steps[0].sibling {
            sibling.aggregate -= 7u8;
        }
        assert!(!shifted.verify(&query).is_path_valid());
    }

    #[test]
    fn non_inclusion_in_sum_tree() {
        let root = sum_root();
        for query in [0b110u64, 0b111000001, 0b11100] {
            let result = root.get_path(&query.into()).verify(&query.into());
            assert!(result.is_path_valid(), "{query:#b}");
            assert!(!result.is_path_included(), "{query:#b}");
        }
    }

    #[test]
    fn rlp_roundtrip() {
        let leaf = SumLeaf::new(Bytes::from_static(b"value100"), 40u32);
        let encoded = alloy_rlp::encode(&leaf);
        assert_eq!(encoded, hex!("ca8876616c756531303028"));
        assert_eq!(encoded.len(), leaf.length());
        assert_eq!(SumLeaf::decode(&mut &encoded[..]).unwrap(), leaf);

        let path = sum_root().get_path(&0b101000001u64.into());
        let encoded = alloy_rlp::encode(&path);
        assert_eq!(encoded.len(), path.length());
        assert_eq!(SumPath::decode(&mut &encoded[..]).unwrap(), path);
    }

    #[test]
    #[cfg(feature = "arbitrary")]
    #[cfg_attr(miri, ignore = "no proptest")]
    fn arbitrary_counter_conservation() {
        use proptest::{prelude::*, sample::Index};

        proptest!(|(
            leaves in proptest::collection::vec((any::<TriePath>(), any::<u64>()), 1..64),
            query in any::<Index>(),
            tampered in any::<Index>()
        )| {
            let mut tree = SparseMerkleSumTree::default();
            let mut accepted = Vec::new();
            let mut total = BigUint::default();
            for (path, counter) in leaves {
                let value = Bytes::from(path.to_bytes_be());
                if tree.add_counted_leaf(path.clone(), value, counter).is_ok() {
                    total += counter;
                    accepted.push(path);
                }
            }
            let root = tree.calculate_root();
            prop_assert_eq!(root.counter(), &total);

            for path in &accepted {
                let proof = root.get_path(path);
                prop_assert_eq!(proof.root_counter(), &total);
                prop_assert!(proof.verify(path).is_successful(), "{}", path);
            }

            let path = query.get(&accepted);
            let mut proof = root.get_path(path);
            let mut counters = Vec::new();
            for PathStep { sibling, branch, .. } in &mut proof.steps {
                if let Some(PathStepBranch::Leaf(leaf)) = branch {
                    counters.push(&mut leaf.counter);
                }
                if let Some(sibling) = sibling {
                    counters.push(&mut sibling.aggregate);
                }
            }
            let index = tampered.index(counters.len());
            *counters[index] += 1u8;
            prop_assert!(!proof.verify(path).is_path_valid(), "{}", path);
        });
    }
}
