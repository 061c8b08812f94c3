use crate::{TriePath, hash::DataHasher};
use alloy_primitives::Bytes;
use alloy_rlp::{BufMut, Decodable, Encodable};
use core::fmt;

/// A leaf value stored in the trie.
///
/// The value type selects the trie flavour. Every value contributes an aggregate that is summed
/// up the tree and committed by each children hash: `()` for the plain trie and a counter for
/// the sum trie.
pub trait TrieValue: Clone + fmt::Debug + PartialEq + Eq + Encodable + Decodable {
    /// Aggregate carried by every branch and folded into its parent.
    type Aggregate: Clone + fmt::Debug + Default + PartialEq + Eq;

    /// Returns the aggregate contributed by this leaf.
    fn aggregate(&self) -> Self::Aggregate;

    /// Combines the aggregates of two siblings.
    fn combine(left: &Self::Aggregate, right: &Self::Aggregate) -> Self::Aggregate;

    /// Feeds a leaf at `path` into a leaf hash.
    fn hash_leaf(&self, path: &TriePath, hasher: &mut DataHasher);

    /// Feeds a pair of children into a children hash.
    ///
    /// Each child is given as its hash, or [`EMPTY_BRANCH`](crate::nodes::EMPTY_BRANCH) when
    /// absent, together with its aggregate.
    fn hash_children(
        left: (&[u8], &Self::Aggregate),
        right: (&[u8], &Self::Aggregate),
        hasher: &mut DataHasher,
    );

    /// RLP-encodes an aggregate.
    fn encode_aggregate(aggregate: &Self::Aggregate, out: &mut dyn BufMut);

    /// Returns the RLP length of an aggregate.
    fn aggregate_length(aggregate: &Self::Aggregate) -> usize;

    /// Decodes an aggregate written by [`TrieValue::encode_aggregate`].
    fn decode_aggregate(buf: &mut &[u8]) -> alloy_rlp::Result<Self::Aggregate>;
}

/// Plain trie leaves carry opaque bytes and no aggregate.
impl TrieValue for Bytes {
    type Aggregate = ();

    #[inline]
    fn aggregate(&self) {}

    #[inline]
    fn combine(_left: &(), _right: &()) {}

    #[inline]
    fn hash_leaf(&self, path: &TriePath, hasher: &mut DataHasher) {
        hasher.update(path.to_bytes_be());
        hasher.update(self);
    }

    #[inline]
    fn hash_children(left: (&[u8], &()), right: (&[u8], &()), hasher: &mut DataHasher) {
        hasher.update(left.0);
        hasher.update(right.0);
    }

    #[inline]
    fn encode_aggregate(_aggregate: &(), _out: &mut dyn BufMut) {}

    #[inline]
    fn aggregate_length(_aggregate: &()) -> usize {
        0
    }

    #[inline]
    fn decode_aggregate(_buf: &mut &[u8]) -> alloy_rlp::Result<()> {
        Ok(())
    }
}
