//! RLP codec for proof paths.
//!
//! A path is the list `[root, aggregate?, [step, ..]]` and a step is `[path, sibling, branch]`.
//! An absent sibling or branch is the empty list. A sibling is `[hash, aggregate?]`, a leaf
//! branch `[0, value]` and a node branch `[1, children_hash, aggregate?]`. Aggregates are
//! omitted for the plain trie.

use super::{Path, PathStep, PathStepBranch, Sibling};
use crate::{TriePath, TrieValue, hash::DataHash};
use alloc::vec::Vec;
use alloy_rlp::{BufMut, Decodable, EMPTY_LIST_CODE, Encodable, Header, length_of_length};

const LEAF_TAG: u8 = 0;
const NODE_TAG: u8 = 1;

#[inline]
fn list_length(payload_length: usize) -> usize {
    payload_length + length_of_length(payload_length)
}

impl<V: TrieValue> PathStep<V> {
    fn sibling_payload_length(&self) -> Option<usize> {
        self.sibling.as_ref().map(|sibling| {
            sibling.hash.length() + V::aggregate_length(&sibling.aggregate)
        })
    }

    fn branch_payload_length(&self) -> Option<usize> {
        self.branch.as_ref().map(|branch| match branch {
            PathStepBranch::Leaf(value) => LEAF_TAG.length() + value.length(),
            PathStepBranch::Node { children_hash, aggregate } => {
                NODE_TAG.length() + children_hash.length() + V::aggregate_length(aggregate)
            }
        })
    }

    fn rlp_payload_length(&self) -> usize {
        self.path.length()
            + self.sibling_payload_length().map_or(1, list_length)
            + self.branch_payload_length().map_or(1, list_length)
    }
}

impl<V: TrieValue> Encodable for PathStep<V> {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        self.path.encode(out);

        match (&self.sibling, self.sibling_payload_length()) {
            (Some(Sibling { hash, aggregate }), Some(payload_length)) => {
                Header { list: true, payload_length }.encode(out);
                hash.encode(out);
                V::encode_aggregate(aggregate, out);
            }
            _ => out.put_u8(EMPTY_LIST_CODE),
        }

        match (&self.branch, self.branch_payload_length()) {
            (Some(branch), Some(payload_length)) => {
                Header { list: true, payload_length }.encode(out);
                match branch {
                    PathStepBranch::Leaf(value) => {
                        LEAF_TAG.encode(out);
                        value.encode(out);
                    }
                    PathStepBranch::Node { children_hash, aggregate } => {
                        NODE_TAG.encode(out);
                        children_hash.encode(out);
                        V::encode_aggregate(aggregate, out);
                    }
                }
            }
            _ => out.put_u8(EMPTY_LIST_CODE),
        }
    }

    fn length(&self) -> usize {
        list_length(self.rlp_payload_length())
    }
}

impl<V: TrieValue> Decodable for PathStep<V> {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let mut bytes = Header::decode_bytes(buf, true)?;
        let path = TriePath::decode(&mut bytes)?;

        let mut sibling_bytes = Header::decode_bytes(&mut bytes, true)?;
        let sibling = if sibling_bytes.is_empty() {
            None
        } else {
            let hash = DataHash::decode(&mut sibling_bytes)?;
            let aggregate = V::decode_aggregate(&mut sibling_bytes)?;
            ensure_consumed(sibling_bytes)?;
            Some(Sibling { hash, aggregate })
        };

        let mut branch_bytes = Header::decode_bytes(&mut bytes, true)?;
        let branch = if branch_bytes.is_empty() {
            None
        } else {
            let branch = match u8::decode(&mut branch_bytes)? {
                LEAF_TAG => PathStepBranch::Leaf(V::decode(&mut branch_bytes)?),
                NODE_TAG => PathStepBranch::Node {
                    children_hash: DataHash::decode(&mut branch_bytes)?,
                    aggregate: V::decode_aggregate(&mut branch_bytes)?,
                },
                _ => return Err(alloy_rlp::Error::Custom("unknown path step branch")),
            };
            ensure_consumed(branch_bytes)?;
            Some(branch)
        };

        ensure_consumed(bytes)?;
        Ok(Self { path, sibling, branch })
    }
}

impl<V: TrieValue> Path<V> {
    fn rlp_payload_length(&self) -> usize {
        let steps: usize = self.steps.iter().map(Encodable::length).sum();
        self.root.length() + V::aggregate_length(&self.aggregate) + list_length(steps)
    }
}

impl<V: TrieValue> Encodable for Path<V> {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        self.root.encode(out);
        V::encode_aggregate(&self.aggregate, out);
        self.steps.encode(out);
    }

    fn length(&self) -> usize {
        list_length(self.rlp_payload_length())
    }
}

impl<V: TrieValue> Decodable for Path<V> {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let mut bytes = Header::decode_bytes(buf, true)?;
        let root = DataHash::decode(&mut bytes)?;
        let aggregate = V::decode_aggregate(&mut bytes)?;
        let steps = Vec::<PathStep<V>>::decode(&mut bytes)?;
        ensure_consumed(bytes)?;
        Ok(Self { root, aggregate, steps })
    }
}

fn ensure_consumed(bytes: &[u8]) -> alloy_rlp::Result<()> {
    if bytes.is_empty() { Ok(()) } else { Err(alloy_rlp::Error::UnexpectedLength) }
}
