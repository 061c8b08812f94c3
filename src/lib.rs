#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

extern crate alloc;

mod arena;

mod error;
pub use error::TrieError;

pub mod hash;
pub use hash::{DataHash, HashAlgorithm};

mod path;
pub use path::{CommonPath, TriePath};

mod value;
pub use value::TrieValue;

pub mod nodes;

mod tree;
pub use tree::SparseMerkleTree;

mod root;
pub use root::RootNode;

pub mod proof;
pub use proof::{Path, PathStep, PathStepBranch, Sibling, VerificationResult};

mod sum;
pub use sum::{SparseMerkleSumTree, SumLeaf, SumPath, SumPathStep, SumRootNode};

#[cfg(feature = "serde")]
pub mod serde;

/// Root hash of an empty plain trie hashed with SHA-256.
pub const EMPTY_ROOT_HASH: alloy_primitives::B256 =
    alloy_primitives::b256!("96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7");
