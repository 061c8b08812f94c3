//! Hash function collaborator: algorithm identifiers, digests and the incremental hasher.

mod algorithm;
pub use algorithm::HashAlgorithm;

mod data_hash;
pub use data_hash::{DataHash, MAX_DIGEST_LEN};

mod hasher;
pub use hasher::DataHasher;
