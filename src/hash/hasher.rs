use super::{DataHash, HashAlgorithm};
use arrayvec::ArrayVec;
use core::fmt;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// Incremental hasher for any supported [`HashAlgorithm`].
#[derive(Clone)]
pub enum DataHasher {
    /// SHA-256 state.
    Sha256(Sha256),
    /// SHA-224 state.
    Sha224(Sha224),
    /// SHA-384 state.
    Sha384(Sha384),
    /// SHA-512 state.
    Sha512(Sha512),
}

impl fmt::Debug for DataHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataHasher").field(&self.algorithm()).finish()
    }
}

impl Default for DataHasher {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl DataHasher {
    /// Creates a fresh hasher for the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Sha224 => Self::Sha224(Sha224::new()),
            HashAlgorithm::Sha384 => Self::Sha384(Sha384::new()),
            HashAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
        }
    }

    /// Returns the algorithm of this hasher.
    pub const fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Sha256(_) => HashAlgorithm::Sha256,
            Self::Sha224(_) => HashAlgorithm::Sha224,
            Self::Sha384(_) => HashAlgorithm::Sha384,
            Self::Sha512(_) => HashAlgorithm::Sha512,
        }
    }

    /// Feeds bytes into the hasher.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        let data = data.as_ref();
        match self {
            Self::Sha256(h) => h.update(data),
            Self::Sha224(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    /// Feeds bytes into the hasher, builder style.
    #[must_use]
    pub fn chain(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data);
        self
    }

    /// Consumes the hasher and returns the digest.
    pub fn digest(self) -> DataHash {
        let algorithm = self.algorithm();
        let mut data = ArrayVec::<u8, { super::MAX_DIGEST_LEN }>::new();
        match self {
            Self::Sha256(h) => data.extend(h.finalize()),
            Self::Sha224(h) => data.extend(h.finalize()),
            Self::Sha384(h) => data.extend(h.finalize()),
            Self::Sha512(h) => data.extend(h.finalize()),
        }
        DataHash::from_parts(algorithm, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    #[test]
    fn sha256_known_answer() {
        let hash = DataHasher::new(HashAlgorithm::Sha256).chain(b"abc").digest();
        assert_eq!(
            hash.data(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn digest_length_matches_algorithm() {
        for algorithm in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha224,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            let hash = DataHasher::new(algorithm).chain([0u8, 0]).digest();
            assert_eq!(hash.algorithm(), algorithm);
            assert_eq!(hash.data().len(), algorithm.output_len());
        }
    }

    #[test]
    fn empty_children_digests() {
        let digest = |algorithm| DataHasher::new(algorithm).chain([0u8, 0]).digest();
        assert_eq!(
            digest(HashAlgorithm::Sha224).data(),
            hex!("ce415cdb385b7a540779f1ed33ae41bac19ac1e55370ac9bc454586d")
        );
        assert_eq!(
            digest(HashAlgorithm::Sha256).data(),
            hex!("96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7")
        );
    }
}
