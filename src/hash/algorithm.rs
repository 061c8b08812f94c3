use crate::TrieError;
use core::fmt;

/// Digest algorithm selected by its network identifier.
///
/// Identifiers are the ones carried in the first two bytes of a hash imprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(derive_arbitrary::Arbitrary, proptest_derive::Arbitrary))]
pub enum HashAlgorithm {
    /// SHA-256, the network default.
    #[default]
    Sha256,
    /// SHA-224.
    Sha224,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Identifier reserved for RIPEMD-160, which this crate does not implement.
    pub const RIPEMD160_ID: u16 = 4;

    /// Returns the network identifier of the algorithm.
    #[inline]
    pub const fn id(self) -> u16 {
        match self {
            Self::Sha256 => 0,
            Self::Sha224 => 1,
            Self::Sha384 => 2,
            Self::Sha512 => 3,
        }
    }

    /// Returns the conventional algorithm name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha224 => "SHA-224",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Returns the digest length in bytes.
    #[inline]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl TryFrom<u16> for HashAlgorithm {
    type Error = TrieError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Sha256),
            1 => Ok(Self::Sha224),
            2 => Ok(Self::Sha384),
            3 => Ok(Self::Sha512),
            other => Err(TrieError::UnsupportedHashAlgorithm(other)),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
