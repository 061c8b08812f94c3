use super::HashAlgorithm;
use crate::TrieError;
use alloc::vec::Vec;
use alloy_primitives::{B256, hex};
use alloy_rlp::{BufMut, Decodable, Encodable, Header, length_of_length};
use arrayvec::ArrayVec;
use core::fmt;

/// Longest digest any supported algorithm produces.
pub const MAX_DIGEST_LEN: usize = 64;

/// A digest together with the algorithm that produced it.
///
/// The digest length always matches [`HashAlgorithm::output_len`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DataHash {
    algorithm: HashAlgorithm,
    data: ArrayVec<u8, MAX_DIGEST_LEN>,
}

impl fmt::Debug for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.algorithm, hex::encode(&self.data))
    }
}

impl fmt::Display for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.imprint()))
    }
}

impl AsRef<[u8]> for DataHash {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<B256> for DataHash {
    /// Wraps a 32-byte word as a SHA-256 digest.
    #[inline]
    fn from(word: B256) -> Self {
        let mut data = ArrayVec::new();
        data.extend(word.0);
        Self { algorithm: HashAlgorithm::Sha256, data }
    }
}

impl DataHash {
    /// Creates a digest, checking that its length matches the algorithm.
    pub fn new(algorithm: HashAlgorithm, data: &[u8]) -> Result<Self, TrieError> {
        if data.len() != algorithm.output_len() {
            return Err(TrieError::InvalidImprint("digest length does not match hash algorithm"));
        }
        let mut buf = ArrayVec::new();
        buf.try_extend_from_slice(data)
            .map_err(|_| TrieError::InvalidImprint("digest too long"))?;
        Ok(Self { algorithm, data: buf })
    }

    /// Decodes an imprint: the big-endian algorithm id followed by the digest.
    pub fn from_imprint(imprint: &[u8]) -> Result<Self, TrieError> {
        let [hi, lo, data @ ..] = imprint else {
            return Err(TrieError::InvalidImprint("imprint too short"));
        };
        let algorithm = HashAlgorithm::try_from(u16::from_be_bytes([*hi, *lo]))?;
        Self::new(algorithm, data)
    }

    /// Returns the algorithm that produced the digest.
    #[inline]
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the raw digest bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the imprint: the big-endian algorithm id followed by the digest.
    pub fn imprint(&self) -> Vec<u8> {
        let mut imprint = Vec::with_capacity(2 + self.data.len());
        imprint.extend_from_slice(&self.algorithm.id().to_be_bytes());
        imprint.extend_from_slice(&self.data);
        imprint
    }

    /// Returns the digest as a 32-byte word if it is a SHA-256 digest.
    pub fn as_b256(&self) -> Option<B256> {
        (self.algorithm == HashAlgorithm::Sha256).then(|| B256::from_slice(&self.data))
    }

    #[inline]
    pub(super) fn from_parts(
        algorithm: HashAlgorithm,
        data: ArrayVec<u8, MAX_DIGEST_LEN>,
    ) -> Self {
        Self { algorithm, data }
    }

    #[inline]
    fn imprint_len(&self) -> usize {
        2 + self.data.len()
    }
}

impl Encodable for DataHash {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: false, payload_length: self.imprint_len() }.encode(out);
        out.put_u16(self.algorithm.id());
        out.put_slice(&self.data);
    }

    fn length(&self) -> usize {
        let payload_length = self.imprint_len();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for DataHash {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let bytes = Header::decode_bytes(buf, false)?;
        Ok(Self::from_imprint(bytes)?)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DataHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.imprint()))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DataHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
        let imprint = hex::decode(s).map_err(serde::de::Error::custom)?;
        Self::from_imprint(&imprint).map_err(serde::de::Error::custom)
    }
}
