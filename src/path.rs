use alloc::vec::Vec;
use alloy_rlp::{BufMut, Decodable, Encodable, Header};
use core::fmt;
use derive_more::{Deref, From};
use num_bigint::BigUint;

/// A sentinel-encoded trie path.
///
/// The highest set bit is a sentinel marking where the key ends, so leading zero bits of the key
/// survive. Descent consumes the key from the low end: bit `0` picks the child at the current
/// depth. The root path is `1`, a sentinel with no key bits.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct TriePath(#[cfg_attr(feature = "serde", serde(with = "crate::serde::decimal"))] BigUint);

impl fmt::Debug for TriePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TriePath({:#b})", self.0)
    }
}

impl fmt::Display for TriePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for TriePath {
    #[inline]
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for TriePath {
    #[inline]
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<TriePath> for BigUint {
    #[inline]
    fn from(path: TriePath) -> Self {
        path.0
    }
}

impl TriePath {
    /// Returns the root path, a bare sentinel.
    #[inline]
    pub fn root() -> Self {
        Self(BigUint::from(1u8))
    }

    /// Builds a path from key bits in descent order, appending the sentinel above them.
    pub fn from_key_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut path = BigUint::default();
        let mut len = 0;
        for bit in bits {
            path.set_bit(len, bit);
            len += 1;
        }
        path.set_bit(len, true);
        Self(path)
    }

    /// Decodes a path from its minimal big-endian bytes.
    #[inline]
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Returns `true` if this is the root path.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.bits() == 1
    }

    /// Returns `true` if the path has no sentinel at all.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.bits() == 0
    }

    /// Returns the number of key bits below the sentinel.
    #[inline]
    pub fn len(&self) -> u64 {
        self.0.bits().saturating_sub(1)
    }

    /// Returns `true` if the path has no key bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the next descent step from this path goes right.
    #[inline]
    pub fn is_right(&self) -> bool {
        self.0.bit(0)
    }

    /// Drops the lowest `n` bits, the ones already consumed by descent.
    #[inline]
    pub fn skip(&self, n: u64) -> Self {
        Self(&self.0 >> n)
    }

    /// Returns the minimal big-endian bytes of the path, with zero encoded as a single `0x00`.
    ///
    /// This is the form hashed into leaf and node digests.
    #[inline]
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Prepends this path's key bits, in descent order, to the bits of `suffix`.
    ///
    /// Returns `None` if this path has no sentinel.
    pub fn with_suffix(&self, suffix: &Self) -> Option<Self> {
        let len = self.0.bits().checked_sub(1)?;
        let mask = (BigUint::from(1u8) << len) - 1u8;
        Some(Self((&suffix.0 << len) | (&self.0 & mask)))
    }
}

/// Longest common prefix of two paths, read from the root end.
///
/// `path` carries the shared key bits under a new sentinel and `length` counts them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonPath {
    path: TriePath,
    length: u64,
}

impl CommonPath {
    /// Computes the common prefix of two paths.
    pub fn new(a: &TriePath, b: &TriePath) -> Self {
        let (a, b) = (&a.0, &b.0);
        let mut length = 0;
        while a.bits() > length + 1 && b.bits() > length + 1 && a.bit(length) == b.bit(length) {
            length += 1;
        }
        let one = BigUint::from(1u8);
        let low = a & ((&one << length) - 1u8);
        Self { path: TriePath((one << length) | low), length }
    }

    /// Returns the shared prefix as a sentinel-encoded path.
    #[inline]
    pub const fn path(&self) -> &TriePath {
        &self.path
    }

    /// Returns the number of shared key bits.
    #[inline]
    pub const fn length(&self) -> u64 {
        self.length
    }
}

pub(crate) fn encode_biguint(value: &BigUint, out: &mut dyn BufMut) {
    minimal_bytes(value).as_slice().encode(out)
}

pub(crate) fn biguint_length(value: &BigUint) -> usize {
    minimal_bytes(value).as_slice().length()
}

pub(crate) fn decode_biguint(buf: &mut &[u8]) -> alloy_rlp::Result<BigUint> {
    let bytes = Header::decode_bytes(buf, false)?;
    if bytes.first() == Some(&0) {
        return Err(alloy_rlp::Error::LeadingZero);
    }
    Ok(BigUint::from_bytes_be(bytes))
}

// RLP integers encode zero as the empty string.
fn minimal_bytes(value: &BigUint) -> Vec<u8> {
    if value.bits() == 0 { Vec::new() } else { value.to_bytes_be() }
}

impl Encodable for TriePath {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        encode_biguint(&self.0, out)
    }

    #[inline]
    fn length(&self) -> usize {
        biguint_length(&self.0)
    }
}

impl Decodable for TriePath {
    #[inline]
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        decode_biguint(buf).map(Self)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for TriePath {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(1usize..=256)?;
        let bits = (0..len).map(|_| u.arbitrary()).collect::<arbitrary::Result<Vec<bool>>>()?;
        Ok(Self::from_key_bits(bits))
    }
}

#[cfg(feature = "arbitrary")]
impl proptest::arbitrary::Arbitrary for TriePath {
    type Parameters = ();
    type Strategy = proptest::strategy::Map<
        proptest::collection::VecStrategy<proptest::bool::Any>,
        fn(Vec<bool>) -> Self,
    >;

    fn arbitrary_with((): ()) -> Self::Strategy {
        use proptest::strategy::Strategy;
        proptest::collection::vec(proptest::bool::ANY, 1..=256)
            .prop_map(Self::from_key_bits as fn(Vec<bool>) -> Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    fn common(a: u64, b: u64) -> (u64, u64) {
        let common = CommonPath::new(&a.into(), &b.into());
        (u64::try_from(&common.path().0).unwrap(), common.length())
    }

    #[test]
    fn common_prefix() {
        assert_eq!(common(0b11, 0b111101111), (0b11, 1));
        assert_eq!(common(0b111101111, 0b11), (0b11, 1));
        assert_eq!(common(0b110010000, 0b100010000), (0b10010000, 7));
        assert_eq!(common(0b110010000, 0b111100101), (0b1, 0));
        assert_eq!(common(0b1010, 0b1010), (0b1010, 3));
        assert_eq!(common(0b1, 0b1010), (0b1, 0));
    }

    #[test]
    fn common_prefix_of_prefix_is_prefix() {
        let (path, length) = common(0b10000000, 0b110010000);
        assert_eq!((path, length), (0b10000, 4));
        let (path, length) = common(0b1000, 0b10000000);
        assert_eq!((path, length), (0b1000, 3));
    }

    #[test]
    fn key_bits_roundtrip() {
        let path = TriePath::from_key_bits([false, false, false, false, true, false, false, true]);
        assert_eq!(path, TriePath::from(0b110010000u64));
        assert_eq!(path.len(), 8);
        assert!(!path.is_right());
        assert_eq!(TriePath::from_key_bits([]), TriePath::root());
    }

    #[test]
    fn skip_and_suffix() {
        let path = TriePath::from(0b110010000u64);
        let lower = CommonPath::new(&path, &TriePath::from(0b100010000u64));
        let upper = path.skip(lower.length());
        assert_eq!(upper, TriePath::from(0b11u64));
        assert_eq!(lower.path().with_suffix(&upper), Some(path));
        assert_eq!(TriePath::from(0u64).with_suffix(&upper), None);
    }

    #[test]
    fn minimal_encoding() {
        assert_eq!(TriePath::from(0u64).to_bytes_be(), [0x00]);
        assert_eq!(TriePath::root().to_bytes_be(), [0x01]);
        assert_eq!(TriePath::from(0b110010000u64).to_bytes_be(), hex!("0190"));
        assert_eq!(TriePath::from_bytes_be(&hex!("0190")), TriePath::from(0b110010000u64));
    }

    #[test]
    fn rlp_roundtrip() {
        for path in [0u64, 1, 0x7f, 0x80, 0b110010000, u64::MAX] {
            let path = TriePath::from(path);
            let encoded = alloy_rlp::encode(&path);
            assert_eq!(encoded.len(), path.length());
            assert_eq!(TriePath::decode(&mut &encoded[..]).unwrap(), path);
        }
        assert_eq!(alloy_rlp::encode(TriePath::from(0u64)), [0x80]);
        assert_eq!(
            TriePath::decode(&mut &hex!("820001")[..]),
            Err(alloy_rlp::Error::LeadingZero)
        );
    }

    #[test]
    fn display_is_decimal() {
        assert_eq!(alloc::format!("{}", TriePath::from(0b1011u64)), "11");
        assert_eq!(alloc::format!("{:?}", TriePath::from(0b1011u64)), "TriePath(0b1011)");
    }
}
