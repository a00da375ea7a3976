use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{Display, Formatter};
use std::str::{self, FromStr};

pub const HASH_SIZE: usize = 32;

/// A 32-byte block or transaction identifier.
///
/// Bytes are stored in internal (little-endian) order, exactly as produced by the
/// hash function. `Display` and `FromStr` use the conventional reversed hex form,
/// so `to_string`/`parse` round-trip the notation used in explorers and in the
/// hard-coded chain constants.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

/// The all-zero hash, used as the previous-block reference of a genesis block.
pub const ZERO_HASH: Hash = Hash([0u8; HASH_SIZE]);

impl Hash {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        let mut hex = [0u8; HASH_SIZE * 2];
        hex::encode_to_slice(reversed, &mut hex).expect("The output is exactly twice the size of the input");
        f.write_str(str::from_utf8(&hex).expect("hex is always valid UTF-8"))
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(hash_str: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(hash_str, &mut bytes)?;
        bytes.reverse();
        Ok(Hash(bytes))
    }
}

/// Streaming double-SHA256 hasher (`SHA256(SHA256(data))`), the digest used for
/// block headers and transaction ids.
#[derive(Clone, Default)]
pub struct DoubleSha256(Sha256);

impl DoubleSha256 {
    #[inline]
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    #[inline]
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.0.update(data.as_ref());
        self
    }

    #[inline]
    pub fn finalize(self) -> Hash {
        let first = self.0.finalize();
        let second = Sha256::digest(first);
        Hash(second.into())
    }

    /// One-shot convenience over a single byte slice.
    pub fn hash(data: impl AsRef<[u8]>) -> Hash {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_hash_basics() {
        let hash_str = "8e40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3af";
        let hash = Hash::from_str(hash_str).unwrap();
        assert_eq!(hash_str, hash.to_string());
        let hash2 = Hash::from_str(hash_str).unwrap();
        assert_eq!(hash, hash2);

        let hash3 = Hash::from_str("8e40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3ab").unwrap();
        assert_ne!(hash2, hash3);

        let odd_str = "8e40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3a";
        let short_str = "8e40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3";

        assert_eq!(Hash::from_str(odd_str), Err(hex::FromHexError::OddLength));
        assert_eq!(Hash::from_str(short_str), Err(hex::FromHexError::InvalidStringLength));
    }

    #[test]
    fn test_display_is_byte_reversed() {
        // The last stored byte is the first displayed pair.
        let mut bytes = [0u8; HASH_SIZE];
        bytes[31] = 0xab;
        bytes[0] = 0x01;
        let hash = Hash::from_bytes(bytes);
        let displayed = hash.to_string();
        assert!(displayed.starts_with("ab"));
        assert!(displayed.ends_with("01"));
        assert_eq!(hash, Hash::from_str(&displayed).unwrap());
    }

    #[test]
    fn test_double_sha256_known_vector() {
        // SHA256d of the empty string, in reversed display order.
        let hash = DoubleSha256::hash([]);
        assert_eq!(hash.to_string(), "56944c5d3f98413ef45cf54545538103cc9f298e0575820ad3591376e2e0f65d");
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut hasher = DoubleSha256::new();
        hasher.update(b"chain").update(b"params");
        assert_eq!(hasher.finalize(), DoubleSha256::hash(b"chainparams"));
    }

    #[test]
    fn test_zero_hash() {
        assert!(ZERO_HASH.is_zero());
        assert!(!DoubleSha256::hash([]).is_zero());
    }
}
