use super::HasherExtensions;
use crate::header::Header;
use ufo_hashes::{DoubleSha256, Hash};

/// Returns the header content hash: double-SHA256 over the 80-byte wire encoding.
pub fn hash(header: &Header) -> Hash {
    let mut hasher = DoubleSha256::new();
    hasher
        .write_i32_le(header.version)
        .update(header.hash_prev_block)
        .update(header.hash_merkle_root)
        .write_u32_le(header.time)
        .write_u32_le(header.bits)
        .write_u32_le(header.nonce);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ufo_hashes::ZERO_HASH;

    fn sample_header() -> Header {
        Header { version: 1, hash_prev_block: ZERO_HASH, hash_merkle_root: ZERO_HASH, time: 1296688602, bits: 0x207fffff, nonce: 3 }
    }

    #[test]
    fn test_header_hash_is_deterministic() {
        assert_eq!(hash(&sample_header()), hash(&sample_header()));
    }

    #[test]
    fn test_every_field_affects_the_hash() {
        let base = hash(&sample_header());
        let mut header = sample_header();
        header.version = 2;
        assert_ne!(base, hash(&header));

        let mut header = sample_header();
        header.time += 1;
        assert_ne!(base, hash(&header));

        let mut header = sample_header();
        header.bits = 0x1e0ffff0;
        assert_ne!(base, hash(&header));

        let mut header = sample_header();
        header.nonce += 1;
        assert_ne!(base, hash(&header));
    }
}
