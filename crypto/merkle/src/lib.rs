use ufo_hashes::{DoubleSha256, Hash, ZERO_HASH};

/// Computes the merkle root over an ordered list of transaction ids.
///
/// Pairing follows the legacy rule: an odd node at any level is paired with a copy
/// of itself. A single leaf is its own root, and an empty list maps to the zero hash.
pub fn calc_merkle_root(hashes: impl ExactSizeIterator<Item = Hash>) -> Hash {
    let mut level: Vec<Hash> = hashes.collect();
    if level.is_empty() {
        return cold_path_empty();
    }
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            let last = *level.last().unwrap();
            level.push(last);
        }
        level = level.chunks_exact(2).map(|pair| merkle_hash(pair[0], pair[1])).collect();
    }
    level[0]
}

/// Hashes an inner merkle node from its two children.
pub fn merkle_hash(left: Hash, right: Hash) -> Hash {
    let mut hasher = DoubleSha256::new();
    hasher.update(left).update(right);
    hasher.finalize()
}

#[inline(never)]
#[cold]
fn cold_path_empty() -> Hash {
    ZERO_HASH
}
