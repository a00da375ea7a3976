use crate::hashing;
use serde::{Deserialize, Serialize};
use ufo_hashes::Hash;

/// A UFO block header. The content hash is derived, not stored: it is recomputed
/// from the 80-byte wire encoding on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: i32,
    pub hash_prev_block: Hash,
    pub hash_merkle_root: Hash,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    /// Returns the header content hash.
    pub fn hash(&self) -> Hash {
        hashing::header::hash(self)
    }
}
