use crate::header::Header;
use crate::tx::Transaction;
use serde::{Deserialize, Serialize};
use ufo_hashes::Hash;

/// A UFO block: a header plus its ordered transaction list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Returns the block content hash (the header hash).
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }
}
