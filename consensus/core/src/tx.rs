use crate::hashing;
use serde::{Deserialize, Serialize};
use ufo_hashes::{Hash, ZERO_HASH};

/// Represents the id of a UFO transaction
pub type TransactionId = Hash;

/// Represents a reference to a UFO transaction output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: TransactionId,
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint used by coinbase inputs (no previous output exists).
    pub const fn null() -> Self {
        Self { txid: ZERO_HASH, index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX && self.txid.is_zero()
    }
}

/// Represents a UFO transaction input
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub previous_outpoint: OutPoint,
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

/// Represents a UFO transaction output
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub value: u64,
    pub script_public_key: Vec<u8>,
}

/// Represents a UFO transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Computes the transaction id over the legacy wire encoding.
    pub fn id(&self) -> TransactionId {
        hashing::tx::id(self)
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_outpoint.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEQUENCE_FINAL;

    #[test]
    fn test_null_outpoint() {
        assert!(OutPoint::null().is_null());
        assert!(!OutPoint { txid: ZERO_HASH, index: 0 }.is_null());
    }

    #[test]
    fn test_coinbase_detection() {
        let coinbase = Transaction {
            version: 1,
            inputs: vec![TxIn { previous_outpoint: OutPoint::null(), signature_script: vec![0x51], sequence: SEQUENCE_FINAL }],
            outputs: vec![TxOut { value: 0, script_public_key: vec![] }],
            lock_time: 0,
        };
        assert!(coinbase.is_coinbase());

        let mut spend = coinbase.clone();
        spend.inputs[0].previous_outpoint = OutPoint { txid: coinbase.id(), index: 0 };
        assert!(!spend.is_coinbase());
    }
}
