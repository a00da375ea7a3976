use crate::block::Block;
use crate::constants::SEQUENCE_FINAL;
use crate::header::Header;
use crate::tx::{OutPoint, Transaction, TxIn, TxOut};
use ufo_hashes::ZERO_HASH;
use ufo_merkle::calc_merkle_root;

/// Payload embedded in the coinbase of every network's genesis block.
pub const GENESIS_COINBASE_PAYLOAD: &str = "2 january 2014";

const OP_0: u8 = 0x00;
const OP_CHECKSIG: u8 = 0xac;

/// Appends a minimally-encoded script integer push.
fn push_script_num(script: &mut Vec<u8>, value: u64) {
    let mut bytes = Vec::with_capacity(8);
    let mut v = value;
    while v > 0 {
        bytes.push((v & 0xff) as u8);
        v >>= 8;
    }
    // A set high bit would flip the sign under script-number rules.
    if bytes.last().is_some_and(|last| last & 0x80 != 0) {
        bytes.push(0);
    }
    push_data(script, &bytes);
}

/// Appends a direct data push. Genesis scripts only ever push short payloads,
/// so the single-byte length opcode always suffices.
fn push_data(script: &mut Vec<u8>, data: &[u8]) {
    debug_assert!(data.len() < 0x4c);
    script.push(data.len() as u8);
    script.extend_from_slice(data);
}

/// Builds a genesis block from scratch: a single coinbase transaction carrying
/// `payload` in its input script and paying `reward` to `output_script`, wrapped
/// in a header whose previous-block reference is the zero hash.
///
/// This is a total function; it derives the merkle root but asserts nothing
/// about it. Pinning derived hashes against expected constants is the caller's
/// job (see the per-network params constructors).
pub fn create_genesis_block(
    payload: &str,
    output_script: Vec<u8>,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: u64,
) -> Block {
    let mut signature_script = Vec::with_capacity(payload.len() + 8);
    // The original client embedded the initial difficulty limit and a height-style
    // marker before the payload; every genesis since carries the same framing.
    push_script_num(&mut signature_script, 486604799);
    push_script_num(&mut signature_script, 4);
    push_data(&mut signature_script, payload.as_bytes());

    let coinbase = Transaction {
        version: 1,
        inputs: vec![TxIn { previous_outpoint: OutPoint::null(), signature_script, sequence: SEQUENCE_FINAL }],
        outputs: vec![TxOut { value: reward, script_public_key: output_script }],
        lock_time: 0,
    };

    let hash_merkle_root = calc_merkle_root(std::iter::once(coinbase.id()));
    let header = Header { version, hash_prev_block: ZERO_HASH, hash_merkle_root, time, bits, nonce };
    Block { header, transactions: vec![coinbase] }
}

/// Builds a genesis block with the fixed default payload and an unspendable
/// `OP_0 OP_CHECKSIG` output script. The three networks differ only in the five
/// scalars passed here.
pub fn create_default_genesis_block(time: u32, nonce: u32, bits: u32, version: i32, reward: u64) -> Block {
    create_genesis_block(GENESIS_COINBASE_PAYLOAD, vec![OP_0, OP_CHECKSIG], time, nonce, bits, version, reward)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_is_deterministic() {
        let a = create_default_genesis_block(1296688602, 3, 0x207fffff, 1, 0);
        let b = create_default_genesis_block(1296688602, 3, 0x207fffff, 1, 0);
        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_genesis_shape() {
        let genesis = create_default_genesis_block(1388681920, 1671824, 0x1e0ffff0, 1, 0);
        assert_eq!(genesis.header.hash_prev_block, ZERO_HASH);
        assert_eq!(genesis.transactions.len(), 1);

        let coinbase = &genesis.transactions[0];
        assert!(coinbase.is_coinbase());
        assert_eq!(coinbase.outputs.len(), 1);
        assert_eq!(coinbase.outputs[0].script_public_key, vec![OP_0, OP_CHECKSIG]);

        // Framing: push4(486604799) push1(4) push14(payload).
        let expected_script: Vec<u8> = [
            &[0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04, 0x0e][..],
            GENESIS_COINBASE_PAYLOAD.as_bytes(),
        ]
        .concat();
        assert_eq!(coinbase.inputs[0].signature_script, expected_script);
    }

    #[test]
    fn test_merkle_root_is_the_coinbase_id() {
        let genesis = create_default_genesis_block(1388678813, 616291, 0x1e0ffff0, 1, 0);
        assert_eq!(genesis.header.hash_merkle_root, genesis.transactions[0].id());
    }

    #[test]
    fn test_reward_flows_to_the_output() {
        let genesis = create_default_genesis_block(1296688602, 3, 0x207fffff, 1, 5000);
        assert_eq!(genesis.transactions[0].outputs[0].value, 5000);
    }
}
