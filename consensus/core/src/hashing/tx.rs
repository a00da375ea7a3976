use super::HasherExtensions;
use crate::tx::{Transaction, TransactionId};
use ufo_hashes::DoubleSha256;

/// Returns the transaction id: double-SHA256 over the legacy (pre-witness) wire
/// encoding. This subsystem only ever hashes coinbase-style transactions, which
/// carry no witness data.
pub fn id(tx: &Transaction) -> TransactionId {
    let mut hasher = DoubleSha256::new();
    hasher.write_i32_le(tx.version).write_var_int(tx.inputs.len() as u64);
    for input in tx.inputs.iter() {
        hasher
            .update(input.previous_outpoint.txid)
            .write_u32_le(input.previous_outpoint.index)
            .write_var_bytes(&input.signature_script)
            .write_u32_le(input.sequence);
    }
    hasher.write_var_int(tx.outputs.len() as u64);
    for output in tx.outputs.iter() {
        hasher.write_u64_le(output.value).write_var_bytes(&output.script_public_key);
    }
    hasher.write_u32_le(tx.lock_time);
    hasher.finalize()
}
