/// Number of base currency units per coin.
pub const COIN: u64 = 100_000_000;

/// Sequence value marking a transaction input as final.
pub const SEQUENCE_FINAL: u32 = u32::MAX;
