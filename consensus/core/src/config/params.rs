use crate::block::Block;
use crate::config::genesis::create_default_genesis_block;
use crate::network::NetworkType;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::str::FromStr;
use ufo_hashes::{Hash, ZERO_HASH};

/// Version-bits deployment identifiers. Each indexes a fixed slot in the
/// per-network deployment window table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deployment {
    /// Reserved deployment used only to test the version-bits machinery itself.
    TestDummy = 0,
    /// Relative lock-time deployment (sequence locks).
    Csv = 1,
    /// Segregated-witness-style deployment.
    Segwit = 2,
}

pub const DEPLOYMENT_COUNT: usize = 3;

impl Deployment {
    pub fn iter() -> impl Iterator<Item = Self> {
        [Deployment::TestDummy, Deployment::Csv, Deployment::Segwit].into_iter()
    }
}

/// Activation window of a single version-bits deployment.
///
/// A deployment is active for blocks whose median-time-past falls within
/// `[start_time, timeout)`. Two sentinels bypass the timed-voting path entirely:
/// [`DeploymentWindow::ALWAYS_ACTIVE`] and [`DeploymentWindow::NO_TIMEOUT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentWindow {
    /// Flag position (0-28) signaled in block version numbers.
    pub bit: u8,
    pub start_time: i64,
    pub timeout: i64,
}

impl DeploymentWindow {
    /// Sentinel start time: active from genesis, no voting ever happened.
    pub const ALWAYS_ACTIVE: i64 = -1;
    /// Sentinel timeout: the deployment never expires.
    pub const NO_TIMEOUT: i64 = i64::MAX;

    pub fn is_active(&self, median_time_past: i64) -> bool {
        if self.start_time == Self::ALWAYS_ACTIVE {
            return true;
        }
        median_time_past >= self.start_time && (self.timeout == Self::NO_TIMEOUT || median_time_past < self.timeout)
    }

    fn bounds(&self) -> (i64, i64) {
        let start = if self.start_time == Self::ALWAYS_ACTIVE { i64::MIN } else { self.start_time };
        (start, self.timeout)
    }

    fn overlaps(&self, other: &DeploymentWindow) -> bool {
        let (a_start, a_end) = self.bounds();
        let (b_start, b_end) = other.bounds();
        a_start < b_end && b_start < a_end
    }
}

/// Consensus-sensitive parameters. Changing one of these on a node would exclude
/// it from reaching consensus with unmodified peers on the same network.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsensusParams {
    pub subsidy_halving_interval: u64,
    /// Heights at which historical rule changes activated. Opaque milestones
    /// here; the validation engine gives them meaning.
    pub bip34_height: u64,
    pub bip34_hash: Hash,
    pub bip65_height: u64,
    pub bip66_height: u64,
    pub coin_fix_height: u64,
    pub hard_fork_one_height: u64,
    pub hard_fork_two_height: u64,
    pub hard_fork_two_a_height: u64,
    pub hard_fork_three_height: u64,
    pub hard_fork_four_height: u64,
    pub hard_fork_four_a_height: u64,
    /// Timestamp at which the NeoScrypt proof-of-work switch activated.
    pub neoscrypt_fork_time: i64,
    /// Hex-encoded public keys consumed opaquely by the alert and checkpoint
    /// verification paths.
    pub alert_key: &'static str,
    pub checkpoint_key: &'static str,
    /// Highest allowed proof-of-work target (the difficulty floor).
    pub pow_limit: Hash,
    /// Retarget timespan in seconds.
    pub pow_target_timespan: u64,
    /// Target block spacing in seconds.
    pub pow_target_spacing: u64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// Signaling blocks required within one confirmation window to lock in a
    /// deployment.
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: [DeploymentWindow; DEPLOYMENT_COUNT],
    /// Cumulative work the best known chain is expected to have at minimum.
    /// Opaque calibration constant.
    pub minimum_chain_work: Hash,
    /// Block under which ancestor signatures are assumed valid by default.
    /// Opaque calibration constant.
    pub default_assume_valid: Hash,
    pub hash_genesis_block: Hash,
}

/// Hard-coded (height, expected block hash) pairs used to reject deep alternate
/// histories. Heights strictly increase; violating that is a defect in the
/// constant table and fails construction fatally.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoints {
    entries: Vec<(u64, Hash)>,
}

impl Checkpoints {
    pub fn new(entries: Vec<(u64, Hash)>) -> Self {
        assert!(entries.windows(2).all(|pair| pair[0].0 < pair[1].0), "checkpoint heights must strictly increase");
        Self { entries }
    }

    pub fn hash_at(&self, height: u64) -> Option<Hash> {
        self.entries.iter().find(|(h, _)| *h == height).map(|(_, hash)| *hash)
    }

    pub fn last(&self) -> Option<(u64, Hash)> {
        self.entries.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u64, Hash)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Snapshot of observed chain activity, used to estimate sync progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainTxData {
    /// Unix timestamp of the last known transaction count.
    pub time: u64,
    /// Cumulative transaction count as of that timestamp.
    pub tx_count: u64,
    /// Estimated transactions per second after that timestamp.
    pub tx_rate: f64,
}

/// Encoding purposes a base58 version prefix can serve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressPurpose {
    PubkeyAddress,
    ScriptAddress,
    ScriptAddress2,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

/// Per-network byte prefixes prepended before base58 encoding. Fixed for the
/// network's lifetime and pairwise distinct, so a payload encoded for one
/// purpose never decodes as another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Base58Prefixes {
    pub pubkey_address: &'static [u8],
    pub script_address: &'static [u8],
    pub script_address2: &'static [u8],
    pub secret_key: &'static [u8],
    pub ext_public_key: &'static [u8],
    pub ext_secret_key: &'static [u8],
}

impl Base58Prefixes {
    pub fn prefix(&self, purpose: AddressPurpose) -> &'static [u8] {
        match purpose {
            AddressPurpose::PubkeyAddress => self.pubkey_address,
            AddressPurpose::ScriptAddress => self.script_address,
            AddressPurpose::ScriptAddress2 => self.script_address2,
            AddressPurpose::SecretKey => self.secret_key,
            AddressPurpose::ExtPublicKey => self.ext_public_key,
            AddressPurpose::ExtSecretKey => self.ext_secret_key,
        }
    }

    fn assert_distinct(&self) {
        let all = [self.pubkey_address, self.script_address, self.script_address2, self.secret_key, self.ext_public_key, self.ext_secret_key];
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(a, b, "base58 prefixes must be pairwise distinct");
            }
        }
    }
}

/// The complete immutable parameter profile of one network: consensus
/// thresholds, genesis block, checkpoints, seed lists, encoding prefixes and
/// policy flags. Built once per process by [`From<NetworkType>`] and thereafter
/// shared read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub net: NetworkType,
    pub consensus: ConsensusParams,
    /// Four-byte protocol message framing marker, unlikely to occur in normal data.
    pub message_start: [u8; 4],
    pub default_port: u16,
    /// Height after which old block data may be pruned.
    pub prune_after_height: u64,
    pub dns_seeds: &'static [&'static str],
    pub fixed_seeds: Vec<SocketAddr>,
    pub base58_prefixes: Base58Prefixes,
    /// Human-readable part of bech32-encoded addresses.
    pub bech32_hrp: &'static str,
    /// Reject transactions that do not follow standard-policy rules.
    pub require_standard: bool,
    /// Allow a local actor to mine blocks synchronously on demand (regtest only).
    pub mine_blocks_on_demand: bool,
    /// Run expensive self-consistency checks by default.
    pub default_consistency_checks: bool,
    pub checkpoints: Checkpoints,
    pub chain_tx_data: ChainTxData,
    pub genesis: Block,
}

impl Params {
    pub fn network_name(&self) -> String {
        self.net.to_string()
    }

    pub fn default_p2p_port(&self) -> u16 {
        self.net.default_p2p_port()
    }

    pub fn genesis_hash(&self) -> Hash {
        self.consensus.hash_genesis_block
    }

    pub fn deployment(&self, deployment: Deployment) -> &DeploymentWindow {
        &self.consensus.deployments[deployment as usize]
    }
}

impl From<NetworkType> for Params {
    fn from(value: NetworkType) -> Self {
        match value {
            NetworkType::Mainnet => mainnet_params(),
            NetworkType::Testnet => testnet_params(),
            NetworkType::Regtest => regtest_params(),
        }
    }
}

/// Merkle root shared by all three genesis blocks. The three genesis coinbase
/// transactions are byte-identical (only header scalars differ per network), so
/// they hash to the same id.
pub const GENESIS_MERKLE_ROOT: &str = "8207df3a28a5bfdcaba0c810e540123aaea8d067b745092849787169f5e77065";

fn hash_literal(hex: &str) -> Hash {
    Hash::from_str(hex).expect("invalid hard-coded hash literal")
}

/// Startup integrity check: a mismatch means the compiled-in constant tables are
/// internally inconsistent, so construction fails fatally rather than letting the
/// node run with a corrupted genesis identity.
fn assert_genesis_identity(genesis: &Block, expected_hash: &str) -> Hash {
    let hash = genesis.hash();
    assert_eq!(hash, hash_literal(expected_hash), "computed genesis hash disagrees with its pinned constant");
    assert_eq!(
        genesis.header.hash_merkle_root,
        hash_literal(GENESIS_MERKLE_ROOT),
        "computed genesis merkle root disagrees with its pinned constant"
    );
    hash
}

/// Deployments whose activation windows overlap must signal on distinct bits.
fn assert_no_bit_collisions(deployments: &[DeploymentWindow; DEPLOYMENT_COUNT]) {
    for (i, a) in deployments.iter().enumerate() {
        for b in deployments.iter().skip(i + 1) {
            if a.overlaps(b) {
                assert_ne!(a.bit, b.bit, "overlapping deployment windows may not share a version bit");
            }
        }
    }
}

fn fixed_seeds(addrs: &[[u8; 4]], port: u16) -> Vec<SocketAddr> {
    addrs.iter().map(|ip| SocketAddr::from((*ip, port))).collect()
}

pub fn mainnet_params() -> Params {
    let deployments = [
        // TestDummy: January 1, 2008 - December 31, 2008
        DeploymentWindow { bit: 28, start_time: 1199145601, timeout: 1230767999 },
        // Csv: Feb 1st, 2018 - Feb 1st, 2019
        DeploymentWindow { bit: 0, start_time: 1517443200, timeout: 1548979200 },
        // Segwit: Mar 1st, 2018 - Mar 1st, 2019
        DeploymentWindow { bit: 1, start_time: 1519862400, timeout: 1551398400 },
    ];
    assert_no_bit_collisions(&deployments);

    let genesis = create_default_genesis_block(1388681920, 1671824, 0x1e0ffff0, 1, 0);
    let hash_genesis_block = assert_genesis_identity(&genesis, "ba1d39b4928ab03d813d952daf65fb7797fcf538a9c1b8274f4edc8557722d13");

    let base58_prefixes = Base58Prefixes {
        pubkey_address: &[27],
        script_address: &[5],
        script_address2: &[68],
        secret_key: &[155],
        ext_public_key: &[0x04, 0x88, 0xB2, 0x1E],
        ext_secret_key: &[0x04, 0x88, 0xAD, 0xE4],
    };
    base58_prefixes.assert_distinct();

    Params {
        net: NetworkType::Mainnet,
        consensus: ConsensusParams {
            subsidy_halving_interval: 400_000,
            bip34_height: 266_000,
            bip34_hash: hash_literal("cfbf5f2e1cad950d5c36373be816aef9b3ad0cf2cdac1a9fa2547cf866be1865"),
            // 36c9dce9da620d445dd628b302384d73a05d66655e020c69b9eee3481cccb8db
            bip65_height: 1_205_150,
            bip66_height: 1_205_150,
            coin_fix_height: 15_000,
            hard_fork_one_height: 33_479,
            hard_fork_two_height: 160_997,
            hard_fork_two_a_height: 171_900,
            hard_fork_three_height: 266_000,
            hard_fork_four_height: 1_182_000,
            hard_fork_four_a_height: 1_220_000,
            neoscrypt_fork_time: 1414446393,
            alert_key: "04b48eaf546f46221b6b3ee0806f7652763ab5e9774125636ef539f144e98d176e02274600ed6b605cfcc199aba8f7d2228d2cc6b9b28d6fa244b74f7540c22c2a",
            checkpoint_key: "044318157bd82b6e17926c8804eecf73140f416c34ccc2237c56614d081dce88a98293b40891d801d16a2899defe7869706d7ec55118ef8f06c683cfdc6b6a8c58",
            pow_limit: hash_literal("00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_target_timespan: 24 * 60 * 60,
            pow_target_spacing: 90,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 10_080, // 75% of the confirmation window
            miner_confirmation_window: 13_440,
            deployments,
            minimum_chain_work: hash_literal("0000000000000000000000000000000000000000000000000022c5539b22f8d6"),
            default_assume_valid: hash_literal("e4d06a126e75abe493b1d07e3c2112a9121ba9e9d66ec82da53acd48196b05fc"), // height 1314322
            hash_genesis_block,
        },
        message_start: [0xfc, 0xd9, 0xb7, 0xdd],
        default_port: 9887,
        prune_after_height: 100_000,
        dns_seeds: &["dns.seed1.ufocoin.net", "dns.seed2.ufocoin.net", "dns.dnsseed.lowecraft.it", "dns.dnsseed.ufocoinnode.com"],
        fixed_seeds: fixed_seeds(
            &[[89, 163, 224, 198], [144, 76, 118, 44], [51, 15, 86, 61], [167, 114, 118, 204], [95, 216, 76, 20], [185, 14, 30, 78]],
            9887,
        ),
        base58_prefixes,
        bech32_hrp: "uf",
        require_standard: true,
        mine_blocks_on_demand: false,
        default_consistency_checks: false,
        checkpoints: Checkpoints::new(vec![
            (4500, hash_literal("5755857a8055c732d5236b0526afcb9b92f1291c87ed3c655c6d79df6b9d3dd4")),
            (9999, hash_literal("808bf9bdf3c7e777ad8008455f6849001bc264910de86e01a0bf1d83ed362aba")),
            (20000, hash_literal("e14a9e1d1cd79fa0385d3af7eac36ed96f29d7c0205b62eb82c4e7c5b043c6d1")),
            (33349, hash_literal("cf9ea4ab6589b0ac0cc34fca94ea3c24842ac80f43724d0c8d89ece0aa0a5081")),
            (1079136, hash_literal("e171e30fa1ab3428f079a165a22f5cfd3529fb0e76bd0e7213a3ac9a09bd5571")),
            (1213947, hash_literal("a4c7b570fbf1d755c327ff9c3d98e9d5433e453f9ecade20a8e4852bd124eb8f")),
            (1246467, hash_literal("a0e2460c7e644cbb6c4bc01088094524fdf90892aa42d22f9dd9b6e3c981ca6f")),
            (1314322, hash_literal("e4d06a126e75abe493b1d07e3c2112a9121ba9e9d66ec82da53acd48196b05fc")),
        ]),
        // Data as of block e4d06a126e75abe493b1d07e3c2112a9121ba9e9d66ec82da53acd48196b05fc (height 1314322).
        chain_tx_data: ChainTxData { time: 1526634445, tx_count: 1627450, tx_rate: 0.001 },
        genesis,
    }
}

pub fn testnet_params() -> Params {
    let deployments = [
        // TestDummy: January 1, 2008 - December 31, 2008
        DeploymentWindow { bit: 28, start_time: 1199145601, timeout: 1230767999 },
        // Csv: Jan 26th, 2018 - Jan 26th, 2019
        DeploymentWindow { bit: 0, start_time: 1516924800, timeout: 1548460800 },
        // Segwit: Mar 1st, 2018 - Mar 1st, 2019
        DeploymentWindow { bit: 1, start_time: 1519862400, timeout: 1551398400 },
    ];
    assert_no_bit_collisions(&deployments);

    let genesis = create_default_genesis_block(1388678813, 616291, 0x1e0ffff0, 1, 0);
    let hash_genesis_block = assert_genesis_identity(&genesis, "45b4e55bddf20dfeb69ef2a35dd36f58dd45d5f4582c1a4ca1c1b78eef8f8c37");

    let base58_prefixes = Base58Prefixes {
        pubkey_address: &[111],
        script_address: &[196],
        script_address2: &[130],
        secret_key: &[239],
        ext_public_key: &[0x04, 0x35, 0x87, 0xCF],
        ext_secret_key: &[0x04, 0x35, 0x83, 0x94],
    };
    base58_prefixes.assert_distinct();

    Params {
        net: NetworkType::Testnet,
        consensus: ConsensusParams {
            subsidy_halving_interval: 400_000,
            bip34_height: 0,
            bip34_hash: hash_literal("45b4e55bddf20dfeb69ef2a35dd36f58dd45d5f4582c1a4ca1c1b78eef8f8c37"),
            bip65_height: 0,
            bip66_height: 0,
            coin_fix_height: 0,
            hard_fork_one_height: 0,
            hard_fork_two_height: 1,
            hard_fork_two_a_height: 1,
            hard_fork_three_height: 1,
            hard_fork_four_height: 1100,
            hard_fork_four_a_height: 1500,
            neoscrypt_fork_time: 1506816000,
            alert_key: "0452c73ce2a53acd207b5c7f643c80d1bae3b13263b443762ef772de30c7fb7fcc3b7b4b1b19d025e730a0beb6245cacb668118e34a2b0fed2dd8c8fa44a8357d6",
            checkpoint_key: "04d0dd87fbb6ac3483f57c9cd010c8fa804219ec641fad97a9cbb31605327b15fa9c40232fa214f02b80883955f7b14e49dbd03e44d45123f06ee08b911a08be33",
            pow_limit: hash_literal("00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_target_timespan: 24 * 60 * 60,
            pow_target_spacing: 90,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 375, // 75% of the confirmation window
            miner_confirmation_window: 500,
            deployments,
            minimum_chain_work: hash_literal("0000000000000000000000000000000000000000000000000000000000100010"),
            default_assume_valid: hash_literal("45b4e55bddf20dfeb69ef2a35dd36f58dd45d5f4582c1a4ca1c1b78eef8f8c37"),
            hash_genesis_block,
        },
        message_start: [0xfb, 0xc0, 0xb8, 0xdb],
        default_port: 19887,
        prune_after_height: 1000,
        dns_seeds: &["testnet-seed.ufocoin.net"],
        fixed_seeds: fixed_seeds(&[[144, 76, 118, 45], [51, 15, 86, 62]], 19887),
        base58_prefixes,
        bech32_hrp: "ut",
        require_standard: false,
        mine_blocks_on_demand: false,
        default_consistency_checks: false,
        checkpoints: Checkpoints::new(vec![(
            0,
            hash_literal("45b4e55bddf20dfeb69ef2a35dd36f58dd45d5f4582c1a4ca1c1b78eef8f8c37"),
        )]),
        chain_tx_data: ChainTxData { time: 1388678813, tx_count: 1, tx_rate: 0.001 },
        genesis,
    }
}

pub fn regtest_params() -> Params {
    // Regtest bypasses timed voting entirely so a local harness can activate
    // rules immediately.
    let deployments = [
        DeploymentWindow { bit: 28, start_time: 0, timeout: DeploymentWindow::NO_TIMEOUT },
        DeploymentWindow { bit: 0, start_time: 0, timeout: DeploymentWindow::NO_TIMEOUT },
        DeploymentWindow { bit: 1, start_time: DeploymentWindow::ALWAYS_ACTIVE, timeout: DeploymentWindow::NO_TIMEOUT },
    ];
    assert_no_bit_collisions(&deployments);

    let genesis = create_default_genesis_block(1296688602, 3, 0x207fffff, 1, 0);
    let hash_genesis_block = assert_genesis_identity(&genesis, "a482cf37ea99d8c74f62e28903208bfbc12901b35738feff20fdf7e3b671afb7");

    let base58_prefixes = Base58Prefixes {
        pubkey_address: &[111],
        script_address: &[196],
        script_address2: &[130],
        secret_key: &[239],
        ext_public_key: &[0x04, 0x35, 0x87, 0xCF],
        ext_secret_key: &[0x04, 0x35, 0x83, 0x94],
    };
    base58_prefixes.assert_distinct();

    Params {
        net: NetworkType::Regtest,
        consensus: ConsensusParams {
            subsidy_halving_interval: 150,
            // BIP34 never activated on regtest, so version-1 blocks stay valid in tests.
            bip34_height: 100_000_000,
            bip34_hash: ZERO_HASH,
            bip65_height: 1351,
            bip66_height: 1251,
            coin_fix_height: 0,
            hard_fork_one_height: 0,
            hard_fork_two_height: 1,
            hard_fork_two_a_height: 1,
            hard_fork_three_height: 1,
            hard_fork_four_height: 1,
            hard_fork_four_a_height: 1,
            neoscrypt_fork_time: 1524473955,
            alert_key: "0452c73ce2a53acd207b5c7f643c80d1bae3b13263b443762ef772de30c7fb7fcc3b7b4b1b19d025e730a0beb6245cacb668118e34a2b0fed2dd8c8fa44a8357d6",
            checkpoint_key: "04d0dd87fbb6ac3483f57c9cd010c8fa804219ec641fad97a9cbb31605327b15fa9c40232fa214f02b80883955f7b14e49dbd03e44d45123f06ee08b911a08be33",
            pow_limit: hash_literal("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_target_timespan: 14 * 24 * 60 * 60,
            pow_target_spacing: 10 * 60,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            rule_change_activation_threshold: 108, // 75% of the smaller regtest window
            miner_confirmation_window: 144,
            deployments,
            minimum_chain_work: ZERO_HASH,
            default_assume_valid: ZERO_HASH,
            hash_genesis_block,
        },
        message_start: [0x1b, 0x21, 0x55, 0x1c],
        default_port: 18444,
        prune_after_height: 1000,
        dns_seeds: &[],   // regtest is fully isolated
        fixed_seeds: vec![],
        base58_prefixes,
        bech32_hrp: "ufrt",
        require_standard: false,
        mine_blocks_on_demand: true,
        default_consistency_checks: true,
        checkpoints: Checkpoints::new(vec![(
            0,
            hash_literal("a482cf37ea99d8c74f62e28903208bfbc12901b35738feff20fdf7e3b671afb7"),
        )]),
        chain_tx_data: ChainTxData { time: 0, tx_count: 0, tx_rate: 0.0 },
        genesis,
    }
}
