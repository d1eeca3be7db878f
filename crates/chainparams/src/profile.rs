use minecoind_consensus::{
    Base58Prefixes, Base58Type, BehaviorFlags, CheckpointTable, DnsSeed, GenesisDescriptor,
    Hash256, MajorityThresholds, MaxTipAge, NetworkId, UpgradeEnforcement,
};

use crate::seeds::AddressRecord;

/// Every tunable constant of one network.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterProfile {
    pub network_id: NetworkId,
    pub network_name: &'static str,
    /// Wire magic prefixed to every p2p message.
    pub message_start: [u8; 4],
    pub default_port: u16,
    pub alert_public_key: Vec<u8>,
    /// Easiest allowed target, little-endian.
    pub pow_limit: Hash256,
    pub subsidy_halving_interval: i32,
    pub majority: MajorityThresholds,
    pub target_timespan: i64,
    pub target_spacing: i64,
    pub max_tip_age: MaxTipAge,
    pub default_miner_threads: u32,
    pub base58_prefixes: Base58Prefixes,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<AddressRecord>,
    pub genesis: GenesisDescriptor,
    pub genesis_hash: Hash256,
    pub genesis_merkle_root: Hash256,
    pub checkpoints: CheckpointTable,
    pub flags: BehaviorFlags,
    pub v2_enforcement: UpgradeEnforcement,
}

impl ParameterProfile {
    /// Blocks between difficulty retargets.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.target_timespan / self.target_spacing
    }

    pub fn is_tip_stale(&self, tip_time: i64, now: i64) -> bool {
        self.max_tip_age.is_stale(tip_time, now)
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &'static [u8] {
        self.base58_prefixes.prefix(kind)
    }

    pub fn verify_checkpoint(&self, height: i32, hash: &Hash256) -> bool {
        self.checkpoints.verify(height, hash)
    }
}
