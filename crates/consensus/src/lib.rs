//! Consensus data types shared by the chain parameter profiles.

pub mod checkpoints;
pub mod money;
pub mod params;

pub type Hash256 = [u8; 32];

pub use checkpoints::{Checkpoint, CheckpointError, CheckpointStats, CheckpointTable};
pub use money::{Amount, COIN};
pub use params::{
    bytes_from_hex, bytes_to_hex, hash256_from_hex, hash256_to_hex, Base58Prefixes, Base58Type,
    BehaviorFlags, DnsSeed, GenesisDescriptor, HexError, MajorityThresholds, MaxTipAge, NetworkId,
    UnknownNetwork, UpgradeEnforcement,
};
