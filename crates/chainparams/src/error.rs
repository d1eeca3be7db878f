use std::fmt;

use minecoind_consensus::{
    hash256_to_hex, CheckpointError, Hash256, HexError, NetworkId, UnknownNetwork,
};
use minecoind_pow::CompactError;

use crate::seeds::SEED_SPEC_LEN;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GenesisField {
    Hash,
    MerkleRoot,
}

impl fmt::Display for GenesisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenesisField::Hash => f.write_str("hash"),
            GenesisField::MerkleRoot => f.write_str("merkle root"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParamsError {
    Hex {
        what: &'static str,
        error: HexError,
    },
    GenesisMismatch {
        network: NetworkId,
        field: GenesisField,
        expected: Hash256,
        computed: Hash256,
    },
    /// `error` is `None` when the bits decode but exceed the proof-of-work
    /// limit.
    GenesisTarget {
        network: NetworkId,
        bits: u32,
        error: Option<CompactError>,
    },
    Checkpoint {
        network: NetworkId,
        error: CheckpointError,
    },
    CheckpointGenesisMismatch {
        network: NetworkId,
        checkpoint: Hash256,
        genesis: Hash256,
    },
    NotSelected,
    AlreadySelected {
        active: NetworkId,
        requested: NetworkId,
    },
    NotModifiable(NetworkId),
    UnknownNetwork(UnknownNetwork),
    SeedDecode {
        len: usize,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Hex { what, error } => write!(f, "invalid {what}: {error}"),
            ParamsError::GenesisMismatch {
                network,
                field,
                expected,
                computed,
            } => write!(
                f,
                "{network} genesis {field} mismatch: expected {}, computed {}",
                hash256_to_hex(expected),
                hash256_to_hex(computed)
            ),
            ParamsError::GenesisTarget {
                network,
                bits,
                error: Some(error),
            } => write!(f, "{network} genesis bits {bits:#010x}: {error}"),
            ParamsError::GenesisTarget {
                network,
                bits,
                error: None,
            } => write!(
                f,
                "{network} genesis bits {bits:#010x} exceed the proof-of-work limit"
            ),
            ParamsError::Checkpoint { network, error } => {
                write!(f, "{network} checkpoints: {error}")
            }
            ParamsError::CheckpointGenesisMismatch {
                network,
                checkpoint,
                genesis,
            } => write!(
                f,
                "{network} checkpoint at height 0 is {} but genesis is {}",
                hash256_to_hex(checkpoint),
                hash256_to_hex(genesis)
            ),
            ParamsError::NotSelected => {
                write!(f, "network parameters read before a network was selected")
            }
            ParamsError::AlreadySelected { active, requested } => write!(
                f,
                "cannot select {requested} network parameters: {active} is already active"
            ),
            ParamsError::NotModifiable(network) => {
                write!(f, "{network} network parameters are not modifiable")
            }
            ParamsError::UnknownNetwork(error) => error.fmt(f),
            ParamsError::SeedDecode { len } => write!(
                f,
                "seed table length {len} is not a multiple of {SEED_SPEC_LEN}"
            ),
        }
    }
}

impl std::error::Error for ParamsError {}

impl From<UnknownNetwork> for ParamsError {
    fn from(error: UnknownNetwork) -> Self {
        ParamsError::UnknownNetwork(error)
    }
}
