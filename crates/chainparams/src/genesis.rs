//! Rebuilds a network's genesis block from its descriptor and checks the
//! result against the recorded identity.

use minecoind_consensus::{
    bytes_from_hex, hash256_to_hex, GenesisDescriptor, Hash256, NetworkId,
};
use minecoind_log::log_debug;
use minecoind_pow::{compact_to_target, hash_meets_target};
use minecoind_primitives::script::{ScriptBuilder, OP_CHECKSIG};
use minecoind_primitives::{merkle_root, Block, BlockHeader, OutPoint, Transaction, TxIn, TxOut};

use crate::error::{GenesisField, ParamsError};

/// Leading integer of the genesis coinbase script (the historical `nBits`).
pub const GENESIS_SCRIPT_BITS: i64 = 486_604_799;
const GENESIS_SCRIPT_EXTRA_NONCE: i64 = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenesisIdentity {
    pub hash: Hash256,
    pub merkle_root: Hash256,
}

pub fn build_genesis_block(descriptor: &GenesisDescriptor) -> Result<Block, ParamsError> {
    let script_sig = ScriptBuilder::new()
        .push_int(GENESIS_SCRIPT_BITS)
        .push_num(GENESIS_SCRIPT_EXTRA_NONCE)
        .push_slice(descriptor.timestamp_text.as_bytes())
        .into_bytes();
    let pubkey =
        bytes_from_hex(descriptor.output_pubkey).map_err(|error| ParamsError::Hex {
            what: "genesis output key",
            error,
        })?;
    let script_pubkey = ScriptBuilder::new()
        .push_slice(&pubkey)
        .push_opcode(OP_CHECKSIG)
        .into_bytes();

    let coinbase = Transaction {
        version: 1,
        inputs: vec![TxIn {
            prevout: OutPoint::null(),
            script_sig,
            sequence: u32::MAX,
        }],
        outputs: vec![TxOut {
            value: descriptor.reward,
            script_pubkey,
        }],
        lock_time: 0,
    };
    let (root, _) = merkle_root(&[coinbase.txid()]);

    Ok(Block {
        header: BlockHeader {
            version: descriptor.version,
            prev_block: [0u8; 32],
            merkle_root: root,
            time: descriptor.time,
            bits: descriptor.bits,
            nonce: descriptor.nonce,
        },
        transactions: vec![coinbase],
    })
}

pub fn compute_genesis_identity(
    descriptor: &GenesisDescriptor,
) -> Result<GenesisIdentity, ParamsError> {
    let block = build_genesis_block(descriptor)?;
    Ok(GenesisIdentity {
        hash: block.hash(),
        merkle_root: block.header.merkle_root,
    })
}

/// Recomputes the genesis identity and requires it to equal the recorded
/// constants. The descriptor's `bits` must also decode to a target no
/// easier than `pow_limit`.
pub fn validate_genesis(
    network: NetworkId,
    descriptor: &GenesisDescriptor,
    expected_hash: &Hash256,
    expected_merkle_root: &Hash256,
    pow_limit: &Hash256,
) -> Result<GenesisIdentity, ParamsError> {
    let identity = compute_genesis_identity(descriptor)?;
    if identity.merkle_root != *expected_merkle_root {
        return Err(ParamsError::GenesisMismatch {
            network,
            field: GenesisField::MerkleRoot,
            expected: *expected_merkle_root,
            computed: identity.merkle_root,
        });
    }
    if identity.hash != *expected_hash {
        return Err(ParamsError::GenesisMismatch {
            network,
            field: GenesisField::Hash,
            expected: *expected_hash,
            computed: identity.hash,
        });
    }

    let target = compact_to_target(descriptor.bits).map_err(|error| {
        ParamsError::GenesisTarget {
            network,
            bits: descriptor.bits,
            error: Some(error),
        }
    })?;
    if !hash_meets_target(&target, pow_limit) {
        return Err(ParamsError::GenesisTarget {
            network,
            bits: descriptor.bits,
            error: None,
        });
    }

    log_debug!(
        "{network} genesis verified ({})",
        hash256_to_hex(&identity.hash)
    );
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minecoind_consensus::{hash256_from_hex, COIN};
    use minecoind_pow::{pow_limit, CompactError};

    const PUBKEY: &str = "42183710aa589ada023691c80f3a49a8f13f1d45bac857fbcba8bc4a8ead3eb4b10a4d4a04fa08dce60aaaf0fa7021afe1b51850a2acf21ba79c45070aa7b13a8";

    fn main_descriptor() -> GenesisDescriptor {
        GenesisDescriptor {
            timestamp_text: "27-08-2015 With love for miners",
            time: 1_440_696_188,
            bits: 0x1e0f_fff0,
            nonce: 1_021_531,
            version: 1,
            reward: 50 * COIN,
            output_pubkey: PUBKEY,
        }
    }

    fn hash(hex: &str) -> Hash256 {
        hash256_from_hex(hex).expect("hash")
    }

    fn main_hash() -> Hash256 {
        hash("96e9ee342a81adb2558e877cf0732ee413762da43018f555702f7d2ee69c99e9")
    }

    fn main_merkle() -> Hash256 {
        hash("234383ad6f89ee376010cda0a0ffcdae20f772eb60d917eb1048a6686bcf789e")
    }

    #[test]
    fn main_genesis_validates() {
        let identity = validate_genesis(
            NetworkId::Main,
            &main_descriptor(),
            &main_hash(),
            &main_merkle(),
            &pow_limit(20),
        )
        .expect("main genesis");
        assert_eq!(identity.hash, main_hash());

        let block = build_genesis_block(&main_descriptor()).expect("block");
        assert_eq!(block.transactions.len(), 1);
        assert!(block.transactions[0].is_coinbase());
        assert_eq!(block.header.prev_block, [0u8; 32]);
    }

    #[test]
    fn wrong_time_reports_hash_field() {
        let mut descriptor = main_descriptor();
        descriptor.time += 1;
        let err = validate_genesis(
            NetworkId::Main,
            &descriptor,
            &main_hash(),
            &main_merkle(),
            &pow_limit(20),
        )
        .expect_err("hash mismatch");
        assert!(matches!(
            err,
            ParamsError::GenesisMismatch {
                field: GenesisField::Hash,
                ..
            }
        ));
        assert!(err.to_string().contains("expected 96e9ee34"));
    }

    #[test]
    fn wrong_text_reports_merkle_field() {
        let mut descriptor = main_descriptor();
        descriptor.timestamp_text = "28-08-2015 With love for miners";
        let err = validate_genesis(
            NetworkId::Main,
            &descriptor,
            &main_hash(),
            &main_merkle(),
            &pow_limit(20),
        )
        .expect_err("merkle mismatch");
        assert!(matches!(
            err,
            ParamsError::GenesisMismatch {
                field: GenesisField::MerkleRoot,
                ..
            }
        ));
    }

    #[test]
    fn bits_above_limit_are_rejected() {
        let err = validate_genesis(
            NetworkId::Main,
            &main_descriptor(),
            &main_hash(),
            &main_merkle(),
            &pow_limit(32),
        )
        .expect_err("too easy");
        assert_eq!(
            err,
            ParamsError::GenesisTarget {
                network: NetworkId::Main,
                bits: 0x1e0f_fff0,
                error: None,
            }
        );
    }

    #[test]
    fn negative_bits_are_rejected() {
        let mut descriptor = main_descriptor();
        descriptor.bits = 0x1e80_0001;
        let identity = compute_genesis_identity(&descriptor).expect("identity");
        let err = validate_genesis(
            NetworkId::Main,
            &descriptor,
            &identity.hash,
            &identity.merkle_root,
            &pow_limit(20),
        )
        .expect_err("negative");
        assert!(matches!(
            err,
            ParamsError::GenesisTarget {
                error: Some(CompactError::Negative),
                ..
            }
        ));
    }
}
