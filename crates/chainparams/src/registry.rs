//! The four network profiles.
//!
//! Test derives from Main, Regtest from Test, and UnitTest from Main; each
//! builder starts from its parent's constants and applies overrides. Every
//! builder revalidates the genesis identity and the checkpoint table before
//! returning.

use std::sync::{Arc, PoisonError, RwLock};

use minecoind_consensus::{
    bytes_from_hex, hash256_from_hex, Base58Prefixes, BehaviorFlags, CheckpointStats,
    CheckpointTable, DnsSeed, GenesisDescriptor, Hash256, MajorityThresholds, MaxTipAge,
    NetworkId, UpgradeEnforcement, COIN,
};
use minecoind_log::{log_debug, log_error};
use minecoind_pow::pow_limit;

use crate::error::ParamsError;
use crate::genesis::validate_genesis;
use crate::profile::ParameterProfile;
use crate::seeds::{materialize, MAIN_SEEDS, TEST_SEEDS};

const MAIN_ALERT_KEY: &str = "211184710fa679ad5023590c80f3a49c8f13f8d45b8b857fbcac8bc4a8b4d3eb3b10f4b4604fa18dce611aaf0f170216ae1a5175bb4bcf2bb279cb5170bc6b03b6";
const TEST_ALERT_KEY: &str = "311184710fa679ad5023590c80f3a49c8f13f8d45b8b857fbcac8bc4a8b4d3eb3b10f4b4604fa18dce611aaf0f170216ae1a5175bb4bcf2bb279cb5170bc6b03b6";
const GENESIS_OUTPUT_KEY: &str = "42183710aa589ada023691c80f3a49a8f13f1d45bac857fbcba8bc4a8ead3eb4b10a4d4a04fa08dce60aaaf0fa7021afe1b51850a2acf21ba79c45070aa7b13a8";

const MAIN_GENESIS_HASH: &str =
    "96e9ee342a81adb2558e877cf0732ee413762da43018f555702f7d2ee69c99e9";
const GENESIS_MERKLE_ROOT: &str =
    "234383ad6f89ee376010cda0a0ffcdae20f772eb60d917eb1048a6686bcf789e";
const REGTEST_GENESIS_HASH: &str =
    "1c717ec1ebccb72884a1b6271f871629a7914ac7f8eac04ed862863e3c7d44cd";

const MAIN_CHECKPOINTS: &[(i32, &str)] = &[
    (0, MAIN_GENESIS_HASH),
    (7356, "5bda3a3bd226cd609b093593e9a2653e4c9e2bc0e84c20abfdfa8f0b98be0228"),
    (25000, "45b539abb29ed00c18bafe77181fad68b47eddd686231c217a22f0b8592e8437"),
    (50000, "71df8ab07e3d40aa34d7647bcfca7f9114d0436fdd38f4b51daf22dca8d91092"),
    (100000, "9c05134706aad749f11e72473ef3370f448a91716fb0dcb58296651d3926ed11"),
    (200000, "5f54457ae4ac46e4ea4d094a24e01e4f5b89b4bbe9ecb7b02b6b5aca070d04b8"),
    (300000, "c3dece54d1a658c65be9bd7f999074a36e6efbbcdfe95636bc4fc03fd313a6e7"),
    (400000, "c3184d95fa248c46ceaeaf2235ad8d7ff75d7f898b6f72e44f35833699d4d9cb"),
    (500000, "dd0873b91edfb00c55bba58f509f33406fa9a0f69e53bb11705251074413e518"),
    (600000, "d8da0db4a90a334b4aae4d33274a74bcf2f9533e0304304408f747c22c13f4c9"),
    (658200, "c457a10672e7740f57d9554db2483f0e8260a7f2900912d83bc89bedb23235d0"),
];
const MAIN_CHECKPOINT_STATS: CheckpointStats = CheckpointStats {
    time_last_checkpoint: 1_440_951_840,
    transactions_last_checkpoint: 0,
    transactions_per_day: 0.0,
};

const TEST_CHECKPOINTS: &[(i32, &str)] = &[(
    546,
    "a0fea99a6897f531600c8ae53367b126824fd6a847b2b2b73817a95b8e27e602",
)];
const TEST_CHECKPOINT_STATS: CheckpointStats = CheckpointStats {
    time_last_checkpoint: 1_365_458_829,
    transactions_last_checkpoint: 547,
    transactions_per_day: 576.0,
};

const REGTEST_CHECKPOINTS: &[(i32, &str)] = &[(0, REGTEST_GENESIS_HASH)];

fn hash(what: &'static str, hex: &str) -> Result<Hash256, ParamsError> {
    hash256_from_hex(hex).map_err(|error| ParamsError::Hex { what, error })
}

fn checkpoints(
    network: NetworkId,
    entries: &[(i32, &str)],
    stats: CheckpointStats,
) -> Result<CheckpointTable, ParamsError> {
    CheckpointTable::from_hex(entries, stats)
        .map_err(|error| ParamsError::Checkpoint { network, error })
}

fn alert_key(hex: &str) -> Result<Vec<u8>, ParamsError> {
    bytes_from_hex(hex).map_err(|error| ParamsError::Hex {
        what: "alert public key",
        error,
    })
}

/// Runs the genesis and checkpoint checks on a finished profile.
fn validated(profile: ParameterProfile) -> Result<ParameterProfile, ParamsError> {
    let network = profile.network_id;
    let result = validate_genesis(
        network,
        &profile.genesis,
        &profile.genesis_hash,
        &profile.genesis_merkle_root,
        &profile.pow_limit,
    )
    .and_then(|_| match profile.checkpoints.get(0) {
        Some(checkpoint) if *checkpoint != profile.genesis_hash => {
            Err(ParamsError::CheckpointGenesisMismatch {
                network,
                checkpoint: *checkpoint,
                genesis: profile.genesis_hash,
            })
        }
        _ => Ok(()),
    });
    if let Err(error) = result {
        log_error!("{network} chain parameters are invalid: {error}");
        return Err(error);
    }
    log_debug!(
        "built {network} parameters ({} checkpoints, {} fixed seeds)",
        profile.checkpoints.len(),
        profile.fixed_seeds.len()
    );
    Ok(profile)
}

fn main_profile() -> Result<ParameterProfile, ParamsError> {
    let network = NetworkId::Main;
    Ok(ParameterProfile {
        network_id: network,
        network_name: network.name(),
        message_start: [0x3b, 0xa1, 0xc9, 0x2a],
        default_port: 42511,
        alert_public_key: alert_key(MAIN_ALERT_KEY)?,
        pow_limit: pow_limit(20),
        subsidy_halving_interval: 840_000,
        majority: MajorityThresholds {
            enforce_upgrade: 750,
            reject_outdated: 950,
            window: 1000,
        },
        target_timespan: 5 * 60,
        target_spacing: 30,
        max_tip_age: MaxTipAge::Seconds(24 * 60 * 60),
        default_miner_threads: 0,
        base58_prefixes: Base58Prefixes {
            pubkey_address: &[50],
            script_address: &[5],
            secret_key: &[178],
            ext_public_key: &[0x04, 0x88, 0x3b, 0xa1],
            ext_secret_key: &[0x04, 0x88, 0xc9, 0x2a],
        },
        dns_seeds: vec![
            DnsSeed {
                name: "minecoin.info",
                host: "dnsseed.minecoin.info",
            },
            DnsSeed {
                name: "midnightminer.net",
                host: "xmineseed.midnightminer.net",
            },
        ],
        fixed_seeds: materialize(MAIN_SEEDS),
        genesis: GenesisDescriptor {
            timestamp_text: "27-08-2015 With love for miners",
            time: 1_440_696_188,
            bits: 0x1e0f_fff0,
            nonce: 1_021_531,
            version: 1,
            reward: 50 * COIN,
            output_pubkey: GENESIS_OUTPUT_KEY,
        },
        genesis_hash: hash("genesis hash", MAIN_GENESIS_HASH)?,
        genesis_merkle_root: hash("genesis merkle root", GENESIS_MERKLE_ROOT)?,
        checkpoints: checkpoints(network, MAIN_CHECKPOINTS, MAIN_CHECKPOINT_STATS)?,
        flags: BehaviorFlags {
            require_rpc_password: true,
            mining_requires_peers: true,
            allow_min_difficulty_blocks: false,
            default_consistency_checks: false,
            require_standard_tx: true,
            mine_blocks_on_demand: false,
            skip_proof_of_work_check: false,
            testnet_deprecated_rpc_field: false,
        },
        v2_enforcement: UpgradeEnforcement::FromHeight(710_000),
    })
}

fn test_profile() -> Result<ParameterProfile, ParamsError> {
    let network = NetworkId::Test;
    let mut profile = main_profile()?;
    profile.network_id = network;
    profile.network_name = network.name();
    profile.message_start = [0x16, 0x23, 0xa1, 0xbc];
    profile.alert_public_key = alert_key(TEST_ALERT_KEY)?;
    profile.default_port = 43511;
    profile.majority = MajorityThresholds {
        enforce_upgrade: 51,
        reject_outdated: 75,
        window: 100,
    };
    profile.max_tip_age = MaxTipAge::Unbounded;
    profile.dns_seeds = vec![
        DnsSeed {
            name: "minecoin.info",
            host: "testnet-seed.minecoin.info",
        },
        DnsSeed {
            name: "midnightminer.net",
            host: "testnet-xmineseed.midnightminer.net",
        },
    ];
    profile.fixed_seeds = materialize(TEST_SEEDS);
    profile.base58_prefixes = Base58Prefixes {
        pubkey_address: &[111],
        script_address: &[196],
        secret_key: &[239],
        ext_public_key: &[0x04, 0x35, 0x16, 0x23],
        ext_secret_key: &[0x04, 0x35, 0xa1, 0xbc],
    };
    profile.checkpoints = checkpoints(network, TEST_CHECKPOINTS, TEST_CHECKPOINT_STATS)?;
    profile.flags.allow_min_difficulty_blocks = true;
    profile.flags.require_standard_tx = false;
    profile.flags.testnet_deprecated_rpc_field = true;
    profile.v2_enforcement = UpgradeEnforcement::FromHeight(400_000);
    Ok(profile)
}

fn regtest_profile() -> Result<ParameterProfile, ParamsError> {
    let network = NetworkId::Regtest;
    let mut profile = test_profile()?;
    profile.network_id = network;
    profile.network_name = network.name();
    profile.message_start = [0xfa, 0xbf, 0xb5, 0xda];
    profile.subsidy_halving_interval = 150;
    profile.majority = MajorityThresholds {
        enforce_upgrade: 750,
        reject_outdated: 950,
        window: 1000,
    };
    profile.default_miner_threads = 1;
    profile.pow_limit = pow_limit(1);
    profile.max_tip_age = MaxTipAge::Seconds(24 * 60 * 60);
    profile.genesis.time = 1_296_688_602;
    profile.genesis.bits = 0x207f_ffff;
    profile.genesis.nonce = 0;
    profile.genesis_hash = hash("genesis hash", REGTEST_GENESIS_HASH)?;
    profile.default_port = 19444;
    profile.dns_seeds.clear();
    profile.fixed_seeds.clear();
    profile.checkpoints = checkpoints(network, REGTEST_CHECKPOINTS, CheckpointStats::default())?;
    profile.flags = BehaviorFlags {
        require_rpc_password: false,
        mining_requires_peers: false,
        allow_min_difficulty_blocks: true,
        default_consistency_checks: true,
        require_standard_tx: false,
        mine_blocks_on_demand: true,
        skip_proof_of_work_check: false,
        testnet_deprecated_rpc_field: false,
    };
    profile.v2_enforcement = UpgradeEnforcement::Always;
    Ok(profile)
}

fn unit_test_profile() -> Result<ParameterProfile, ParamsError> {
    let network = NetworkId::UnitTest;
    let mut profile = main_profile()?;
    profile.network_id = network;
    profile.network_name = network.name();
    profile.default_port = 18445;
    profile.dns_seeds.clear();
    profile.fixed_seeds.clear();
    profile.flags.require_rpc_password = false;
    profile.flags.mining_requires_peers = false;
    profile.flags.default_consistency_checks = true;
    profile.flags.allow_min_difficulty_blocks = false;
    profile.flags.mine_blocks_on_demand = true;
    profile.v2_enforcement = UpgradeEnforcement::Always;
    Ok(profile)
}

pub fn build_main() -> Result<ParameterProfile, ParamsError> {
    validated(main_profile()?)
}

pub fn build_test() -> Result<ParameterProfile, ParamsError> {
    validated(test_profile()?)
}

pub fn build_regtest() -> Result<ParameterProfile, ParamsError> {
    validated(regtest_profile()?)
}

pub fn build_unit_test() -> Result<UnitTestProfile, ParamsError> {
    let profile = validated(unit_test_profile()?)?;
    Ok(UnitTestProfile {
        slot: Arc::new(RwLock::new(Arc::new(profile))),
    })
}

type Slot = Arc<RwLock<Arc<ParameterProfile>>>;

/// The UnitTest profile. Unlike the other networks it can be changed after
/// construction, but only through the [`UnitTestParams`] capability.
#[derive(Debug)]
pub struct UnitTestProfile {
    slot: Slot,
}

impl UnitTestProfile {
    pub fn snapshot(&self) -> Arc<ParameterProfile> {
        read_slot(&self.slot)
    }

    pub fn params(&self) -> UnitTestParams {
        UnitTestParams {
            slot: Arc::clone(&self.slot),
        }
    }
}

fn read_slot(slot: &Slot) -> Arc<ParameterProfile> {
    Arc::clone(&slot.read().unwrap_or_else(PoisonError::into_inner))
}

/// Write access to the UnitTest profile.
///
/// Each setter swaps in a modified copy; snapshots taken earlier keep the
/// values they were taken with.
#[derive(Clone, Debug)]
pub struct UnitTestParams {
    slot: Slot,
}

impl UnitTestParams {
    fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut ParameterProfile),
    {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        apply(Arc::make_mut(&mut guard));
    }

    pub fn snapshot(&self) -> Arc<ParameterProfile> {
        read_slot(&self.slot)
    }

    pub fn set_subsidy_halving_interval(&self, interval: i32) {
        self.update(|profile| profile.subsidy_halving_interval = interval);
    }

    pub fn set_enforce_block_upgrade_majority(&self, threshold: i32) {
        self.update(|profile| profile.majority.enforce_upgrade = threshold);
    }

    pub fn set_reject_block_outdated_majority(&self, threshold: i32) {
        self.update(|profile| profile.majority.reject_outdated = threshold);
    }

    pub fn set_to_check_block_upgrade_majority(&self, window: i32) {
        self.update(|profile| profile.majority.window = window);
    }

    pub fn set_default_consistency_checks(&self, enabled: bool) {
        self.update(|profile| profile.flags.default_consistency_checks = enabled);
    }

    pub fn set_allow_min_difficulty_blocks(&self, enabled: bool) {
        self.update(|profile| profile.flags.allow_min_difficulty_blocks = enabled);
    }

    pub fn set_skip_proof_of_work_check(&self, enabled: bool) {
        self.update(|profile| profile.flags.skip_proof_of_work_check = enabled);
    }
}

/// All four profiles, built together once.
#[derive(Debug)]
pub struct ProfileRegistry {
    main: Arc<ParameterProfile>,
    test: Arc<ParameterProfile>,
    regtest: Arc<ParameterProfile>,
    unit_test: UnitTestProfile,
}

impl ProfileRegistry {
    pub fn build() -> Result<Self, ParamsError> {
        Ok(Self {
            main: Arc::new(build_main()?),
            test: Arc::new(build_test()?),
            regtest: Arc::new(build_regtest()?),
            unit_test: build_unit_test()?,
        })
    }

    pub fn profile(&self, network: NetworkId) -> Arc<ParameterProfile> {
        match network {
            NetworkId::Main => Arc::clone(&self.main),
            NetworkId::Test => Arc::clone(&self.test),
            NetworkId::Regtest => Arc::clone(&self.regtest),
            NetworkId::UnitTest => self.unit_test.snapshot(),
        }
    }

    /// Lookup by canonical name, for configuration loaders.
    pub fn profile_by_name(&self, name: &str) -> Result<Arc<ParameterProfile>, ParamsError> {
        let network: NetworkId = name.parse()?;
        Ok(self.profile(network))
    }

    pub fn modifiable(&self, network: NetworkId) -> Result<UnitTestParams, ParamsError> {
        match network {
            NetworkId::UnitTest => Ok(self.unit_test.params()),
            other => Err(ParamsError::NotModifiable(other)),
        }
    }
}
