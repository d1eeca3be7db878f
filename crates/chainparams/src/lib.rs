//! Per-network chain parameters.
//!
//! All four profiles are built and validated together at startup; afterwards
//! exactly one network is selected and every consumer reads its profile
//! through [`params`].

pub mod error;
pub mod genesis;
pub mod profile;
pub mod registry;
pub mod seeds;
pub mod selector;

use std::sync::{Arc, OnceLock};

use minecoind_consensus::NetworkId;
use minecoind_log::log_error;

pub use error::{GenesisField, ParamsError};
pub use genesis::{
    build_genesis_block, compute_genesis_identity, validate_genesis, GenesisIdentity,
};
pub use profile::ParameterProfile;
pub use registry::{
    build_main, build_regtest, build_test, build_unit_test, ProfileRegistry, UnitTestParams,
    UnitTestProfile,
};
pub use seeds::{
    decode_seed_specs, materialize, materialize_with, AddressRecord, SeedSpec, NODE_NETWORK,
    ONE_WEEK, SEED_SPEC_LEN,
};
pub use selector::NetworkSelector;

static REGISTRY: OnceLock<ProfileRegistry> = OnceLock::new();
static SELECTOR: OnceLock<NetworkSelector<'static>> = OnceLock::new();

/// Builds the process-wide profiles. Call once at startup so a broken
/// profile is reported before anything reads it; later calls are free.
pub fn init() -> Result<&'static ProfileRegistry, ParamsError> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }
    let built = ProfileRegistry::build()?;
    Ok(REGISTRY.get_or_init(|| built))
}

/// # Panics
///
/// When a profile fails validation.
pub fn registry() -> &'static ProfileRegistry {
    match init() {
        Ok(registry) => registry,
        Err(error) => {
            log_error!("chain parameters failed validation: {error}");
            panic!("chain parameters failed validation: {error}");
        }
    }
}

fn selector() -> &'static NetworkSelector<'static> {
    SELECTOR.get_or_init(|| NetworkSelector::new(registry()))
}

pub fn select_params(network: NetworkId) -> Result<(), ParamsError> {
    selector().select(network)
}

pub fn selected_network() -> Option<NetworkId> {
    selector().selected()
}

pub fn try_params() -> Result<Arc<ParameterProfile>, ParamsError> {
    selector().try_current()
}

/// Profile of the active network.
///
/// # Panics
///
/// When no network has been selected.
pub fn params() -> Arc<ParameterProfile> {
    selector().current()
}

/// # Panics
///
/// Unless the active network is UnitTest.
pub fn modifiable_params() -> UnitTestParams {
    selector().modifiable_current()
}

/// Test hook: forget the active network.
pub fn reset_params() {
    selector().reset();
}
