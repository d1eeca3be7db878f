//! Which network the process runs as.
//!
//! The active id is published once through an atomic; reads after selection
//! are a single acquire load.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use minecoind_consensus::NetworkId;
use minecoind_log::{log_error, log_info};

use crate::error::ParamsError;
use crate::profile::ParameterProfile;
use crate::registry::{ProfileRegistry, UnitTestParams};

const UNSELECTED: u8 = 0;

fn encode(network: NetworkId) -> u8 {
    match network {
        NetworkId::Main => 1,
        NetworkId::Test => 2,
        NetworkId::Regtest => 3,
        NetworkId::UnitTest => 4,
    }
}

fn decode(raw: u8) -> Option<NetworkId> {
    match raw {
        1 => Some(NetworkId::Main),
        2 => Some(NetworkId::Test),
        3 => Some(NetworkId::Regtest),
        4 => Some(NetworkId::UnitTest),
        _ => None,
    }
}

fn fatal(error: ParamsError) -> ! {
    log_error!("{error}");
    panic!("{error}");
}

pub struct NetworkSelector<'a> {
    registry: &'a ProfileRegistry,
    active: AtomicU8,
}

impl<'a> NetworkSelector<'a> {
    pub fn new(registry: &'a ProfileRegistry) -> Self {
        Self {
            registry,
            active: AtomicU8::new(UNSELECTED),
        }
    }

    pub fn registry(&self) -> &'a ProfileRegistry {
        self.registry
    }

    /// Makes `network` the active network. Selecting the already active
    /// network again is a no-op; switching requires [`reset`](Self::reset).
    pub fn select(&self, network: NetworkId) -> Result<(), ParamsError> {
        match self.active.compare_exchange(
            UNSELECTED,
            encode(network),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                log_info!("selected {network} network parameters");
                Ok(())
            }
            Err(current) => match decode(current) {
                Some(active) if active != network => Err(ParamsError::AlreadySelected {
                    active,
                    requested: network,
                }),
                _ => Ok(()),
            },
        }
    }

    pub fn selected(&self) -> Option<NetworkId> {
        decode(self.active.load(Ordering::Acquire))
    }

    pub fn try_current(&self) -> Result<Arc<ParameterProfile>, ParamsError> {
        let network = self.selected().ok_or(ParamsError::NotSelected)?;
        Ok(self.registry.profile(network))
    }

    /// Profile of the active network.
    ///
    /// # Panics
    ///
    /// When no network has been selected yet.
    pub fn current(&self) -> Arc<ParameterProfile> {
        self.try_current().unwrap_or_else(|error| fatal(error))
    }

    pub fn try_modifiable_current(&self) -> Result<UnitTestParams, ParamsError> {
        let network = self.selected().ok_or(ParamsError::NotSelected)?;
        self.registry.modifiable(network)
    }

    /// # Panics
    ///
    /// Unless the active network is UnitTest.
    pub fn modifiable_current(&self) -> UnitTestParams {
        self.try_modifiable_current()
            .unwrap_or_else(|error| fatal(error))
    }

    /// Returns to the unselected state. Only tests switch networks.
    pub fn reset(&self) {
        self.active.store(UNSELECTED, Ordering::Release);
    }
}
