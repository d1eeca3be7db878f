//! Compiled-in bootstrap peers.
//!
//! Seeds are stored as compact 18-byte records (IPv6 address followed by a
//! big-endian port) and turned into address-book entries at startup. Each
//! entry gets a randomized "last seen" time between one and two weeks ago.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use minecoind_primitives::Decoder;
use rand::Rng;

use crate::error::ParamsError;

pub const SEED_SPEC_LEN: usize = 18;
pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;
/// Service bit advertising a full node.
pub const NODE_NETWORK: u64 = 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SeedSpec {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec {
    /// IPv4-mapped addresses come back as plain IPv4.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = Ipv6Addr::from(self.addr);
        let ip = match ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(ip),
        };
        SocketAddr::new(ip, self.port)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AddressRecord {
    pub addr: SocketAddr,
    pub services: u64,
    pub last_seen: i64,
}

// Fixed seed tables. Both networks currently bootstrap from DNS only.
pub const MAIN_SEEDS: &[SeedSpec] = &[];
pub const TEST_SEEDS: &[SeedSpec] = &[];

pub fn decode_seed_specs(bytes: &[u8]) -> Result<Vec<SeedSpec>, ParamsError> {
    if bytes.len() % SEED_SPEC_LEN != 0 {
        return Err(ParamsError::SeedDecode { len: bytes.len() });
    }
    let mut decoder = Decoder::new(bytes);
    let mut specs = Vec::with_capacity(bytes.len() / SEED_SPEC_LEN);
    while !decoder.is_empty() {
        let addr = decoder
            .read_fixed::<16>()
            .map_err(|_| ParamsError::SeedDecode { len: bytes.len() })?;
        let port = decoder
            .read_u16_be()
            .map_err(|_| ParamsError::SeedDecode { len: bytes.len() })?;
        specs.push(SeedSpec { addr, port });
    }
    Ok(specs)
}

pub fn materialize_with<R>(specs: &[SeedSpec], now: i64, rng: &mut R) -> Vec<AddressRecord>
where
    R: Rng,
{
    specs
        .iter()
        .map(|spec| AddressRecord {
            addr: spec.socket_addr(),
            services: NODE_NETWORK,
            last_seen: now - ONE_WEEK - rng.gen_range(1..=ONE_WEEK),
        })
        .collect()
}

pub fn materialize(specs: &[SeedSpec]) -> Vec<AddressRecord> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default();
    materialize_with(specs, now, &mut rand::thread_rng())
}
