//! Building blocks of a network parameter profile.

use std::fmt;
use std::str::FromStr;

use crate::money::Amount;
use crate::Hash256;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NetworkId {
    Main,
    Test,
    Regtest,
    UnitTest,
}

impl NetworkId {
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Main,
        NetworkId::Test,
        NetworkId::Regtest,
        NetworkId::UnitTest,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::Regtest => "regtest",
            NetworkId::UnitTest => "unittest",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownNetwork(pub String);

impl fmt::Display for UnknownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unimplemented network '{}'", self.0)
    }
}

impl std::error::Error for UnknownNetwork {}

impl FromStr for NetworkId {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}

/// Supermajority rule for soft-fork version signalling: of the last `window`
/// blocks, `enforce_upgrade` must signal before the new rules are enforced
/// and `reject_outdated` before old-version blocks are rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MajorityThresholds {
    pub enforce_upgrade: i32,
    pub reject_outdated: i32,
    pub window: i32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MaxTipAge {
    Seconds(i64),
    Unbounded,
}

impl MaxTipAge {
    /// True when a tip with timestamp `tip_time` is too old to count as
    /// caught up at `now`.
    pub fn is_stale(self, tip_time: i64, now: i64) -> bool {
        match self {
            MaxTipAge::Seconds(age) => tip_time < now.saturating_sub(age),
            MaxTipAge::Unbounded => false,
        }
    }
}

/// Height from which the version 2 wire/block rules are mandatory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpgradeEnforcement {
    FromHeight(i32),
    /// Enforced at every height; activation falls back to the
    /// supermajority rule.
    Always,
}

impl UpgradeEnforcement {
    pub fn is_enforced(self, height: i32) -> bool {
        match self {
            UpgradeEnforcement::FromHeight(start) => height >= start,
            UpgradeEnforcement::Always => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Base58Prefixes {
    pub pubkey_address: &'static [u8],
    pub script_address: &'static [u8],
    pub secret_key: &'static [u8],
    pub ext_public_key: &'static [u8],
    pub ext_secret_key: &'static [u8],
}

impl Base58Prefixes {
    pub fn prefix(&self, kind: Base58Type) -> &'static [u8] {
        match kind {
            Base58Type::PubkeyAddress => self.pubkey_address,
            Base58Type::ScriptAddress => self.script_address,
            Base58Type::SecretKey => self.secret_key,
            Base58Type::ExtPublicKey => self.ext_public_key,
            Base58Type::ExtSecretKey => self.ext_secret_key,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BehaviorFlags {
    pub require_rpc_password: bool,
    pub mining_requires_peers: bool,
    pub allow_min_difficulty_blocks: bool,
    pub default_consistency_checks: bool,
    pub require_standard_tx: bool,
    pub mine_blocks_on_demand: bool,
    pub skip_proof_of_work_check: bool,
    pub testnet_deprecated_rpc_field: bool,
}

/// Everything needed to rebuild the genesis block bit for bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenesisDescriptor {
    /// Text embedded in the coinbase input script.
    pub timestamp_text: &'static str,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
    pub version: i32,
    pub reward: Amount,
    /// Hex public key paid by the coinbase output (`<key> OP_CHECKSIG`).
    pub output_pubkey: &'static str,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HexError {
    InvalidLength,
    InvalidHex,
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexError::InvalidLength => write!(f, "hex string has invalid length"),
            HexError::InvalidHex => write!(f, "hex string has invalid characters"),
        }
    }
}

impl std::error::Error for HexError {}

/// Parses a display-order (big-endian) hash into internal little-endian
/// bytes. Short inputs are left-padded with zeros.
pub fn hash256_from_hex(input: &str) -> Result<Hash256, HexError> {
    let mut hex = input.trim();
    if let Some(stripped) = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")) {
        hex = stripped;
    }
    if hex.is_empty() || hex.len() > 64 {
        return Err(HexError::InvalidLength);
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::InvalidHex);
    }

    let padded = format!("{hex:0>64}");
    let mut bytes = [0u8; 32];
    for (i, byte_out) in bytes.iter_mut().enumerate() {
        let start = i * 2;
        *byte_out = u8::from_str_radix(&padded[start..start + 2], 16)
            .map_err(|_| HexError::InvalidHex)?;
    }
    bytes.reverse();
    Ok(bytes)
}

pub fn hash256_to_hex(hash: &Hash256) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(64);
    for byte in hash.iter().rev() {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decodes hex the way the legacy `ParseHex` does: whitespace between bytes
/// is skipped and decoding stops at the first incomplete pair, so a trailing
/// odd nibble is dropped. Any other non-hex character is an error.
pub fn bytes_from_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let mut out = Vec::with_capacity(input.len() / 2);
    let mut chars = input.chars().filter(|c| !c.is_ascii_whitespace());
    loop {
        let Some(high) = chars.next() else {
            break;
        };
        let high = high.to_digit(16).ok_or(HexError::InvalidHex)?;
        let Some(low) = chars.next() else {
            break;
        };
        let low = low.to_digit(16).ok_or(HexError::InvalidHex)?;
        out.push(((high << 4) | low) as u8);
    }
    Ok(out)
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
