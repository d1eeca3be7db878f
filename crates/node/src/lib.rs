//! `minecoind-params`: prints the compiled-in chain parameters of every
//! network as JSON.

use minecoind_chainparams::{compute_genesis_identity, ParameterProfile, ProfileRegistry};
use minecoind_consensus::{
    bytes_to_hex, hash256_to_hex, Base58Type, MaxTipAge, NetworkId, UpgradeEnforcement,
};
use minecoind_log::{self as logging, log_info, LogConfig};
use serde_json::{json, Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Dump,
    Genesis,
    Checkpoints,
}

impl Command {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dump" => Some(Self::Dump),
            "genesis" => Some(Self::Genesis),
            "checkpoints" => Some(Self::Checkpoints),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    pub command: Command,
    pub log: LogConfig,
}

#[derive(Debug, Eq, PartialEq)]
pub enum CliAction {
    Run(Config),
    PrintHelp,
}

pub fn run_entry() -> Result<(), String> {
    let defaults = LogConfig::from_env().map_err(|err| err.to_string())?;
    match parse_args_from(std::env::args().skip(1), defaults)? {
        CliAction::PrintHelp => {
            println!("{}", usage());
            Ok(())
        }
        CliAction::Run(config) => run_with_config(config),
    }
}

fn run_with_config(config: Config) -> Result<(), String> {
    logging::init(config.log);
    let registry = minecoind_chainparams::init().map_err(|err| err.to_string())?;
    log_info!("chain parameters validated for {} networks", NetworkId::ALL.len());
    let output = render(config.command, registry)?;
    let text = serde_json::to_string_pretty(&output).map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}

pub fn render(command: Command, registry: &ProfileRegistry) -> Result<Value, String> {
    let mut out = serde_json::Map::new();
    for network in NetworkId::ALL {
        let profile = registry.profile(network);
        let value = match command {
            Command::Dump => profile_json(&profile),
            Command::Genesis => genesis_json(&profile)?,
            Command::Checkpoints => checkpoints_json(&profile),
        };
        out.insert(network.name().to_string(), value);
    }
    Ok(Value::Object(out))
}

fn tip_age_json(age: MaxTipAge) -> Value {
    match age {
        MaxTipAge::Seconds(secs) => json!(secs),
        MaxTipAge::Unbounded => json!("unbounded"),
    }
}

fn enforcement_json(enforcement: UpgradeEnforcement) -> Value {
    match enforcement {
        UpgradeEnforcement::FromHeight(height) => json!(height),
        UpgradeEnforcement::Always => json!("always"),
    }
}

pub fn profile_json(profile: &ParameterProfile) -> Value {
    let prefix = |kind: Base58Type| bytes_to_hex(profile.base58_prefix(kind));
    let flags = &profile.flags;
    json!({
        "network": profile.network_name,
        "message_start": bytes_to_hex(&profile.message_start),
        "default_port": profile.default_port,
        "alert_public_key": bytes_to_hex(&profile.alert_public_key),
        "pow_limit": hash256_to_hex(&profile.pow_limit),
        "subsidy_halving_interval": profile.subsidy_halving_interval,
        "majority": {
            "enforce_upgrade": profile.majority.enforce_upgrade,
            "reject_outdated": profile.majority.reject_outdated,
            "window": profile.majority.window,
        },
        "target_timespan": profile.target_timespan,
        "target_spacing": profile.target_spacing,
        "difficulty_adjustment_interval": profile.difficulty_adjustment_interval(),
        "max_tip_age": tip_age_json(profile.max_tip_age),
        "default_miner_threads": profile.default_miner_threads,
        "base58_prefixes": {
            "pubkey_address": prefix(Base58Type::PubkeyAddress),
            "script_address": prefix(Base58Type::ScriptAddress),
            "secret_key": prefix(Base58Type::SecretKey),
            "ext_public_key": prefix(Base58Type::ExtPublicKey),
            "ext_secret_key": prefix(Base58Type::ExtSecretKey),
        },
        "dns_seeds": profile
            .dns_seeds
            .iter()
            .map(|seed| json!({ "name": seed.name, "host": seed.host }))
            .collect::<Vec<_>>(),
        "fixed_seeds": profile
            .fixed_seeds
            .iter()
            .map(|record| record.addr.to_string())
            .collect::<Vec<_>>(),
        "genesis": {
            "hash": hash256_to_hex(&profile.genesis_hash),
            "merkle_root": hash256_to_hex(&profile.genesis_merkle_root),
            "time": profile.genesis.time,
            "bits": format!("{:08x}", profile.genesis.bits),
            "nonce": profile.genesis.nonce,
            "version": profile.genesis.version,
            "reward": profile.genesis.reward,
        },
        "last_checkpoint_height": profile.checkpoints.last_checkpoint_height(),
        "flags": {
            "require_rpc_password": flags.require_rpc_password,
            "mining_requires_peers": flags.mining_requires_peers,
            "allow_min_difficulty_blocks": flags.allow_min_difficulty_blocks,
            "default_consistency_checks": flags.default_consistency_checks,
            "require_standard_tx": flags.require_standard_tx,
            "mine_blocks_on_demand": flags.mine_blocks_on_demand,
            "skip_proof_of_work_check": flags.skip_proof_of_work_check,
            "testnet_deprecated_rpc_field": flags.testnet_deprecated_rpc_field,
        },
        "v2_enforcement": enforcement_json(profile.v2_enforcement),
    })
}

fn genesis_json(profile: &ParameterProfile) -> Result<Value, String> {
    let identity = compute_genesis_identity(&profile.genesis).map_err(|err| err.to_string())?;
    Ok(json!({
        "recorded_hash": hash256_to_hex(&profile.genesis_hash),
        "computed_hash": hash256_to_hex(&identity.hash),
        "recorded_merkle_root": hash256_to_hex(&profile.genesis_merkle_root),
        "computed_merkle_root": hash256_to_hex(&identity.merkle_root),
        "matches": identity.hash == profile.genesis_hash
            && identity.merkle_root == profile.genesis_merkle_root,
    }))
}

fn checkpoints_json(profile: &ParameterProfile) -> Value {
    let stats = profile.checkpoints.stats();
    json!({
        "checkpoints": profile
            .checkpoints
            .iter()
            .map(|checkpoint| json!({
                "height": checkpoint.height,
                "hash": hash256_to_hex(&checkpoint.hash),
            }))
            .collect::<Vec<_>>(),
        "time_last_checkpoint": stats.time_last_checkpoint,
        "transactions_last_checkpoint": stats.transactions_last_checkpoint,
        "transactions_per_day": stats.transactions_per_day,
    })
}

pub fn parse_args_from<I>(raw_args: I, defaults: LogConfig) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut log = defaults;
    let mut command: Option<Command> = None;
    let mut args = raw_args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => return Ok(CliAction::PrintHelp),
            "--log-level" | "--loglevel" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for --log-level\n{}", usage()))?;
                log.level = logging::Level::parse(&value)
                    .ok_or_else(|| format!("invalid log level '{value}'\n{}", usage()))?;
            }
            "--log-format" | "--logformat" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for --log-format\n{}", usage()))?;
                log.format = logging::Format::parse(&value)
                    .ok_or_else(|| format!("invalid log format '{value}'\n{}", usage()))?;
            }
            "--log-timestamps" | "--logtimestamps" => log.timestamps = true,
            "--no-log-timestamps" | "--no-logtimestamps" => log.timestamps = false,
            other => {
                let parsed = Command::parse(other)
                    .ok_or_else(|| format!("unknown argument '{other}'\n{}", usage()))?;
                if let Some(previous) = command {
                    return Err(format!(
                        "only one command allowed (got {previous:?} and '{other}')\n{}",
                        usage()
                    ));
                }
                command = Some(parsed);
            }
        }
    }

    Ok(CliAction::Run(Config {
        command: command.unwrap_or(Command::Dump),
        log,
    }))
}

fn usage() -> String {
    [
        "Usage:",
        "  minecoind-params [options] [command]",
        "",
        "Commands:",
        "  dump         Print every network profile (default)",
        "  genesis      Recompute each genesis block and compare with the recorded identity",
        "  checkpoints  Print each network's checkpoint table",
        "  help         Print this help and exit",
        "",
        "Options:",
        "  --help, -h  Print this help and exit",
        "  --log-level  Log verbosity (error|warn|info|debug|trace) (default: info)",
        "  --log-format  Log output format (text|json) (default: text)",
        "  --log-timestamps  Enable timestamps in text logs (default: on)",
        "  --no-log-timestamps  Disable timestamps in text logs",
        "",
        "Environment:",
        "  MINECOIN_LOG_LEVEL, MINECOIN_LOG_FORMAT, MINECOIN_LOG_TIMESTAMPS",
        "  set the same options; flags take precedence.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use minecoind_log::{Format, Level};

    fn parse(args: &[&str]) -> Result<CliAction, String> {
        parse_args_from(args.iter().map(|arg| arg.to_string()), LogConfig::default())
    }

    #[test]
    fn defaults_to_dump() {
        assert_eq!(
            parse(&[]),
            Ok(CliAction::Run(Config {
                command: Command::Dump,
                log: LogConfig::default(),
            }))
        );
    }

    #[test]
    fn parses_log_flags_and_command() {
        let action = parse(&[
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--no-log-timestamps",
            "genesis",
        ])
        .expect("parse");
        let CliAction::Run(config) = action else {
            panic!("expected run");
        };
        assert_eq!(config.command, Command::Genesis);
        assert_eq!(config.log.level, Level::Debug);
        assert_eq!(config.log.format, Format::Json);
        assert!(!config.log.timestamps);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&["--log-level"])
            .expect_err("missing")
            .starts_with("missing value for --log-level"));
        assert!(parse(&["--log-format", "xml"])
            .expect_err("format")
            .starts_with("invalid log format 'xml'"));
        assert!(parse(&["--network", "main"])
            .expect_err("no network flag")
            .starts_with("unknown argument '--network'"));
        assert!(parse(&["dump", "checkpoints"])
            .expect_err("two commands")
            .starts_with("only one command allowed"));
        assert_eq!(parse(&["help"]), Ok(CliAction::PrintHelp));
    }

    #[test]
    fn renders_every_network() {
        let registry = ProfileRegistry::build().expect("registry");

        let dump = render(Command::Dump, &registry).expect("dump");
        assert_eq!(dump["main"]["default_port"], 42511);
        assert_eq!(dump["main"]["message_start"], "3ba1c92a");
        assert_eq!(dump["main"]["genesis"]["bits"], "1e0ffff0");
        assert_eq!(dump["test"]["max_tip_age"], "unbounded");
        assert_eq!(dump["regtest"]["v2_enforcement"], "always");
        assert_eq!(dump["unittest"]["base58_prefixes"]["pubkey_address"], "32");

        let genesis = render(Command::Genesis, &registry).expect("genesis");
        for network in NetworkId::ALL {
            assert_eq!(genesis[network.name()]["matches"], true, "{network}");
        }

        let checkpoints = render(Command::Checkpoints, &registry).expect("checkpoints");
        assert_eq!(
            checkpoints["main"]["checkpoints"].as_array().map(Vec::len),
            Some(11)
        );
        assert_eq!(checkpoints["test"]["checkpoints"][0]["height"], 546);
    }
}
