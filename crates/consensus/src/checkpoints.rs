//! Compiled-in checkpoints.
//!
//! A checkpoint pins the hash of the canonical chain at one height. Blocks at
//! a checkpointed height must carry exactly that hash; every other height is
//! unconstrained. The table is sorted and validated once at construction, so
//! lookups are binary searches and the last height is a constant-time read.

use std::fmt;

use crate::params::{hash256_from_hex, HexError};
use crate::Hash256;

/// Work after the last checkpoint is this many times more expensive when
/// signatures are verified.
const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;
const SECS_PER_DAY: f64 = 86_400.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    pub height: i32,
    pub hash: Hash256,
}

/// Chain statistics recorded alongside the checkpoints, used to estimate
/// sync progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CheckpointStats {
    /// Unix time of the last checkpoint block.
    pub time_last_checkpoint: i64,
    /// Total transactions between genesis and the last checkpoint.
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint.
    pub transactions_per_day: f64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CheckpointError {
    NegativeHeight(i32),
    NonIncreasing { previous: i32, height: i32 },
    InvalidHash { height: i32, error: HexError },
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointError::NegativeHeight(height) => {
                write!(f, "checkpoint height {height} is negative")
            }
            CheckpointError::NonIncreasing { previous, height } => write!(
                f,
                "checkpoint heights must strictly increase ({height} follows {previous})"
            ),
            CheckpointError::InvalidHash { height, error } => {
                write!(f, "checkpoint hash at height {height}: {error}")
            }
        }
    }
}

impl std::error::Error for CheckpointError {}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckpointTable {
    checkpoints: Vec<Checkpoint>,
    stats: CheckpointStats,
}

impl CheckpointTable {
    pub fn new(
        checkpoints: Vec<Checkpoint>,
        stats: CheckpointStats,
    ) -> Result<Self, CheckpointError> {
        if let Some(first) = checkpoints.first() {
            if first.height < 0 {
                return Err(CheckpointError::NegativeHeight(first.height));
            }
        }
        for window in checkpoints.windows(2) {
            if window[1].height <= window[0].height {
                return Err(CheckpointError::NonIncreasing {
                    previous: window[0].height,
                    height: window[1].height,
                });
            }
        }
        Ok(Self { checkpoints, stats })
    }

    /// Builds a table from `(height, display-order hex hash)` pairs.
    pub fn from_hex(
        entries: &[(i32, &str)],
        stats: CheckpointStats,
    ) -> Result<Self, CheckpointError> {
        let checkpoints = entries
            .iter()
            .map(|(height, hash)| {
                hash256_from_hex(hash)
                    .map(|hash| Checkpoint {
                        height: *height,
                        hash,
                    })
                    .map_err(|error| CheckpointError::InvalidHash {
                        height: *height,
                        error,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(checkpoints, stats)
    }

    /// Accepts `hash` at `height` unless a checkpoint pins a different hash
    /// there.
    pub fn verify(&self, height: i32, hash: &Hash256) -> bool {
        match self.get(height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    pub fn get(&self, height: i32) -> Option<&Hash256> {
        self.checkpoints
            .binary_search_by_key(&height, |checkpoint| checkpoint.height)
            .ok()
            .map(|index| &self.checkpoints[index].hash)
    }

    pub fn last_checkpoint_height(&self) -> Option<i32> {
        self.checkpoints.last().map(|checkpoint| checkpoint.height)
    }

    /// Highest checkpoint whose block the caller already knows about.
    pub fn last_checkpoint_in<F>(&self, mut is_known: F) -> Option<&Checkpoint>
    where
        F: FnMut(&Hash256) -> bool,
    {
        self.checkpoints
            .iter()
            .rev()
            .find(|checkpoint| is_known(&checkpoint.hash))
    }

    pub fn stats(&self) -> &CheckpointStats {
        &self.stats
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Rough fraction of total verification work already done for a tip
    /// with `chain_tx` cumulative transactions and timestamp `block_time`.
    pub fn guess_verification_progress(
        &self,
        chain_tx: u64,
        block_time: i64,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };
        let stats = &self.stats;
        let (work_before, work_after) = if chain_tx <= stats.transactions_last_checkpoint {
            let cheap_before = chain_tx as f64;
            let cheap_after = (stats.transactions_last_checkpoint - chain_tx) as f64;
            let expensive_after = (now - stats.time_last_checkpoint) as f64 / SECS_PER_DAY
                * stats.transactions_per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = stats.transactions_last_checkpoint as f64;
            let expensive_before = (chain_tx - stats.transactions_last_checkpoint) as f64;
            let expensive_after =
                (now - block_time) as f64 / SECS_PER_DAY * stats.transactions_per_day;
            (
                cheap_before + expensive_before * factor,
                expensive_after * factor,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        (work_before / total).clamp(0.0, 1.0)
    }
}
