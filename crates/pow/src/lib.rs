//! Proof-of-work target arithmetic.

pub mod difficulty;

pub use difficulty::{
    compact_to_target, hash_meets_target, pow_limit, target_to_compact, CompactError,
};
