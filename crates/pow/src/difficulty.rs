//! Compact (`nBits`) target encoding and proof-of-work limits.

use minecoind_consensus::Hash256;
use primitive_types::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactError {
    Negative,
    Overflow,
}

impl std::fmt::Display for CompactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompactError::Negative => write!(f, "compact target has negative sign bit"),
            CompactError::Overflow => write!(f, "compact target overflows 256-bit range"),
        }
    }
}

impl std::error::Error for CompactError {}

pub fn compact_to_u256(bits: u32) -> Result<U256, CompactError> {
    let size = bits >> 24;
    let mut word = bits & 0x007f_ffff;
    if size <= 3 {
        word >>= 8 * (3 - size);
    }
    if word == 0 {
        return Ok(U256::zero());
    }
    if (bits & 0x0080_0000) != 0 {
        return Err(CompactError::Negative);
    }
    if size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32) {
        return Err(CompactError::Overflow);
    }

    let value = U256::from(word);
    if size <= 3 {
        Ok(value)
    } else {
        Ok(value << (8 * (size - 3)))
    }
}

pub fn u256_to_compact(value: U256) -> u32 {
    if value.is_zero() {
        return 0;
    }

    let mut size = value.bits().div_ceil(8) as u32;
    let mut compact = if size <= 3 {
        value.low_u32() << (8 * (3 - size))
    } else {
        (value >> (8 * (size - 3))).low_u32()
    };

    if (compact & 0x0080_0000) != 0 {
        compact >>= 8;
        size += 1;
    }

    (size << 24) | (compact & 0x007f_ffff)
}

pub fn compact_to_target(bits: u32) -> Result<Hash256, CompactError> {
    Ok(compact_to_u256(bits)?.to_little_endian())
}

pub fn target_to_compact(target: &Hash256) -> u32 {
    u256_to_compact(U256::from_little_endian(target))
}

pub fn hash_meets_target(hash: &Hash256, target: &Hash256) -> bool {
    U256::from_little_endian(hash) <= U256::from_little_endian(target)
}

/// The easiest allowed target: all ones shifted right by `leading_zero_bits`.
pub fn pow_limit(leading_zero_bits: u32) -> Hash256 {
    (U256::MAX >> leading_zero_bits).to_little_endian()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_limit_shapes() {
        let main = pow_limit(20);
        assert_eq!(main[31], 0x00);
        assert_eq!(main[30], 0x00);
        assert_eq!(main[29], 0x0f);
        assert!(main[..29].iter().all(|b| *b == 0xff));

        let regtest = pow_limit(1);
        assert_eq!(regtest[31], 0x7f);
        assert!(regtest[..31].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn negative_and_overflowing_compacts_are_rejected() {
        assert_eq!(compact_to_u256(0x0480_0001), Err(CompactError::Negative));
        assert_eq!(compact_to_u256(0xff12_3456), Err(CompactError::Overflow));
        assert_eq!(compact_to_u256(0x0080_0000), Ok(U256::zero()));
    }
}
