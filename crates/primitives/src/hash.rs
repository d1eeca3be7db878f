use minecoind_consensus::Hash256;
use sha2::{Digest, Sha256};

pub fn sha256(data: &[u8]) -> Hash256 {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Bitcoin-style double SHA-256, used for txids, merkle nodes and block
/// hashes.
pub fn sha256d(data: &[u8]) -> Hash256 {
    sha256(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minecoind_consensus::hash256_to_hex;

    #[test]
    fn empty_input_digests() {
        let mut single = sha256(b"");
        single.reverse();
        assert_eq!(
            hash256_to_hex(&single),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        let mut double = sha256d(b"");
        double.reverse();
        assert_eq!(
            hash256_to_hex(&double),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }
}
