use minecoind_pow::difficulty::{
    compact_to_target, hash_meets_target, pow_limit, target_to_compact,
};

#[test]
fn compact_to_target_roundtrip() {
    for bits in [0x1e0f_fff0u32, 0x207f_ffff, 0x1d00_ffff] {
        let target = compact_to_target(bits).expect("target");
        assert_eq!(target_to_compact(&target), bits);
    }
}

#[test]
fn mainnet_genesis_bits_fit_under_limit() {
    let target = compact_to_target(0x1e0f_fff0).expect("target");
    assert!(target[..27].iter().all(|b| *b == 0));
    assert_eq!(target[27], 0xf0);
    assert_eq!(target[28], 0xff);
    assert_eq!(target[29], 0x0f);
    assert!(hash_meets_target(&target, &pow_limit(20)));
}

#[test]
fn regtest_bits_fit_only_the_relaxed_limit() {
    let target = compact_to_target(0x207f_ffff).expect("target");
    assert!(hash_meets_target(&target, &pow_limit(1)));
    assert!(!hash_meets_target(&target, &pow_limit(20)));
}
