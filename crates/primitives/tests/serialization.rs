use minecoind_consensus::{bytes_from_hex, hash256_to_hex, COIN};
use minecoind_primitives::block::{Block, BlockHeader};
use minecoind_primitives::script::{ScriptBuilder, OP_CHECKSIG};
use minecoind_primitives::transaction::{OutPoint, Transaction, TxIn, TxOut};
use minecoind_primitives::{encode, merkle_root, sha256d};

const MAIN_PUBKEY: &str = "42183710aa589ada023691c80f3a49a8f13f1d45bac857fbcba8bc4a8ead3eb4b10a4d4a04fa08dce60aaaf0fa7021afe1b51850a2acf21ba79c45070aa7b13a8";

fn main_coinbase() -> Transaction {
    let script_sig = ScriptBuilder::new()
        .push_int(486_604_799)
        .push_num(4)
        .push_slice(b"27-08-2015 With love for miners")
        .into_bytes();
    let pubkey = bytes_from_hex(MAIN_PUBKEY).expect("pubkey hex");
    let script_pubkey = ScriptBuilder::new()
        .push_slice(&pubkey)
        .push_opcode(OP_CHECKSIG)
        .into_bytes();
    Transaction {
        version: 1,
        inputs: vec![TxIn {
            prevout: OutPoint::null(),
            script_sig,
            sequence: u32::MAX,
        }],
        outputs: vec![TxOut {
            value: 50 * COIN,
            script_pubkey,
        }],
        lock_time: 0,
    }
}

#[test]
fn coinbase_scripts_match_legacy_layout() {
    let tx = main_coinbase();
    let script_sig = &tx.inputs[0].script_sig;
    assert_eq!(&script_sig[..8], &[0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04, 0x1f]);
    assert_eq!(script_sig.len(), 8 + 31);

    // The odd trailing nibble of the key is dropped, leaving a 64-byte push.
    let script_pubkey = &tx.outputs[0].script_pubkey;
    assert_eq!(script_pubkey[0], 0x40);
    assert_eq!(script_pubkey.len(), 1 + 64 + 1);
    assert_eq!(script_pubkey.last(), Some(&OP_CHECKSIG));
}

#[test]
fn main_genesis_identity() {
    let tx = main_coinbase();
    let txid = tx.txid();
    assert_eq!(
        hash256_to_hex(&txid),
        "234383ad6f89ee376010cda0a0ffcdae20f772eb60d917eb1048a6686bcf789e"
    );

    let block = Block {
        header: BlockHeader {
            version: 1,
            prev_block: [0u8; 32],
            merkle_root: merkle_root(&[txid]).0,
            time: 1_440_696_188,
            bits: 0x1e0f_fff0,
            nonce: 1_021_531,
        },
        transactions: vec![tx],
    };
    assert_eq!(block.compute_merkle_root(), (block.header.merkle_root, false));
    assert_eq!(
        hash256_to_hex(&block.hash()),
        "96e9ee342a81adb2558e877cf0732ee413762da43018f555702f7d2ee69c99e9"
    );

    let bytes = encode(&block);
    assert_eq!(sha256d(&bytes[..80]), block.hash());
    assert_eq!(bytes[80], 1);
}

#[test]
fn regtest_genesis_identity_depends_on_nonce() {
    let txid = main_coinbase().txid();
    let mut header = BlockHeader {
        version: 1,
        prev_block: [0u8; 32],
        merkle_root: txid,
        time: 1_296_688_602,
        bits: 0x207f_ffff,
        nonce: 0,
    };
    assert_eq!(
        hash256_to_hex(&header.hash()),
        "1c717ec1ebccb72884a1b6271f871629a7914ac7f8eac04ed862863e3c7d44cd"
    );
    header.nonce = 1;
    assert_eq!(
        hash256_to_hex(&header.hash()),
        "0698f83c3bb5a1c9daa9053d14b0cd6ce080a88959fca9a72ec65bc146729898"
    );
}
