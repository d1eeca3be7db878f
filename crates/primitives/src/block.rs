//! Block header and block types.

use minecoind_consensus::Hash256;

use crate::encoding::{encode, Decoder, DecodeError, Encodable, Encoder};
use crate::hash::sha256d;
use crate::transaction::Transaction;

pub const HEADER_SIZE: usize = 80;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub fn consensus_encode(&self) -> Vec<u8> {
        encode(self)
    }

    pub fn consensus_decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut decoder = Decoder::new(bytes);
        let header = Self {
            version: i32::from_le_bytes(decoder.read_fixed()?),
            prev_block: decoder.read_fixed()?,
            merkle_root: decoder.read_fixed()?,
            time: decoder.read_u32_le()?,
            bits: decoder.read_u32_le()?,
            nonce: decoder.read_u32_le()?,
        };
        decoder.finish()?;
        Ok(header)
    }

    /// Double SHA-256 of the 80-byte serialization, internal byte order.
    pub fn hash(&self) -> Hash256 {
        sha256d(&self.consensus_encode())
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_i32_le(self.version);
        encoder.write_hash_le(&self.prev_block);
        encoder.write_hash_le(&self.merkle_root);
        encoder.write_u32_le(self.time);
        encoder.write_u32_le(self.bits);
        encoder.write_u32_le(self.nonce);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    /// Merkle root over the block's txids; the flag reports a duplicated
    /// trailing pair (CVE-2012-2459 style mutation).
    pub fn compute_merkle_root(&self) -> (Hash256, bool) {
        let txids: Vec<Hash256> = self.transactions.iter().map(Transaction::txid).collect();
        merkle_root(&txids)
    }
}

impl Encodable for Block {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        Encodable::consensus_encode(&self.header, encoder);
        encoder.write_varint(self.transactions.len() as u64);
        for tx in &self.transactions {
            Encodable::consensus_encode(tx, encoder);
        }
    }
}

pub fn merkle_root(txids: &[Hash256]) -> (Hash256, bool) {
    if txids.is_empty() {
        return ([0u8; 32], false);
    }
    let mut layer = txids.to_vec();
    let mut mutated = false;
    while layer.len() > 1 {
        let size = layer.len();
        let mut next = Vec::with_capacity(size.div_ceil(2));
        for pair in layer.chunks(2) {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            if pair.len() == 2 && left == right {
                mutated = true;
            }
            let mut data = [0u8; 64];
            data[..32].copy_from_slice(left);
            data[32..].copy_from_slice(right);
            next.push(sha256d(&data));
        }
        layer = next;
    }
    (layer[0], mutated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_txid_is_its_own_root() {
        let txid = [9u8; 32];
        assert_eq!(merkle_root(&[txid]), (txid, false));
        assert_eq!(merkle_root(&[]), ([0u8; 32], false));
    }

    #[test]
    fn odd_layers_duplicate_last_node() {
        let (a, b, c) = ([1u8; 32], [2u8; 32], [3u8; 32]);
        let (odd, odd_mutated) = merkle_root(&[a, b, c]);
        let (padded, padded_mutated) = merkle_root(&[a, b, c, c]);
        assert_eq!(odd, padded);
        assert!(!odd_mutated);
        assert!(padded_mutated);
    }

    #[test]
    fn header_is_eighty_bytes_and_round_trips() {
        let header = BlockHeader {
            version: 1,
            prev_block: [0u8; 32],
            merkle_root: [0x5a; 32],
            time: 1_440_696_188,
            bits: 0x1e0f_fff0,
            nonce: 1_021_531,
        };
        let bytes = header.consensus_encode();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[72..76], &0x1e0f_fff0u32.to_le_bytes());
        assert_eq!(BlockHeader::consensus_decode(&bytes), Ok(header));
        assert!(BlockHeader::consensus_decode(&bytes[..79]).is_err());
    }
}
