//! Consensus serialization and hashing needed to rebuild a genesis block.

pub mod block;
pub mod encoding;
pub mod hash;
pub mod script;
pub mod transaction;

pub use block::{merkle_root, Block, BlockHeader};
pub use encoding::{encode, DecodeError, Decoder, Encodable, Encoder};
pub use hash::{sha256, sha256d};
pub use script::{script_num_to_vec, ScriptBuilder, OP_CHECKSIG};
pub use transaction::{OutPoint, Transaction, TxIn, TxOut};
