//! BIP-32 hierarchical deterministic nodes over secp256k1, with BIP-39
//! mnemonics and checksummed address derivation.

mod error;
mod extended;
mod hd;
mod path;
mod types;
mod util;

pub mod address;
pub mod base58;
pub mod curve;
pub mod hash;
pub mod mnemonic;
pub mod modular;
pub mod point;
pub mod secp256k1;

pub use address::{get_address, to_checksum_address};
pub use curve::{decode_point, get_point, get_point_from_bytes, get_point_from_x, Curve};
pub use error::HdError;
pub use extended::{
    extended_key_version, is_extended_key, ExtendedKeyVersion, EXTENDED_KEY_LEN,
    PRIVATE_KEY_VERSION, PUBLIC_KEY_VERSION,
};
pub use hd::{ExtendedPublicKey, HdNode, MASTER_KEY};
pub use mnemonic::{
    entropy_to_mnemonic, generate_mnemonic, is_valid_mnemonic, mnemonic_to_entropy,
    mnemonic_to_seed, Mnemonic,
};
pub use path::{get_index, ChildNumber, DerivationPath, HARDENED_OFFSET};
pub use point::{AffinePoint, Point};
pub use secp256k1::{
    compress_public_key, decompress_public_key, fingerprint, get_public_key, private_add,
    public_add, SECP256K1,
};
pub use types::{PrivateKey, PublicKey};
