use std::fmt;

use crate::address::get_address;
use crate::error::HdError;
use crate::secp256k1::{
    self, COMPRESSED_PUBLIC_KEY_LEN, PRIVATE_KEY_LEN, UNCOMPRESSED_PUBLIC_KEY_LEN,
};
use crate::util::copy_array;

/// A secp256k1 scalar in `[1, n)`, big-endian.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; PRIVATE_KEY_LEN]);

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HdError> {
        secp256k1::private_key_scalar(bytes)?;
        let key = copy_array(bytes).ok_or_else(|| {
            HdError::InvalidPrivateKey(format!("expected {PRIVATE_KEY_LEN} bytes"))
        })?;
        Ok(Self(key))
    }

    pub fn from_hex(encoded: &str) -> Result<Self, HdError> {
        Self::from_bytes(&hex::decode(encoded)?)
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.0
    }

    pub fn public_key(&self) -> Result<PublicKey, HdError> {
        Ok(PublicKey(secp256k1::get_public_key(&self.0)?))
    }

    pub fn tweak_add(&self, tweak: &[u8]) -> Result<Self, HdError> {
        Ok(Self(secp256k1::private_add(&self.0, tweak)?))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// A secp256k1 public key held in compressed SEC1 form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; COMPRESSED_PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Accepts any SEC1 encoding and normalizes it to compressed form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HdError> {
        Ok(Self(secp256k1::compress_public_key(bytes)?))
    }

    pub fn from_hex(encoded: &str) -> Result<Self, HdError> {
        Self::from_bytes(&hex::decode(encoded)?)
    }

    pub fn to_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn to_uncompressed(&self) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LEN], HdError> {
        secp256k1::decompress_public_key(&self.0)
    }

    pub fn tweak_add(&self, tweak: &[u8]) -> Result<Self, HdError> {
        Ok(Self(secp256k1::public_add(&self.0, tweak)?))
    }

    pub fn fingerprint(&self) -> u32 {
        secp256k1::fingerprint(&self.0)
    }

    pub fn address(&self) -> Result<String, HdError> {
        get_address(&self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
