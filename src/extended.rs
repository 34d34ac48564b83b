//! The 78-byte extended key layout and its Base58Check string form.
//!
//! `version(4) || depth(1) || parent_fingerprint(4) || index(4) || chain_code(32) || key(33)`

use crate::base58;
use crate::error::HdError;
use crate::util::{copy_array, read_u32_be};

pub const PUBLIC_KEY_VERSION: u32 = 0x0488_B21E;
pub const PRIVATE_KEY_VERSION: u32 = 0x0488_ADE4;
pub const EXTENDED_KEY_LEN: usize = 78;

const DEPTH_OFFSET: usize = 4;
const PARENT_FINGERPRINT_OFFSET: usize = 5;
const INDEX_OFFSET: usize = 9;
const CHAIN_CODE_OFFSET: usize = 13;
const KEY_OFFSET: usize = 45;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtendedKeyVersion {
    Public,
    Private,
}

impl ExtendedKeyVersion {
    pub fn from_u32(version: u32) -> Result<Self, HdError> {
        match version {
            PUBLIC_KEY_VERSION => Ok(Self::Public),
            PRIVATE_KEY_VERSION => Ok(Self::Private),
            other => Err(HdError::InvalidExtendedKeyVersion(other)),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Public => PUBLIC_KEY_VERSION,
            Self::Private => PRIVATE_KEY_VERSION,
        }
    }
}

/// Fields of a decoded extended key. `key` is the raw 33-byte key slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ExtendedKeyData {
    pub version: ExtendedKeyVersion,
    pub depth: u8,
    pub parent_fingerprint: u32,
    pub index: u32,
    pub chain_code: [u8; 32],
    pub key: [u8; 33],
}

impl ExtendedKeyData {
    pub fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(EXTENDED_KEY_LEN);
        payload.extend_from_slice(&self.version.to_u32().to_be_bytes());
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint.to_be_bytes());
        payload.extend_from_slice(&self.index.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.extend_from_slice(&self.key);
        base58::check_encode(&payload)
    }

    pub fn decode(encoded: &str) -> Result<Self, HdError> {
        let payload = base58::check_decode(encoded)?;
        if payload.len() != EXTENDED_KEY_LEN {
            return Err(HdError::InvalidExtendedKeyLength(payload.len()));
        }

        let field = |offset| {
            read_u32_be(&payload, offset).ok_or(HdError::InvalidExtendedKeyLength(payload.len()))
        };
        let version = ExtendedKeyVersion::from_u32(field(0)?)?;
        let parent_fingerprint = field(PARENT_FINGERPRINT_OFFSET)?;
        let index = field(INDEX_OFFSET)?;
        let chain_code = copy_array(&payload[CHAIN_CODE_OFFSET..KEY_OFFSET])
            .ok_or(HdError::InvalidChainCode(KEY_OFFSET - CHAIN_CODE_OFFSET))?;
        let key = copy_array(&payload[KEY_OFFSET..])
            .ok_or(HdError::InvalidExtendedKeyLength(payload.len()))?;

        Ok(Self {
            version,
            depth: payload[DEPTH_OFFSET],
            parent_fingerprint,
            index,
            chain_code,
            key,
        })
    }
}

/// Whether `encoded` is a well-formed extended key: valid checksum, 78
/// bytes and a known version.
pub fn is_extended_key(encoded: &str) -> bool {
    ExtendedKeyData::decode(encoded).is_ok()
}

/// The version of an extended key, without validating the remaining fields.
pub fn extended_key_version(encoded: &str) -> Result<ExtendedKeyVersion, HdError> {
    let payload = base58::check_decode(encoded)?;
    let version = read_u32_be(&payload, 0).ok_or(HdError::InvalidExtendedKeyLength(payload.len()))?;
    ExtendedKeyVersion::from_u32(version)
}
