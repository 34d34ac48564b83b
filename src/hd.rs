use std::borrow::Cow;

use tracing::{debug, trace, warn};

use crate::error::HdError;
use crate::extended::{ExtendedKeyData, ExtendedKeyVersion};
use crate::hash::hmac_sha512;
use crate::mnemonic::Mnemonic;
use crate::path::{get_index, DerivationPath, HARDENED_OFFSET};
use crate::types::{PrivateKey, PublicKey};
use crate::util::{copy_array, ser32};

/// HMAC key for master node generation.
pub const MASTER_KEY: &[u8] = b"Bitcoin seed";

const CHAIN_CODE_LEN: usize = 32;

/// Public key and chain code of a node, both hex encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExtendedPublicKey {
    pub public_key: String,
    pub chain_code: String,
}

fn split_digest(digest: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&digest[..32]);
    right.copy_from_slice(&digest[32..]);
    (left, right)
}

/// A BIP-32 node. Immutable; derivation returns new nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HdNode {
    depth: u8,
    index: u32,
    chain_code: [u8; CHAIN_CODE_LEN],
    public_key: PublicKey,
    private_key: Option<PrivateKey>,
    parent_fingerprint: u32,
    fingerprint: u32,
}

impl HdNode {
    fn new(
        depth: u8,
        index: u32,
        chain_code: [u8; CHAIN_CODE_LEN],
        public_key: PublicKey,
        private_key: Option<PrivateKey>,
        parent_fingerprint: u32,
    ) -> Self {
        let fingerprint = public_key.fingerprint();
        Self {
            depth,
            index,
            chain_code,
            public_key,
            private_key,
            parent_fingerprint,
            fingerprint,
        }
    }

    /// Master node for an arbitrary seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self, HdError> {
        let digest = hmac_sha512(MASTER_KEY, seed)?;
        let (left, chain_code) = split_digest(&digest);
        let private_key = PrivateKey::from_bytes(&left)?;
        let public_key = private_key.public_key()?;

        trace!(fingerprint = public_key.fingerprint(), "created master node from seed");
        Ok(Self::new(0, 0, chain_code, public_key, Some(private_key), 0))
    }

    /// Master node for a validated BIP-39 phrase and optional passphrase.
    pub fn from_mnemonic_phrase(phrase: &str, passphrase: &str) -> Result<Self, HdError> {
        let mnemonic = Mnemonic::from_phrase(phrase)?;
        Self::from_seed(&mnemonic.seed(passphrase))
    }

    /// Parses an `xpub...` or `xprv...` string. A private key's public key
    /// is recomputed, never read from the input.
    pub fn from_extended_key(encoded: &str) -> Result<Self, HdError> {
        Self::parse_extended_key(encoded).map_err(|err| {
            debug!(error = %err, "rejected extended key");
            err
        })
    }

    fn parse_extended_key(encoded: &str) -> Result<Self, HdError> {
        let data = ExtendedKeyData::decode(encoded)?;
        let (public_key, private_key) = match data.version {
            ExtendedKeyVersion::Private => {
                if data.key[0] != 0 {
                    return Err(HdError::InvalidPrivateKey(
                        "missing zero prefix in key slot".into(),
                    ));
                }
                let private_key = PrivateKey::from_bytes(&data.key[1..])?;
                (private_key.public_key()?, Some(private_key))
            }
            ExtendedKeyVersion::Public => (PublicKey::from_bytes(&data.key)?, None),
        };

        trace!(depth = data.depth, index = data.index, "created node from extended key");
        Ok(Self::new(
            data.depth,
            data.index,
            data.chain_code,
            public_key,
            private_key,
            data.parent_fingerprint,
        ))
    }

    /// Public-only node from a parent and child public key pair. The child's
    /// index comes from the last level of `path` and its depth from the
    /// number of levels. A leading `m/` is optional.
    ///
    /// The root marker is not a level: `m/0'/1` and `0'/1` both give depth 2.
    pub fn from_parent_child_key(
        path: &str,
        parent: &ExtendedPublicKey,
        child: &ExtendedPublicKey,
    ) -> Result<Self, HdError> {
        let levels = path
            .strip_prefix("m/")
            .or_else(|| path.strip_prefix("M/"))
            .unwrap_or(path)
            .split('/')
            .map(get_index)
            .collect::<Result<Vec<_>, _>>()?;
        let index = *levels
            .last()
            .ok_or_else(|| HdError::InvalidPath(path.into()))?;
        let depth = u8::try_from(levels.len())
            .map_err(|_| HdError::InvalidPath(format!("too many levels in `{path}`")))?;

        let public_key = PublicKey::from_hex(&child.public_key)?;
        let chain_code_bytes = hex::decode(&child.chain_code)?;
        let chain_code = copy_array(&chain_code_bytes)
            .ok_or(HdError::InvalidChainCode(chain_code_bytes.len()))?;
        let parent_fingerprint = PublicKey::from_hex(&parent.public_key)?.fingerprint();

        trace!(depth, index, "created node from parent and child keys");
        Ok(Self::new(
            depth,
            index,
            chain_code,
            public_key,
            None,
            parent_fingerprint,
        ))
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn chain_code(&self) -> &[u8; CHAIN_CODE_LEN] {
        &self.chain_code
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn parent_fingerprint(&self) -> u32 {
        self.parent_fingerprint
    }

    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    /// This node without its private key.
    pub fn neuter(&self) -> Self {
        Self {
            private_key: None,
            ..self.clone()
        }
    }

    /// The public key and chain code in hex, as accepted by
    /// [`HdNode::from_parent_child_key`].
    pub fn to_extended_public_key_pair(&self) -> ExtendedPublicKey {
        ExtendedPublicKey {
            public_key: self.public_key.to_string(),
            chain_code: hex::encode(self.chain_code),
        }
    }

    pub fn extended_public_key(&self) -> String {
        self.serialise(ExtendedKeyVersion::Public, self.public_key.to_bytes())
    }

    pub fn extended_private_key(&self) -> Result<String, HdError> {
        let private_key = self.private_key.as_ref().ok_or(HdError::NoPrivateKey)?;
        let mut key = [0u8; 33];
        key[1..].copy_from_slice(private_key.as_bytes());
        Ok(self.serialise(ExtendedKeyVersion::Private, key))
    }

    /// Checksummed address of this node's public key.
    pub fn address(&self) -> Result<String, HdError> {
        self.public_key.address()
    }

    /// Derives the node at `path`. `m` and `M` return this node itself.
    pub fn derive(&self, path: &str) -> Result<Cow<'_, HdNode>, HdError> {
        if path.eq_ignore_ascii_case("m") {
            return Ok(Cow::Borrowed(self));
        }
        let path: DerivationPath = path.parse()?;
        self.derive_path(&path).map(Cow::Owned)
    }

    pub fn derive_path(&self, path: &DerivationPath) -> Result<HdNode, HdError> {
        let mut children = path.iter();
        let Some(first) = children.next() else {
            return Ok(self.clone());
        };
        let mut current = self.derive_child(first.value())?;
        for child in children {
            current = current.derive_child(child.value())?;
        }
        Ok(current)
    }

    /// Derives the child at a raw index; indices from `0x80000000` are hardened.
    ///
    /// When the tweak for an index yields an invalid key, the next index is
    /// used instead and the returned node carries that index.
    pub fn derive_child(&self, index: u32) -> Result<HdNode, HdError> {
        self.derive_child_with(index, |_, tweak| self.tweak_keys(tweak))
    }

    fn derive_child_with<F>(&self, index: u32, tweak_keys: F) -> Result<HdNode, HdError>
    where
        F: Fn(u32, &[u8; 32]) -> Result<(PublicKey, Option<PrivateKey>), HdError>,
    {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(HdError::MaxDepthExceeded)?;

        for candidate in index..=u32::MAX {
            let data = self.child_data(candidate)?;
            let digest = hmac_sha512(&self.chain_code, &data)?;
            let (tweak, chain_code) = split_digest(&digest);

            match tweak_keys(candidate, &tweak) {
                Ok((public_key, private_key)) => {
                    trace!(depth, index = candidate, "derived child node");
                    return Ok(HdNode::new(
                        depth,
                        candidate,
                        chain_code,
                        public_key,
                        private_key,
                        self.fingerprint,
                    ));
                }
                Err(err) => {
                    warn!(index = candidate, error = %err, "invalid child key, deriving next index");
                }
            }
        }
        Err(HdError::ChildIndexExhausted)
    }

    fn child_data(&self, index: u32) -> Result<Vec<u8>, HdError> {
        let mut data = Vec::with_capacity(37);
        if index >= HARDENED_OFFSET {
            let private_key = self
                .private_key
                .as_ref()
                .ok_or(HdError::NoPrivateKeyForHardened)?;
            data.push(0x00);
            data.extend_from_slice(private_key.as_bytes());
        } else {
            data.extend_from_slice(self.public_key.as_bytes());
        }
        data.extend_from_slice(&ser32(index));
        Ok(data)
    }

    fn tweak_keys(&self, tweak: &[u8; 32]) -> Result<(PublicKey, Option<PrivateKey>), HdError> {
        match &self.private_key {
            Some(private_key) => {
                let child = private_key.tweak_add(tweak)?;
                Ok((child.public_key()?, Some(child)))
            }
            None => Ok((self.public_key.tweak_add(tweak)?, None)),
        }
    }

    fn serialise(&self, version: ExtendedKeyVersion, key: [u8; 33]) -> String {
        ExtendedKeyData {
            version,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            index: self.index,
            chain_code: self.chain_code,
            key,
        }
        .encode()
    }
}
