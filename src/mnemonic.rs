//! BIP-39 mnemonic phrases over the English wordlist.

use std::fmt;

use bip39::Language;
use rand::{rngs::OsRng, RngCore};
use unicode_normalization::UnicodeNormalization;

use crate::error::HdError;
use crate::hash::pbkdf2_sha512;

pub const SEED_LEN: usize = 64;
pub const WORDLIST_LEN: usize = 2048;

const MIN_ENTROPY_BITS: usize = 128;
const MAX_ENTROPY_BITS: usize = 256;
const SALT_PREFIX: &str = "mnemonic";

fn normalize(text: &str) -> String {
    text.nfkd().collect()
}

fn parse(phrase: &str) -> Result<bip39::Mnemonic, HdError> {
    Ok(bip39::Mnemonic::parse_in_normalized(
        Language::English,
        &normalize(phrase),
    )?)
}

/// The English word at `index`, if `index < 2048`.
pub fn word(index: usize) -> Option<&'static str> {
    Language::English.word_list().get(index).copied()
}

/// Position of `word` in the English wordlist.
pub fn index_of(word: &str) -> Option<u16> {
    Language::English
        .word_list()
        .binary_search_by(|probe| (*probe).cmp(word))
        .ok()
        .and_then(|index| u16::try_from(index).ok())
}

/// A fresh phrase backed by `bits` of OS randomness. `bits` must be a
/// multiple of 32 between 128 and 256.
pub fn generate_mnemonic(bits: usize) -> Result<String, HdError> {
    if !(MIN_ENTROPY_BITS..=MAX_ENTROPY_BITS).contains(&bits) || bits % 32 != 0 {
        return Err(HdError::InvalidEntropySize(bits));
    }

    let mut entropy = [0u8; MAX_ENTROPY_BITS / 8];
    OsRng.fill_bytes(&mut entropy[..bits / 8]);
    entropy_to_mnemonic(&entropy[..bits / 8])
}

pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String, HdError> {
    let bits = entropy.len() * 8;
    if !(MIN_ENTROPY_BITS..=MAX_ENTROPY_BITS).contains(&bits) || bits % 32 != 0 {
        return Err(HdError::InvalidEntropySize(bits));
    }
    let mnemonic = bip39::Mnemonic::from_entropy_in(Language::English, entropy)?;
    Ok(mnemonic.to_string())
}

/// Recovers the entropy behind a phrase, verifying word count, words and checksum.
pub fn mnemonic_to_entropy(phrase: &str) -> Result<Vec<u8>, HdError> {
    Ok(parse(phrase)?.to_entropy())
}

pub fn is_valid_mnemonic(phrase: &str) -> bool {
    parse(phrase).is_ok()
}

/// PBKDF2 seed for a phrase. The phrase is not validated.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> [u8; SEED_LEN] {
    let password = normalize(phrase);
    let salt = normalize(&format!("{SALT_PREFIX}{passphrase}"));
    pbkdf2_sha512(password.as_bytes(), salt.as_bytes())
}

/// A phrase that passed validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    pub fn from_phrase(phrase: &str) -> Result<Self, HdError> {
        Ok(Self {
            inner: parse(phrase)?,
        })
    }

    pub fn from_entropy(entropy: &[u8]) -> Result<Self, HdError> {
        Self::from_phrase(&entropy_to_mnemonic(entropy)?)
    }

    pub fn generate(bits: usize) -> Result<Self, HdError> {
        Self::from_phrase(&generate_mnemonic(bits)?)
    }

    pub fn phrase(&self) -> String {
        self.inner.to_string()
    }

    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.words()
    }

    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    pub fn entropy(&self) -> Vec<u8> {
        self.inner.to_entropy()
    }

    pub fn seed(&self, passphrase: &str) -> [u8; SEED_LEN] {
        mnemonic_to_seed(&self.phrase(), passphrase)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .finish_non_exhaustive()
    }
}
