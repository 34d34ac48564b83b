//! Hash primitives consumed by key derivation, encoding and mnemonics.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use tiny_keccak::{Hasher, Keccak};

use crate::error::HdError;

type HmacSha512 = Hmac<Sha512>;

/// BIP-39 seed stretching rounds.
pub const PBKDF2_ROUNDS: u32 = 2048;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice; the Base58Check checksum source.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of the SHA-256 digest, used for key fingerprints.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64], HdError> {
    let mut mac = HmacSha512::new_from_slice(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// PBKDF2-HMAC-SHA512 with the BIP-39 parameters (2048 rounds, 64-byte output).
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8]) -> [u8; 64] {
    let mut output = [0u8; 64];
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, PBKDF2_ROUNDS, &mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DATA: &[u8] = b"this is the data I want to hash";

    #[test]
    fn sha256_known_values() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(sha256(TEST_DATA)),
            "f88eec7ecabf88f9a64c4100cac1e0c0c4581100492137d1b656ea626cad63e3"
        );
    }

    #[test]
    fn sha256d_known_value() {
        assert_eq!(
            hex::encode(sha256d(TEST_DATA)),
            "2209ddda5914a3fbad507ff2284c4b6e559c18a669f9fc3ad3b5826a2a999d58"
        );
    }

    #[test]
    fn hash160_known_values() {
        assert_eq!(
            hex::encode(hash160(b"")),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
        assert_eq!(
            hex::encode(hash160(TEST_DATA)),
            "e7fb13ef86fef4203f042fbfc2703fa628301e90"
        );
    }

    #[test]
    fn hmac_sha512_rfc4231_case_1() {
        let key = hex::decode("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b").unwrap();
        let mac = hmac_sha512(&key, b"Hi There").unwrap();
        assert_eq!(
            hex::encode(mac),
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
             daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
    }

    #[test]
    fn keccak256_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn pbkdf2_matches_bip39_seed() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let seed = pbkdf2_sha512(phrase.as_bytes(), b"mnemonic");
        assert_eq!(
            hex::encode(seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }
}
